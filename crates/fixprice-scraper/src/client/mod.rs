//! HTTP client for the Fix Price buyer API.

mod crawl;

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::error::ScraperError;
use crate::rate_limit::retry_with_backoff;
use crate::types::{ProductSummary, RawProduct};

pub use crawl::CategoryCrawl;

/// Category listings are requested in best-seller order, matching the
/// storefront's default sorting.
const CATEGORY_SORT: &str = "sold";

/// Connection parameters and static outbound headers for [`FixPriceClient`].
///
/// Built once from application configuration; the buyer API authenticates
/// requests with the `X-Key` header and selects a store region with
/// `X-City`, so both travel on every request.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Buyer API base, e.g. `"https://api.fix-price.com/buyer/v1"`.
    pub api_base_url: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    /// Two-letter language code sent as `X-Language` and used to build the
    /// `Accept-Language` value.
    pub language: String,
    pub city_id: String,
    pub api_key: Option<String>,
    /// Maximum number of retry attempts after the first failure.
    pub max_retries: u32,
    /// Base delay in seconds for exponential backoff: `backoff_base_secs * 2^attempt`.
    pub backoff_base_secs: u64,
}

/// HTTP client for the Fix Price buyer API.
///
/// Category pages are fetched with POST (the API rejects GET on the listing
/// endpoint), product details with GET. Rate limiting (429), not-found (404)
/// and other non-2xx responses surface as typed errors; transient failures
/// are retried with exponential backoff up to `max_retries` attempts.
#[derive(Debug)]
pub struct FixPriceClient {
    pub(super) client: Client,
    api_base_url: String,
    max_retries: u32,
    backoff_base_secs: u64,
}

impl FixPriceClient {
    /// Creates a `FixPriceClient` with configured timeout, headers, and retry
    /// policy.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::InvalidHeader`] if a configured header value
    /// is not valid HTTP header text, or [`ScraperError::Http`] if the
    /// underlying `reqwest::Client` cannot be constructed.
    pub fn new(config: &ClientConfig) -> Result<Self, ScraperError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(&config.user_agent)
            .default_headers(Self::default_headers(config)?)
            .build()?;
        Ok(Self {
            client,
            api_base_url: config.api_base_url.trim_end_matches('/').to_owned(),
            max_retries: config.max_retries,
            backoff_base_secs: config.backoff_base_secs,
        })
    }

    fn default_headers(config: &ClientConfig) -> Result<HeaderMap, ScraperError> {
        let value = |header: &str, raw: &str| -> Result<HeaderValue, ScraperError> {
            HeaderValue::from_str(raw).map_err(|e| ScraperError::InvalidHeader {
                header: header.to_owned(),
                reason: e.to_string(),
            })
        };

        let mut headers = HeaderMap::new();
        headers.insert("X-Language", value("X-Language", &config.language)?);
        let accept_language = format!(
            "{lang}-{region},{lang};q=0.9",
            lang = config.language,
            region = config.language.to_uppercase()
        );
        headers.insert(
            reqwest::header::ACCEPT_LANGUAGE,
            value("Accept-Language", &accept_language)?,
        );
        headers.insert("X-City", value("X-City", &config.city_id)?);
        if let Some(api_key) = &config.api_key {
            headers.insert("X-Key", value("X-Key", api_key)?);
        }
        Ok(headers)
    }

    /// Fetches one category listing page, with automatic retry on transient
    /// errors. The returned list length drives the caller's full/short page
    /// decision.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::RateLimited`] — HTTP 429 after all retries exhausted.
    /// - [`ScraperError::NotFound`] — HTTP 404 (not retried).
    /// - [`ScraperError::UnexpectedStatus`] — any other non-2xx status.
    /// - [`ScraperError::Http`] — network failure after all retries exhausted.
    /// - [`ScraperError::Deserialize`] — body is not a JSON array of product
    ///   summaries (not retried).
    pub async fn fetch_category_page(
        &self,
        category: &str,
        page: u32,
        page_size: u32,
    ) -> Result<Vec<ProductSummary>, ScraperError> {
        let url = Self::category_page_url(&self.api_base_url, category, page, page_size)?;

        retry_with_backoff(self.max_retries, self.backoff_base_secs, || {
            let url = url.clone();
            async move {
                let response = self.client.post(&url).send().await?;
                decode_response(response, &url, &format!("category {category} page {page}")).await
            }
        })
        .await
    }

    /// Fetches one product detail document, with automatic retry on
    /// transient errors.
    ///
    /// # Errors
    ///
    /// Same taxonomy as [`Self::fetch_category_page`]; `Deserialize` here
    /// means the body is not a product detail object.
    pub async fn fetch_product_detail(
        &self,
        relative_url: &str,
    ) -> Result<RawProduct, ScraperError> {
        let url = Self::product_detail_url(&self.api_base_url, relative_url);

        retry_with_backoff(self.max_retries, self.backoff_base_secs, || {
            let url = url.clone();
            async move {
                let response = self.client.get(&url).send().await?;
                decode_response(response, &url, &format!("product detail {relative_url}")).await
            }
        })
        .await
    }

    /// Builds the listing URL for a category page:
    /// `<api_base>/product/in/<category>?page=<page>&limit=<page_size>&sort=sold`.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::InvalidApiBase`] if the configured base does
    /// not form a valid URL.
    fn category_page_url(
        api_base_url: &str,
        category: &str,
        page: u32,
        page_size: u32,
    ) -> Result<String, ScraperError> {
        let base = format!("{api_base_url}/product/in/{category}");
        let mut url = reqwest::Url::parse(&base).map_err(|e| ScraperError::InvalidApiBase {
            url: api_base_url.to_owned(),
            reason: e.to_string(),
        })?;

        url.query_pairs_mut()
            .append_pair("page", &page.to_string())
            .append_pair("limit", &page_size.to_string())
            .append_pair("sort", CATEGORY_SORT);

        Ok(url.to_string())
    }

    /// Builds the detail URL for a discovered product:
    /// `<api_base>/product/<relative_url>`.
    fn product_detail_url(api_base_url: &str, relative_url: &str) -> String {
        format!("{api_base_url}/product/{relative_url}")
    }
}

/// Maps response status to typed errors and decodes the JSON body.
async fn decode_response<T: DeserializeOwned>(
    response: reqwest::Response,
    url: &str,
    context: &str,
) -> Result<T, ScraperError> {
    let status = response.status();

    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
        let retry_after_secs = response
            .headers()
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(60);

        return Err(ScraperError::RateLimited {
            domain: extract_domain(url),
            retry_after_secs,
        });
    }

    if status == reqwest::StatusCode::NOT_FOUND {
        return Err(ScraperError::NotFound {
            url: url.to_owned(),
        });
    }

    if !status.is_success() {
        return Err(ScraperError::UnexpectedStatus {
            status: status.as_u16(),
            url: url.to_owned(),
        });
    }

    let body = response.text().await?;
    serde_json::from_str::<T>(&body).map_err(|e| ScraperError::Deserialize {
        context: context.to_owned(),
        source: e,
    })
}

/// Extracts the hostname from a request URL for use in error messages.
///
/// Falls back to the full URL string if parsing fails.
fn extract_domain(url: &str) -> String {
    reqwest::Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_owned))
        .unwrap_or_else(|| url.to_owned())
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
