use std::path::PathBuf;

#[derive(Clone)]
pub struct AppConfig {
    /// Base URL of the Fix Price buyer API, without a trailing slash.
    pub api_base_url: String,
    /// Base URL used to build canonical storefront links for emitted records.
    pub site_base_url: String,
    pub catalogs_path: PathBuf,
    pub log_level: String,
    /// Value of the outbound `X-Language` / `Accept-Language` headers.
    pub language: String,
    /// Value of the outbound `X-City` header (store region selector).
    pub city_id: String,
    /// Value of the outbound `X-Key` header; requests are sent without the
    /// header when unset.
    pub api_key: Option<String>,
    pub user_agent: String,
    /// Items per category page; a response with exactly this many items is
    /// treated as full and triggers the next page request.
    pub page_size: u32,
    /// Defensive cap on pages per category.
    pub max_pages: u32,
    pub request_timeout_secs: u64,
    pub max_retries: u32,
    pub retry_backoff_base_secs: u64,
    pub max_concurrent_categories: usize,
    pub max_concurrent_details: usize,
    pub inter_request_delay_ms: u64,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("api_base_url", &self.api_base_url)
            .field("site_base_url", &self.site_base_url)
            .field("catalogs_path", &self.catalogs_path)
            .field("log_level", &self.log_level)
            .field("language", &self.language)
            .field("city_id", &self.city_id)
            .field("api_key", &self.api_key.as_ref().map(|_| "[redacted]"))
            .field("user_agent", &self.user_agent)
            .field("page_size", &self.page_size)
            .field("max_pages", &self.max_pages)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("max_retries", &self.max_retries)
            .field("retry_backoff_base_secs", &self.retry_backoff_base_secs)
            .field(
                "max_concurrent_categories",
                &self.max_concurrent_categories,
            )
            .field("max_concurrent_details", &self.max_concurrent_details)
            .field("inter_request_delay_ms", &self.inter_request_delay_ms)
            .finish()
    }
}
