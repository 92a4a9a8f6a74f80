use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("rate limited by {domain} (retry after {retry_after_secs}s)")]
    RateLimited {
        domain: String,
        retry_after_secs: u64,
    },

    #[error("endpoint not found: {url}")]
    NotFound { url: String },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("malformed product document {context}: {reason}")]
    MalformedProduct { context: String, reason: String },

    #[error("pagination limit reached for category {category}: exceeded {max_pages} pages")]
    PaginationLimit { category: String, max_pages: u32 },

    #[error("invalid catalog URL \"{url}\": {reason}")]
    InvalidCatalogUrl { url: String, reason: String },

    #[error("invalid API base URL \"{url}\": {reason}")]
    InvalidApiBase { url: String, reason: String },

    #[error("invalid value for outbound header {header}: {reason}")]
    InvalidHeader { header: String, reason: String },
}
