pub mod client;
pub mod error;
pub mod normalize;
pub mod pagination;
pub mod rate_limit;
pub mod seed;
pub mod types;

pub use client::{CategoryCrawl, ClientConfig, FixPriceClient};
pub use error::ScraperError;
pub use normalize::{LocaleLabels, Normalizer};
pub use pagination::{page_is_full, PageCursor};
pub use seed::extract_category;
pub use types::{ProductRef, ProductSummary, RawProduct, RawVariant};
