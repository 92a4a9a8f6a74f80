//! Fix Price buyer API response types.
//!
//! ## Observed shape from the live API (`api.fix-price.com/buyer/v1`)
//!
//! ### Category pages
//! `POST /product/in/<category>?page=N&limit=24&sort=sold` returns a **bare
//! JSON array** of product summaries — there is no `{"products": [...]}`
//! wrapper object. An empty array is the normal end-of-category signal.
//!
//! ### Product detail documents
//! `GET /product/<relative-url>` returns a single object. `id`, `url`,
//! `title` and the `variants` key are present on every well-formed document;
//! they are still modeled as optionals here so that a missing one surfaces
//! as a [`MalformedProduct`](crate::error::ScraperError::MalformedProduct)
//! during normalization rather than a blanket decode failure.
//!
//! ### Prices
//! `price` and `fixPrice` are plain JSON numbers on the variant. Both are
//! observed as `0` (not `null`) on some listed-but-unsellable items, so zero
//! is treated as "absent" throughout.
//!
//! ### `video`
//! Either `null` or an array of URL strings. Stores rarely populate it.
//!
//! ### `properties`
//! An array of `{title, value}` objects; the first entry is the country of
//! origin on every document observed so far.

use serde::Deserialize;

/// One entry of a category page listing.
#[derive(Debug, Deserialize)]
pub struct ProductSummary {
    /// Relative product URL, e.g. `"p-3084049-gubka-dlya-posudy"`. This is
    /// the only summary field the crawl consumes.
    pub url: String,

    /// Numeric product ID. Unused by the crawl but kept for log context.
    #[serde(default)]
    pub id: Option<i64>,

    #[serde(default)]
    pub title: Option<String>,
}

/// A discovered product awaiting its detail fetch.
///
/// Created by the product list parser from each category page entry and
/// consumed exactly once to build the detail request.
#[derive(Debug, Clone)]
pub struct ProductRef {
    pub category: String,
    pub relative_url: String,
}

/// A raw product detail document.
#[derive(Debug, Deserialize)]
pub struct RawProduct {
    /// Fix Price numeric product ID. Required; validated at normalization.
    #[serde(default)]
    pub id: Option<i64>,

    /// Relative storefront URL slug. Required; validated at normalization.
    #[serde(default)]
    pub url: Option<String>,

    /// Display name. Required; validated at normalization.
    #[serde(default)]
    pub title: Option<String>,

    /// Plain-text description. May be absent or empty; the metadata entry is
    /// emitted either way.
    #[serde(default)]
    pub description: Option<String>,

    /// Brand object; absent on unbranded goods.
    #[serde(default)]
    pub brand: Option<RawBrand>,

    /// All variants. `None` means the key itself was missing (malformed
    /// document); `Some(vec![])` is a valid variant-less product.
    #[serde(default)]
    pub variants: Option<Vec<RawVariant>>,

    /// Image gallery in document order.
    #[serde(default)]
    pub images: Vec<RawImage>,

    /// Video URLs, `null` on most documents.
    #[serde(default)]
    pub video: Option<Vec<String>>,

    /// Free-form attribute list; only the first entry is consumed.
    #[serde(default)]
    pub properties: Vec<RawProperty>,
}

/// Brand object nested in a detail document.
#[derive(Debug, Deserialize)]
pub struct RawBrand {
    #[serde(default)]
    pub title: Option<String>,
}

/// A single variant of a [`RawProduct`]. The first list entry is the primary
/// variant; all price, stock and dimension fields are read from it.
#[derive(Debug, Deserialize)]
pub struct RawVariant {
    /// Current price as a JSON number. `0` or `null` means no price.
    #[serde(default)]
    pub price: Option<f64>,

    /// Pre-discount price. `0` or `null` means no original price.
    #[serde(default, rename = "fixPrice")]
    pub fix_price: Option<f64>,

    /// Units in stock. `0` or `null` means out of stock.
    #[serde(default)]
    pub count: Option<i64>,

    #[serde(default)]
    pub width: Option<f64>,

    #[serde(default)]
    pub height: Option<f64>,

    #[serde(default)]
    pub length: Option<f64>,

    #[serde(default)]
    pub weight: Option<f64>,

    /// EAN barcode; observed as a string.
    #[serde(default)]
    pub barcode: Option<String>,
}

/// A product image reference.
#[derive(Debug, Deserialize)]
pub struct RawImage {
    /// Canonical CDN URL. Always present in observed responses.
    pub src: String,

    #[serde(default)]
    pub id: Option<i64>,
}

/// One `{title, value}` attribute pair from the detail document.
#[derive(Debug, Deserialize)]
pub struct RawProperty {
    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub value: Option<String>,
}
