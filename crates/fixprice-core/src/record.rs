use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A product captured from the Fix Price buyer API, normalized into the
/// schema-stable shape emitted to the record sink.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CanonicalProduct {
    /// Wall-clock instant at which the record was normalized. Not a field
    /// from the source document.
    pub timestamp: DateTime<Utc>,
    /// Fix Price numeric product identifier.
    pub rpc: i64,
    /// Canonical storefront URL, e.g.
    /// `"https://fix-price.com/catalog/p-1234-chashka"`.
    pub url: String,
    pub title: String,
    /// Brand title; empty string when the source document carries no brand
    /// object.
    pub brand: String,
    pub price_data: PriceData,
    pub stock: StockInfo,
    pub assets: Assets,
    /// Localized label → value pairs (description, country of origin,
    /// dimensions, barcode). Entries are present only when the source field
    /// exists; the description entry is always present.
    pub metadata: BTreeMap<String, String>,
    /// Total number of variants on the source document, including the
    /// primary one. Zero when the variants list is empty.
    pub variant_count: usize,
}

impl CanonicalProduct {
    /// Returns `true` when a discount was derived for this product.
    #[must_use]
    pub fn is_on_sale(&self) -> bool {
        self.price_data.sale_tag.is_some()
    }

    /// Returns `true` when the product carries at least one image.
    #[must_use]
    pub fn has_images(&self) -> bool {
        !self.assets.images.is_empty()
    }
}

/// Price fields read from the primary variant.
///
/// `sale_tag` is present only when both `current` and `original` are present
/// and `current < original`; its value is the localized discount string with
/// the percentage rounded to two decimal places.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PriceData {
    /// Current (possibly discounted) price. Absent when the source field is
    /// null or zero.
    ///
    /// Boundary note: prices are scrape-time `f64` convenience values;
    /// downstream consumers that need exact decimals should convert at
    /// their own boundary.
    pub current: Option<f64>,
    /// Pre-discount price from the source `fixPrice` field.
    pub original: Option<f64>,
    pub sale_tag: Option<String>,
}

/// Availability derived from the primary variant's `count` field.
///
/// `count == 0` whenever `in_stock == false`; `in_stock` is `true` iff the
/// source count was non-zero.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StockInfo {
    pub in_stock: bool,
    pub count: u32,
}

/// Image and video references collected from the source document.
///
/// `main_image` equals the first entry of `images` when any image exists,
/// and is absent otherwise.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Assets {
    pub main_image: Option<String>,
    /// All image source URLs in document order.
    pub images: Vec<String>,
    /// Copied from the source `video` field when present and non-empty.
    pub video: Option<Vec<String>>,
}
