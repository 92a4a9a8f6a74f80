//! Normalization from raw Fix Price detail documents to
//! [`fixprice_core::CanonicalProduct`].
//!
//! All variant-level fields (prices, stock, dimensions) are read from the
//! primary variant — the first entry of the document's variants list. The
//! derivation rules are conditional throughout: absent or falsy source
//! fields produce absent record fields, never defaults.

use std::collections::BTreeMap;

use chrono::Utc;
use fixprice_core::{Assets, CanonicalProduct, PriceData, StockInfo};

use crate::error::ScraperError;
use crate::types::{RawProduct, RawVariant};

/// Localized labels used for metadata keys and the discount tag.
///
/// The defaults mirror the labels the storefront itself renders, including
/// the upstream spelling of the length label.
#[derive(Debug, Clone)]
pub struct LocaleLabels {
    pub description: String,
    pub country_of_origin: String,
    pub width: String,
    pub height: String,
    pub length: String,
    pub weight: String,
    pub barcode: String,
    /// Prefix of the sale tag, completed with the rounded percentage.
    pub discount_prefix: String,
}

impl Default for LocaleLabels {
    fn default() -> Self {
        Self {
            description: "__description".to_string(),
            country_of_origin: "СТРАНА ПРОИЗВОДСТВА".to_string(),
            width: "ШИРИНА".to_string(),
            height: "ВЫСОТА".to_string(),
            length: "ДЛИННА".to_string(),
            weight: "ВЕС".to_string(),
            barcode: "ШТРИХ-КОД".to_string(),
            discount_prefix: "Скидка".to_string(),
        }
    }
}

/// Turns raw product detail documents into canonical records.
pub struct Normalizer {
    site_base_url: String,
    labels: LocaleLabels,
}

impl Normalizer {
    /// Creates a normalizer that builds storefront links under
    /// `site_base_url` and writes metadata under `labels`.
    #[must_use]
    pub fn new(site_base_url: &str, labels: LocaleLabels) -> Self {
        Self {
            site_base_url: site_base_url.trim_end_matches('/').to_owned(),
            labels,
        }
    }

    /// Normalizes one raw detail document into a [`CanonicalProduct`],
    /// stamping the current wall-clock time as the capture instant.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::MalformedProduct`] when the document lacks
    /// its identifier, URL slug, title, or the variants key entirely. An
    /// *empty* variants list is valid: the record is emitted with
    /// `variant_count = 0` and without price or dimension fields.
    pub fn normalize(&self, raw: RawProduct) -> Result<CanonicalProduct, ScraperError> {
        let context = raw
            .url
            .clone()
            .or_else(|| raw.id.map(|id| id.to_string()))
            .unwrap_or_else(|| "<no identifier>".to_string());
        let malformed = |reason: &str| ScraperError::MalformedProduct {
            context: context.clone(),
            reason: reason.to_owned(),
        };

        let rpc = raw.id.ok_or_else(|| malformed("missing id"))?;
        let slug = raw.url.as_deref().ok_or_else(|| malformed("missing url"))?;
        let title = raw.title.clone().ok_or_else(|| malformed("missing title"))?;
        let variants = raw
            .variants
            .as_deref()
            .ok_or_else(|| malformed("missing variants key"))?;

        let url = format!("{}/{}", self.site_base_url, slug);
        let brand = raw
            .brand
            .as_ref()
            .and_then(|b| b.title.clone())
            .unwrap_or_default();

        let primary = variants.first();

        Ok(CanonicalProduct {
            timestamp: Utc::now(),
            rpc,
            url,
            title,
            brand,
            price_data: primary.map(|v| self.derive_prices(v)).unwrap_or_default(),
            stock: primary.map(derive_stock).unwrap_or_default(),
            assets: derive_assets(&raw),
            metadata: self.derive_metadata(&raw, primary),
            variant_count: variants.len(),
        })
    }

    /// Price derivation from the primary variant. Zero and null prices are
    /// both treated as absent; the sale tag requires both prices present
    /// with `current < original` — an absent original never participates in
    /// the comparison.
    fn derive_prices(&self, variant: &RawVariant) -> PriceData {
        let current = variant.price.filter(|p| *p != 0.0);
        let original = variant.fix_price.filter(|p| *p != 0.0);

        let sale_tag = match (current, original) {
            (Some(current), Some(original)) if current < original => {
                let pct = round2(100.0 * (1.0 - current / original));
                Some(format!("{} {pct}%", self.labels.discount_prefix))
            }
            _ => None,
        };

        PriceData {
            current,
            original,
            sale_tag,
        }
    }

    /// Builds the metadata map: the description entry is always present
    /// (empty string when the source field is missing); the first property's
    /// value lands under the country-of-origin label; dimension and barcode
    /// entries come from the primary variant, each only when its source
    /// field exists.
    fn derive_metadata(
        &self,
        raw: &RawProduct,
        primary: Option<&RawVariant>,
    ) -> BTreeMap<String, String> {
        let mut metadata = BTreeMap::new();
        metadata.insert(
            self.labels.description.clone(),
            raw.description.clone().unwrap_or_default(),
        );

        // Only the first property is copied; the upstream puts the country
        // of origin there and nothing else is consumed.
        if let Some(value) = raw.properties.first().and_then(|p| p.value.clone()) {
            metadata.insert(self.labels.country_of_origin.clone(), value);
        }

        if let Some(variant) = primary {
            let mut dimension = |label: &str, value: Option<f64>| {
                if let Some(value) = value {
                    metadata.insert(label.to_owned(), value.to_string());
                }
            };
            dimension(&self.labels.width, variant.width);
            dimension(&self.labels.height, variant.height);
            dimension(&self.labels.length, variant.length);
            dimension(&self.labels.weight, variant.weight);
            if let Some(barcode) = &variant.barcode {
                metadata.insert(self.labels.barcode.clone(), barcode.clone());
            }
        }

        metadata
    }
}

/// Stock derivation: `in_stock` is the truthiness of the source count,
/// and the recorded count is zero whenever the product is out of stock.
fn derive_stock(variant: &RawVariant) -> StockInfo {
    let count = variant.count.unwrap_or(0).max(0);
    StockInfo {
        in_stock: count > 0,
        count: u32::try_from(count).unwrap_or(u32::MAX),
    }
}

/// Asset collection: the main image is the first gallery entry when any
/// image exists; the video list is copied only when present and non-empty.
fn derive_assets(raw: &RawProduct) -> Assets {
    let images: Vec<String> = raw.images.iter().map(|i| i.src.clone()).collect();
    let main_image = images.first().cloned();
    let video = raw.video.clone().filter(|v| !v.is_empty());

    Assets {
        main_image,
        images,
        video,
    }
}

/// Rounds to two decimal places, half away from zero.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
