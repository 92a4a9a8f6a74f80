//! Category seed resolution from configured storefront catalog URLs.

use crate::error::ScraperError;

/// Path marker separating the storefront host from the category identifier.
const CATALOG_MARKER: &str = "/catalog/";

/// Extracts the category identifier from a full catalog URL.
///
/// Given `"https://fix-price.com/catalog/dlya-doma/tovary-dlya-uborki"`,
/// returns `"dlya-doma/tovary-dlya-uborki"` — the path segment used in all
/// subsequent buyer API calls for that category.
///
/// # Errors
///
/// Returns [`ScraperError::InvalidCatalogUrl`] when the URL carries no
/// `/catalog/` marker or nothing follows it. This is a configuration error:
/// the caller should abort startup rather than retry.
pub fn extract_category(catalog_url: &str) -> Result<String, ScraperError> {
    let (_, category) =
        catalog_url
            .split_once(CATALOG_MARKER)
            .ok_or_else(|| ScraperError::InvalidCatalogUrl {
                url: catalog_url.to_owned(),
                reason: format!("missing \"{CATALOG_MARKER}\" marker"),
            })?;

    let category = category.trim_end_matches('/');
    if category.is_empty() {
        return Err(ScraperError::InvalidCatalogUrl {
            url: catalog_url.to_owned(),
            reason: "no category follows the marker".to_owned(),
        });
    }

    Ok(category.to_owned())
}
