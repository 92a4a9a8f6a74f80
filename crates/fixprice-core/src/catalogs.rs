use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// One crawl seed: a full storefront catalog URL, e.g.
/// `"https://fix-price.com/catalog/dlya-doma/tovary-dlya-uborki"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogSeed {
    pub url: String,
}

#[derive(Debug, Deserialize)]
pub struct CatalogsFile {
    pub catalogs: Vec<CatalogSeed>,
}

/// Load and validate the catalog seed list from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_catalogs(path: &Path) -> Result<CatalogsFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::CatalogsFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let catalogs_file: CatalogsFile = serde_yaml::from_str(&content)?;

    validate_catalogs(&catalogs_file)?;

    Ok(catalogs_file)
}

fn validate_catalogs(catalogs_file: &CatalogsFile) -> Result<(), ConfigError> {
    if catalogs_file.catalogs.is_empty() {
        return Err(ConfigError::Validation(
            "catalogs list must not be empty".to_string(),
        ));
    }

    let mut seen_urls = HashSet::new();
    for seed in &catalogs_file.catalogs {
        let trimmed = seed.url.trim();
        if trimmed.is_empty() {
            return Err(ConfigError::Validation(
                "catalog url must be non-empty".to_string(),
            ));
        }

        if !seen_urls.insert(trimmed.to_string()) {
            return Err(ConfigError::Validation(format!(
                "duplicate catalog url: '{trimmed}'"
            )));
        }
    }

    Ok(())
}
