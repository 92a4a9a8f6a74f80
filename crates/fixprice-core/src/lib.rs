pub mod app_config;
pub mod catalogs;
pub mod config;
pub mod record;

use thiserror::Error;

pub use app_config::AppConfig;
pub use catalogs::{load_catalogs, CatalogSeed, CatalogsFile};
pub use config::{load_app_config, load_app_config_from_env};
pub use record::{Assets, CanonicalProduct, PriceData, StockInfo};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read catalogs file {path}: {source}")]
    CatalogsFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse catalogs file: {0}")]
    CatalogsFileParse(#[from] serde_yaml::Error),

    #[error("catalogs validation failed: {0}")]
    Validation(String),
}
