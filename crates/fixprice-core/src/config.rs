use std::path::PathBuf;

use crate::app_config::AppConfig;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if any configured value fails to parse.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files — useful for testing
/// or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if any configured value fails to parse.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual environment
/// so it can be tested with a pure `HashMap` lookup — no `set_var`/`remove_var` needed.
///
/// Every knob has a default; the crawler runs without any environment at all.
/// The `X-Key` header value is the only optional-with-no-default entry.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let api_base_url = or_default("FIXPRICE_API_BASE_URL", "https://api.fix-price.com/buyer/v1");
    let site_base_url = or_default("FIXPRICE_SITE_BASE_URL", "https://fix-price.com/catalog");
    let catalogs_path = PathBuf::from(or_default(
        "FIXPRICE_CATALOGS_PATH",
        "./config/catalogs.yaml",
    ));
    let log_level = or_default("FIXPRICE_LOG_LEVEL", "info");

    let language = or_default("FIXPRICE_LANGUAGE", "ru");
    let city_id = or_default("FIXPRICE_CITY_ID", "55");
    let api_key = lookup("FIXPRICE_API_KEY").ok();
    let user_agent = or_default(
        "FIXPRICE_USER_AGENT",
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) \
         Chrome/128.0.6613.120 Safari/537.36",
    );

    let page_size = parse_u32("FIXPRICE_PAGE_SIZE", "24")?;
    let max_pages = parse_u32("FIXPRICE_MAX_PAGES", "500")?;
    let request_timeout_secs = parse_u64("FIXPRICE_REQUEST_TIMEOUT_SECS", "30")?;
    let max_retries = parse_u32("FIXPRICE_MAX_RETRIES", "3")?;
    let retry_backoff_base_secs = parse_u64("FIXPRICE_RETRY_BACKOFF_BASE_SECS", "5")?;
    let max_concurrent_categories = parse_usize("FIXPRICE_MAX_CONCURRENT_CATEGORIES", "3")?;
    let max_concurrent_details = parse_usize("FIXPRICE_MAX_CONCURRENT_DETAILS", "8")?;
    let inter_request_delay_ms = parse_u64("FIXPRICE_INTER_REQUEST_DELAY_MS", "250")?;

    if page_size == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "FIXPRICE_PAGE_SIZE".to_string(),
            reason: "page size must be at least 1".to_string(),
        });
    }

    Ok(AppConfig {
        api_base_url,
        site_base_url,
        catalogs_path,
        log_level,
        language,
        city_id,
        api_key,
        user_agent,
        page_size,
        max_pages,
        request_timeout_secs,
        max_retries,
        retry_backoff_base_secs,
        max_concurrent_categories,
        max_concurrent_details,
        inter_request_delay_ms,
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::env::VarError;

    use super::*;

    fn lookup_from_map<'a>(
        map: &'a HashMap<&'a str, &'a str>,
    ) -> impl Fn(&str) -> Result<String, VarError> + 'a {
        move |key| {
            map.get(key)
                .map(|v| (*v).to_string())
                .ok_or(VarError::NotPresent)
        }
    }

    #[test]
    fn build_app_config_succeeds_with_empty_env() {
        let map: HashMap<&str, &str> = HashMap::new();
        let result = build_app_config(lookup_from_map(&map));
        assert!(result.is_ok(), "expected Ok, got: {result:?}");
        let cfg = result.unwrap();
        assert_eq!(cfg.api_base_url, "https://api.fix-price.com/buyer/v1");
        assert_eq!(cfg.site_base_url, "https://fix-price.com/catalog");
        assert_eq!(cfg.log_level, "info");
        assert_eq!(cfg.language, "ru");
        assert_eq!(cfg.city_id, "55");
        assert!(cfg.api_key.is_none());
        assert_eq!(cfg.page_size, 24);
        assert_eq!(cfg.max_pages, 500);
        assert_eq!(cfg.request_timeout_secs, 30);
        assert_eq!(cfg.max_retries, 3);
        assert_eq!(cfg.retry_backoff_base_secs, 5);
        assert_eq!(cfg.max_concurrent_categories, 3);
        assert_eq!(cfg.max_concurrent_details, 8);
        assert_eq!(cfg.inter_request_delay_ms, 250);
    }

    #[test]
    fn api_base_url_override() {
        let mut map = HashMap::new();
        map.insert("FIXPRICE_API_BASE_URL", "http://localhost:8080/buyer/v1");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.api_base_url, "http://localhost:8080/buyer/v1");
    }

    #[test]
    fn api_key_picked_up_when_set() {
        let mut map = HashMap::new();
        map.insert("FIXPRICE_API_KEY", "fbd3342530f99769");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.api_key.as_deref(), Some("fbd3342530f99769"));
    }

    #[test]
    fn api_key_redacted_in_debug_output() {
        let mut map = HashMap::new();
        map.insert("FIXPRICE_API_KEY", "super-secret-key");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        let debug = format!("{cfg:?}");
        assert!(!debug.contains("super-secret-key"));
        assert!(debug.contains("[redacted]"));
    }

    #[test]
    fn page_size_override() {
        let mut map = HashMap::new();
        map.insert("FIXPRICE_PAGE_SIZE", "48");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.page_size, 48);
    }

    #[test]
    fn page_size_zero_rejected() {
        let mut map = HashMap::new();
        map.insert("FIXPRICE_PAGE_SIZE", "0");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "FIXPRICE_PAGE_SIZE"),
            "expected InvalidEnvVar(FIXPRICE_PAGE_SIZE), got: {result:?}"
        );
    }

    #[test]
    fn page_size_invalid_rejected() {
        let mut map = HashMap::new();
        map.insert("FIXPRICE_PAGE_SIZE", "not-a-number");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "FIXPRICE_PAGE_SIZE"),
            "expected InvalidEnvVar(FIXPRICE_PAGE_SIZE), got: {result:?}"
        );
    }

    #[test]
    fn max_pages_override() {
        let mut map = HashMap::new();
        map.insert("FIXPRICE_MAX_PAGES", "20");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.max_pages, 20);
    }

    #[test]
    fn request_timeout_secs_invalid_rejected() {
        let mut map = HashMap::new();
        map.insert("FIXPRICE_REQUEST_TIMEOUT_SECS", "soon");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "FIXPRICE_REQUEST_TIMEOUT_SECS"),
            "expected InvalidEnvVar(FIXPRICE_REQUEST_TIMEOUT_SECS), got: {result:?}"
        );
    }

    #[test]
    fn max_concurrent_details_override() {
        let mut map = HashMap::new();
        map.insert("FIXPRICE_MAX_CONCURRENT_DETAILS", "16");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.max_concurrent_details, 16);
    }

    #[test]
    fn max_concurrent_categories_invalid_rejected() {
        let mut map = HashMap::new();
        map.insert("FIXPRICE_MAX_CONCURRENT_CATEGORIES", "-1");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "FIXPRICE_MAX_CONCURRENT_CATEGORIES"),
            "expected InvalidEnvVar(FIXPRICE_MAX_CONCURRENT_CATEGORIES), got: {result:?}"
        );
    }

    #[test]
    fn inter_request_delay_ms_override() {
        let mut map = HashMap::new();
        map.insert("FIXPRICE_INTER_REQUEST_DELAY_MS", "0");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.inter_request_delay_ms, 0);
    }

    #[test]
    fn catalogs_path_override() {
        let mut map = HashMap::new();
        map.insert("FIXPRICE_CATALOGS_PATH", "/etc/fixprice/catalogs.yaml");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(
            cfg.catalogs_path,
            PathBuf::from("/etc/fixprice/catalogs.yaml")
        );
    }
}
