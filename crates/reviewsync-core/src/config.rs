use crate::app_config::AppConfig;
use crate::ConfigError;

const DEFAULT_RAPIDAPI_HOST: &str = "amazon-product-reviews-keywords.p.rapidapi.com";
const DEFAULT_TRANSLATE_BASE_URL: &str = "https://translation.googleapis.com";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
    };

    let optional = |var: &str| -> Option<String> {
        lookup(var).ok().filter(|v| !v.trim().is_empty())
    };

    let or_default =
        |var: &str, default: &str| -> String { optional(var).unwrap_or_else(|| default.to_string()) };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        or_default(var, default)
            .parse::<u32>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        or_default(var, default)
            .parse::<usize>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let catalog_base_url = require("SPREE_BASE_URL")?;
    let spree_token = require("SPREE_TOKEN")?;
    let rapidapi_key = require("RAPIDAPI_KEY")?;
    let google_api_key = require("GOOGLE_API_KEY")?;

    let proxy_url = optional("PROXY_URL");
    let rapidapi_host = or_default("RAPIDAPI_HOST", DEFAULT_RAPIDAPI_HOST);
    let provider_base_url = optional("REVIEWSYNC_PROVIDER_BASE_URL")
        .unwrap_or_else(|| format!("https://{rapidapi_host}"));
    let translate_base_url = or_default("REVIEWSYNC_TRANSLATE_BASE_URL", DEFAULT_TRANSLATE_BASE_URL);

    let per_page = parse_u32("REVIEWSYNC_PER_PAGE", "100")?;
    if per_page == 0 {
        return Err(invalid("REVIEWSYNC_PER_PAGE", "must be at least 1".to_string()));
    }
    let max_reviews = parse_usize("REVIEWSYNC_MAX_REVIEWS", "5")?;
    let min_review_words = parse_usize("REVIEWSYNC_MIN_REVIEW_WORDS", "10")?;
    let submitting_user_id = or_default("REVIEWSYNC_SUBMITTING_USER_ID", "32594");
    let write_interval_ms = parse_u64("REVIEWSYNC_WRITE_INTERVAL_MS", "1000")?;
    let http_timeout_secs = parse_u64("REVIEWSYNC_HTTP_TIMEOUT_SECS", "30")?;
    if http_timeout_secs == 0 {
        return Err(invalid(
            "REVIEWSYNC_HTTP_TIMEOUT_SECS",
            "must be at least 1".to_string(),
        ));
    }

    let source_lang = or_default("REVIEWSYNC_SOURCE_LANG", "en");
    let target_lang = or_default("REVIEWSYNC_TARGET_LANG", "es");
    let provider_country = or_default("REVIEWSYNC_PROVIDER_COUNTRY", "US");
    let provider_category = or_default("REVIEWSYNC_PROVIDER_CATEGORY", "aps");
    let names_path = optional("REVIEWSYNC_NAMES_PATH").map(PathBuf::from);
    let log_level = or_default("REVIEWSYNC_LOG_LEVEL", "info");

    Ok(AppConfig {
        catalog_base_url,
        spree_token,
        proxy_url,
        per_page,
        max_reviews,
        min_review_words,
        submitting_user_id,
        write_interval_ms,
        http_timeout_secs,
        rapidapi_key,
        rapidapi_host,
        provider_base_url,
        provider_country,
        provider_category,
        google_api_key,
        translate_base_url,
        source_lang,
        target_lang,
        names_path,
        log_level,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
