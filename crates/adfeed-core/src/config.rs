use uuid::Uuid;

use crate::app_config::AppConfig;
use crate::ConfigError;

pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_CATEGORY_ID: &str = "9ca82557-9085-40da-82db-c9a3c3d3f3a6";
pub const DEFAULT_SITE_URL: &str = "https://ayshei.com";
pub const DEFAULT_STORAGE_URL: &str = "https://storage.ayshei.com";

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
/// Decoupled from the process environment so tests can feed a plain `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let graphql_endpoint = require("ADFEED_GRAPHQL_ENDPOINT")?;
    let admin_secret = require("ADFEED_ADMIN_SECRET")?;

    let log_level = or_default("ADFEED_LOG_LEVEL", DEFAULT_LOG_LEVEL);

    let category_raw = or_default("ADFEED_CATEGORY_ID", DEFAULT_CATEGORY_ID);
    let category_id =
        Uuid::parse_str(category_raw.trim()).map_err(|e| ConfigError::InvalidEnvVar {
            var: "ADFEED_CATEGORY_ID".to_string(),
            reason: e.to_string(),
        })?;

    let window_hours = parse_u64("ADFEED_WINDOW_HOURS", "24")?;
    if window_hours == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "ADFEED_WINDOW_HOURS".to_string(),
            reason: "window must be at least one hour".to_string(),
        });
    }

    let request_timeout_secs = parse_u64("ADFEED_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("ADFEED_USER_AGENT", "adfeed/0.1 (merchant-feed)");
    let site_url = or_default("ADFEED_SITE_URL", DEFAULT_SITE_URL);
    let storage_url = or_default("ADFEED_STORAGE_URL", DEFAULT_STORAGE_URL);

    Ok(AppConfig {
        log_level,
        graphql_endpoint,
        admin_secret,
        category_id,
        window_hours,
        request_timeout_secs,
        user_agent,
        site_url,
        storage_url,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
