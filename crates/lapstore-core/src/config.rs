use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

const DEFAULT_ERP_BASE_URL: &str =
    "https://erp.laptopexpert.lk/api/v1/ApiItemController";
const DEFAULT_ERP_FALLBACK_URL: &str = "https://api.erp.laptopexpert.lk/api/products";
const DEFAULT_ASSET_BASE_URL: &str = "https://erp.laptopexpert.lk/uploads/items";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
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
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Every variable has a default, so the only failure mode is a value that
/// does not parse. Tests drive this with a plain `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let env = parse_environment(&or_default("LAPSTORE_ENV", "development"));
    let bind_addr: SocketAddr = parse_as(
        "LAPSTORE_BIND_ADDR",
        &or_default("LAPSTORE_BIND_ADDR", "0.0.0.0:3000"),
    )?;
    let log_level = or_default("LAPSTORE_LOG_LEVEL", "info");

    let erp_base_url = or_default("LAPSTORE_ERP_BASE_URL", DEFAULT_ERP_BASE_URL);
    // An explicitly empty value disables the secondary tier.
    let erp_fallback_url = Some(or_default(
        "LAPSTORE_ERP_FALLBACK_URL",
        DEFAULT_ERP_FALLBACK_URL,
    ))
    .filter(|s| !s.trim().is_empty());
    let asset_base_url = or_default("LAPSTORE_ASSET_BASE_URL", DEFAULT_ASSET_BASE_URL);

    let erp_timeout_secs = parse_as(
        "LAPSTORE_ERP_TIMEOUT_SECS",
        &or_default("LAPSTORE_ERP_TIMEOUT_SECS", "15"),
    )?;
    let erp_user_agent = or_default("LAPSTORE_ERP_USER_AGENT", "lapstore/0.1 (storefront)");
    let erp_max_retries = parse_as(
        "LAPSTORE_ERP_MAX_RETRIES",
        &or_default("LAPSTORE_ERP_MAX_RETRIES", "3"),
    )?;
    let erp_initial_backoff_ms = parse_as(
        "LAPSTORE_ERP_INITIAL_BACKOFF_MS",
        &or_default("LAPSTORE_ERP_INITIAL_BACKOFF_MS", "300"),
    )?;
    let featured_count = parse_as(
        "LAPSTORE_FEATURED_COUNT",
        &or_default("LAPSTORE_FEATURED_COUNT", "4"),
    )?;
    let rate_limit_per_minute = parse_as(
        "LAPSTORE_RATE_LIMIT_PER_MINUTE",
        &or_default("LAPSTORE_RATE_LIMIT_PER_MINUTE", "120"),
    )?;

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        erp_base_url,
        erp_fallback_url,
        asset_base_url,
        erp_timeout_secs,
        erp_user_agent,
        erp_max_retries,
        erp_initial_backoff_ms,
        featured_count,
        rate_limit_per_minute,
    })
}

fn parse_as<T>(var: &str, raw: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
