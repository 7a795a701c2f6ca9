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
fn parse_environment_development() {
    assert_eq!(parse_environment("development"), Environment::Development);
}

#[test]
fn parse_environment_production() {
    assert_eq!(parse_environment("production"), Environment::Production);
}

#[test]
fn parse_environment_unknown_defaults_to_development() {
    assert_eq!(parse_environment("staging"), Environment::Development);
}

#[test]
fn build_app_config_uses_defaults_when_env_is_empty() {
    let map: HashMap<&str, &str> = HashMap::new();
    let cfg = build_app_config(lookup_from_map(&map)).expect("defaults should be valid");

    assert_eq!(cfg.env, Environment::Development);
    assert_eq!(cfg.bind_addr.to_string(), "0.0.0.0:3000");
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.erp_base_url, DEFAULT_ERP_BASE_URL);
    assert_eq!(cfg.erp_fallback_url.as_deref(), Some(DEFAULT_ERP_FALLBACK_URL));
    assert_eq!(cfg.asset_base_url, DEFAULT_ASSET_BASE_URL);
    assert_eq!(cfg.erp_max_retries, 3);
    assert_eq!(cfg.erp_initial_backoff_ms, 300);
    assert_eq!(cfg.featured_count, 4);
    assert_eq!(cfg.rate_limit_per_minute, 120);
}

#[test]
fn build_app_config_reads_overrides() {
    let mut map = HashMap::new();
    map.insert("LAPSTORE_ENV", "production");
    map.insert("LAPSTORE_BIND_ADDR", "127.0.0.1:8080");
    map.insert("LAPSTORE_ERP_BASE_URL", "http://localhost:9000/erp");
    map.insert("LAPSTORE_ERP_MAX_RETRIES", "5");
    map.insert("LAPSTORE_ERP_INITIAL_BACKOFF_MS", "50");
    map.insert("LAPSTORE_FEATURED_COUNT", "8");

    let cfg = build_app_config(lookup_from_map(&map)).expect("overrides should be valid");

    assert_eq!(cfg.env, Environment::Production);
    assert_eq!(cfg.bind_addr.port(), 8080);
    assert_eq!(cfg.erp_base_url, "http://localhost:9000/erp");
    assert_eq!(cfg.erp_max_retries, 5);
    assert_eq!(cfg.erp_initial_backoff_ms, 50);
    assert_eq!(cfg.featured_count, 8);
}

#[test]
fn build_app_config_empty_fallback_url_disables_secondary_tier() {
    let mut map = HashMap::new();
    map.insert("LAPSTORE_ERP_FALLBACK_URL", "  ");
    let cfg = build_app_config(lookup_from_map(&map)).expect("valid config");
    assert!(cfg.erp_fallback_url.is_none());
}

#[test]
fn build_app_config_fails_with_invalid_bind_addr() {
    let mut map = HashMap::new();
    map.insert("LAPSTORE_BIND_ADDR", "not-a-socket-addr");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "LAPSTORE_BIND_ADDR"),
        "expected InvalidEnvVar(LAPSTORE_BIND_ADDR), got: {result:?}"
    );
}

#[test]
fn build_app_config_fails_with_non_numeric_retries() {
    let mut map = HashMap::new();
    map.insert("LAPSTORE_ERP_MAX_RETRIES", "three");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "LAPSTORE_ERP_MAX_RETRIES"),
        "expected InvalidEnvVar(LAPSTORE_ERP_MAX_RETRIES), got: {result:?}"
    );
}
