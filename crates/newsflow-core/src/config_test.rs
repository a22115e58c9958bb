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

fn minimal_env() -> HashMap<&'static str, &'static str> {
    let mut map = HashMap::new();
    map.insert("DATABASE_URL", "postgres://localhost/newsflow");
    map
}

#[test]
fn minimal_env_uses_defaults() {
    let map = minimal_env();
    let config = build_app_config(lookup_from_map(&map)).expect("config should load");

    assert_eq!(config.log_level, "info");
    assert_eq!(config.db_max_connections, 10);
    assert_eq!(config.inter_source_delay_ms, 2000);
    assert!((config.dedup_error_rate - 0.001).abs() < f64::EPSILON);
    assert_eq!(config.dedup_capacity, 2_000_000);
    assert_eq!(config.markets_max_attempts, 5);
    assert_eq!(config.markets_retry_wait_secs, 60);
    assert_eq!(config.markets_pacing_secs, 20);
    assert!(config.newsapi_key.is_none());
}

#[test]
fn missing_database_url_is_an_error() {
    let map = HashMap::new();
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "DATABASE_URL"),
        "expected MissingEnvVar for DATABASE_URL"
    );
}

#[test]
fn invalid_pool_size_is_an_error() {
    let mut map = minimal_env();
    map.insert("NEWSFLOW_DB_MAX_CONNECTIONS", "lots");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "NEWSFLOW_DB_MAX_CONNECTIONS"),
    );
}

#[test]
fn error_rate_must_be_a_probability() {
    let mut map = minimal_env();
    map.insert("NEWSFLOW_DEDUP_ERROR_RATE", "1.5");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "NEWSFLOW_DEDUP_ERROR_RATE"),
    );
}

#[test]
fn zero_capacity_is_rejected() {
    let mut map = minimal_env();
    map.insert("NEWSFLOW_DEDUP_CAPACITY", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "NEWSFLOW_DEDUP_CAPACITY"),
    );
}

#[test]
fn pacing_overrides_are_read() {
    let mut map = minimal_env();
    map.insert("NEWSFLOW_MARKETS_PACING_SECS", "1");
    map.insert("NEWSFLOW_MARKETS_RETRY_WAIT_SECS", "2");
    map.insert("NEWSFLOW_MARKETS_MAX_ATTEMPTS", "3");
    let config = build_app_config(lookup_from_map(&map)).expect("config should load");
    assert_eq!(config.markets_pacing_secs, 1);
    assert_eq!(config.markets_retry_wait_secs, 2);
    assert_eq!(config.markets_max_attempts, 3);
}

#[test]
fn newsapi_key_is_optional_but_read() {
    let mut map = minimal_env();
    map.insert("NEWSAPI_KEY", "secret");
    let config = build_app_config(lookup_from_map(&map)).expect("config should load");
    assert_eq!(config.newsapi_key.as_deref(), Some("secret"));
}

#[test]
fn debug_redacts_secrets() {
    let mut map = minimal_env();
    map.insert("NEWSAPI_KEY", "secret");
    let config = build_app_config(lookup_from_map(&map)).expect("config should load");
    let debug = format!("{config:?}");
    assert!(!debug.contains("secret"), "api key leaked into Debug output");
    assert!(
        !debug.contains("postgres://"),
        "database url leaked into Debug output"
    );
}
