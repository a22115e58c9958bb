use crate::app_config::AppConfig;
use crate::ConfigError;

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
/// Unlike [`load_app_config`], this does NOT load `.env` files — useful for testing
/// or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual environment
/// so it can be tested with a pure `HashMap` lookup — no `set_var`/`remove_var` needed.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
    };

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

    let parse_f64 = |var: &str, default: &str| -> Result<f64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<f64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let database_url = require("DATABASE_URL")?;

    let log_level = or_default("NEWSFLOW_LOG_LEVEL", "info");
    let taxonomy_path = PathBuf::from(or_default(
        "NEWSFLOW_TAXONOMY_PATH",
        "./config/taxonomy.json",
    ));
    let newsapi_key = lookup("NEWSAPI_KEY").ok();
    let newsapi_query = or_default(
        "NEWSFLOW_NEWSAPI_QUERY",
        "finance OR business OR cryptocurrency OR economy OR culture OR technology OR science",
    );

    let db_max_connections = parse_u32("NEWSFLOW_DB_MAX_CONNECTIONS", "10")?;
    let db_min_connections = parse_u32("NEWSFLOW_DB_MIN_CONNECTIONS", "1")?;
    let db_acquire_timeout_secs = parse_u64("NEWSFLOW_DB_ACQUIRE_TIMEOUT_SECS", "10")?;

    let source_request_timeout_secs = parse_u64("NEWSFLOW_SOURCE_REQUEST_TIMEOUT_SECS", "10")?;
    let source_user_agent = or_default("NEWSFLOW_SOURCE_USER_AGENT", "newsflow/0.1 (news-intake)");
    let inter_source_delay_ms = parse_u64("NEWSFLOW_INTER_SOURCE_DELAY_MS", "2000")?;

    let dedup_error_rate = parse_f64("NEWSFLOW_DEDUP_ERROR_RATE", "0.001")?;
    if !(dedup_error_rate > 0.0 && dedup_error_rate < 1.0) {
        return Err(ConfigError::InvalidEnvVar {
            var: "NEWSFLOW_DEDUP_ERROR_RATE".to_string(),
            reason: format!("must be in (0, 1), got {dedup_error_rate}"),
        });
    }
    let dedup_capacity = parse_usize("NEWSFLOW_DEDUP_CAPACITY", "2000000")?;
    if dedup_capacity == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "NEWSFLOW_DEDUP_CAPACITY".to_string(),
            reason: "must be non-zero".to_string(),
        });
    }

    let markets_max_attempts = parse_u32("NEWSFLOW_MARKETS_MAX_ATTEMPTS", "5")?;
    let markets_retry_wait_secs = parse_u64("NEWSFLOW_MARKETS_RETRY_WAIT_SECS", "60")?;
    let markets_pacing_secs = parse_u64("NEWSFLOW_MARKETS_PACING_SECS", "20")?;
    let markets_request_timeout_secs = parse_u64("NEWSFLOW_MARKETS_REQUEST_TIMEOUT_SECS", "10")?;

    Ok(AppConfig {
        database_url,
        log_level,
        taxonomy_path,
        newsapi_key,
        newsapi_query,
        db_max_connections,
        db_min_connections,
        db_acquire_timeout_secs,
        source_request_timeout_secs,
        source_user_agent,
        inter_source_delay_ms,
        dedup_error_rate,
        dedup_capacity,
        markets_max_attempts,
        markets_retry_wait_secs,
        markets_pacing_secs,
        markets_request_timeout_secs,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
