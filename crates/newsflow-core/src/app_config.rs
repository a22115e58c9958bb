use std::path::PathBuf;

/// Runtime configuration for the newsflow pipeline.
///
/// Built once at process start by [`crate::config::load_app_config`] and
/// passed by reference everywhere; there is no ambient global state.
#[derive(Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub log_level: String,
    pub taxonomy_path: PathBuf,
    pub newsapi_key: Option<String>,
    pub newsapi_query: String,
    pub db_max_connections: u32,
    pub db_min_connections: u32,
    pub db_acquire_timeout_secs: u64,
    pub source_request_timeout_secs: u64,
    pub source_user_agent: String,
    pub inter_source_delay_ms: u64,
    pub dedup_error_rate: f64,
    pub dedup_capacity: usize,
    pub markets_max_attempts: u32,
    pub markets_retry_wait_secs: u64,
    pub markets_pacing_secs: u64,
    pub markets_request_timeout_secs: u64,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("database_url", &"[redacted]")
            .field("log_level", &self.log_level)
            .field("taxonomy_path", &self.taxonomy_path)
            .field(
                "newsapi_key",
                &self.newsapi_key.as_ref().map(|_| "[redacted]"),
            )
            .field("newsapi_query", &self.newsapi_query)
            .field("db_max_connections", &self.db_max_connections)
            .field("db_min_connections", &self.db_min_connections)
            .field("db_acquire_timeout_secs", &self.db_acquire_timeout_secs)
            .field(
                "source_request_timeout_secs",
                &self.source_request_timeout_secs,
            )
            .field("source_user_agent", &self.source_user_agent)
            .field("inter_source_delay_ms", &self.inter_source_delay_ms)
            .field("dedup_error_rate", &self.dedup_error_rate)
            .field("dedup_capacity", &self.dedup_capacity)
            .field("markets_max_attempts", &self.markets_max_attempts)
            .field("markets_retry_wait_secs", &self.markets_retry_wait_secs)
            .field("markets_pacing_secs", &self.markets_pacing_secs)
            .field(
                "markets_request_timeout_secs",
                &self.markets_request_timeout_secs,
            )
            .finish()
    }
}
