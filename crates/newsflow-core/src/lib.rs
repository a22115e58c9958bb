pub mod app_config;
pub mod config;
pub mod matcher;
pub mod taxonomy;

use thiserror::Error;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};
pub use matcher::TaxonomyMatcher;
pub use taxonomy::{load_taxonomy, Taxonomy};

/// Version stamp written onto every analysis record.
pub const ANALYSIS_VERSION: &str = "1.0";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read taxonomy file {path}: {source}")]
    TaxonomyIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse taxonomy file: {0}")]
    TaxonomyParse(#[from] serde_json::Error),

    #[error("taxonomy validation failed: {0}")]
    Validation(String),
}
