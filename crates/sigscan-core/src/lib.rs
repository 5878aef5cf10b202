//! Shared configuration, heuristic tables, and record types for the startup
//! signal pipeline.

pub mod app_config;
pub mod config;
pub mod heuristics;
pub mod signals;

use thiserror::Error;

pub use app_config::AppConfig;
pub use config::{
    load_app_config, load_app_config_from_env, load_dry_run_config, SinkCredentials,
};
pub use heuristics::{load_heuristics, Heuristics};
pub use signals::{FeedEntry, ScoredRecord, UpsertOutcome};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required env var: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read heuristics file {path}: {source}")]
    HeuristicsFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse heuristics file: {0}")]
    HeuristicsFileParse(#[source] serde_yaml::Error),

    #[error("heuristics validation failed: {0}")]
    Validation(String),
}
