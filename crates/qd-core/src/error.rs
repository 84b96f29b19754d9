//! Error types for the query lifecycle

use std::path::PathBuf;
use qd_data::FabricationError;
use thiserror::Error;

/// The only message users ever see for a failed query
pub const FABRICATION_FAILED_MESSAGE: &str = "Failed to process query";

/// Errors returned to whoever awaits a submission
#[derive(Error, Debug)]
pub enum QueryError {
    #[error("{}: {0}", FABRICATION_FAILED_MESSAGE)]
    FabricationFailed(#[from] FabricationError),

    #[error("Fabrication task failed: {0}")]
    TaskFailed(#[from] tokio::task::JoinError),
}

/// Errors that can occur while loading configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid value for {var}: {reason}")]
    Env { var: &'static str, reason: String },
}
