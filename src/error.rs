//! Error types for telemetry setup.
//!
//! Emission itself never fails; these errors only surface from initialization,
//! configuration loading, and logging setup.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("Telemetry already initialized for this process")]
    AlreadyInitialized,

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Failed to read package manifest {path:?}: {source}")]
    ManifestRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid package manifest: {0}")]
    ManifestParse(#[from] serde_json::Error),

    #[error("Reporting client error: {0}")]
    ReporterError(String),

    #[error("Logging error: {0}")]
    LoggingError(String),
}

impl From<config::ConfigError> for TelemetryError {
    fn from(err: config::ConfigError) -> Self {
        TelemetryError::ConfigError(err.to_string())
    }
}
