//! Configuration System
//!
//! Telemetry settings loaded hierarchically: built-in defaults, the user's global
//! config file, workspace config files, then environment variable overrides.

use crate::logging::LoggingConfig;
use crate::telemetry::key_source::KeySource;
use crate::telemetry::reporter::DEFAULT_ENDPOINT;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

mod facade;
mod merge;
mod sources;

pub use facade::ConfigLoader;
pub use sources::global_file::global_config_path;

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryConfig {
    /// Master switch; `false` keeps telemetry disabled regardless of key
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Instrumentation key; takes precedence over the package manifest
    #[serde(default)]
    pub instrumentation_key: Option<String>,

    /// Ingestion endpoint used by the HTTP reporter
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Package manifest to read `aiKey` from when no key is configured
    #[serde(default)]
    pub manifest: Option<PathBuf>,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_true() -> bool {
    true
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            instrumentation_key: None,
            endpoint: default_endpoint(),
            manifest: None,
            logging: LoggingConfig::default(),
        }
    }
}

impl KeySource for TelemetryConfig {
    fn instrumentation_key(&self) -> Option<&str> {
        self.instrumentation_key.as_deref()
    }
}

/// Configuration validation errors
#[derive(Debug, Clone)]
pub enum ValidationError {
    Endpoint(String),
    Logging(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Endpoint(msg) => write!(f, "Endpoint: {}", msg),
            ValidationError::Logging(msg) => write!(f, "Logging: {}", msg),
        }
    }
}

impl std::error::Error for ValidationError {}

impl TelemetryConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if !(self.endpoint.starts_with("http://") || self.endpoint.starts_with("https://")) {
            errors.push(ValidationError::Endpoint(format!(
                "'{}' is not an http(s) URL",
                self.endpoint
            )));
        }

        if let Err(e) = self.logging.validate() {
            errors.push(ValidationError::Logging(e));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
