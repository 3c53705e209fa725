//! Config loading entry points.

use std::path::Path;

use config::File;

use crate::config::merge::merge_policy;
use crate::config::sources::{global_file, workspace_file};
use crate::config::TelemetryConfig;
use crate::error::TelemetryError;

/// Loads and validates [`TelemetryConfig`] from layered sources.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration for a workspace: defaults, global file, workspace files,
    /// then environment overrides.
    pub fn load(workspace_root: &Path) -> Result<TelemetryConfig, TelemetryError> {
        let builder = merge_policy::builder_with_defaults()?;
        let builder = global_file::add_to_builder(builder)?;
        let builder = workspace_file::add_to_builder(builder, workspace_root)?;
        let config: TelemetryConfig = builder
            .add_source(merge_policy::environment())
            .build()?
            .try_deserialize()?;
        Self::validated(config)
    }

    /// Load configuration from a single file, still honoring environment overrides.
    pub fn load_from_file(path: &Path) -> Result<TelemetryConfig, TelemetryError> {
        let config: TelemetryConfig = merge_policy::builder_with_defaults()?
            .add_source(File::from(path).required(true))
            .add_source(merge_policy::environment())
            .build()?
            .try_deserialize()?;
        Self::validated(config)
    }

    fn validated(config: TelemetryConfig) -> Result<TelemetryConfig, TelemetryError> {
        config.validate().map_err(|errors| {
            let error_msgs: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            TelemetryError::ConfigError(format!(
                "Configuration validation failed:\n{}",
                error_msgs.join("\n")
            ))
        })?;
        Ok(config)
    }
}
