//! Workspace config files under `<workspace>/config/`.
//!
//! `telemetry.toml` is the base; `<env>.toml` (env from `QSHARP_TELEMETRY_ENV`,
//! default `development`) layers on top of it.

use std::path::{Path, PathBuf};

use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError, File};
use tracing::debug;

pub const ENVIRONMENT_VAR: &str = "QSHARP_TELEMETRY_ENV";

const DEFAULT_ENVIRONMENT: &str = "development";

/// Active config environment name.
pub fn environment_name() -> String {
    std::env::var(ENVIRONMENT_VAR)
        .ok()
        .filter(|name| !name.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_ENVIRONMENT.to_string())
}

/// Workspace config files that exist, lowest precedence first.
pub fn workspace_config_files(workspace_root: &Path, environment: &str) -> Vec<PathBuf> {
    let config_dir = workspace_root.join("config");
    [
        config_dir.join("telemetry.toml"),
        config_dir.join(format!("{environment}.toml")),
    ]
    .into_iter()
    .filter(|path| path.is_file())
    .collect()
}

pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
    workspace_root: &Path,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let environment = environment_name();
    let files = workspace_config_files(workspace_root, &environment);
    if files.is_empty() {
        debug!(
            workspace = %workspace_root.display(),
            environment = %environment,
            "no workspace telemetry config files"
        );
    }
    Ok(files
        .into_iter()
        .fold(builder, |builder, path| builder.add_source(File::from(path))))
}
