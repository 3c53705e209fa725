//! Merge rules: defaults and override order.
//!
//! Later sources override earlier ones: defaults, global file, workspace files,
//! then `QSHARP_TELEMETRY__*` environment variables.

use config::builder::DefaultState;
use config::Config;
use config::ConfigBuilder;
use config::ConfigError;
use config::Environment;

use crate::telemetry::reporter::DEFAULT_ENDPOINT;

/// Prefix of environment overrides, e.g. `QSHARP_TELEMETRY__ENABLED=false`.
pub const ENV_PREFIX: &str = "QSHARP_TELEMETRY";

/// Create a Config builder with merge policy defaults applied.
pub fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default("enabled", true)?
        .set_default("endpoint", DEFAULT_ENDPOINT)
}

/// Environment source; `__` separates nested keys (`QSHARP_TELEMETRY__LOGGING__LEVEL`).
pub fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .separator("__")
        .try_parsing(true)
}
