//! Instrumentation key sources.

use std::path::Path;

use serde::Deserialize;

use crate::error::TelemetryError;

/// Anything that can supply the reporting backend's instrumentation key.
pub trait KeySource {
    fn instrumentation_key(&self) -> Option<&str>;
}

/// The key from `source`, if present and not blank.
pub fn usable_key<K: KeySource + ?Sized>(source: &K) -> Option<&str> {
    source
        .instrumentation_key()
        .map(str::trim)
        .filter(|key| !key.is_empty())
}

impl KeySource for str {
    fn instrumentation_key(&self) -> Option<&str> {
        Some(self)
    }
}

impl KeySource for String {
    fn instrumentation_key(&self) -> Option<&str> {
        Some(self.as_str())
    }
}

impl KeySource for Option<String> {
    fn instrumentation_key(&self) -> Option<&str> {
        self.as_deref()
    }
}

/// Packaging metadata of the host extension (a `package.json`-style manifest).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PackageManifest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default, rename = "aiKey")]
    pub ai_key: Option<String>,
}

impl PackageManifest {
    pub fn from_json(raw: &str) -> Result<Self, TelemetryError> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn load(path: &Path) -> Result<Self, TelemetryError> {
        let raw = std::fs::read_to_string(path).map_err(|source| TelemetryError::ManifestRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&raw)
    }
}

impl KeySource for PackageManifest {
    fn instrumentation_key(&self) -> Option<&str> {
        self.ai_key.as_deref()
    }
}
