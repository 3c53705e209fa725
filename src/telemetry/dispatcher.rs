//! Emission gate.
//!
//! [`Telemetry`] owns the optional reporting client. Hosts build one at startup and
//! pass it (usually behind an `Arc`) to whatever needs to emit. When no client could
//! be bound, every emission is logged at trace level and dropped; telemetry never
//! fails the host.

use std::path::Path;

use tracing::{debug, trace, warn};

use crate::config::TelemetryConfig;
use crate::error::TelemetryError;
use crate::telemetry::events::{Event, InitializePlugin};
use crate::telemetry::key_source::{usable_key, KeySource, PackageManifest};
use crate::telemetry::reporter::ReportingClient;
use crate::telemetry::shapes::Empty;
use crate::telemetry::wire::WireEvent;

/// Lifecycle of a dispatcher. `Active` and `Disabled` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatcherState {
    Uninitialized,
    /// Initialization found no usable key, was opted out, or could not build a client.
    Disabled,
    Active,
}

pub struct Telemetry {
    reporter: Option<Box<dyn ReportingClient>>,
    state: DispatcherState,
}

impl Telemetry {
    /// A dispatcher that drops everything, as before initialization.
    pub fn uninitialized() -> Self {
        Self {
            reporter: None,
            state: DispatcherState::Uninitialized,
        }
    }

    fn disabled() -> Self {
        Self {
            reporter: None,
            state: DispatcherState::Disabled,
        }
    }

    /// Read the key from `key_source`, build the client with `connect`, and emit the
    /// startup event. Without a usable key the dispatcher is disabled and `connect` is
    /// never called.
    pub fn initialize<K, C, F>(key_source: &K, connect: F) -> Self
    where
        K: KeySource + ?Sized,
        C: ReportingClient + 'static,
        F: FnOnce(&str) -> Result<C, TelemetryError>,
    {
        let telemetry = Self::bind(key_source, connect);
        telemetry.announce();
        telemetry
    }

    /// Like [`Telemetry::initialize`], with the key taken from configuration. An
    /// explicit `instrumentation_key` wins over the package manifest; `enabled = false`
    /// disables telemetry outright.
    pub fn from_config<C, F>(config: &TelemetryConfig, connect: F) -> Self
    where
        C: ReportingClient + 'static,
        F: FnOnce(&str, &str) -> Result<C, TelemetryError>,
    {
        let telemetry = Self::bind_from_config(config, connect);
        telemetry.announce();
        telemetry
    }

    pub(crate) fn bind<K, C, F>(key_source: &K, connect: F) -> Self
    where
        K: KeySource + ?Sized,
        C: ReportingClient + 'static,
        F: FnOnce(&str) -> Result<C, TelemetryError>,
    {
        let Some(key) = usable_key(key_source) else {
            trace!("no instrumentation key available; telemetry disabled");
            return Self::disabled();
        };

        match connect(key) {
            Ok(client) => Self {
                reporter: Some(Box::new(client)),
                state: DispatcherState::Active,
            },
            Err(err) => {
                warn!(error = %err, "failed to construct telemetry reporter; telemetry disabled");
                Self::disabled()
            }
        }
    }

    pub(crate) fn bind_from_config<C, F>(config: &TelemetryConfig, connect: F) -> Self
    where
        C: ReportingClient + 'static,
        F: FnOnce(&str, &str) -> Result<C, TelemetryError>,
    {
        if !config.enabled {
            trace!("telemetry disabled by configuration");
            return Self::disabled();
        }

        let endpoint = config.endpoint.as_str();
        if usable_key(config).is_some() {
            return Self::bind(config, |key| connect(key, endpoint));
        }

        match config.manifest.as_deref().map(load_manifest) {
            Some(Some(manifest)) => Self::bind(&manifest, |key| connect(key, endpoint)),
            _ => {
                trace!("no instrumentation key configured; telemetry disabled");
                Self::disabled()
            }
        }
    }

    pub(crate) fn announce(&self) {
        if self.is_active() {
            self.emit_empty(InitializePlugin);
        }
    }

    pub fn state(&self) -> DispatcherState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state == DispatcherState::Active
    }

    /// Emit `event` with payloads of exactly the shapes its catalogue entry declares.
    pub fn emit<E: Event>(&self, _event: E, properties: E::Properties, measurements: E::Measurements) {
        let Some(reporter) = self.reporter.as_ref() else {
            drop_event(E::NAME.as_str());
            return;
        };

        let wire = match WireEvent::from_event::<E>(&properties, &measurements) {
            Ok(wire) => wire,
            Err(err) => {
                warn!(event = E::NAME.as_str(), error = %err, "failed to encode telemetry event");
                return;
            }
        };

        reporter.send(&wire);
        debug!(
            event = wire.name,
            properties = %serde_json::to_string(&wire.properties).unwrap_or_default(),
            measurements = %serde_json::to_string(&wire.measurements).unwrap_or_default(),
            "sent telemetry event"
        );
    }

    /// Emit an event whose properties and measurements are both empty.
    pub fn emit_empty<E>(&self, event: E)
    where
        E: Event<Properties = Empty, Measurements = Empty>,
    {
        self.emit(event, Empty {}, Empty {});
    }
}

impl Default for Telemetry {
    fn default() -> Self {
        Self::uninitialized()
    }
}

impl std::fmt::Debug for Telemetry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Telemetry")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

pub(crate) fn drop_event(name: &'static str) {
    trace!(event = name, "telemetry reporter not initialized; dropping event");
}

fn load_manifest(path: &Path) -> Option<PackageManifest> {
    match PackageManifest::load(path) {
        Ok(manifest) => Some(manifest),
        Err(err) => {
            warn!(manifest = %path.display(), error = %err, "failed to read package manifest");
            None
        }
    }
}
