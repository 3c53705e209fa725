//! Process-wide dispatcher for hosts that emit from code without access to a
//! [`Telemetry`] handle.
//!
//! The slot is filled at most once. A second initialization returns
//! [`TelemetryError::AlreadyInitialized`]; it neither rebinds the client nor repeats
//! the startup event. Until the slot is filled, emissions are traced and dropped.

use std::sync::OnceLock;

use crate::config::TelemetryConfig;
use crate::error::TelemetryError;
use crate::telemetry::dispatcher::{drop_event, DispatcherState, Telemetry};
use crate::telemetry::events::Event;
use crate::telemetry::key_source::KeySource;
use crate::telemetry::reporter::ReportingClient;
use crate::telemetry::shapes::Empty;

static DISPATCHER: OnceLock<Telemetry> = OnceLock::new();

pub fn initialize<K, C, F>(key_source: &K, connect: F) -> Result<DispatcherState, TelemetryError>
where
    K: KeySource + ?Sized,
    C: ReportingClient + 'static,
    F: FnOnce(&str) -> Result<C, TelemetryError>,
{
    install(|| Telemetry::bind(key_source, connect))
}

pub fn initialize_from_config<C, F>(
    config: &TelemetryConfig,
    connect: F,
) -> Result<DispatcherState, TelemetryError>
where
    C: ReportingClient + 'static,
    F: FnOnce(&str, &str) -> Result<C, TelemetryError>,
{
    install(|| Telemetry::bind_from_config(config, connect))
}

fn install(bind: impl FnOnce() -> Telemetry) -> Result<DispatcherState, TelemetryError> {
    let mut installed = false;
    // The startup event goes out before the dispatcher is visible to `emit`.
    let telemetry = DISPATCHER.get_or_init(|| {
        installed = true;
        let telemetry = bind();
        telemetry.announce();
        telemetry
    });
    if !installed {
        return Err(TelemetryError::AlreadyInitialized);
    }
    Ok(telemetry.state())
}

pub fn state() -> DispatcherState {
    DISPATCHER
        .get()
        .map_or(DispatcherState::Uninitialized, Telemetry::state)
}

pub fn emit<E: Event>(event: E, properties: E::Properties, measurements: E::Measurements) {
    match DISPATCHER.get() {
        Some(telemetry) => telemetry.emit(event, properties, measurements),
        None => drop_event(E::NAME.as_str()),
    }
}

pub fn emit_empty<E>(event: E)
where
    E: Event<Properties = Empty, Measurements = Empty>,
{
    emit(event, Empty {}, Empty {});
}
