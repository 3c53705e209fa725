//! Q# Telemetry: Typed Event Catalogue and Emission Gate
//!
//! A closed catalogue of telemetry events, each bound at compile time to the exact
//! properties and measurements it must carry, and a dispatcher that forwards events
//! to a reporting backend when one is configured and quietly drops them otherwise.

pub mod config;
pub mod error;
pub mod logging;
pub mod telemetry;

pub use error::TelemetryError;
pub use telemetry::{emit, emit_empty, DispatcherState, Event, EventName, Telemetry};
