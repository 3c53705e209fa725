//! Reporting client abstraction.
//!
//! The dispatcher treats a reporting client as a sink: it hands over each event and
//! never inspects the outcome. Transport, batching, and retry belong to the client.

pub mod http;
pub mod memory;

pub use http::{HttpReporter, DEFAULT_ENDPOINT};
pub use memory::MemoryReporter;

use crate::telemetry::wire::WireEvent;

/// Sink for telemetry events.
pub trait ReportingClient: Send + Sync {
    /// Hand off one event. Must not block; delivery failures stay inside the client.
    fn send(&self, event: &WireEvent);
}

impl<C: ReportingClient + ?Sized> ReportingClient for Box<C> {
    fn send(&self, event: &WireEvent) {
        (**self).send(event)
    }
}

impl<C: ReportingClient + ?Sized> ReportingClient for std::sync::Arc<C> {
    fn send(&self, event: &WireEvent) {
        (**self).send(event)
    }
}
