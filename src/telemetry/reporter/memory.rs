//! In-memory reporting client. Clones share one event log.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::telemetry::reporter::ReportingClient;
use crate::telemetry::wire::WireEvent;

#[derive(Debug, Clone, Default)]
pub struct MemoryReporter {
    key: Option<String>,
    events: Arc<Mutex<Vec<WireEvent>>>,
}

impl MemoryReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_key(key: &str) -> Self {
        Self {
            key: Some(key.to_string()),
            events: Arc::default(),
        }
    }

    /// Instrumentation key this client was constructed with, if any.
    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    pub fn events(&self) -> Vec<WireEvent> {
        self.events.lock().clone()
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.events.lock().iter().map(|e| e.name).collect()
    }

    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }
}

impl ReportingClient for MemoryReporter {
    fn send(&self, event: &WireEvent) {
        self.events.lock().push(event.clone());
    }
}
