//! Telemetry domain: event catalogue, payload shapes, wire conversion, reporting
//! clients, and the dispatcher that gates emission.

mod types;

pub mod dispatcher;
pub mod events;
pub mod global;
pub mod key_source;
pub mod reporter;
pub mod shapes;
pub mod wire;

pub use dispatcher::{DispatcherState, Telemetry};
pub use events::{Event, EventName, EventSchema};
pub use global::{emit, emit_empty};
pub use key_source::{KeySource, PackageManifest};
pub use reporter::{HttpReporter, MemoryReporter, ReportingClient};
pub use shapes::{DebugAction, DocumentKind, Empty, UserFlowStatus};
pub use types::{elapsed_ms, new_association_id, now_millis};
pub use wire::{Measurements, Properties, WireEvent};
