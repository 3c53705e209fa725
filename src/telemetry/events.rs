//! Event catalogue.
//!
//! Each telemetry event is a zero-sized marker type implementing [`Event`], which binds
//! it to exactly one properties shape and one measurements shape. [`EventName`] is the
//! closed set of identifiers; it enumerates the catalogue and yields the wire name.
//!
//! Because [`Telemetry::emit`](crate::Telemetry::emit) is generic over the marker, a
//! payload of the wrong shape is a type error:
//!
//! ```
//! use qsharp_telemetry::telemetry::events::SubmitToAzureEnd;
//! use qsharp_telemetry::telemetry::shapes::{Empty, FlowEndProperties};
//! use qsharp_telemetry::Telemetry;
//!
//! let telemetry = Telemetry::uninitialized();
//! telemetry.emit(SubmitToAzureEnd, FlowEndProperties::succeeded("abc-123"), Empty {});
//! ```
//!
//! Supplying the empty shape where fields are required does not compile:
//!
//! ```compile_fail
//! use qsharp_telemetry::telemetry::events::SubmitToAzureEnd;
//! use qsharp_telemetry::telemetry::shapes::Empty;
//! use qsharp_telemetry::Telemetry;
//!
//! let telemetry = Telemetry::uninitialized();
//! telemetry.emit(SubmitToAzureEnd, Empty {}, Empty {});
//! ```
//!
//! Neither does the shorthand for empty payloads on such an event:
//!
//! ```compile_fail
//! use qsharp_telemetry::telemetry::events::Launch;
//! use qsharp_telemetry::Telemetry;
//!
//! let telemetry = Telemetry::uninitialized();
//! telemetry.emit_empty(Launch);
//! ```
//!
//! Nor a payload with an undeclared field:
//!
//! ```compile_fail
//! use qsharp_telemetry::telemetry::events::Launch;
//! use qsharp_telemetry::telemetry::shapes::{AssociationProperties, Empty};
//! use qsharp_telemetry::Telemetry;
//!
//! let telemetry = Telemetry::uninitialized();
//! let properties = AssociationProperties {
//!     association_id: "abc-123".to_string(),
//!     reason: Some("extra".to_string()),
//! };
//! telemetry.emit(Launch, properties, Empty {});
//! ```

use std::fmt;

use crate::telemetry::shapes::{
    AssociationProperties, CompletionListMeasurements, DebugSessionProperties,
    DurationMeasurements, Empty, FailureProperties, Field, FlowEndProperties,
    LanguageServiceMeasurements, OpenedDocumentMeasurements, OpenedDocumentProperties,
    QirMeasurements, Shape,
};

mod sealed {
    pub trait Sealed {}
}

/// A catalogued telemetry event and the shapes every emission of it must supply.
///
/// Sealed: the catalogue below is the complete set.
pub trait Event: sealed::Sealed + Copy {
    const NAME: EventName;
    type Properties: Shape;
    type Measurements: Shape;
}

/// Field lists of one catalogue entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventSchema {
    pub name: EventName,
    pub properties: &'static [Field],
    pub measurements: &'static [Field],
}

impl EventSchema {
    pub fn of<E: Event>() -> Self {
        Self {
            name: E::NAME,
            properties: <E::Properties as Shape>::FIELDS,
            measurements: <E::Measurements as Shape>::FIELDS,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty() && self.measurements.is_empty()
    }
}

macro_rules! catalogue {
    ($( $(#[$meta:meta])* $name:ident => ($props:ty, $meas:ty) ),+ $(,)?) => {
        /// Closed set of telemetry event identifiers.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum EventName {
            $($name),+
        }

        impl EventName {
            pub const ALL: &'static [EventName] = &[$(EventName::$name),+];

            /// Wire identifier handed to the reporting client.
            pub fn as_str(self) -> &'static str {
                match self {
                    $(EventName::$name => concat!("Qsharp.", stringify!($name))),+
                }
            }

            pub fn schema(self) -> EventSchema {
                match self {
                    $(EventName::$name => EventSchema::of::<$name>()),+
                }
            }
        }

        $(
            $(#[$meta])*
            #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
            pub struct $name;

            impl sealed::Sealed for $name {}

            impl Event for $name {
                const NAME: EventName = EventName::$name;
                type Properties = $props;
                type Measurements = $meas;
            }
        )+
    };
}

catalogue! {
    /// Process start; emitted by the dispatcher once telemetry is bound.
    InitializePlugin => (Empty, Empty),
    LoadLanguageService => (Empty, LanguageServiceMeasurements),
    JupyterCellInitialized => (Empty, Empty),
    DebugSessionEvent => (DebugSessionProperties, Empty),
    Launch => (AssociationProperties, Empty),
    OpenedDocument => (OpenedDocumentProperties, OpenedDocumentMeasurements),
    ReturnCompletionList => (Empty, CompletionListMeasurements),
    GenerateQirStart => (AssociationProperties, Empty),
    GenerateQirEnd => (AssociationProperties, QirMeasurements),
    RenderQuantumStateStart => (AssociationProperties, Empty),
    RenderQuantumStateEnd => (AssociationProperties, DurationMeasurements),
    SubmitToAzureStart => (AssociationProperties, Empty),
    SubmitToAzureEnd => (FlowEndProperties, Empty),
    AuthSessionStart => (AssociationProperties, Empty),
    AuthSessionEnd => (FlowEndProperties, Empty),
    QueryWorkspacesStart => (AssociationProperties, Empty),
    QueryWorkspacesEnd => (FlowEndProperties, Empty),
    /// A request to the remote quantum service failed outside any tracked flow.
    AzureRequestFailed => (FailureProperties, Empty),
    /// A storage-layer request failed outside any tracked flow.
    StorageRequestFailed => (FailureProperties, Empty),
    GetJobFilesStart => (AssociationProperties, Empty),
    GetJobFilesEnd => (FlowEndProperties, Empty),
    QueryWorkspaceStart => (AssociationProperties, Empty),
    QueryWorkspaceEnd => (FlowEndProperties, Empty),
    CheckCorsStart => (AssociationProperties, Empty),
    CheckCorsEnd => (FlowEndProperties, Empty),
    InitializeRuntimeStart => (AssociationProperties, Empty),
    InitializeRuntimeEnd => (FlowEndProperties, DurationMeasurements),
}

impl fmt::Display for EventName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
