use std::collections::BTreeSet;

use qsharp_telemetry::telemetry::events::*;
use qsharp_telemetry::telemetry::shapes::{
    AssociationProperties, CompletionListMeasurements, DebugAction, DebugSessionProperties,
    DocumentKind, DurationMeasurements, Empty, FailureProperties, FieldKind, FlowEndProperties,
    LanguageServiceMeasurements, OpenedDocumentMeasurements, OpenedDocumentProperties,
    QirMeasurements,
};
use qsharp_telemetry::telemetry::{DispatcherState, MemoryReporter, Telemetry};

const ID: &str = "abc-123";

/// Emit one conforming payload for `name`. The match is exhaustive, so a new
/// catalogue entry must be added here too.
fn emit_sample(telemetry: &Telemetry, name: EventName) {
    let assoc = || AssociationProperties::new(ID);
    let duration = DurationMeasurements {
        time_to_complete_ms: 12.5,
    };
    match name {
        EventName::InitializePlugin => telemetry.emit_empty(InitializePlugin),
        EventName::LoadLanguageService => telemetry.emit(
            LoadLanguageService,
            Empty {},
            LanguageServiceMeasurements {
                time_to_start_ms: 80.0,
            },
        ),
        EventName::JupyterCellInitialized => telemetry.emit_empty(JupyterCellInitialized),
        EventName::DebugSessionEvent => telemetry.emit(
            DebugSessionEvent,
            DebugSessionProperties {
                association_id: ID.to_string(),
                event: DebugAction::StepIn,
            },
            Empty {},
        ),
        EventName::Launch => telemetry.emit(Launch, assoc(), Empty {}),
        EventName::OpenedDocument => telemetry.emit(
            OpenedDocument,
            OpenedDocumentProperties {
                document_type: DocumentKind::NotebookCell,
            },
            OpenedDocumentMeasurements { lines_of_code: 7 },
        ),
        EventName::ReturnCompletionList => telemetry.emit(
            ReturnCompletionList,
            Empty {},
            CompletionListMeasurements {
                time_to_completion_ms: 3.0,
                completion_list_length: 40,
            },
        ),
        EventName::GenerateQirStart => telemetry.emit(GenerateQirStart, assoc(), Empty {}),
        EventName::GenerateQirEnd => {
            telemetry.emit(GenerateQirEnd, assoc(), QirMeasurements { qir_length: 2048 })
        }
        EventName::RenderQuantumStateStart => {
            telemetry.emit(RenderQuantumStateStart, assoc(), Empty {})
        }
        EventName::RenderQuantumStateEnd => {
            telemetry.emit(RenderQuantumStateEnd, assoc(), duration)
        }
        EventName::SubmitToAzureStart => telemetry.emit(SubmitToAzureStart, assoc(), Empty {}),
        EventName::SubmitToAzureEnd => {
            telemetry.emit(SubmitToAzureEnd, FlowEndProperties::succeeded(ID), Empty {})
        }
        EventName::AuthSessionStart => telemetry.emit(AuthSessionStart, assoc(), Empty {}),
        EventName::AuthSessionEnd => telemetry.emit(
            AuthSessionEnd,
            FlowEndProperties::aborted(ID, Some("canceled sign-in".to_string())),
            Empty {},
        ),
        EventName::QueryWorkspacesStart => {
            telemetry.emit(QueryWorkspacesStart, assoc(), Empty {})
        }
        EventName::QueryWorkspacesEnd => telemetry.emit(
            QueryWorkspacesEnd,
            FlowEndProperties::failed(ID, "403"),
            Empty {},
        ),
        EventName::AzureRequestFailed => telemetry.emit(
            AzureRequestFailed,
            FailureProperties::new(ID, Some("timeout".to_string())),
            Empty {},
        ),
        EventName::StorageRequestFailed => telemetry.emit(
            StorageRequestFailed,
            FailureProperties::new(ID, None),
            Empty {},
        ),
        EventName::GetJobFilesStart => telemetry.emit(GetJobFilesStart, assoc(), Empty {}),
        EventName::GetJobFilesEnd => {
            telemetry.emit(GetJobFilesEnd, FlowEndProperties::succeeded(ID), Empty {})
        }
        EventName::QueryWorkspaceStart => telemetry.emit(QueryWorkspaceStart, assoc(), Empty {}),
        EventName::QueryWorkspaceEnd => {
            telemetry.emit(QueryWorkspaceEnd, FlowEndProperties::succeeded(ID), Empty {})
        }
        EventName::CheckCorsStart => telemetry.emit(CheckCorsStart, assoc(), Empty {}),
        EventName::CheckCorsEnd => telemetry.emit(
            CheckCorsEnd,
            FlowEndProperties::failed(ID, "missing CORS rule"),
            Empty {},
        ),
        EventName::InitializeRuntimeStart => {
            telemetry.emit(InitializeRuntimeStart, assoc(), Empty {})
        }
        EventName::InitializeRuntimeEnd => telemetry.emit(
            InitializeRuntimeEnd,
            FlowEndProperties::succeeded(ID),
            duration,
        ),
    }
}

fn emit_all(telemetry: &Telemetry) {
    for name in EventName::ALL {
        emit_sample(telemetry, *name);
    }
}

#[test]
fn every_event_emits_without_error_when_uninitialized() {
    let telemetry = Telemetry::uninitialized();
    emit_all(&telemetry);
    assert_eq!(telemetry.state(), DispatcherState::Uninitialized);
}

#[test]
fn every_event_emits_without_error_when_disabled() {
    let telemetry = Telemetry::initialize(&None::<String>, |key| Ok(MemoryReporter::with_key(key)));
    assert_eq!(telemetry.state(), DispatcherState::Disabled);
    emit_all(&telemetry);
}

#[test]
fn every_event_reaches_an_active_reporter_with_its_declared_fields() {
    let reporter = MemoryReporter::new();
    let handle = reporter.clone();
    let telemetry = Telemetry::initialize("ABC", move |_| Ok(reporter));
    emit_all(&telemetry);

    let events = handle.events();
    assert_eq!(events.len(), EventName::ALL.len() + 1);
    assert_eq!(events[0].name, "Qsharp.InitializePlugin");

    for (name, wire) in EventName::ALL.iter().zip(&events[1..]) {
        assert_eq!(wire.name, name.as_str());
        let schema = name.schema();

        let declared: BTreeSet<&str> = schema.properties.iter().map(|f| f.name).collect();
        let required: BTreeSet<&str> = schema
            .properties
            .iter()
            .filter(|f| f.required)
            .map(|f| f.name)
            .collect();
        let sent: BTreeSet<&str> = wire.properties.keys().map(String::as_str).collect();
        assert!(sent.is_subset(&declared), "{name}: undeclared property sent");
        assert!(required.is_subset(&sent), "{name}: required property missing");

        let measured: BTreeSet<&str> = schema.measurements.iter().map(|f| f.name).collect();
        let sent: BTreeSet<&str> = wire.measurements.keys().map(String::as_str).collect();
        assert_eq!(sent, measured, "{name}: measurement mismatch");
        assert!(schema
            .measurements
            .iter()
            .all(|f| f.kind == FieldKind::Number));
    }
}
