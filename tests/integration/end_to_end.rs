use std::fs;
use std::time::Instant;

use qsharp_telemetry::config::TelemetryConfig;
use qsharp_telemetry::telemetry::events::{
    OpenedDocument, RenderQuantumStateEnd, RenderQuantumStateStart, SubmitToAzureEnd,
};
use qsharp_telemetry::telemetry::shapes::{
    AssociationProperties, DocumentKind, DurationMeasurements, Empty, FlowEndProperties,
    OpenedDocumentMeasurements, OpenedDocumentProperties,
};
use qsharp_telemetry::telemetry::{
    elapsed_ms, new_association_id, DispatcherState, HttpReporter, MemoryReporter,
    PackageManifest, Telemetry,
};
use tempfile::TempDir;

use crate::integration::test_utils::capture_logs;

#[test]
fn scenario_valid_key_constructs_client_and_announces_startup() {
    let manifest = PackageManifest::from_json(r#"{"aiKey":"ABC"}"#).unwrap();
    let mut constructed = None;
    let telemetry = Telemetry::initialize(&manifest, |key| {
        let reporter = MemoryReporter::with_key(key);
        constructed = Some(reporter.clone());
        Ok(reporter)
    });

    let reporter = constructed.expect("client should be constructed");
    assert_eq!(reporter.key(), Some("ABC"));
    assert_eq!(telemetry.state(), DispatcherState::Active);
    assert_eq!(reporter.names(), ["Qsharp.InitializePlugin"]);
}

#[test]
fn scenario_missing_key_drops_opened_document() {
    let manifest = PackageManifest::from_json("{}").unwrap();
    let mut constructed = None;
    let telemetry = Telemetry::initialize(&manifest, |key| {
        let reporter = MemoryReporter::with_key(key);
        constructed = Some(reporter.clone());
        Ok(reporter)
    });

    let logs = capture_logs(|| {
        telemetry.emit(
            OpenedDocument,
            OpenedDocumentProperties {
                document_type: DocumentKind::SourceFile,
            },
            OpenedDocumentMeasurements { lines_of_code: 42 },
        );
    });

    assert!(constructed.is_none());
    assert_eq!(telemetry.state(), DispatcherState::Disabled);
    assert!(logs.contains("Qsharp.OpenedDocument"), "{logs}");
}

#[test]
fn scenario_submit_to_azure_end_is_sent_once() {
    let reporter = MemoryReporter::new();
    let handle = reporter.clone();
    let telemetry = Telemetry::initialize("ABC", move |_| Ok(reporter));

    telemetry.emit(
        SubmitToAzureEnd,
        FlowEndProperties::succeeded("abc-123"),
        Empty {},
    );

    let submits: Vec<_> = handle
        .events()
        .into_iter()
        .filter(|e| e.name == "Qsharp.SubmitToAzureEnd")
        .collect();
    assert_eq!(submits.len(), 1);
    let sent = &submits[0];
    assert_eq!(sent.properties.len(), 2);
    assert_eq!(sent.properties["associationId"], "abc-123");
    assert_eq!(sent.properties["flowStatus"], "Succeeded");
    assert!(sent.measurements.is_empty());
}

#[test]
fn start_and_end_share_a_correlation_id() {
    let reporter = MemoryReporter::new();
    let handle = reporter.clone();
    let telemetry = Telemetry::initialize("ABC", move |_| Ok(reporter));

    let association_id = new_association_id();
    let started = Instant::now();
    telemetry.emit(
        RenderQuantumStateStart,
        AssociationProperties::new(association_id.clone()),
        Empty {},
    );
    telemetry.emit(
        RenderQuantumStateEnd,
        AssociationProperties::new(association_id.clone()),
        DurationMeasurements {
            time_to_complete_ms: elapsed_ms(started),
        },
    );

    let events = handle.events();
    let start = &events[1];
    let end = &events[2];
    assert_eq!(start.properties["associationId"], association_id);
    assert_eq!(end.properties["associationId"], association_id);
    assert!(end.measurements["timeToCompleteMs"] >= 0.0);
}

#[test]
fn config_falls_back_to_package_manifest() {
    let temp_dir = TempDir::new().unwrap();
    let manifest_path = temp_dir.path().join("package.json");
    fs::write(
        &manifest_path,
        r#"{"name":"qsharp-lang-vscode","version":"1.0.0","aiKey":"FROM-MANIFEST"}"#,
    )
    .unwrap();

    let config = TelemetryConfig {
        manifest: Some(manifest_path),
        ..TelemetryConfig::default()
    };
    let mut seen = None;
    let telemetry = Telemetry::from_config(&config, |key, endpoint| {
        seen = Some((key.to_string(), endpoint.to_string()));
        Ok(MemoryReporter::with_key(key))
    });

    assert_eq!(telemetry.state(), DispatcherState::Active);
    let (key, endpoint) = seen.unwrap();
    assert_eq!(key, "FROM-MANIFEST");
    assert_eq!(endpoint, config.endpoint);
}

#[test]
fn config_key_wins_over_manifest() {
    let temp_dir = TempDir::new().unwrap();
    let manifest_path = temp_dir.path().join("package.json");
    fs::write(&manifest_path, r#"{"aiKey":"FROM-MANIFEST"}"#).unwrap();

    let config = TelemetryConfig {
        instrumentation_key: Some("FROM-CONFIG".to_string()),
        manifest: Some(manifest_path),
        ..TelemetryConfig::default()
    };
    let mut seen = None;
    let _telemetry = Telemetry::from_config(&config, |key, _| {
        seen = Some(key.to_string());
        Ok(MemoryReporter::with_key(key))
    });
    assert_eq!(seen.as_deref(), Some("FROM-CONFIG"));
}

#[test]
fn unreadable_manifest_disables_telemetry() {
    let temp_dir = TempDir::new().unwrap();
    let config = TelemetryConfig {
        manifest: Some(temp_dir.path().join("missing.json")),
        ..TelemetryConfig::default()
    };
    let telemetry = Telemetry::from_config(&config, |key, _| Ok(MemoryReporter::with_key(key)));
    assert_eq!(telemetry.state(), DispatcherState::Disabled);
}

#[tokio::test]
async fn http_reporter_is_a_drop_in_client() {
    let config = TelemetryConfig {
        instrumentation_key: Some("ABC".to_string()),
        endpoint: "http://127.0.0.1:9/v2/track".to_string(),
        ..TelemetryConfig::default()
    };
    let telemetry = Telemetry::from_config(&config, HttpReporter::new);
    assert_eq!(telemetry.state(), DispatcherState::Active);
    telemetry.emit(
        SubmitToAzureEnd,
        FlowEndProperties::aborted("abc-123", None),
        Empty {},
    );
}

#[test]
fn http_reporter_without_runtime_disables_telemetry() {
    let config = TelemetryConfig {
        instrumentation_key: Some("ABC".to_string()),
        ..TelemetryConfig::default()
    };
    let telemetry = Telemetry::from_config(&config, HttpReporter::new);
    assert_eq!(telemetry.state(), DispatcherState::Disabled);
}
