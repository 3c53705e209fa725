//! Payload shapes: the typed properties and measurements each event carries.
//!
//! Property fields serialize to camelCase string values; measurement fields
//! serialize to numbers. Every shape also publishes its field list through
//! [`Shape::FIELDS`] so the catalogue can be inspected at runtime.

use serde::{Deserialize, Serialize};

/// Value type of a declared field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Enumerated,
    Number,
}

/// One declared field of a shape, by its wire name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    pub name: &'static str,
    pub kind: FieldKind,
    pub required: bool,
}

impl Field {
    const fn required(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            required: true,
        }
    }

    const fn optional(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            required: false,
        }
    }
}

/// A properties or measurements payload with a fixed set of fields.
pub trait Shape: Serialize {
    const FIELDS: &'static [Field];
}

/// Outcome of a multi-step, user-initiated flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserFlowStatus {
    /// The user canceled or left the flow; not an error.
    Aborted,
    Succeeded,
    /// Completed with an actionable error such as a service failure.
    Failed,
}

impl UserFlowStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            UserFlowStatus::Aborted => "Aborted",
            UserFlowStatus::Succeeded => "Succeeded",
            UserFlowStatus::Failed => "Failed",
        }
    }
}

/// Kind of document opened in the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DocumentKind {
    #[serde(rename = "JupyterCell")]
    NotebookCell,
    #[serde(rename = "Qsharp")]
    SourceFile,
    Other,
}

impl DocumentKind {
    pub fn as_str(self) -> &'static str {
        match self {
            DocumentKind::NotebookCell => "JupyterCell",
            DocumentKind::SourceFile => "Qsharp",
            DocumentKind::Other => "Other",
        }
    }
}

/// Debugger stepping action reported by debug session events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DebugAction {
    StepIn,
    Continue,
}

impl DebugAction {
    pub fn as_str(self) -> &'static str {
        match self {
            DebugAction::StepIn => "StepIn",
            DebugAction::Continue => "Continue",
        }
    }
}

/// The empty shape: no properties or no measurements.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Empty {}

impl Shape for Empty {
    const FIELDS: &'static [Field] = &[];
}

/// Properties carrying only the correlation id of a flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssociationProperties {
    pub association_id: String,
}

impl AssociationProperties {
    pub fn new(association_id: impl Into<String>) -> Self {
        Self {
            association_id: association_id.into(),
        }
    }
}

impl Shape for AssociationProperties {
    const FIELDS: &'static [Field] = &[Field::required("associationId", FieldKind::Text)];
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DebugSessionProperties {
    pub association_id: String,
    pub event: DebugAction,
}

impl Shape for DebugSessionProperties {
    const FIELDS: &'static [Field] = &[
        Field::required("associationId", FieldKind::Text),
        Field::required("event", FieldKind::Enumerated),
    ];
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenedDocumentProperties {
    pub document_type: DocumentKind,
}

impl Shape for OpenedDocumentProperties {
    const FIELDS: &'static [Field] = &[Field::required("documentType", FieldKind::Enumerated)];
}

/// Properties closing a user flow: correlation id, outcome, and an optional reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowEndProperties {
    pub association_id: String,
    pub flow_status: UserFlowStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl FlowEndProperties {
    pub fn new(
        association_id: impl Into<String>,
        flow_status: UserFlowStatus,
        reason: Option<String>,
    ) -> Self {
        Self {
            association_id: association_id.into(),
            flow_status,
            reason,
        }
    }

    pub fn succeeded(association_id: impl Into<String>) -> Self {
        Self::new(association_id, UserFlowStatus::Succeeded, None)
    }

    pub fn failed(association_id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::new(association_id, UserFlowStatus::Failed, Some(reason.into()))
    }

    pub fn aborted(association_id: impl Into<String>, reason: Option<String>) -> Self {
        Self::new(association_id, UserFlowStatus::Aborted, reason)
    }
}

impl Shape for FlowEndProperties {
    const FIELDS: &'static [Field] = &[
        Field::required("associationId", FieldKind::Text),
        Field::required("flowStatus", FieldKind::Enumerated),
        Field::optional("reason", FieldKind::Text),
    ];
}

/// Properties of standalone failure reports (no matching start event).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FailureProperties {
    pub association_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl FailureProperties {
    pub fn new(association_id: impl Into<String>, reason: Option<String>) -> Self {
        Self {
            association_id: association_id.into(),
            reason,
        }
    }
}

impl Shape for FailureProperties {
    const FIELDS: &'static [Field] = &[
        Field::required("associationId", FieldKind::Text),
        Field::optional("reason", FieldKind::Text),
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageServiceMeasurements {
    pub time_to_start_ms: f64,
}

impl Shape for LanguageServiceMeasurements {
    const FIELDS: &'static [Field] = &[Field::required("timeToStartMs", FieldKind::Number)];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenedDocumentMeasurements {
    pub lines_of_code: u64,
}

impl Shape for OpenedDocumentMeasurements {
    const FIELDS: &'static [Field] = &[Field::required("linesOfCode", FieldKind::Number)];
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionListMeasurements {
    pub time_to_completion_ms: f64,
    pub completion_list_length: u64,
}

impl Shape for CompletionListMeasurements {
    const FIELDS: &'static [Field] = &[
        Field::required("timeToCompletionMs", FieldKind::Number),
        Field::required("completionListLength", FieldKind::Number),
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QirMeasurements {
    pub qir_length: u64,
}

impl Shape for QirMeasurements {
    const FIELDS: &'static [Field] = &[Field::required("qirLength", FieldKind::Number)];
}

/// Wall-clock duration of a completed operation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DurationMeasurements {
    pub time_to_complete_ms: f64,
}

impl Shape for DurationMeasurements {
    const FIELDS: &'static [Field] = &[Field::required("timeToCompleteMs", FieldKind::Number)];
}
