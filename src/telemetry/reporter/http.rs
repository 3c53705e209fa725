//! Fire-and-forget HTTP reporting client.
//!
//! Each event is wrapped in an ingestion envelope and posted on the ambient tokio
//! runtime. `send` returns as soon as the request is spawned.

use std::time::Duration;

use chrono::{SecondsFormat, Utc};
use reqwest::Client;
use serde_json::{json, Value};
use tokio::runtime::Handle;
use tracing::debug;

use crate::error::TelemetryError;
use crate::telemetry::reporter::ReportingClient;
use crate::telemetry::wire::WireEvent;

pub const DEFAULT_ENDPOINT: &str = "https://dc.services.visualstudio.com/v2/track";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

pub struct HttpReporter {
    client: Client,
    endpoint: String,
    instrumentation_key: String,
    runtime: Handle,
}

impl HttpReporter {
    /// Build a client for `instrumentation_key`. Fails outside a tokio runtime.
    pub fn new(instrumentation_key: &str, endpoint: &str) -> Result<Self, TelemetryError> {
        let runtime = Handle::try_current().map_err(|e| {
            TelemetryError::ReporterError(format!("no async runtime available: {}", e))
        })?;
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| TelemetryError::ReporterError(e.to_string()))?;
        Ok(Self {
            client,
            endpoint: endpoint.to_string(),
            instrumentation_key: instrumentation_key.to_string(),
            runtime,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn envelope(&self, event: &WireEvent) -> Value {
        json!({
            "name": "Microsoft.ApplicationInsights.Event",
            "time": Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            "iKey": self.instrumentation_key,
            "data": {
                "baseType": "EventData",
                "baseData": {
                    "ver": 2,
                    "name": event.name,
                    "properties": event.properties,
                    "measurements": event.measurements,
                }
            }
        })
    }
}

impl ReportingClient for HttpReporter {
    fn send(&self, event: &WireEvent) {
        let body = self.envelope(event);
        let request = self.client.post(&self.endpoint).json(&body);
        let name = event.name;
        self.runtime.spawn(async move {
            match request.send().await {
                Ok(response) if !response.status().is_success() => {
                    debug!(
                        event = name,
                        status = %response.status(),
                        "telemetry endpoint rejected event"
                    );
                }
                Ok(_) => {}
                Err(err) => {
                    debug!(event = name, error = %err, "telemetry delivery failed");
                }
            }
        });
    }
}

impl std::fmt::Debug for HttpReporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpReporter")
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}
