//! Wire form of an event: the identifier plus flat string and numeric maps.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::telemetry::events::Event;

pub type Properties = BTreeMap<String, String>;
pub type Measurements = BTreeMap<String, f64>;

/// Triple handed to a reporting client, unchanged from what the caller supplied.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WireEvent {
    pub name: &'static str,
    pub properties: Properties,
    pub measurements: Measurements,
}

#[derive(Debug, Error)]
pub enum WireError {
    #[error("Failed to serialize payload: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Payload for {event} is not a flat record")]
    NotARecord { event: &'static str },

    #[error("Measurement {field} of {event} is not numeric")]
    NotNumeric { event: &'static str, field: String },
}

impl WireEvent {
    /// Flatten typed shapes into wire maps. Absent optional fields are omitted.
    pub fn from_event<E: Event>(
        properties: &E::Properties,
        measurements: &E::Measurements,
    ) -> Result<Self, WireError> {
        let name = E::NAME.as_str();
        Ok(Self {
            name,
            properties: flatten_properties(name, properties)?,
            measurements: flatten_measurements(name, measurements)?,
        })
    }
}

fn to_record<T: Serialize>(
    event: &'static str,
    payload: &T,
) -> Result<serde_json::Map<String, Value>, WireError> {
    match serde_json::to_value(payload)? {
        Value::Object(map) => Ok(map),
        _ => Err(WireError::NotARecord { event }),
    }
}

fn flatten_properties<T: Serialize>(
    event: &'static str,
    payload: &T,
) -> Result<Properties, WireError> {
    let mut out = Properties::new();
    for (key, value) in to_record(event, payload)? {
        match value {
            Value::Null => {}
            Value::String(s) => {
                out.insert(key, s);
            }
            other => {
                out.insert(key, other.to_string());
            }
        }
    }
    Ok(out)
}

fn flatten_measurements<T: Serialize>(
    event: &'static str,
    payload: &T,
) -> Result<Measurements, WireError> {
    let mut out = Measurements::new();
    for (key, value) in to_record(event, payload)? {
        match value {
            Value::Null => {}
            Value::Number(n) => {
                let number = n.as_f64().ok_or_else(|| WireError::NotNumeric {
                    event,
                    field: key.clone(),
                })?;
                out.insert(key, number);
            }
            _ => return Err(WireError::NotNumeric { event, field: key }),
        }
    }
    Ok(out)
}
