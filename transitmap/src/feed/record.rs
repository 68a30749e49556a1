//! Vehicle records extracted from feed entries.

use chrono::{DateTime, FixedOffset};
use serde::Serialize;
use serde_json::Value;

use super::payload::child;

/// Label used when an entry carries no line reference.
pub const UNKNOWN_ROUTE: &str = "Unknown route";

/// Label used when an entry carries no destination name.
pub const UNKNOWN_DESTINATION: &str = "Unknown destination";

/// One vehicle's reported position and identifying labels.
///
/// Rebuilt from the feed on every refresh cycle; never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VehicleRecord {
    pub latitude: f64,
    pub longitude: f64,
    pub line_label: String,
    pub destination_label: String,
    /// `VehicleRef`, when the producer publishes one.
    pub vehicle_ref: Option<String>,
    /// `RecordedAtTime` of the activity, when present and well-formed.
    pub recorded_at: Option<DateTime<FixedOffset>>,
}

impl VehicleRecord {
    /// Create a record with placeholder labels.
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            line_label: UNKNOWN_ROUTE.to_string(),
            destination_label: UNKNOWN_DESTINATION.to_string(),
            vehicle_ref: None,
            recorded_at: None,
        }
    }

    pub fn with_line(mut self, line: impl Into<String>) -> Self {
        self.line_label = line.into();
        self
    }

    pub fn with_destination(mut self, destination: impl Into<String>) -> Self {
        self.destination_label = destination.into();
        self
    }

    /// Extract a record from one `VehicleActivity` entry.
    ///
    /// Returns `None` when the entry has no `MonitoredVehicleJourney`, no
    /// `VehicleLocation`, or coordinates that are missing, non-numeric or out
    /// of range.
    pub fn from_activity(activity: &Value) -> Option<Self> {
        let journey = child(activity, "MonitoredVehicleJourney")?;
        let location = child(journey, "VehicleLocation")?;

        let latitude = coordinate(child(location, "Latitude")?, 90.0)?;
        let longitude = coordinate(child(location, "Longitude")?, 180.0)?;

        Some(Self {
            latitude,
            longitude,
            line_label: label(journey, "LineRef")
                .or_else(|| journey_ref_line(journey))
                .unwrap_or_else(|| UNKNOWN_ROUTE.to_string()),
            destination_label: label(journey, "DestinationName")
                .unwrap_or_else(|| UNKNOWN_DESTINATION.to_string()),
            vehicle_ref: label(journey, "VehicleRef"),
            recorded_at: child(activity, "RecordedAtTime")
                .and_then(text)
                .and_then(|ts| DateTime::parse_from_rfc3339(&ts).ok()),
        })
    }
}

/// Read a coordinate: a number, or text that parses as one, finite and
/// within `±limit`.
fn coordinate(node: &Value, limit: f64) -> Option<f64> {
    let value = match node {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    (value.is_finite() && value.abs() <= limit).then_some(value)
}

/// Line segment of a `VehicleJourneyRef` such as `BB_A3247_0412`.
fn journey_ref_line(journey: &Value) -> Option<String> {
    let journey_ref = label(journey, "VehicleJourneyRef")?;
    let line = journey_ref.split('_').nth(1)?.trim();
    (!line.is_empty()).then(|| line.to_string())
}

/// Read a label field from `parent`, see [`text`].
fn label(parent: &Value, key: &str) -> Option<String> {
    child(parent, key).and_then(text)
}

/// Flatten a SIRI text node: plain strings and numbers, `{"value": ...}`
/// wrappers and arrays of either (first element wins). Blank text is absent.
fn text(node: &Value) -> Option<String> {
    match node {
        Value::String(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Value::Number(n) => Some(n.to_string()),
        Value::Array(items) => items.first().and_then(text),
        Value::Object(map) => map.get("value").and_then(text),
        _ => None,
    }
}
