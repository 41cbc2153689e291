//! The position reading produced by the locator and consumed by the recorder.

use chrono::{DateTime, Local};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Format used for `fetched_at`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A single ISS position, as stored in the `locations` collection.
///
/// Coordinates are kept exactly as the upstream sent them (the API uses
/// strings, but numbers pass through as well).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionReading {
    /// Human-readable fetch time, `YYYY-MM-DD HH:MM:SS`.
    pub fetched_at: String,
    /// Longitude as received.
    pub longitude: Value,
    /// Latitude as received.
    pub latitude: Value,
}

impl PositionReading {
    /// Build a reading from its parts.
    #[must_use]
    pub fn new(fetched_at: impl Into<String>, longitude: Value, latitude: Value) -> Self {
        Self {
            fetched_at: fetched_at.into(),
            longitude,
            latitude,
        }
    }
}

impl std::fmt::Display for PositionReading {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}  lon={}  lat={}",
            self.fetched_at,
            display_value(&self.longitude),
            display_value(&self.latitude)
        )
    }
}

/// Render a coordinate without the JSON quotes around strings.
#[must_use]
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Format a Unix epoch (seconds) as `YYYY-MM-DD HH:MM:SS`.
///
/// Uses `timezone` when given, the process-local zone otherwise. Returns
/// `None` when the value is outside the range chrono can represent.
#[must_use]
pub fn format_epoch(secs: i64, timezone: Option<Tz>) -> Option<String> {
    let utc = DateTime::from_timestamp(secs, 0)?;
    let formatted = match timezone {
        Some(tz) => utc.with_timezone(&tz).format(TIMESTAMP_FORMAT).to_string(),
        None => utc.with_timezone(&Local).format(TIMESTAMP_FORMAT).to_string(),
    };
    Some(formatted)
}
