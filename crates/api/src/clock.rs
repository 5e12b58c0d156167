//! Timestamp formatting and numeric rounding shared by the JSON payloads.

use chrono::{DateTime, Utc};

/// ISO-8601 UTC with microseconds and no offset suffix.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// Current UTC time formatted for response bodies.
pub fn timestamp() -> String {
    format_timestamp(Utc::now())
}

pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.naive_utc().format(TIMESTAMP_FORMAT).to_string()
}

/// Rounds to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
