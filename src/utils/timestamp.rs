//! Deterministic formatting of record timestamps and durations.

use chrono::{DateTime, Utc};
use std::time::Duration;

/// ISO-8601 UTC with second precision, e.g. `2024-03-01T07:05:09Z`.
pub fn format_date_time(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%dT%H:%M:%SZ").to_string()
}

/// Elapsed time in milliseconds, rounded to three decimals.
pub fn duration_millis(elapsed: Duration) -> f64 {
    (elapsed.as_nanos() as f64 / 1_000.0).round() / 1_000.0
}
