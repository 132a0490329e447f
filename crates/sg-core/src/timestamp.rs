//! Timestamp parsing for values read back from a warehouse as text.

use chrono::{DateTime, NaiveDateTime, Utc};

/// Naive formats a warehouse may render a `TIMESTAMP` as, tried in order.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Parse a timestamp string into a UTC instant.
///
/// Accepts RFC 3339 (any offset, normalized to UTC) and the naive forms
/// in [`NAIVE_FORMATS`], which are taken to already be UTC.
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(s) {
        return Some(ts.with_timezone(&Utc));
    }
    // DuckDB renders TIMESTAMPTZ with a short "+00" offset
    if let Ok(ts) = DateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f%#z") {
        return Some(ts.with_timezone(&Utc));
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
#[path = "timestamp_test.rs"]
mod tests;
