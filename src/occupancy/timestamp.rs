//! Naive local-time parsing for sensor timestamps.
//!
//! Timestamps are taken as facility wall-clock time. No timezone conversion
//! is performed: an RFC 3339 value keeps the time as written and drops its
//! offset.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Timelike};

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

/// Parses a timestamp string into local wall-clock time.
///
/// Returns `None` for empty or unrecognised input.
pub fn parse_local_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_local());
    }

    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

/// Minutes elapsed since local midnight, ignoring seconds.
pub fn minute_of_day(ts: &NaiveDateTime) -> u32 {
    ts.hour() * 60 + ts.minute()
}
