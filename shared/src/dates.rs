//! Event date parsing and formatting.
//!
//! Event dates are stored verbatim, so anything a client sends has to be
//! tolerated here. Unparseable dates yield `None` and callers fall back to
//! the raw string.

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use std::cmp::Ordering;

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Parse an event date. Accepts RFC 3339, naive date-times (read as UTC)
/// and plain dates (midnight UTC).
pub fn parse_event_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Newest-first ordering on raw date strings. Unparseable dates go last.
pub fn newest_first(a: &str, b: &str) -> Ordering {
    match (parse_event_date(a), parse_event_date(b)) {
        (Some(a), Some(b)) => b.cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Short locale-style rendering used in notification bodies,
/// e.g. `3/1/2025, 6:00:00 PM`.
pub fn format_short(raw: &str) -> String {
    match parse_event_date(raw) {
        Some(dt) => dt.format("%-m/%-d/%Y, %-I:%M:%S %p").to_string(),
        None => raw.to_string(),
    }
}

/// Long rendering used on event cards, e.g. `Saturday, March 1, 2025 at 06:00 PM`.
pub fn format_long(raw: &str) -> String {
    match parse_event_date(raw) {
        Some(dt) => dt.format("%A, %B %-d, %Y at %I:%M %p").to_string(),
        None => raw.to_string(),
    }
}

/// Creation timestamp in the `2025-03-01T18:00:00.000Z` form.
pub fn timestamp(now: DateTime<Utc>) -> String {
    now.to_rfc3339_opts(SecondsFormat::Millis, true)
}
