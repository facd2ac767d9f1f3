//! Timestamp utilities

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::Value;

/// Largest absolute millisecond offset a timestamp may carry (±100,000,000 days)
const MAX_EPOCH_MILLIS: f64 = 8.64e15;

/// Naive date-time layouts accepted without an explicit offset (read as UTC)
const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Get current UTC timestamp
pub fn now() -> DateTime<Utc> {
    Utc::now()
}

/// Interpret a raw JSON `createdAt` value as an instant.
///
/// Strings go through [`parse_timestamp_str`]; numbers are milliseconds since
/// the Unix epoch. Every other value is an invalid timestamp and yields `None`.
pub fn parse_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(s) => parse_timestamp_str(s),
        Value::Number(n) => {
            let millis = n.as_f64()?;
            if !millis.is_finite() || millis.abs() > MAX_EPOCH_MILLIS {
                return None;
            }
            DateTime::from_timestamp_millis(millis.trunc() as i64)
        }
        _ => None,
    }
}

/// Parse a timestamp string.
///
/// Accepts RFC 3339 / ISO 8601 with an offset, ISO 8601 date-times without an
/// offset (taken as UTC), bare `YYYY-MM-DD`, `YYYY-MM` and `YYYY` dates
/// (midnight UTC) and RFC 2822.
pub fn parse_timestamp_str(raw: &str) -> Option<DateTime<Utc>> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return Some(naive.and_utc());
        }
    }

    if let Some(date) = parse_date_only(s) {
        return date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc());
    }

    DateTime::parse_from_rfc2822(s)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

fn parse_date_only(s: &str) -> Option<NaiveDate> {
    let all_digits = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());

    match s.len() {
        4 if all_digits(s) => NaiveDate::from_ymd_opt(s.parse().ok()?, 1, 1),
        7 if s.is_ascii() && all_digits(&s[..4]) && &s[4..5] == "-" && all_digits(&s[5..]) => {
            NaiveDate::from_ymd_opt(s[..4].parse().ok()?, s[5..].parse().ok()?, 1)
        }
        _ => NaiveDate::parse_from_str(s, "%Y-%m-%d").ok(),
    }
}
