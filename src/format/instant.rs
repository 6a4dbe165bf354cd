//! Parsing of the loosely typed instants stored on session records.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};

use crate::calendar::resolve_local;
use crate::error::InstantError;
use crate::models::InstantValue;

/// Epoch offsets beyond ±100,000,000 days are rejected.
const MAX_EPOCH_MILLIS: u64 = 8_640_000_000_000_000;

/// Wall-clock layouts without an offset; interpreted in the caller's timezone.
const NAIVE_LAYOUTS: [&str; 6] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

pub fn parse_instant<Tz: TimeZone>(value: &InstantValue, tz: &Tz) -> Result<DateTime<Tz>, InstantError> {
    match value {
        InstantValue::Millis(ms) => from_epoch_millis(*ms, tz),
        InstantValue::FractionalMillis(ms) => {
            if !ms.is_finite() {
                return Err(InstantError::NonFinite);
            }
            // saturating cast; out-of-range values are rejected below
            from_epoch_millis(ms.trunc() as i64, tz)
        }
        InstantValue::Text(text) => parse_text(text.trim(), tz),
    }
}

fn from_epoch_millis<Tz: TimeZone>(ms: i64, tz: &Tz) -> Result<DateTime<Tz>, InstantError> {
    if ms.unsigned_abs() > MAX_EPOCH_MILLIS {
        return Err(InstantError::OutOfRange(ms));
    }
    Utc.timestamp_millis_opt(ms)
        .single()
        .map(|dt| dt.with_timezone(tz))
        .ok_or(InstantError::OutOfRange(ms))
}

fn parse_text<Tz: TimeZone>(text: &str, tz: &Tz) -> Result<DateTime<Tz>, InstantError> {
    if text.is_empty() {
        return Err(InstantError::Unparseable(String::new()));
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Ok(dt.with_timezone(tz));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(text) {
        return Ok(dt.with_timezone(tz));
    }

    for layout in NAIVE_LAYOUTS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, layout) {
            return Ok(resolve_local(tz, naive));
        }
    }

    // Date-only strings mean UTC midnight.
    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return Ok(Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN)).with_timezone(tz));
    }

    Err(InstantError::Unparseable(text.to_string()))
}
