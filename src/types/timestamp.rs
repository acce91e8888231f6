use crate::types::errors::TimestampError;
use crate::types::Timestamp;
use chrono::{DateTime, NaiveDateTime, TimeDelta};

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M"
];

/// Parses a transaction timestamp.
///
/// RFC 3339 values keep their offset, which later decides the record's calendar day.
/// Naive values (no offset) are interpreted as UTC.
pub fn parse_timestamp(value: &str) -> Result<Timestamp, TimestampError> {
    let value = value.trim();

    if value.is_empty() {
        return Err(TimestampError::Empty);
    }

    if let Ok(timestamp) = DateTime::parse_from_rfc3339(value) {
        return Ok(timestamp);
    }

    NAIVE_FORMATS.iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .map(|naive| naive.and_utc().fixed_offset())
        .ok_or_else(|| TimestampError::InvalidFormat(value.to_string()))
}

/// Renders a window length the way it reads in rule reasons, e.g. `24h`, `15m`, `90s`.
pub fn describe_window(window: TimeDelta) -> String {
    let seconds = window.num_seconds();

    if seconds != 0 && seconds % 3600 == 0 {
        format!("{}h", seconds / 3600)
    } else if seconds != 0 && seconds % 60 == 0 {
        format!("{}m", seconds / 60)
    } else {
        format!("{seconds}s")
    }
}
