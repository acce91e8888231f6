use super::{describe_window, parse_timestamp, TimestampError};
use anyhow::Result;
use chrono::{Datelike, TimeDelta, Timelike};

#[test]
fn test_timestamp_parses_naive_values_as_utc() -> Result<()> {
    let test_cases = vec![
        "2024-03-01 10:15:30",
        "2024-03-01T10:15:30",
        "2024-03-01 10:15:30.250",
        "  2024-03-01 10:15:30  "
    ];

    for input in test_cases {
        let timestamp = parse_timestamp(input)?;

        assert_eq!(timestamp.offset().local_minus_utc(), 0);
        assert_eq!(timestamp.hour(), 10);
        assert_eq!(timestamp.second(), 30);
    }

    Ok(())
}

#[test]
fn test_timestamp_keeps_rfc3339_offset_for_calendar_day() -> Result<()> {
    let timestamp = parse_timestamp("2024-03-01T23:30:00-05:00")?;

    assert_eq!(timestamp.offset().local_minus_utc(), -5 * 3600);
    assert_eq!(timestamp.date_naive().day(), 1);
    assert_eq!(timestamp.naive_utc().date().day(), 2);

    Ok(())
}

#[test]
fn test_timestamp_accepts_minute_precision() -> Result<()> {
    let timestamp = parse_timestamp("2024-03-01 10:15")?;

    assert_eq!(timestamp.minute(), 15);
    assert_eq!(timestamp.second(), 0);

    Ok(())
}

#[test]
fn test_timestamp_rejects_invalid_values() {
    assert_eq!(parse_timestamp(""), Err(TimestampError::Empty));
    assert_eq!(parse_timestamp("   "), Err(TimestampError::Empty));
    assert!(matches!(parse_timestamp("yesterday"), Err(TimestampError::InvalidFormat(_))));
    assert!(matches!(parse_timestamp("2024-13-01 10:00:00"), Err(TimestampError::InvalidFormat(_))));
    assert!(matches!(parse_timestamp("2024-03-01"), Err(TimestampError::InvalidFormat(_))));
}

#[test]
fn test_window_descriptions_use_largest_whole_unit() {
    assert_eq!(describe_window(TimeDelta::hours(24)), "24h");
    assert_eq!(describe_window(TimeDelta::minutes(15)), "15m");
    assert_eq!(describe_window(TimeDelta::minutes(1)), "1m");
    assert_eq!(describe_window(TimeDelta::seconds(90)), "90s");
}
