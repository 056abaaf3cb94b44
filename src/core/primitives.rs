use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::error::{SelectorError, SelectorResult};

/// Exact multiplier from milliseconds to the nanoseconds used on the wire.
pub const NANOS_PER_MILLI: i64 = 1_000_000;

/// Converts a millisecond timestamp to integer nanoseconds without going
/// through floating point.
pub fn millis_to_nanos(time_ms: i64) -> SelectorResult<Decimal> {
    Decimal::from(time_ms)
        .checked_mul(Decimal::from(NANOS_PER_MILLI))
        .ok_or_else(|| {
            SelectorError::InvalidData(format!("{time_ms} ms cannot be represented in nanoseconds"))
        })
}

/// Renders a millisecond timestamp as a decimal string of nanoseconds.
pub fn millis_to_nanos_string(time_ms: i64) -> SelectorResult<String> {
    Ok(millis_to_nanos(time_ms)?.to_string())
}

#[must_use]
pub fn datetime_to_unix_millis(time: DateTime<Utc>) -> i64 {
    time.timestamp_millis()
}

#[must_use]
pub fn unix_millis_to_datetime(time_ms: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp_millis(time_ms)
}

#[must_use]
pub fn wall_clock_now_ms() -> i64 {
    datetime_to_unix_millis(Utc::now())
}
