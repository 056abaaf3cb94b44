use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::core::unix_millis_to_datetime;

/// Text shown next to a handle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandleLabel {
    /// Wall-clock time of the bound, `HH:MM:SS` in UTC.
    pub clock_text: String,
    /// Signed distance from now in seconds, e.g. `-2160.00`.
    pub offset_text: String,
    pub visible: bool,
}

/// Formats a unix-millisecond timestamp as `HH:MM:SS` (UTC).
///
/// Out-of-range timestamps render as `--:--:--`.
#[must_use]
pub fn format_clock_time(time_ms: i64) -> String {
    match unix_millis_to_datetime(time_ms) {
        Some(time) => time.format("%H:%M:%S").to_string(),
        None => "--:--:--".to_owned(),
    }
}

/// Formats a millisecond offset as seconds with a fixed number of decimals.
///
/// Done in decimal arithmetic so `-2_160_000` ms prints as `-2160.00`
/// regardless of binary float rounding. Halves round away from zero.
#[must_use]
pub fn format_offset_seconds(offset_ms: i64, decimal_places: u32) -> String {
    let seconds = Decimal::new(offset_ms, 3)
        .round_dp_with_strategy(decimal_places, RoundingStrategy::MidpointAwayFromZero);
    format!("{seconds:.prec$}", prec = decimal_places as usize)
}

#[must_use]
pub fn handle_label(
    time_ms: i64,
    offset_ms: i64,
    decimal_places: u32,
    visible: bool,
) -> HandleLabel {
    HandleLabel {
        clock_text: format_clock_time(time_ms),
        offset_text: format_offset_seconds(offset_ms, decimal_places),
        visible,
    }
}
