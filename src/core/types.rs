use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::error::{SelectorError, SelectorResult};

pub const PERCENT_MIN: f64 = 0.0;
pub const PERCENT_MAX: f64 = 100.0;

/// Handle positions along the track, in percent.
///
/// Invariant: `0 <= min_percent <= max_percent <= 100`. Fields are private so
/// the only ways to obtain a value are the validating constructor and the
/// clamping writers below. Deserialization goes through the constructor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PercentRangeRepr")]
pub struct PercentRange {
    min_percent: f64,
    max_percent: f64,
}

impl PercentRange {
    pub fn new(min_percent: f64, max_percent: f64) -> SelectorResult<Self> {
        let range = Self {
            min_percent,
            max_percent,
        };
        if !range.is_valid() {
            return Err(SelectorError::InvalidRange {
                min: min_percent,
                max: max_percent,
            });
        }
        Ok(range)
    }

    /// Full track selection.
    #[must_use]
    pub fn full() -> Self {
        Self {
            min_percent: PERCENT_MIN,
            max_percent: PERCENT_MAX,
        }
    }

    #[must_use]
    pub fn min_percent(self) -> f64 {
        self.min_percent
    }

    #[must_use]
    pub fn max_percent(self) -> f64 {
        self.max_percent
    }

    #[must_use]
    pub fn span_percent(self) -> f64 {
        self.max_percent - self.min_percent
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.min_percent.is_finite()
            && self.max_percent.is_finite()
            && PERCENT_MIN <= self.min_percent
            && self.min_percent <= self.max_percent
            && self.max_percent <= PERCENT_MAX
    }

    /// Moves the min handle, stopping it at the max handle.
    ///
    /// `NaN` input leaves the range untouched.
    #[must_use]
    pub fn with_min_clamped(self, percent: f64) -> Self {
        if percent.is_nan() {
            return self;
        }
        Self {
            min_percent: percent.clamp(PERCENT_MIN, self.max_percent),
            ..self
        }
    }

    /// Moves the max handle, stopping it at the min handle.
    ///
    /// `NaN` input leaves the range untouched.
    #[must_use]
    pub fn with_max_clamped(self, percent: f64) -> Self {
        if percent.is_nan() {
            return self;
        }
        Self {
            max_percent: percent.clamp(self.min_percent, PERCENT_MAX),
            ..self
        }
    }
}

#[derive(Deserialize)]
struct PercentRangeRepr {
    min_percent: f64,
    max_percent: f64,
}

impl TryFrom<PercentRangeRepr> for PercentRange {
    type Error = SelectorError;

    fn try_from(repr: PercentRangeRepr) -> SelectorResult<Self> {
        Self::new(repr.min_percent, repr.max_percent)
    }
}

impl Default for PercentRange {
    fn default() -> Self {
        Self {
            min_percent: 20.0,
            max_percent: 80.0,
        }
    }
}

/// Fixed mapping between the track and time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Anchor {
    /// Time span represented by the whole track, in milliseconds.
    pub total_window_ms: i64,
    /// Track position that represents "now".
    pub now_percent: f64,
}

impl Anchor {
    pub fn new(total_window: Duration, now_percent: f64) -> SelectorResult<Self> {
        Self::from_millis(total_window.num_milliseconds(), now_percent)
    }

    pub fn from_millis(total_window_ms: i64, now_percent: f64) -> SelectorResult<Self> {
        Self {
            total_window_ms,
            now_percent,
        }
        .validate()
    }

    pub fn validate(self) -> SelectorResult<Self> {
        if self.total_window_ms <= 0 {
            return Err(SelectorError::InvalidAnchor(format!(
                "total window must be > 0 ms, got {}",
                self.total_window_ms
            )));
        }
        if !self.now_percent.is_finite()
            || self.now_percent < PERCENT_MIN
            || self.now_percent > PERCENT_MAX
        {
            return Err(SelectorError::InvalidAnchor(format!(
                "now percent must be finite and in [0, 100], got {}",
                self.now_percent
            )));
        }
        Ok(self)
    }

    #[must_use]
    pub fn total_window(self) -> Duration {
        Duration::milliseconds(self.total_window_ms)
    }
}

impl Default for Anchor {
    fn default() -> Self {
        Self {
            total_window_ms: 120 * 60 * 1_000,
            now_percent: 50.0,
        }
    }
}

/// Signed distances from "now" implied by the two handle positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TimeOffsets {
    pub min_offset_ms: i64,
    pub max_offset_ms: i64,
}

/// Absolute bounds of the selected window, in unix milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TimeWindow {
    pub min_time_ms: i64,
    pub max_time_ms: i64,
}

impl TimeWindow {
    #[must_use]
    pub fn span_ms(self) -> i64 {
        self.max_time_ms.saturating_sub(self.min_time_ms)
    }
}

/// Track bounds as reported by the host on mount and on every resize.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrackBounds {
    pub origin_x: f64,
    pub width: f64,
}

impl TrackBounds {
    #[must_use]
    pub fn new(origin_x: f64, width: f64) -> Self {
        Self { origin_x, width }
    }
}

/// Measured track geometry in viewport coordinates.
///
/// `width == 0` means the track has not been measured yet.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Dimensions {
    pub origin_x: f64,
    pub width: f64,
}

impl Dimensions {
    #[must_use]
    pub fn is_measured(self) -> bool {
        self.width > 0.0
    }

    #[must_use]
    pub fn end_x(self) -> f64 {
        self.origin_x + self.width
    }
}
