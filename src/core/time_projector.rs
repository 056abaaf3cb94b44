//! Percent-to-time projection anchored at a live "now".
//!
//! Everything here is a pure function of `(PercentRange, Anchor, now)`. The
//! offsets depend only on percents and the anchor, so a clock tick can shift
//! the absolute window by re-adding "now" without touching handle positions.

use crate::core::types::{Anchor, PercentRange, TimeOffsets, TimeWindow};

/// Signed offset from "now" represented by a track position.
///
/// `offset = ((percent - now_percent) / 100) * total_window`, rounded to the
/// nearest millisecond. The product is formed before dividing by 100 so
/// whole-percent positions land on exact milliseconds.
#[must_use]
pub fn percent_to_offset_ms(percent: f64, anchor: Anchor) -> i64 {
    let offset = (percent - anchor.now_percent) * anchor.total_window_ms as f64 / 100.0;
    offset.round() as i64
}

/// Offsets of both handles from "now".
#[must_use]
pub fn offsets(range: PercentRange, anchor: Anchor) -> TimeOffsets {
    TimeOffsets {
        min_offset_ms: percent_to_offset_ms(range.min_percent(), anchor),
        max_offset_ms: percent_to_offset_ms(range.max_percent(), anchor),
    }
}

/// Places precomputed offsets around a concrete "now".
#[must_use]
pub fn project_offsets(offsets: TimeOffsets, now_ms: i64) -> TimeWindow {
    TimeWindow {
        min_time_ms: now_ms.saturating_add(offsets.min_offset_ms),
        max_time_ms: now_ms.saturating_add(offsets.max_offset_ms),
    }
}

/// Absolute time window selected by `range` at `now_ms`.
#[must_use]
pub fn project_range(range: PercentRange, anchor: Anchor, now_ms: i64) -> TimeWindow {
    project_offsets(offsets(range, anchor), now_ms)
}

/// Cached projection state: the last known "now", the offsets implied by the
/// current handle positions, and the window they produce together.
///
/// `window` is always `project_offsets(offsets, now_ms)`; both writers keep
/// it in sync.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LiveProjection {
    anchor: Anchor,
    now_ms: i64,
    offsets: TimeOffsets,
    window: TimeWindow,
}

impl LiveProjection {
    #[must_use]
    pub fn new(anchor: Anchor, range: PercentRange, now_ms: i64) -> Self {
        let offsets = offsets(range, anchor);
        Self {
            anchor,
            now_ms,
            offsets,
            window: project_offsets(offsets, now_ms),
        }
    }

    #[must_use]
    pub fn anchor(&self) -> Anchor {
        self.anchor
    }

    #[must_use]
    pub fn now_ms(&self) -> i64 {
        self.now_ms
    }

    #[must_use]
    pub fn offsets(&self) -> TimeOffsets {
        self.offsets
    }

    #[must_use]
    pub fn window(&self) -> TimeWindow {
        self.window
    }

    /// Re-derives offsets after a handle moved; "now" is kept.
    ///
    /// Returns `true` when the offsets changed.
    pub fn rebase(&mut self, range: PercentRange) -> bool {
        let next = offsets(range, self.anchor);
        let changed = next != self.offsets;
        self.offsets = next;
        self.window = project_offsets(next, self.now_ms);
        changed
    }

    /// Moves "now" while keeping offsets pinned.
    pub fn advance_to(&mut self, now_ms: i64) {
        self.now_ms = now_ms;
        self.window = project_offsets(self.offsets, now_ms);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn anchor() -> Anchor {
        Anchor {
            total_window_ms: 7_200_000,
            now_percent: 50.0,
        }
    }

    #[test]
    fn now_position_has_zero_offset() {
        assert_eq!(percent_to_offset_ms(50.0, anchor()), 0);
    }

    #[test]
    fn track_edges_map_to_half_window() {
        assert_eq!(percent_to_offset_ms(0.0, anchor()), -3_600_000);
        assert_eq!(percent_to_offset_ms(100.0, anchor()), 3_600_000);
    }

    #[test]
    fn advancing_now_keeps_offsets() {
        let range = PercentRange::new(20.0, 80.0).expect("valid range");
        let mut live = LiveProjection::new(anchor(), range, 1_000_000);
        let before = live.offsets();
        live.advance_to(1_500_000);
        assert_eq!(live.offsets(), before);
        assert_eq!(live.window(), project_range(range, anchor(), 1_500_000));
    }

    #[test]
    fn fractional_percent_rounds_to_nearest_millisecond() {
        // 0.00001% of two hours is 0.72 ms.
        assert_eq!(percent_to_offset_ms(50.00001, anchor()), 1);
    }
}
