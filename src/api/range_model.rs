use std::cell::RefCell;
use std::rc::Rc;

use tracing::trace;

use crate::core::{LiveProjection, PercentRange, TimeOffsets, TimeWindow};

/// Projection state shared between the range model (handle moves) and the
/// clock listener (ticks).
pub type SharedProjection = Rc<RefCell<LiveProjection>>;

/// Sole owner of the two handle positions.
///
/// Every write clamps before it lands, so `0 <= min <= max <= 100` holds after
/// each call, and every write re-derives the time window from the last known
/// "now".
#[derive(Debug)]
pub struct RangeModel {
    range: PercentRange,
    projection: SharedProjection,
}

impl RangeModel {
    #[must_use]
    pub fn new(range: PercentRange, projection: SharedProjection) -> Self {
        projection.borrow_mut().rebase(range);
        Self { range, projection }
    }

    #[must_use]
    pub fn current(&self) -> PercentRange {
        self.range
    }

    /// Moves the min handle within `[0, max]`.
    pub fn set_min(&mut self, percent: f64) -> PercentRange {
        self.write(self.range.with_min_clamped(percent), percent)
    }

    /// Moves the max handle within `[min, 100]`.
    pub fn set_max(&mut self, percent: f64) -> PercentRange {
        self.write(self.range.with_max_clamped(percent), percent)
    }

    #[must_use]
    pub fn offsets(&self) -> TimeOffsets {
        self.projection.borrow().offsets()
    }

    #[must_use]
    pub fn window(&self) -> TimeWindow {
        self.projection.borrow().window()
    }

    #[must_use]
    pub fn projection(&self) -> &SharedProjection {
        &self.projection
    }

    fn write(&mut self, next: PercentRange, requested: f64) -> PercentRange {
        self.range = next;
        let offsets_changed = self.projection.borrow_mut().rebase(next);
        trace!(
            requested,
            min_percent = next.min_percent(),
            max_percent = next.max_percent(),
            offsets_changed,
            "range updated"
        );
        next
    }
}
