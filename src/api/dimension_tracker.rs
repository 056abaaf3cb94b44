use tracing::{debug, warn};

use crate::core::{Dimensions, TrackBounds};
use crate::interaction::Handle;

/// Owns the measured track geometry and converts pointer coordinates into
/// track percents.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DimensionTracker {
    dimensions: Dimensions,
    handle_width_px: f64,
}

impl DimensionTracker {
    #[must_use]
    pub fn new(handle_width_px: f64) -> Self {
        Self {
            dimensions: Dimensions::default(),
            handle_width_px,
        }
    }

    #[must_use]
    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    /// Records new track bounds (mount or viewport resize).
    ///
    /// Non-finite or negative bounds reset the tracker to the unmeasured state
    /// so later conversions become no-ops instead of producing garbage.
    pub fn measure(&mut self, bounds: TrackBounds) -> Dimensions {
        if !bounds.origin_x.is_finite() || !bounds.width.is_finite() || bounds.width < 0.0 {
            warn!(
                origin_x = bounds.origin_x,
                width = bounds.width,
                "rejecting track bounds; selector is unmeasured until next resize"
            );
            self.dimensions = Dimensions::default();
            return self.dimensions;
        }

        self.dimensions = Dimensions {
            origin_x: bounds.origin_x,
            width: bounds.width,
        };
        debug!(
            origin_x = self.dimensions.origin_x,
            width = self.dimensions.width,
            "track measured"
        );
        self.dimensions
    }

    /// Pointer x in viewport coordinates to an unclamped track percent.
    ///
    /// The pointer is shifted by half a handle toward the track interior so
    /// the result tracks the handle's visual center. Returns `None` while the
    /// track is unmeasured.
    #[must_use]
    pub fn client_x_to_percent(&self, client_x: f64, handle: Handle) -> Option<f64> {
        if !self.dimensions.is_measured() || !client_x.is_finite() {
            return None;
        }

        let half_handle = self.handle_width_px / 2.0;
        let centered_x = match handle {
            Handle::Min => client_x + half_handle,
            Handle::Max => client_x - half_handle,
        };
        Some((centered_x - self.dimensions.origin_x) / self.dimensions.width * 100.0)
    }
}
