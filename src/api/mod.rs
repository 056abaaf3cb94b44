mod clock_listener;
mod dimension_tracker;
mod drag_controller;
mod label_format;
mod range_model;
mod request_emitter;
mod selector_config;
mod selector_snapshot;

use std::cell::RefCell;
use std::rc::Rc;

use tracing::debug;

use crate::core::{
    Anchor, Dimensions, LiveProjection, PercentRange, TimeOffsets, TimeWindow, TrackBounds,
    wall_clock_now_ms,
};
use crate::error::SelectorResult;
use crate::interaction::{DragPhase, DragState, Handle, SharedListenerRegistry};

pub use clock_listener::{
    ClockCallback, ClockListener, ClockSource, ClockSubscriptionId, ManualClock,
};
pub use dimension_tracker::DimensionTracker;
pub use label_format::{HandleLabel, format_clock_time, format_offset_seconds, handle_label};
pub use range_model::{RangeModel, SharedProjection};
pub use request_emitter::{
    EmitOutcome, EmitterStats, RequestEmitter, RequestKind, Transport, TrajectoryRequest,
    TrajectoryRequestParam,
};
pub use selector_config::{MAX_LABEL_DECIMAL_PLACES, RangeSelectorConfig};
pub use selector_snapshot::{
    HandleSnapshot, SELECTOR_SNAPSHOT_JSON_SCHEMA_V1, SelectorSnapshot,
    SelectorSnapshotJsonContractV1,
};

/// Dual-handle range selector pinned to a live clock.
///
/// Single-threaded by construction: every input handler runs to completion,
/// and a commit reads the range synchronously after the final clamp.
pub struct RangeSelector<T: Transport> {
    config: RangeSelectorConfig,
    dimensions: DimensionTracker,
    range: RangeModel,
    drag: DragState,
    listeners: SharedListenerRegistry,
    clock: ClockListener,
    emitter: RequestEmitter<T>,
}

impl<T: Transport> RangeSelector<T> {
    pub fn new(transport: T, config: RangeSelectorConfig) -> SelectorResult<Self> {
        config.validate()?;

        let now_ms = config.initial_now_ms.unwrap_or_else(wall_clock_now_ms);
        let projection: SharedProjection = Rc::new(RefCell::new(LiveProjection::new(
            config.anchor,
            config.initial_range,
            now_ms,
        )));

        let mut dimensions = DimensionTracker::new(config.handle_width_px);
        if let Some(track) = config.track {
            dimensions.measure(track);
        }

        debug!(
            map_name = %config.map_name,
            total_window_ms = config.anchor.total_window_ms,
            now_percent = config.anchor.now_percent,
            now_ms,
            "range selector created"
        );

        Ok(Self {
            dimensions,
            range: RangeModel::new(config.initial_range, Rc::clone(&projection)),
            drag: DragState::default(),
            listeners: SharedListenerRegistry::default(),
            clock: ClockListener::new(projection),
            emitter: RequestEmitter::new(transport, config.map_name.clone()),
            config,
        })
    }

    #[must_use]
    pub fn config(&self) -> &RangeSelectorConfig {
        &self.config
    }

    #[must_use]
    pub fn anchor(&self) -> Anchor {
        self.config.anchor
    }

    #[must_use]
    pub fn range(&self) -> PercentRange {
        self.range.current()
    }

    #[must_use]
    pub fn time_window(&self) -> TimeWindow {
        self.range.window()
    }

    #[must_use]
    pub fn offsets(&self) -> TimeOffsets {
        self.range.offsets()
    }

    #[must_use]
    pub fn now_ms(&self) -> i64 {
        self.range.projection().borrow().now_ms()
    }

    /// Programmatic min-handle write; clamps like a drag but does not commit.
    pub fn set_min_percent(&mut self, percent: f64) -> PercentRange {
        self.range.set_min(percent)
    }

    /// Programmatic max-handle write; clamps like a drag but does not commit.
    pub fn set_max_percent(&mut self, percent: f64) -> PercentRange {
        self.range.set_max(percent)
    }

    #[must_use]
    pub fn dimensions(&self) -> Dimensions {
        self.dimensions.dimensions()
    }

    /// Viewport resize (or first mount): re-measures the track.
    pub fn resize(&mut self, bounds: TrackBounds) -> Dimensions {
        self.dimensions.measure(bounds)
    }

    #[must_use]
    pub fn drag_phase(&self, handle: Handle) -> DragPhase {
        self.drag.phase(handle)
    }

    #[must_use]
    pub fn label_visible(&self, handle: Handle) -> bool {
        self.drag.session(handle).label_visible()
    }

    /// Window-scope listeners currently registered by open gestures.
    #[must_use]
    pub fn active_listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    #[must_use]
    pub fn is_clock_connected(&self) -> bool {
        self.clock.is_subscribed()
    }

    /// Starts following `clock`. Returns `false` when already connected.
    pub fn connect_clock<C: ClockSource + ?Sized>(&mut self, clock: &mut C) -> bool {
        self.clock.subscribe(clock)
    }

    /// Stops following `clock`. Returns `false` when not connected.
    pub fn disconnect_clock<C: ClockSource + ?Sized>(&mut self, clock: &mut C) -> bool {
        self.clock.unsubscribe(clock)
    }

    /// Tears the selector down: leaves the clock and hands the transport back.
    pub fn shutdown<C: ClockSource + ?Sized>(mut self, clock: &mut C) -> T {
        self.clock.unsubscribe(clock);
        self.emitter.into_transport()
    }

    #[must_use]
    pub fn emitter_stats(&self) -> EmitterStats {
        self.emitter.stats()
    }

    #[must_use]
    pub fn transport(&self) -> &T {
        self.emitter.transport()
    }

    pub fn transport_mut(&mut self) -> &mut T {
        self.emitter.transport_mut()
    }

    #[must_use]
    pub fn handle_label(&self, handle: Handle) -> HandleLabel {
        let window = self.time_window();
        let offsets = self.offsets();
        let (time_ms, offset_ms) = match handle {
            Handle::Min => (window.min_time_ms, offsets.min_offset_ms),
            Handle::Max => (window.max_time_ms, offsets.max_offset_ms),
        };
        handle_label(
            time_ms,
            offset_ms,
            self.config.label_decimal_places,
            self.label_visible(handle),
        )
    }

    #[must_use]
    pub fn snapshot(&self) -> SelectorSnapshot {
        let range = self.range();
        let window = self.time_window();
        let offsets = self.offsets();
        let handle_snapshot = |handle: Handle| {
            let (percent, time_ms, offset_ms) = match handle {
                Handle::Min => (range.min_percent(), window.min_time_ms, offsets.min_offset_ms),
                Handle::Max => (range.max_percent(), window.max_time_ms, offsets.max_offset_ms),
            };
            HandleSnapshot {
                percent,
                time_ms,
                offset_ms,
                phase: self.drag_phase(handle),
                label: self.handle_label(handle),
            }
        };

        SelectorSnapshot {
            range,
            window,
            offsets,
            now_ms: self.now_ms(),
            now_percent: self.config.anchor.now_percent,
            dimensions: self.dimensions(),
            min_handle: handle_snapshot(Handle::Min),
            max_handle: handle_snapshot(Handle::Max),
        }
    }
}
