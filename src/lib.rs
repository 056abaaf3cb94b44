//! range-selector-rs: headless dual-handle time-range selector.
//!
//! The selector keeps two handle positions (percent along a track) pinned to a
//! live clock, drives them from pointer gestures, and forwards the selected
//! window as a trajectory range query once a gesture completes. Rendering and
//! transport plumbing stay with the host; this crate owns the state machine
//! and its invariants.

pub mod api;
pub mod core;
pub mod error;
pub mod interaction;
pub mod telemetry;

pub use api::{RangeSelector, RangeSelectorConfig};
pub use error::{SelectorError, SelectorResult};
