pub mod primitives;
pub mod time_projector;
pub mod types;

pub use primitives::{
    NANOS_PER_MILLI, datetime_to_unix_millis, millis_to_nanos, millis_to_nanos_string,
    unix_millis_to_datetime, wall_clock_now_ms,
};
pub use time_projector::{
    LiveProjection, offsets, percent_to_offset_ms, project_offsets, project_range,
};
pub use types::{
    Anchor, Dimensions, PERCENT_MAX, PERCENT_MIN, PercentRange, TimeOffsets, TimeWindow,
    TrackBounds,
};
