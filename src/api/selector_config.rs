use serde::{Deserialize, Serialize};

use crate::core::{Anchor, PercentRange, TrackBounds};
use crate::error::{SelectorError, SelectorResult};

/// Public selector bootstrap configuration.
///
/// Serializable so host applications can persist/load selector setup without
/// inventing their own format. Every field has a default, so a partial JSON
/// object is enough.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RangeSelectorConfig {
    #[serde(default)]
    pub anchor: Anchor,
    #[serde(default)]
    pub initial_range: PercentRange,
    #[serde(default = "default_handle_width_px")]
    pub handle_width_px: f64,
    #[serde(default = "default_map_name")]
    pub map_name: String,
    #[serde(default = "default_label_decimal_places")]
    pub label_decimal_places: u32,
    /// `None` reads the wall clock at construction.
    #[serde(default)]
    pub initial_now_ms: Option<i64>,
    #[serde(default)]
    pub track: Option<TrackBounds>,
}

impl Default for RangeSelectorConfig {
    fn default() -> Self {
        Self {
            anchor: Anchor::default(),
            initial_range: PercentRange::default(),
            handle_width_px: default_handle_width_px(),
            map_name: default_map_name(),
            label_decimal_places: default_label_decimal_places(),
            initial_now_ms: None,
            track: None,
        }
    }
}

impl RangeSelectorConfig {
    #[must_use]
    pub fn new(map_name: impl Into<String>) -> Self {
        Self {
            map_name: map_name.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_anchor(mut self, anchor: Anchor) -> Self {
        self.anchor = anchor;
        self
    }

    #[must_use]
    pub fn with_initial_range(mut self, range: PercentRange) -> Self {
        self.initial_range = range;
        self
    }

    /// Sets the handle width whose half centers pointer conversions.
    #[must_use]
    pub fn with_handle_width_px(mut self, width: f64) -> Self {
        self.handle_width_px = width;
        self
    }

    #[must_use]
    pub fn with_label_decimal_places(mut self, places: u32) -> Self {
        self.label_decimal_places = places;
        self
    }

    /// Pins the initial "now" instead of reading the wall clock.
    #[must_use]
    pub fn with_initial_now_ms(mut self, now_ms: i64) -> Self {
        self.initial_now_ms = Some(now_ms);
        self
    }

    #[must_use]
    pub fn with_track(mut self, track: TrackBounds) -> Self {
        self.track = Some(track);
        self
    }

    pub fn validate(&self) -> SelectorResult<()> {
        self.anchor.validate()?;
        if !self.initial_range.is_valid() {
            return Err(SelectorError::InvalidRange {
                min: self.initial_range.min_percent(),
                max: self.initial_range.max_percent(),
            });
        }
        if !self.handle_width_px.is_finite() || self.handle_width_px < 0.0 {
            return Err(SelectorError::InvalidConfig(
                "handle width must be finite and >= 0".to_owned(),
            ));
        }
        if self.map_name.trim().is_empty() {
            return Err(SelectorError::InvalidConfig(
                "map name must not be empty".to_owned(),
            ));
        }
        if self.label_decimal_places > MAX_LABEL_DECIMAL_PLACES {
            return Err(SelectorError::InvalidConfig(format!(
                "label decimal places must be <= {MAX_LABEL_DECIMAL_PLACES}"
            )));
        }
        Ok(())
    }

    pub fn from_json_str(input: &str) -> SelectorResult<Self> {
        let config: Self = serde_json::from_str(input).map_err(|e| {
            SelectorError::InvalidConfig(format!("failed to parse selector config: {e}"))
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> SelectorResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            SelectorError::InvalidData(format!("failed to serialize selector config: {e}"))
        })
    }
}

/// Labels show milliseconds at most.
pub const MAX_LABEL_DECIMAL_PLACES: u32 = 3;

fn default_handle_width_px() -> f64 {
    10.0
}

fn default_map_name() -> String {
    "B1".to_owned()
}

fn default_label_decimal_places() -> u32 {
    2
}
