use serde::{Deserialize, Serialize};

use crate::error::{TimelineError, TimelineResult};

/// Pixel geometry of the timeline content.
///
/// Shared read-only by the coordinate mapper and the frame builder; it never
/// changes after the engine is constructed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScaleConfig {
    /// Pixels per minute.
    pub minute_height: f64,
    pub day_bar_height: f64,
    pub left_pad: f64,
    pub top_pad: f64,
    pub bottom_pad: f64,
}

impl Default for ScaleConfig {
    fn default() -> Self {
        Self {
            minute_height: 0.5,
            day_bar_height: 24.0,
            left_pad: 56.0,
            top_pad: 0.0,
            bottom_pad: 8.0,
        }
    }
}

impl ScaleConfig {
    pub fn validate(self) -> TimelineResult<Self> {
        if !self.minute_height.is_finite() || self.minute_height <= 0.0 {
            return Err(TimelineError::InvalidConfig(
                "minute_height must be finite and > 0".to_owned(),
            ));
        }

        for (name, value) in [
            ("day_bar_height", self.day_bar_height),
            ("left_pad", self.left_pad),
            ("top_pad", self.top_pad),
            ("bottom_pad", self.bottom_pad),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(TimelineError::InvalidConfig(format!(
                    "`{name}` must be finite and >= 0"
                )));
            }
        }

        Ok(self)
    }

    /// Height of one day's minutes, without its header bar.
    #[must_use]
    pub fn day_span(self) -> f64 {
        super::DAY_MINUTES * self.minute_height
    }

    /// Height of one day including its header bar.
    #[must_use]
    pub fn day_block_height(self) -> f64 {
        self.day_span() + self.day_bar_height
    }
}
