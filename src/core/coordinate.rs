use serde::{Deserialize, Serialize};

use crate::core::{DAY_MINUTES, ScaleConfig};

/// Headroom kept below the window's last minute so clamped tracking points still land
/// inside the final day.
pub const MINUTES_EPSILON: f64 = 0.001;

/// Bidirectional pixel ⟷ minute mapping over a day window.
///
/// Minutes are counted from the window's anchor midnight. Every day is laid
/// out as a header bar followed by `24 * 60 * minute_height` pixels:
///
/// ```text
/// top_pad
/// [bar 0][day 0 minutes][bar 1][day 1 minutes] ... [bottom_pad]
/// ```
///
/// Header bands are zero-duration markers, so `minutes_for_y` maps any `y`
/// inside a bar to the day boundary rather than inverting it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateMapper {
    scale: ScaleConfig,
    total_days: usize,
}

/// Minutes-since-window-start split into calendar fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WallClockOffset {
    pub day_offset: usize,
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
}

impl CoordinateMapper {
    #[must_use]
    pub fn new(scale: ScaleConfig, total_days: usize) -> Self {
        Self {
            scale,
            total_days: total_days.max(1),
        }
    }

    #[must_use]
    pub fn scale(self) -> ScaleConfig {
        self.scale
    }

    #[must_use]
    pub fn total_days(self) -> usize {
        self.total_days
    }

    #[must_use]
    pub fn total_minutes(self) -> f64 {
        self.total_days as f64 * DAY_MINUTES
    }

    #[must_use]
    pub fn day_block_height(self) -> f64 {
        self.scale.day_block_height()
    }

    /// Full scrollable extent of the content.
    #[must_use]
    pub fn content_height(self) -> f64 {
        self.total_minutes() * self.scale.minute_height
            + self.scale.top_pad
            + self.scale.bottom_pad
            + self.total_days as f64 * self.scale.day_bar_height
    }

    /// Content `y` for a minute offset from the window start.
    #[must_use]
    pub fn y_for_minutes(self, minutes: f64) -> f64 {
        let last_day = (self.total_days - 1) as f64;
        let day_offset = (minutes / DAY_MINUTES).floor().clamp(0.0, last_day);
        self.scale.top_pad
            + minutes * self.scale.minute_height
            + (day_offset + 1.0) * self.scale.day_bar_height
    }

    /// Minute offset for a content `y`; saturates instead of failing.
    #[must_use]
    pub fn minutes_for_y(self, y: f64) -> f64 {
        if y.is_nan() {
            return 0.0;
        }

        let mut y_rel = y - self.scale.top_pad;
        if y_rel <= 0.0 {
            return 0.0;
        }
        y_rel -= self.scale.day_bar_height;
        if y_rel <= 0.0 {
            return 0.0;
        }

        let day_span = self.scale.day_span();
        let block = self.scale.day_block_height();
        let day_offset = (y_rel / block).floor();
        let within = y_rel - day_offset * block;
        let minutes = if within <= day_span {
            day_offset * DAY_MINUTES + within / self.scale.minute_height
        } else {
            (day_offset + 1.0) * DAY_MINUTES
        };

        minutes.clamp(0.0, self.total_minutes() - MINUTES_EPSILON)
    }

    /// Day index containing the given minute offset, clamped to the window.
    #[must_use]
    pub fn day_offset_for_minutes(self, minutes: f64) -> usize {
        let last_day = self.total_days - 1;
        let day = (minutes / DAY_MINUTES).floor();
        if day <= 0.0 {
            return 0;
        }
        (day as usize).min(last_day)
    }

    /// Splits a minute offset into day/hour/minute/second, rounding to the
    /// nearest second and carrying overflow into the next field.
    #[must_use]
    pub fn split_minutes(self, minutes: f64) -> WallClockOffset {
        let minutes = minutes.max(0.0);
        let mut day_offset = (minutes / DAY_MINUTES).floor() as usize;
        let minute_of_day = (minutes - day_offset as f64 * DAY_MINUTES).max(0.0);
        let mut hour = (minute_of_day / 60.0).floor() as u32;
        let minute_float = minute_of_day - f64::from(hour) * 60.0;
        let mut minute = minute_float.floor() as u32;
        let mut second = ((minute_float - f64::from(minute)) * 60.0).round() as u32;

        if second >= 60 {
            second = 0;
            minute += 1;
        }
        if minute >= 60 {
            minute = 0;
            hour += 1;
        }
        if hour >= 24 {
            hour = 0;
            day_offset += 1;
        }

        WallClockOffset {
            day_offset,
            hour,
            minute,
            second,
        }
    }
}
