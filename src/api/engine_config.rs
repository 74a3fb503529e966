use serde::{Deserialize, Serialize};

use crate::core::{ScaleConfig, Viewport, WeekdayLocale};
use crate::error::{TimelineError, TimelineResult};
use crate::interaction::InertiaConfig;

use super::TimelineStyle;

/// Public engine bootstrap configuration.
///
/// This type is serializable so host applications can persist/load timeline
/// setup without inventing their own ad-hoc format.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimelineEngineConfig {
    pub viewport: Viewport,
    #[serde(default)]
    pub scale: ScaleConfig,
    #[serde(default = "default_days_before")]
    pub days_before: u32,
    #[serde(default = "default_days_after")]
    pub days_after: u32,
    /// Distance from the viewport top at which the current day header pins.
    #[serde(default)]
    pub sticky_offset: f64,
    /// Extra gap kept above the now-marker after jumping to now.
    #[serde(default = "default_now_clearance")]
    pub now_clearance: f64,
    #[serde(default)]
    pub inertia: InertiaConfig,
    #[serde(default)]
    pub weekday_locale: WeekdayLocale,
    #[serde(default)]
    pub style: TimelineStyle,
}

fn default_days_before() -> u32 {
    1
}

fn default_days_after() -> u32 {
    1
}

fn default_now_clearance() -> f64 {
    17.0
}

impl TimelineEngineConfig {
    /// Creates a config with the default three-day window and dark style.
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            scale: ScaleConfig::default(),
            days_before: default_days_before(),
            days_after: default_days_after(),
            sticky_offset: 0.0,
            now_clearance: default_now_clearance(),
            inertia: InertiaConfig::default(),
            weekday_locale: WeekdayLocale::default(),
            style: TimelineStyle::default(),
        }
    }

    #[must_use]
    pub fn with_scale(mut self, scale: ScaleConfig) -> Self {
        self.scale = scale;
        self
    }

    #[must_use]
    pub fn with_window_days(mut self, days_before: u32, days_after: u32) -> Self {
        self.days_before = days_before;
        self.days_after = days_after;
        self
    }

    #[must_use]
    pub fn with_sticky_offset(mut self, sticky_offset: f64) -> Self {
        self.sticky_offset = sticky_offset;
        self
    }

    #[must_use]
    pub fn with_now_clearance(mut self, now_clearance: f64) -> Self {
        self.now_clearance = now_clearance;
        self
    }

    #[must_use]
    pub fn with_inertia(mut self, inertia: InertiaConfig) -> Self {
        self.inertia = inertia;
        self
    }

    #[must_use]
    pub fn with_weekday_locale(mut self, locale: WeekdayLocale) -> Self {
        self.weekday_locale = locale;
        self
    }

    #[must_use]
    pub fn with_style(mut self, style: TimelineStyle) -> Self {
        self.style = style;
        self
    }

    #[must_use]
    pub fn total_days(&self) -> usize {
        self.days_before as usize + self.days_after as usize + 1
    }

    pub fn validate(self) -> TimelineResult<Self> {
        if !self.viewport.is_valid() {
            return Err(TimelineError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }
        self.scale.validate()?;
        self.inertia.validate()?;
        self.style.validate()?;

        if !self.sticky_offset.is_finite() || self.sticky_offset < 0.0 {
            return Err(TimelineError::InvalidConfig(
                "sticky_offset must be finite and >= 0".to_owned(),
            ));
        }
        if !self.now_clearance.is_finite() {
            return Err(TimelineError::InvalidConfig(
                "now_clearance must be finite".to_owned(),
            ));
        }
        if self.total_days() > 366 {
            return Err(TimelineError::InvalidConfig(
                "window must not exceed 366 days".to_owned(),
            ));
        }

        Ok(self)
    }

    pub fn from_json_str(input: &str) -> TimelineResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|err| TimelineError::InvalidConfig(format!("failed to parse config: {err}")))?;
        config.validate()
    }

    pub fn to_json_string(&self) -> TimelineResult<String> {
        serde_json::to_string_pretty(self).map_err(|err| {
            TimelineError::InvalidConfig(format!("failed to serialize config: {err}"))
        })
    }
}
