use serde::{Deserialize, Serialize};

use crate::error::{TimelineError, TimelineResult};
use crate::render::Color;

/// Colors, fonts and insets of the timeline canvas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineStyle {
    pub background_color: Color,
    pub hour_line_color: Color,
    pub half_hour_line_color: Color,
    pub hour_label_color: Color,
    pub now_color: Color,
    pub header_fill_color: Color,
    pub header_text_color: Color,
    /// Hour-tall band behind a long-press selection.
    pub selection_band_color: Color,
    pub selection_color: Color,
    pub hour_label_font_size_px: f64,
    pub now_label_font_size_px: f64,
    pub header_font_size_px: f64,
    /// Weekday run size relative to the header date run.
    pub header_weekday_font_delta_px: f64,
    pub grid_line_width: f64,
    pub now_line_width: f64,
    pub now_dot_radius: f64,
    pub selection_line_width: f64,
    pub selection_label_font_size_px: f64,
    /// Left inset of hour labels and header text.
    pub label_inset_px: f64,
    /// Gap kept between gridlines and the right edge.
    pub right_inset_px: f64,
    pub half_hour_indent_px: f64,
    /// Hour label baseline below its gridline.
    pub hour_label_baseline_offset_px: f64,
}

impl Default for TimelineStyle {
    fn default() -> Self {
        Self {
            background_color: Color::from_rgb8(18, 18, 18),
            hour_line_color: Color::from_rgb8(42, 42, 42),
            half_hour_line_color: Color::from_rgb8(32, 32, 32),
            hour_label_color: Color::from_rgb8(180, 180, 180),
            now_color: Color::from_rgb8(255, 90, 90),
            header_fill_color: Color::from_rgb8(24, 24, 24),
            header_text_color: Color::from_rgb8(200, 200, 200),
            selection_band_color: Color::rgba(90.0 / 255.0, 160.0 / 255.0, 1.0, 0.18),
            selection_color: Color::from_rgb8(90, 160, 255),
            hour_label_font_size_px: 11.0,
            now_label_font_size_px: 11.0,
            header_font_size_px: 13.0,
            header_weekday_font_delta_px: 2.5,
            grid_line_width: 1.0,
            now_line_width: 2.0,
            now_dot_radius: 4.0,
            selection_line_width: 1.5,
            selection_label_font_size_px: 12.0,
            label_inset_px: 8.0,
            right_inset_px: 12.0,
            half_hour_indent_px: 16.0,
            hour_label_baseline_offset_px: 14.0,
        }
    }
}

impl TimelineStyle {
    pub fn validate(self) -> TimelineResult<Self> {
        for color in [
            self.background_color,
            self.hour_line_color,
            self.half_hour_line_color,
            self.hour_label_color,
            self.now_color,
            self.header_fill_color,
            self.header_text_color,
            self.selection_band_color,
            self.selection_color,
        ] {
            color.validate()?;
        }

        for (name, value) in [
            ("hour_label_font_size_px", self.hour_label_font_size_px),
            ("now_label_font_size_px", self.now_label_font_size_px),
            ("header_font_size_px", self.header_font_size_px),
            ("grid_line_width", self.grid_line_width),
            ("now_line_width", self.now_line_width),
            ("now_dot_radius", self.now_dot_radius),
            ("selection_line_width", self.selection_line_width),
            ("selection_label_font_size_px", self.selection_label_font_size_px),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(TimelineError::InvalidConfig(format!(
                    "style `{name}` must be finite and > 0"
                )));
            }
        }

        for (name, value) in [
            ("header_weekday_font_delta_px", self.header_weekday_font_delta_px),
            ("label_inset_px", self.label_inset_px),
            ("right_inset_px", self.right_inset_px),
            ("half_hour_indent_px", self.half_hour_indent_px),
            ("hour_label_baseline_offset_px", self.hour_label_baseline_offset_px),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(TimelineError::InvalidConfig(format!(
                    "style `{name}` must be finite and >= 0"
                )));
            }
        }

        if self.header_font_size_px - self.header_weekday_font_delta_px < 1.0 {
            return Err(TimelineError::InvalidConfig(
                "weekday header font must stay >= 1px".to_owned(),
            ));
        }

        Ok(self)
    }

    #[must_use]
    pub fn weekday_font_size_px(self) -> f64 {
        (self.header_font_size_px - self.header_weekday_font_delta_px).max(1.0)
    }
}
