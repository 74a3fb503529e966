use chrono::{NaiveDateTime, TimeDelta};
use serde::{Deserialize, Serialize};

/// A moment picked by a long press and fine-tuned by dragging.
///
/// The anchor is the time under the pointer when the press was held; dragging
/// moves the selection by one minute per `minute_height` pixels of pointer
/// travel, rounded to whole seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeSelection {
    anchor: NaiveDateTime,
    anchor_pointer_y: f64,
    selected: NaiveDateTime,
}

impl TimeSelection {
    #[must_use]
    pub fn begin(anchor: NaiveDateTime, pointer_y: f64) -> Self {
        Self {
            anchor,
            anchor_pointer_y: pointer_y,
            selected: anchor,
        }
    }

    #[must_use]
    pub fn anchor(&self) -> NaiveDateTime {
        self.anchor
    }

    #[must_use]
    pub fn anchor_pointer_y(&self) -> f64 {
        self.anchor_pointer_y
    }

    #[must_use]
    pub fn selected(&self) -> NaiveDateTime {
        self.selected
    }

    /// Re-derives the selection from the pointer position.
    ///
    /// Offsets that do not fit a calendar date keep the previous selection.
    pub fn drag_to(&mut self, pointer_y: f64, minute_height: f64) -> NaiveDateTime {
        let seconds = ((pointer_y - self.anchor_pointer_y) / minute_height * 60.0).round();
        if seconds.is_finite() {
            if let Some(selected) = TimeDelta::try_seconds(seconds as i64)
                .and_then(|delta| self.anchor.checked_add_signed(delta))
            {
                self.selected = selected;
            }
        }
        self.selected
    }
}
