use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{
    CoordinateMapper, DAY_MINUTES, ScrollPort, TimelineWindow, minutes_since_midnight,
};

use super::DerivedUpdateGuard;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShiftDirection {
    /// Anchor moved one day earlier; scroll grew by one day block.
    Back,
    /// Anchor moved one day later; scroll shrank by one day block.
    Forward,
}

/// Report of one window shift, applied atomically with its compensation.
///
/// `scroll_delta()` always spans a full day block; a shift the scroll range
/// cannot absorb is not applied at all.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindowShift {
    pub direction: ShiftDirection,
    pub anchor_start_date: NaiveDate,
    pub scroll_before: f64,
    pub scroll_after: f64,
}

impl WindowShift {
    /// Scroll compensation applied with the shift.
    #[must_use]
    pub fn scroll_delta(self) -> f64 {
        self.scroll_after - self.scroll_before
    }
}

/// Outcome of a jump back to the current time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct JumpToNow {
    pub anchor_reset: bool,
    pub anchor_start_date: NaiveDate,
    pub scroll_value: f64,
}

/// Owns the day window and keeps the viewed day away from its edges.
///
/// Whenever the day under the sticky tracking point reaches the first or last slot the
/// anchor moves by one day and scroll is compensated by exactly one day block,
/// so the content on screen stays put while the coordinates under it change.
#[derive(Debug, Clone, PartialEq)]
pub struct SlidingWindowManager {
    window: TimelineWindow,
    mapper: CoordinateMapper,
    sticky_offset: f64,
    now_clearance: f64,
}

impl SlidingWindowManager {
    #[must_use]
    pub fn new(
        window: TimelineWindow,
        mapper: CoordinateMapper,
        sticky_offset: f64,
        now_clearance: f64,
    ) -> Self {
        Self {
            window,
            mapper,
            sticky_offset: sticky_offset.max(0.0),
            now_clearance,
        }
    }

    #[must_use]
    pub fn window(&self) -> TimelineWindow {
        self.window
    }

    #[must_use]
    pub fn mapper(&self) -> CoordinateMapper {
        self.mapper
    }

    #[must_use]
    pub fn sticky_offset(&self) -> f64 {
        self.sticky_offset
    }

    pub(crate) fn set_sticky_offset(&mut self, offset: f64) {
        self.sticky_offset = if offset.is_finite() {
            offset.max(0.0)
        } else {
            0.0
        };
    }

    /// Content `y` sampled to find the day under the sticky header.
    #[must_use]
    pub fn tracking_y(&self, scroll_top: f64) -> f64 {
        scroll_top + self.sticky_offset + 1.0
    }

    /// Day index (within the window) under the sticky header.
    #[must_use]
    pub fn current_day_offset(&self, scroll_top: f64) -> usize {
        let minutes = self.mapper.minutes_for_y(self.tracking_y(scroll_top));
        self.mapper.day_offset_for_minutes(minutes)
    }

    #[must_use]
    pub fn current_date(&self, scroll_top: f64) -> NaiveDate {
        self.window.date_at(self.current_day_offset(scroll_top))
    }

    /// Re-evaluates the window after a scroll-position change.
    ///
    /// Returns the shift applied, if any. Skipped while `guard` is
    /// suppressed, which is the case for the compensating write itself.
    pub fn on_scroll_changed<S: ScrollPort + ?Sized>(
        &mut self,
        scroll: &mut S,
        guard: &DerivedUpdateGuard,
    ) -> Option<WindowShift> {
        if guard.is_suppressed() {
            return None;
        }

        let total_days = self.window.total_days();
        if total_days < 3 {
            debug!(total_days, "window too small to shift");
            return None;
        }

        let scroll_before = scroll.value();
        let current_day = self.current_day_offset(scroll_before);
        let block = self.mapper.day_block_height();

        let (direction, target) = if current_day == 0 {
            (ShiftDirection::Back, scroll_before + block)
        } else if current_day >= total_days - 1 {
            (ShiftDirection::Forward, scroll_before - block)
        } else {
            return None;
        };

        // The anchor may only move when the scroll range can take the whole block.
        if target < scroll.minimum() || target > scroll.maximum() {
            debug!(
                ?direction,
                scroll_before,
                target,
                maximum = scroll.maximum(),
                "scroll range cannot absorb a window shift"
            );
            return None;
        }

        let _token = guard.suppress();
        match direction {
            ShiftDirection::Back => self.window.shift_back(),
            ShiftDirection::Forward => self.window.shift_forward(),
        }
        let scroll_after = scroll.set_value(target);

        let shift = WindowShift {
            direction,
            anchor_start_date: self.window.anchor_start_date(),
            scroll_before,
            scroll_after,
        };
        debug!(
            ?direction,
            anchor = %shift.anchor_start_date,
            scroll_before,
            scroll_after,
            "window shifted"
        );
        Some(shift)
    }

    /// Recenters on today if needed and scrolls so the current minute sits just
    /// below the sticky header.
    pub fn jump_to_now<S: ScrollPort + ?Sized>(
        &mut self,
        scroll: &mut S,
        guard: &DerivedUpdateGuard,
        now: NaiveDateTime,
    ) -> JumpToNow {
        let today = now.date();
        let anchor_reset = !self.window.contains(today);
        if anchor_reset {
            self.window.recenter(today);
        }

        let day_offset = self.window.day_offset_of(today) as f64;
        let now_minutes = minutes_since_midnight(now.time(), false);
        let y_now = self.mapper.y_for_minutes(day_offset * DAY_MINUTES + now_minutes);
        let target = (y_now - (self.mapper.scale().day_bar_height + self.now_clearance)).max(0.0);

        let scroll_value = {
            let _token = guard.suppress();
            scroll.set_value(target)
        };
        debug!(
            anchor = %self.window.anchor_start_date(),
            anchor_reset,
            scroll_value,
            "jumped to now"
        );

        JumpToNow {
            anchor_reset,
            anchor_start_date: self.window.anchor_start_date(),
            scroll_value,
        }
    }
}
