use chrono::{Days, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use super::WallClockOffset;

/// The materialized slice of the calendar: `days_before` days, the focus
/// day, then `days_after` days.
///
/// The anchor is private. Only the window manager moves it, one day per
/// shift, or resets it when jumping back to today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineWindow {
    anchor_start_date: NaiveDate,
    days_before: u32,
    days_after: u32,
}

impl TimelineWindow {
    /// Builds a window whose middle slot (`days_before` from the start) is `today`.
    #[must_use]
    pub fn centered_on(today: NaiveDate, days_before: u32, days_after: u32) -> Self {
        Self {
            anchor_start_date: today
                .checked_sub_days(Days::new(u64::from(days_before)))
                .unwrap_or(today),
            days_before,
            days_after,
        }
    }

    #[must_use]
    pub fn anchor_start_date(self) -> NaiveDate {
        self.anchor_start_date
    }

    #[must_use]
    pub fn days_before(self) -> u32 {
        self.days_before
    }

    #[must_use]
    pub fn days_after(self) -> u32 {
        self.days_after
    }

    #[must_use]
    pub fn total_days(self) -> usize {
        self.days_before as usize + self.days_after as usize + 1
    }

    /// Signed day index of `date` relative to the anchor.
    #[must_use]
    pub fn day_offset_of(self, date: NaiveDate) -> i64 {
        (date - self.anchor_start_date).num_days()
    }

    /// Day index of `date` when it lies inside the window.
    #[must_use]
    pub fn index_of(self, date: NaiveDate) -> Option<usize> {
        let offset = self.day_offset_of(date);
        if offset < 0 || offset >= self.total_days() as i64 {
            return None;
        }
        usize::try_from(offset).ok()
    }

    #[must_use]
    pub fn contains(self, date: NaiveDate) -> bool {
        self.index_of(date).is_some()
    }

    #[must_use]
    pub fn date_at(self, day_offset: usize) -> NaiveDate {
        self.anchor_start_date
            .checked_add_days(Days::new(day_offset as u64))
            .unwrap_or(self.anchor_start_date)
    }

    /// Resolves a split minute offset to a calendar moment in this window.
    #[must_use]
    pub fn datetime_at(self, offset: WallClockOffset) -> NaiveDateTime {
        let time = NaiveTime::from_hms_opt(offset.hour, offset.minute, offset.second)
            .unwrap_or(NaiveTime::MIN);
        self.date_at(offset.day_offset).and_time(time)
    }

    pub(crate) fn shift_back(&mut self) {
        if let Some(date) = self.anchor_start_date.pred_opt() {
            self.anchor_start_date = date;
        }
    }

    pub(crate) fn shift_forward(&mut self) {
        if let Some(date) = self.anchor_start_date.succ_opt() {
            self.anchor_start_date = date;
        }
    }

    pub(crate) fn recenter(&mut self, today: NaiveDate) {
        *self = Self::centered_on(today, self.days_before, self.days_after);
    }
}
