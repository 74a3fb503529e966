use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::DAY_MINUTES;

use super::SlidingWindowManager;

/// Where one day's header bar is drawn, in content coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DayHeaderPlacement {
    pub day_offset: usize,
    pub date: NaiveDate,
    pub y: f64,
    pub pinned: bool,
}

/// Per-frame header layout; recomputed on every scroll, resize or tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StickyHeaderState {
    pub current_day: usize,
    pub placements: Vec<DayHeaderPlacement>,
}

impl StickyHeaderState {
    #[must_use]
    pub fn pinned(&self) -> Option<DayHeaderPlacement> {
        self.placements.iter().copied().find(|placement| placement.pinned)
    }
}

pub struct StickyHeaderTracker;

impl StickyHeaderTracker {
    /// Places every day header; the day crossing the viewport top is pinned
    /// at `scroll_top + sticky_offset`.
    #[must_use]
    pub fn track(manager: &SlidingWindowManager, scroll_top: f64) -> StickyHeaderState {
        let window = manager.window();
        let mapper = manager.mapper();
        let bar_height = mapper.scale().day_bar_height;
        let current_day = manager.current_day_offset(scroll_top);

        let placements = (0..window.total_days())
            .map(|day_offset| {
                let pinned = day_offset == current_day;
                let y = if pinned {
                    scroll_top + manager.sticky_offset()
                } else {
                    let boundary_y = mapper.y_for_minutes(day_offset as f64 * DAY_MINUTES);
                    (boundary_y - bar_height).max(0.0)
                };
                DayHeaderPlacement {
                    day_offset,
                    date: window.date_at(day_offset),
                    y,
                    pinned,
                }
            })
            .collect();

        StickyHeaderState {
            current_day,
            placements,
        }
    }
}
