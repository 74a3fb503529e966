use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::core::WeekdayLocale;

use super::label_format::{short_date_label, title_clock_label};

/// Text for the window chrome above the timeline.
///
/// `date_text` doubles as a "back to today" affordance: it is only shown
/// while the day under the sticky header is not today.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TitleClock {
    pub time_text: String,
    pub date_text: String,
}

impl TitleClock {
    #[must_use]
    pub fn compose(now: NaiveDateTime, shown_date: NaiveDate, locale: WeekdayLocale) -> Self {
        let date_text = if shown_date == now.date() {
            String::new()
        } else {
            short_date_label(now.date(), locale)
        };
        Self {
            time_text: title_clock_label(now.time()),
            date_text,
        }
    }

    #[must_use]
    pub fn shows_back_to_today(&self) -> bool {
        !self.date_text.is_empty()
    }
}
