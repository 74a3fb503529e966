use chrono::{Datelike, NaiveDate, NaiveTime, Timelike};

use crate::core::WeekdayLocale;

/// Gridline label for an hour index counted from the window start.
///
/// Day boundaries after the first render as `24:00` so the end of a day is
/// not confused with the start of the next.
#[must_use]
pub fn hour_label(hour: usize) -> String {
    if hour % 24 == 0 && hour != 0 {
        "24:00".to_owned()
    } else {
        format!("{:02}:00", hour % 24)
    }
}

/// Now-marker label, `HH:MM:SS`.
#[must_use]
pub fn now_marker_label(time: NaiveTime) -> String {
    time.format("%H:%M:%S").to_string()
}

/// Header text split into the bold date run and the weekday run.
#[must_use]
pub fn day_header_parts(date: NaiveDate, locale: WeekdayLocale) -> (String, String) {
    (
        format!("{:02}-{:02}", date.month(), date.day()),
        format!(" {}", locale.abbreviation(date.weekday())),
    )
}

/// Title-bar clock, `AM 9:05` / `PM 12:30`.
#[must_use]
pub fn title_clock_label(time: NaiveTime) -> String {
    let (is_pm, hour_12) = time.hour12();
    let meridiem = if is_pm { "PM" } else { "AM" };
    format!("{meridiem} {hour_12}:{:02}", time.minute())
}

/// Selection marker label: `14시 30분`, or `14:30` outside the Korean locale.
#[must_use]
pub fn selection_label(time: NaiveTime, locale: WeekdayLocale) -> String {
    match locale {
        WeekdayLocale::Korean => format!("{:02}시 {:02}분", time.hour(), time.minute()),
        WeekdayLocale::English => format!("{:02}:{:02}", time.hour(), time.minute()),
    }
}

/// Compact date label, `MM-DD <weekday>`.
#[must_use]
pub fn short_date_label(date: NaiveDate, locale: WeekdayLocale) -> String {
    let (date_part, weekday_part) = day_header_parts(date, locale);
    format!("{date_part}{weekday_part}")
}
