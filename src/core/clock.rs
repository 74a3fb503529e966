use std::cell::Cell;

use chrono::{Duration, Local, NaiveDateTime, NaiveTime, Timelike, Weekday};
use serde::{Deserialize, Serialize};

/// Source of local wall-clock time.
///
/// The engine samples the clock once per tick so every element of a frame
/// (now-marker, title clock, header highlight) agrees on the same instant.
pub trait ClockSource {
    fn now(&self) -> NaiveDateTime;
}

/// Samples the host's local wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalClock;

impl ClockSource for LocalClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Manually driven clock for tests, benches and replay demos.
#[derive(Debug, Clone)]
pub struct FixedClock {
    now: Cell<NaiveDateTime>,
}

impl FixedClock {
    #[must_use]
    pub fn new(now: NaiveDateTime) -> Self {
        Self {
            now: Cell::new(now),
        }
    }

    pub fn set(&self, now: NaiveDateTime) {
        self.now.set(now);
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl ClockSource for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.now.get()
    }
}

impl<C: ClockSource + ?Sized> ClockSource for std::rc::Rc<C> {
    fn now(&self) -> NaiveDateTime {
        (**self).now()
    }
}

/// Minutes elapsed since local midnight, optionally with the second fraction.
#[must_use]
pub fn minutes_since_midnight(time: NaiveTime, include_seconds: bool) -> f64 {
    let minutes = f64::from(time.hour() * 60 + time.minute());
    if include_seconds {
        minutes + f64::from(time.second()) / 60.0
    } else {
        minutes
    }
}

/// Weekday abbreviation table used by day headers and the title date label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WeekdayLocale {
    #[default]
    Korean,
    English,
}

impl WeekdayLocale {
    #[must_use]
    pub fn abbreviation(self, weekday: Weekday) -> &'static str {
        let index = weekday.num_days_from_monday() as usize;
        match self {
            Self::Korean => ["월", "화", "수", "목", "금", "토", "일"][index],
            Self::English => ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"][index],
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveTime, Weekday};

    use super::{ClockSource, FixedClock, WeekdayLocale, minutes_since_midnight};

    #[test]
    fn minutes_since_midnight_optionally_includes_seconds() {
        let time = NaiveTime::from_hms_opt(13, 7, 30).expect("valid time");
        assert_eq!(minutes_since_midnight(time, false), 787.0);
        assert_eq!(minutes_since_midnight(time, true), 787.5);
    }

    #[test]
    fn fixed_clock_advances_deterministically() {
        let start = NaiveDate::from_ymd_opt(2026, 3, 1)
            .and_then(|date| date.and_hms_opt(23, 59, 59))
            .expect("valid datetime");
        let clock = FixedClock::new(start);
        clock.advance(chrono::Duration::seconds(1));
        assert_eq!(
            clock.now(),
            NaiveDate::from_ymd_opt(2026, 3, 2)
                .and_then(|date| date.and_hms_opt(0, 0, 0))
                .expect("valid datetime")
        );
    }

    #[test]
    fn weekday_tables_start_on_monday() {
        assert_eq!(WeekdayLocale::Korean.abbreviation(Weekday::Mon), "월");
        assert_eq!(WeekdayLocale::Korean.abbreviation(Weekday::Sun), "일");
        assert_eq!(WeekdayLocale::English.abbreviation(Weekday::Fri), "Fri");
    }
}
