pub mod clock;
pub mod coordinate;
pub mod scale;
pub mod scroll;
pub mod types;
pub mod window;

pub use clock::{ClockSource, FixedClock, LocalClock, WeekdayLocale, minutes_since_midnight};
pub use coordinate::{CoordinateMapper, MINUTES_EPSILON, WallClockOffset};
pub use scale::ScaleConfig;
pub use scroll::{ScrollPort, ScrollState};
pub use types::Viewport;
pub use window::TimelineWindow;

/// Minutes in one calendar day.
pub const DAY_MINUTES: f64 = 24.0 * 60.0;
