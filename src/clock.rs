//! Time sources.
//!
//! Every entry point that depends on "now" or "today" takes a [`Clock`]
//! instead of reading the wall clock, so the engine stays deterministic
//! under test.

use chrono::{Local, NaiveDate, NaiveDateTime};

/// A source of the current local date and time.
pub trait Clock {
    /// Returns the current local date and time.
    fn now(&self) -> NaiveDateTime;

    /// Returns the current local date.
    fn today(&self) -> NaiveDate {
        self.now().date()
    }
}

/// Reads the host's local wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// A clock frozen at a fixed instant.
///
/// # Example
///
/// ```
/// use timekeeping_engine::clock::{Clock, FixedClock};
/// use chrono::NaiveDate;
///
/// let clock = FixedClock::on(NaiveDate::from_ymd_opt(2026, 3, 2).unwrap());
/// assert_eq!(clock.today(), NaiveDate::from_ymd_opt(2026, 3, 2).unwrap());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDateTime);

impl FixedClock {
    /// Creates a clock frozen at midnight of the given date.
    pub fn on(date: NaiveDate) -> Self {
        Self(date.and_time(chrono::NaiveTime::MIN))
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}
