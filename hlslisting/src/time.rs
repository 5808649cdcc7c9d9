//! Date and clock helpers.
//!
//! Listings are resolved at whole-day granularity in UTC. This module provides
//! the clock abstraction used to decide the give-up boundary and helpers for
//! iterating inclusive date ranges.

use chrono::{Days, NaiveDate, Utc};

/// Source of the current UTC date.
///
/// Abstracted so that availability classification can be pinned to a known
/// "today" in tests.
pub trait Clock: Send + Sync {
    /// Returns the current date in UTC.
    fn today(&self) -> NaiveDate;
}

/// Clock backed by the system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Utc::now().date_naive()
    }
}

/// Clock that always reports the same date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// Iterate every date in `[start, end]`, inclusive.
///
/// Yields nothing when `start > end`.
pub fn date_range(start: NaiveDate, end: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    start.iter_days().take_while(move |d| *d <= end)
}

/// Subtract a number of days, saturating at the minimum representable date.
pub fn days_before(date: NaiveDate, days: u32) -> NaiveDate {
    date.checked_sub_days(Days::new(u64::from(days)))
        .unwrap_or(NaiveDate::MIN)
}

/// Format the first instant of a day as an ISO-8601 UTC timestamp.
pub fn start_of_day_utc(date: NaiveDate) -> String {
    format!("{}T00:00:00Z", date.format("%Y-%m-%d"))
}

/// Format the last second of a day as an ISO-8601 UTC timestamp.
pub fn end_of_day_utc(date: NaiveDate) -> String {
    format!("{}T23:59:59Z", date.format("%Y-%m-%d"))
}
