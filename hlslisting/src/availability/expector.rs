//! Repeat-cycle expectation.

use crate::time::{date_range, days_before};
use chrono::NaiveDate;
use std::collections::BTreeSet;

/// Infers the dates on which a fixed-revisit sensor should have imaged a tile.
///
/// A date is expected if it was observed, or if the date one repeat cycle
/// earlier is expected. Dates are visited in chronological order so an
/// inferred date seeds the next inference a cycle later.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RepeatCycleExpector {
    repeat_days: u32,
}

impl RepeatCycleExpector {
    /// Create an expector for a sensor with the given repeat cycle.
    ///
    /// A cycle of zero is treated as one day.
    pub fn new(repeat_days: u32) -> Self {
        Self {
            repeat_days: repeat_days.max(1),
        }
    }

    /// Repeat cycle in days.
    pub fn repeat_days(&self) -> u32 {
        self.repeat_days
    }

    /// Expected dates within `[window_start, window_end]`.
    ///
    /// Seeds earlier than `window_start` still propagate into the window;
    /// seeds later than `window_end` are ignored.
    pub fn expected_dates(
        &self,
        seeds: &BTreeSet<NaiveDate>,
        window_start: NaiveDate,
        window_end: NaiveDate,
    ) -> BTreeSet<NaiveDate> {
        let mut expected = BTreeSet::new();
        if window_start > window_end {
            return expected;
        }

        let Some(&first_seed) = seeds.range(..=window_end).next() else {
            return expected;
        };

        for date in date_range(first_seed.min(window_start), window_end) {
            let previous = days_before(date, self.repeat_days);
            if seeds.contains(&date) || (previous < date && expected.contains(&previous)) {
                expected.insert(date);
            }
        }

        expected.split_off(&window_start)
    }
}
