//! Cell classification.

use super::Availability;
use crate::granule::GranuleRecord;
use crate::time::days_before;
use chrono::NaiveDate;
use std::sync::Arc;

/// Assigns one [`Availability`] to a (date, sensor) cell.
///
/// The give-up date is `today - give_up_days`. A date on or before it is old
/// enough for an expected but unpublished acquisition to be declared missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AvailabilityClassifier {
    today: NaiveDate,
    give_up_days: u32,
}

impl AvailabilityClassifier {
    /// Create a classifier anchored at `today`.
    pub fn new(today: NaiveDate, give_up_days: u32) -> Self {
        Self {
            today,
            give_up_days,
        }
    }

    /// The date this classifier treats as today.
    pub fn today(&self) -> NaiveDate {
        self.today
    }

    /// Latest date that can be classified missing.
    pub fn give_up_date(&self) -> NaiveDate {
        days_before(self.today, self.give_up_days)
    }

    /// True if `date` is old enough to give up waiting for a granule.
    pub fn is_past_give_up(&self, date: NaiveDate) -> bool {
        date <= self.give_up_date()
    }

    /// Classify one cell.
    ///
    /// # Arguments
    ///
    /// * `date` - Date of the cell
    /// * `record` - Granule found for the cell, if any
    /// * `expected` - Whether the repeat cycle predicts an acquisition on `date`
    pub fn classify(
        &self,
        date: NaiveDate,
        record: Option<Arc<GranuleRecord>>,
        expected: bool,
    ) -> Availability {
        match record {
            Some(record) => Availability::Available(record),
            None if expected && self.is_past_give_up(date) => Availability::Missing,
            None => Availability::NotYetAvailable,
        }
    }
}
