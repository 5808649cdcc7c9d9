//! Availability inference for tile/date/sensor cells.
//!
//! Each sensor images a tile on a fixed repeat cycle. Once an acquisition is
//! observed, the [`RepeatCycleExpector`] infers every later date on which the
//! sensor should have imaged the tile again, and the
//! [`AvailabilityClassifier`] turns presence plus expectation plus record age
//! into one [`Availability`] per cell.

mod classifier;
mod expector;

pub use classifier::AvailabilityClassifier;
pub use expector::RepeatCycleExpector;

use crate::granule::GranuleRecord;
use std::fmt;
use std::sync::Arc;

/// Resolved state of one sensor on one tile and date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Availability {
    /// The catalog holds a granule for this cell.
    Available(Arc<GranuleRecord>),
    /// The sensor was expected, the give-up window has passed, and the
    /// catalog never published a granule. Durable negative result.
    Missing,
    /// Not expected, or expected but still inside the give-up window.
    /// Callers may ask again later.
    NotYetAvailable,
}

impl Availability {
    /// True if a granule is present.
    pub fn is_available(&self) -> bool {
        matches!(self, Availability::Available(_))
    }

    /// True if the cell is a durable absence.
    pub fn is_missing(&self) -> bool {
        matches!(self, Availability::Missing)
    }

    /// The granule record, if present.
    pub fn record(&self) -> Option<&Arc<GranuleRecord>> {
        match self {
            Availability::Available(record) => Some(record),
            _ => None,
        }
    }

    /// Short label used in listings.
    pub fn label(&self) -> &str {
        match self {
            Availability::Available(record) => record.identifier(),
            Availability::Missing => "missing",
            Availability::NotYetAvailable => "-",
        }
    }
}

impl fmt::Display for Availability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
