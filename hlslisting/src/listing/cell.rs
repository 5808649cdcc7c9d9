//! One row of a tile listing.

use crate::availability::Availability;
use crate::sensor::Sensor;
use chrono::NaiveDate;
use std::fmt;

/// Classified availability of both sensors for one tile and date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingCell {
    date: NaiveDate,
    tile: String,
    sentinel: Availability,
    landsat: Availability,
}

impl ListingCell {
    /// Create a cell.
    pub fn new(
        date: NaiveDate,
        tile: impl Into<String>,
        sentinel: Availability,
        landsat: Availability,
    ) -> Self {
        Self {
            date,
            tile: tile.into(),
            sentinel,
            landsat,
        }
    }

    /// Date of the row.
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Tile code of the row.
    pub fn tile(&self) -> &str {
        &self.tile
    }

    /// Sentinel-2 slot.
    pub fn sentinel(&self) -> &Availability {
        &self.sentinel
    }

    /// Landsat slot.
    pub fn landsat(&self) -> &Availability {
        &self.landsat
    }

    /// Slot for a sensor.
    pub fn get(&self, sensor: Sensor) -> &Availability {
        match sensor {
            Sensor::Sentinel => &self.sentinel,
            Sensor::Landsat => &self.landsat,
        }
    }

    /// True if either sensor has a granule on this date.
    pub fn has_granule(&self) -> bool {
        self.sentinel.is_available() || self.landsat.is_available()
    }
}

impl fmt::Display for ListingCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}  {}  S30={}  L30={}",
            self.date.format("%Y-%m-%d"),
            self.tile,
            self.sentinel,
            self.landsat
        )
    }
}
