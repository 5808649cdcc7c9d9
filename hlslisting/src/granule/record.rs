//! Raw granule records returned by the catalog.

use super::id::GranuleId;
use crate::sensor::Sensor;
use chrono::{DateTime, NaiveDate, Utc};

/// One acquisition as reported by the catalog.
///
/// Records are immutable once created. The payload is the catalog's own
/// metadata for the granule, kept verbatim; the listing core never looks
/// inside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GranuleRecord {
    identifier: String,
    sensor: Sensor,
    tile: String,
    date: NaiveDate,
    timestamp: DateTime<Utc>,
    payload: String,
}

impl GranuleRecord {
    /// Create a record from its parts.
    pub fn new(
        identifier: impl Into<String>,
        sensor: Sensor,
        tile: impl Into<String>,
        timestamp: DateTime<Utc>,
        payload: impl Into<String>,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            sensor,
            tile: tile.into(),
            date: timestamp.date_naive(),
            timestamp,
            payload: payload.into(),
        }
    }

    /// Create a record from a parsed granule name.
    pub fn from_granule_id(id: &GranuleId, payload: impl Into<String>) -> Self {
        Self::new(id.name(), id.sensor(), id.tile(), id.timestamp(), payload)
    }

    /// Granule identifier issued by the catalog.
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Sensor that acquired the granule.
    pub fn sensor(&self) -> Sensor {
        self.sensor
    }

    /// Tile code.
    pub fn tile(&self) -> &str {
        &self.tile
    }

    /// Acquisition date (UTC).
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Acquisition start time.
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Opaque catalog metadata.
    pub fn payload(&self) -> &str {
        &self.payload
    }

    /// Identity key used for de-duplication.
    pub fn key(&self) -> (String, NaiveDate) {
        (self.identifier.clone(), self.date)
    }
}
