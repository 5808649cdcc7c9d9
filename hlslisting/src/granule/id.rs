//! HLS granule name parsing.
//!
//! HLS v2 granules are named
//! `HLS.<product>.T<tile>.<YYYYDDD>T<HHMMSS>.v<version>`, for example
//! `HLS.S30.T10SEG.2023001T184721.v2.0`. The acquisition date is encoded as
//! year plus day-of-year.

use crate::sensor::Sensor;
use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors raised while parsing a granule name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GranuleIdError {
    /// The name does not have the expected dot-separated fields
    #[error("malformed granule name '{0}'")]
    Malformed(String),

    /// The product field is not S30 or L30
    #[error("unknown HLS product '{product}' in '{name}'")]
    UnknownProduct { name: String, product: String },

    /// The tile field is not a 5-character grid code
    #[error("invalid tile '{tile}' in '{name}'")]
    InvalidTile { name: String, tile: String },

    /// The acquisition timestamp field cannot be decoded
    #[error("invalid acquisition time '{stamp}' in '{name}'")]
    InvalidTimestamp { name: String, stamp: String },
}

/// Parsed HLS granule name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GranuleId {
    name: String,
    sensor: Sensor,
    tile: String,
    timestamp: DateTime<Utc>,
    version: String,
}

impl GranuleId {
    /// Full granule name as issued by the catalog.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Sensor encoded by the product field.
    pub fn sensor(&self) -> Sensor {
        self.sensor
    }

    /// Tile code without the leading `T`.
    pub fn tile(&self) -> &str {
        &self.tile
    }

    /// Acquisition start time.
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Acquisition date (UTC).
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date_naive()
    }

    /// Product version, e.g. `2.0`.
    pub fn version(&self) -> &str {
        &self.version
    }
}

impl fmt::Display for GranuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl FromStr for GranuleId {
    type Err = GranuleIdError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        let malformed = || GranuleIdError::Malformed(name.to_string());

        let mut parts = name.splitn(5, '.');
        let prefix = parts.next().ok_or_else(malformed)?;
        let product = parts.next().ok_or_else(malformed)?;
        let tile_field = parts.next().ok_or_else(malformed)?;
        let stamp = parts.next().ok_or_else(malformed)?;
        let version = parts.next().ok_or_else(malformed)?;

        if prefix != "HLS" {
            return Err(malformed());
        }

        let sensor =
            Sensor::from_product_code(product).ok_or_else(|| GranuleIdError::UnknownProduct {
                name: name.to_string(),
                product: product.to_string(),
            })?;

        let tile = tile_field
            .strip_prefix('T')
            .filter(|t| is_tile_code(t))
            .ok_or_else(|| GranuleIdError::InvalidTile {
                name: name.to_string(),
                tile: tile_field.to_string(),
            })?;

        let timestamp = parse_acquisition_time(stamp).ok_or_else(|| {
            GranuleIdError::InvalidTimestamp {
                name: name.to_string(),
                stamp: stamp.to_string(),
            }
        })?;

        let version = version.strip_prefix('v').unwrap_or(version);

        Ok(Self {
            name: name.to_string(),
            sensor,
            tile: tile.to_string(),
            timestamp,
            version: version.to_string(),
        })
    }
}

/// Decode `YYYYDDDTHHMMSS` into a UTC timestamp.
fn parse_acquisition_time(stamp: &str) -> Option<DateTime<Utc>> {
    let (day, time) = stamp.split_once('T')?;
    if day.len() != 7 || time.len() != 6 {
        return None;
    }

    let year: i32 = day.get(0..4)?.parse().ok()?;
    let ordinal: u32 = day.get(4..7)?.parse().ok()?;
    let date = NaiveDate::from_yo_opt(year, ordinal)?;

    let hour: u32 = time.get(0..2)?.parse().ok()?;
    let minute: u32 = time.get(2..4)?.parse().ok()?;
    let second: u32 = time.get(4..6)?.parse().ok()?;
    let time = NaiveTime::from_hms_opt(hour, minute, second)?;

    Some(Utc.from_utc_datetime(&date.and_time(time)))
}

fn is_tile_code(tile: &str) -> bool {
    tile.len() == 5 && tile.chars().all(|c| c.is_ascii_alphanumeric())
}

/// Normalize a user-supplied tile code.
///
/// Accepts `10SEG`, `10seg` or `T10SEG` and returns `10SEG`. Returns `None`
/// when the input is not a 5-character grid code.
pub fn normalize_tile(tile: &str) -> Option<String> {
    let tile = tile.trim().to_ascii_uppercase();
    let tile = match tile.strip_prefix('T') {
        Some(rest) if rest.len() == 5 => rest.to_string(),
        _ => tile,
    };
    is_tile_code(&tile).then_some(tile)
}
