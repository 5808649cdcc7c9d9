//! Sensor definitions.
//!
//! HLS merges two independent instruments onto a common tiling grid. Each
//! has its own product code in granule names, its own catalog collection and
//! its own orbital repeat cycle.

use std::fmt;
use std::str::FromStr;

/// Default Sentinel-2 repeat cycle in days (two-satellite constellation).
pub const SENTINEL_REPEAT_DAYS: u32 = 5;

/// Default Landsat 8/9 repeat cycle in days.
pub const LANDSAT_REPEAT_DAYS: u32 = 16;

/// Catalog collection for the HLS Sentinel-2 (S30) v2.0 product.
pub const SENTINEL_CONCEPT_ID: &str = "C2021957295-LPCLOUD";

/// Catalog collection for the HLS Landsat (L30) v2.0 product.
pub const LANDSAT_CONCEPT_ID: &str = "C2021957657-LPCLOUD";

/// One of the two instruments contributing to HLS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Sensor {
    /// Sentinel-2A/2B MSI, published as the S30 product
    Sentinel,
    /// Landsat 8/9 OLI, published as the L30 product
    Landsat,
}

impl Sensor {
    /// Both sensors, in listing column order.
    pub const ALL: [Sensor; 2] = [Sensor::Sentinel, Sensor::Landsat];

    /// Product code used in granule names (`S30` / `L30`).
    pub fn product_code(&self) -> &'static str {
        match self {
            Sensor::Sentinel => "S30",
            Sensor::Landsat => "L30",
        }
    }

    /// Resolve a sensor from its granule-name product code.
    pub fn from_product_code(code: &str) -> Option<Self> {
        match code {
            "S30" => Some(Sensor::Sentinel),
            "L30" => Some(Sensor::Landsat),
            _ => None,
        }
    }

    /// Catalog collection concept identifier.
    pub fn concept_id(&self) -> &'static str {
        match self {
            Sensor::Sentinel => SENTINEL_CONCEPT_ID,
            Sensor::Landsat => LANDSAT_CONCEPT_ID,
        }
    }

    /// Resolve a sensor from a catalog collection concept identifier.
    pub fn from_concept_id(concept_id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.concept_id() == concept_id)
    }

    /// Lowercase name for display and command-line parsing.
    pub fn name(&self) -> &'static str {
        match self {
            Sensor::Sentinel => "sentinel",
            Sensor::Landsat => "landsat",
        }
    }
}

impl fmt::Display for Sensor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Sensor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sentinel" | "s30" => Ok(Sensor::Sentinel),
            "landsat" | "l30" => Ok(Sensor::Landsat),
            other => Err(format!(
                "unknown sensor '{}', expected 'sentinel' or 'landsat'",
                other
            )),
        }
    }
}
