//! Listing core configuration.

use std::time::Duration;

use super::defaults::{
    DEFAULT_GIVE_UP_DAYS, DEFAULT_LANDSAT_REPEAT_DAYS, DEFAULT_PAGE_SIZE, DEFAULT_RETRY_COUNT,
    DEFAULT_RETRY_WAIT_SECS, DEFAULT_SENTINEL_REPEAT_DAYS,
};
use crate::sensor::Sensor;

/// Configuration for catalog retries and availability classification.
///
/// These are fixed for the life of a listing cache; nothing here is derived
/// at runtime.
///
/// # Example
///
/// ```
/// use hlslisting::config::ListingConfig;
/// use std::time::Duration;
///
/// // Using defaults
/// let config = ListingConfig::default();
/// assert_eq!(config.retry_count(), 3);
/// assert_eq!(config.retry_wait(), Duration::from_secs(20));
/// assert_eq!(config.give_up_days(), 10);
/// assert_eq!(config.max_repeat_days(), 16);
///
/// // Custom configuration
/// let config = ListingConfig::new()
///     .with_retry_count(5)
///     .with_retry_wait(Duration::ZERO)
///     .with_give_up_days(7);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListingConfig {
    /// Total catalog search attempts
    retry_count: u32,
    /// Wait between catalog search attempts
    retry_wait: Duration,
    /// Give-up window in days
    give_up_days: u32,
    /// Sentinel-2 repeat cycle in days
    sentinel_repeat_days: u32,
    /// Landsat repeat cycle in days
    landsat_repeat_days: u32,
    /// Catalog page size
    page_size: usize,
}

impl ListingConfig {
    /// Create a new listing configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of catalog search attempts.
    ///
    /// Default: 3 attempts.
    pub fn with_retry_count(mut self, retry_count: u32) -> Self {
        self.retry_count = retry_count;
        self
    }

    /// Set the fixed wait between catalog search attempts.
    ///
    /// Default: 20 seconds.
    pub fn with_retry_wait(mut self, retry_wait: Duration) -> Self {
        self.retry_wait = retry_wait;
        self
    }

    /// Set the give-up window in days.
    ///
    /// Default: 10 days.
    pub fn with_give_up_days(mut self, days: u32) -> Self {
        self.give_up_days = days;
        self
    }

    /// Set the Sentinel-2 repeat cycle in days (minimum 1).
    pub fn with_sentinel_repeat_days(mut self, days: u32) -> Self {
        self.sentinel_repeat_days = days.max(1);
        self
    }

    /// Set the Landsat repeat cycle in days (minimum 1).
    pub fn with_landsat_repeat_days(mut self, days: u32) -> Self {
        self.landsat_repeat_days = days.max(1);
        self
    }

    /// Set the catalog page size.
    ///
    /// Default: 2000 entries.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Get the number of catalog search attempts.
    pub fn retry_count(&self) -> u32 {
        self.retry_count
    }

    /// Get the wait between catalog search attempts.
    pub fn retry_wait(&self) -> Duration {
        self.retry_wait
    }

    /// Get the give-up window in days.
    pub fn give_up_days(&self) -> u32 {
        self.give_up_days
    }

    /// Get the Sentinel-2 repeat cycle in days.
    pub fn sentinel_repeat_days(&self) -> u32 {
        self.sentinel_repeat_days
    }

    /// Get the Landsat repeat cycle in days.
    pub fn landsat_repeat_days(&self) -> u32 {
        self.landsat_repeat_days
    }

    /// Get the catalog page size.
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Repeat cycle for a sensor.
    pub fn repeat_days(&self, sensor: Sensor) -> u32 {
        match sensor {
            Sensor::Sentinel => self.sentinel_repeat_days,
            Sensor::Landsat => self.landsat_repeat_days,
        }
    }

    /// The longer of the two repeat cycles.
    ///
    /// Catalog searches are widened backwards by this many days so that
    /// expectation can be inferred at the start of a requested range.
    pub fn max_repeat_days(&self) -> u32 {
        self.sentinel_repeat_days.max(self.landsat_repeat_days)
    }
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            retry_count: DEFAULT_RETRY_COUNT,
            retry_wait: Duration::from_secs(DEFAULT_RETRY_WAIT_SECS),
            give_up_days: DEFAULT_GIVE_UP_DAYS,
            sentinel_repeat_days: DEFAULT_SENTINEL_REPEAT_DAYS,
            landsat_repeat_days: DEFAULT_LANDSAT_REPEAT_DAYS,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}
