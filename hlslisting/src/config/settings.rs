//! Settings structs for all configuration sections.
//!
//! Each struct represents one `[section]` of the INI config file.
//! These are pure data types with no parsing or serialization logic.

use std::path::PathBuf;
use std::time::Duration;

use super::listing::ListingConfig;

/// Complete application configuration loaded from config.ini.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    /// Catalog search settings
    pub catalog: CatalogSettings,
    /// Availability classification settings
    pub availability: AvailabilitySettings,
    /// Granule download settings
    pub download: DownloadSettings,
    /// Logging settings
    pub logging: LoggingSettings,
}

/// Catalog configuration.
#[derive(Debug, Clone)]
pub struct CatalogSettings {
    /// CMR search root URL
    pub url: String,
    /// Entries requested per page
    pub page_size: usize,
    /// Total search attempts before the catalog is declared unreachable
    pub retry_count: u32,
    /// Seconds to wait between attempts
    pub retry_wait_secs: u64,
    /// HTTP request timeout in seconds
    pub timeout_secs: u64,
    /// Earthdata bearer token (optional)
    pub token: Option<String>,
}

/// Availability classification configuration.
#[derive(Debug, Clone)]
pub struct AvailabilitySettings {
    /// Days after which an expected but unpublished acquisition is missing
    pub give_up_days: u32,
    /// Sentinel-2 repeat cycle in days
    pub sentinel_repeat_days: u32,
    /// Landsat repeat cycle in days
    pub landsat_repeat_days: u32,
}

/// Download configuration.
#[derive(Debug, Clone)]
pub struct DownloadSettings {
    /// Root directory for downloaded granules
    pub directory: PathBuf,
}

/// Logging configuration.
#[derive(Debug, Clone)]
pub struct LoggingSettings {
    /// Log file path
    pub file: PathBuf,
}

impl ConfigFile {
    /// Project the file settings onto the listing core configuration.
    pub fn listing_config(&self) -> ListingConfig {
        ListingConfig::new()
            .with_retry_count(self.catalog.retry_count)
            .with_retry_wait(Duration::from_secs(self.catalog.retry_wait_secs))
            .with_page_size(self.catalog.page_size)
            .with_give_up_days(self.availability.give_up_days)
            .with_sentinel_repeat_days(self.availability.sentinel_repeat_days)
            .with_landsat_repeat_days(self.availability.landsat_repeat_days)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_config_projection() {
        let mut config = ConfigFile::default();
        config.catalog.retry_count = 7;
        config.catalog.retry_wait_secs = 1;
        config.availability.give_up_days = 14;
        config.availability.landsat_repeat_days = 8;

        let listing = config.listing_config();
        assert_eq!(listing.retry_count(), 7);
        assert_eq!(listing.retry_wait(), Duration::from_secs(1));
        assert_eq!(listing.give_up_days(), 14);
        assert_eq!(listing.landsat_repeat_days(), 8);
        assert_eq!(listing.max_repeat_days(), 8);
    }

    #[test]
    fn test_default_projection_matches_listing_defaults() {
        assert_eq!(ConfigFile::default().listing_config(), ListingConfig::default());
    }
}
