//! Default values and constants for all configuration settings.
//!
//! Contains all `DEFAULT_*` constants and the `ConfigFile::default()`
//! implementation.

use std::path::PathBuf;

use super::settings::*;
use crate::catalog::{DEFAULT_CMR_URL, DEFAULT_HTTP_TIMEOUT_SECS};
use crate::sensor::{LANDSAT_REPEAT_DAYS, SENTINEL_REPEAT_DAYS};

// =============================================================================
// Catalog defaults
// =============================================================================

/// Default number of catalog search attempts.
pub const DEFAULT_RETRY_COUNT: u32 = 3;

/// Default wait between catalog search attempts, in seconds.
pub const DEFAULT_RETRY_WAIT_SECS: u64 = 20;

/// Default number of entries requested per catalog page.
pub const DEFAULT_PAGE_SIZE: usize = 2000;

// =============================================================================
// Availability defaults
// =============================================================================

/// Default give-up window in days.
///
/// An expected acquisition older than this that still has no catalog record
/// is classified as missing rather than pending.
pub const DEFAULT_GIVE_UP_DAYS: u32 = 10;

/// Default Sentinel-2 repeat cycle in days.
pub const DEFAULT_SENTINEL_REPEAT_DAYS: u32 = SENTINEL_REPEAT_DAYS;

/// Default Landsat repeat cycle in days.
pub const DEFAULT_LANDSAT_REPEAT_DAYS: u32 = LANDSAT_REPEAT_DAYS;

// =============================================================================
// ConfigFile::default()
// =============================================================================

impl Default for ConfigFile {
    fn default() -> Self {
        let config_dir = super::file::config_directory();
        let download_dir = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("hlslisting");

        Self {
            catalog: CatalogSettings {
                url: DEFAULT_CMR_URL.to_string(),
                page_size: DEFAULT_PAGE_SIZE,
                retry_count: DEFAULT_RETRY_COUNT,
                retry_wait_secs: DEFAULT_RETRY_WAIT_SECS,
                timeout_secs: DEFAULT_HTTP_TIMEOUT_SECS,
                token: None,
            },
            availability: AvailabilitySettings {
                give_up_days: DEFAULT_GIVE_UP_DAYS,
                sentinel_repeat_days: DEFAULT_SENTINEL_REPEAT_DAYS,
                landsat_repeat_days: DEFAULT_LANDSAT_REPEAT_DAYS,
            },
            download: DownloadSettings {
                directory: download_dir,
            },
            logging: LoggingSettings {
                file: config_dir.join("hlslisting.log"),
            },
        }
    }
}
