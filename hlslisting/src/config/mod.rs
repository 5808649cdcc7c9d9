//! Configuration types for the HLS listing components.
//!
//! Two layers live here:
//!
//! - [`ListingConfig`] is the immutable core configuration handed to the
//!   catalog client and the listing cache.
//! - [`ConfigFile`] is the user-facing `~/.hlslisting/config.ini`, which
//!   projects onto a `ListingConfig` via [`ConfigFile::listing_config`].
//!
//! # Example
//!
//! ```
//! use hlslisting::config::{ConfigFile, ListingConfig};
//!
//! let file = ConfigFile::default();
//! assert_eq!(file.listing_config(), ListingConfig::default());
//! ```

mod defaults;
mod file;
mod listing;
mod parser;
mod settings;
mod writer;

pub use defaults::*;
pub use file::{config_directory, config_file_path, ConfigFileError};
pub use listing::ListingConfig;
pub use settings::{
    AvailabilitySettings, CatalogSettings, ConfigFile, DownloadSettings, LoggingSettings,
};
