//! Granule download.
//!
//! Retrieves the data files of a resolved [`GranuleRecord`] to local disk.
//! A failure on any one file fails the whole granule.
//!
//! [`GranuleRecord`]: crate::granule::GranuleRecord

mod downloader;
mod error;

pub use downloader::GranuleDownloader;
pub use error::DownloadError;
