//! Error types for granule downloads.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort a granule download.
///
/// Any of these leaves no granule directory behind.
#[derive(Debug, Error)]
pub enum DownloadError {
    /// The granule metadata lists no downloadable data files
    #[error("Granule {granule} has no data files")]
    NoDataFiles { granule: String },

    /// The granule metadata could not be read
    #[error("Invalid metadata for granule {granule}: {reason}")]
    InvalidPayload { granule: String, reason: String },

    /// One constituent file could not be fetched
    #[error("Failed to download {url} for granule {granule}: {reason}")]
    FileFailed {
        granule: String,
        url: String,
        reason: String,
    },

    /// Local filesystem error
    #[error("Failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl DownloadError {
    pub(super) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        DownloadError::Io {
            path: path.into(),
            source,
        }
    }
}
