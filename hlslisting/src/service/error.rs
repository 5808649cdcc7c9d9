//! Error types for the service facade.

use crate::download::DownloadError;
use crate::listing::ListingError;
use crate::sensor::Sensor;
use chrono::NaiveDate;
use std::fmt;

/// Errors that can occur when resolving or fetching a granule.
#[derive(Debug)]
pub enum ServiceError {
    /// No granule yet; the acquisition is unexpected or still inside the
    /// give-up window. Asking again later may succeed.
    SensorNotAvailable {
        sensor: Sensor,
        tile: String,
        date: NaiveDate,
    },
    /// The acquisition was expected and never published. Asking again will
    /// not change the answer.
    SensorMissing {
        sensor: Sensor,
        tile: String,
        date: NaiveDate,
    },
    /// Listing could not be resolved
    Listing(ListingError),
    /// Granule files could not be downloaded
    Download(DownloadError),
    /// Failed to create HTTP client
    HttpClientError(String),
}

impl ServiceError {
    /// True if the caller may retry later and expect a different outcome.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::SensorNotAvailable { .. } => true,
            Self::Listing(e) => e.is_unreachable(),
            Self::Download(DownloadError::FileFailed { .. }) => true,
            _ => false,
        }
    }
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SensorNotAvailable { sensor, tile, date } => write!(
                f,
                "{} is not available for tile {} on {} (try again later)",
                sensor, tile, date
            ),
            Self::SensorMissing { sensor, tile, date } => write!(
                f,
                "{} is missing for tile {} on {}",
                sensor, tile, date
            ),
            Self::Listing(e) => write!(f, "Listing error: {}", e),
            Self::Download(e) => write!(f, "Download error: {}", e),
            Self::HttpClientError(msg) => write!(f, "HTTP client error: {}", msg),
        }
    }
}

impl std::error::Error for ServiceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Listing(e) => Some(e),
            Self::Download(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ListingError> for ServiceError {
    fn from(e: ListingError) -> Self {
        Self::Listing(e)
    }
}

impl From<DownloadError> for ServiceError {
    fn from(e: DownloadError) -> Self {
        Self::Download(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogError;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 16).unwrap()
    }

    #[test]
    fn test_display_not_available() {
        let err = ServiceError::SensorNotAvailable {
            sensor: Sensor::Sentinel,
            tile: "10SEG".to_string(),
            date: date(),
        };
        assert!(err.to_string().contains("sentinel"));
        assert!(err.to_string().contains("2024-01-16"));
        assert!(err.to_string().contains("try again later"));
        assert!(err.is_retryable());
    }

    #[test]
    fn test_missing_is_not_retryable() {
        let err = ServiceError::SensorMissing {
            sensor: Sensor::Landsat,
            tile: "10SEG".to_string(),
            date: date(),
        };
        assert!(err.to_string().contains("missing"));
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_from_listing_error() {
        let err: ServiceError = ListingError::Catalog(CatalogError::Unreachable {
            attempts: 3,
            last_error: "timeout".to_string(),
        })
        .into();
        assert!(matches!(err, ServiceError::Listing(_)));
        assert!(err.is_retryable());
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_from_download_error() {
        let err: ServiceError = DownloadError::NoDataFiles {
            granule: "g".to_string(),
        }
        .into();
        assert!(err.to_string().contains("Download error"));
        assert!(!err.is_retryable());
    }
}
