//! Catalog types and traits

use crate::granule::GranuleRecord;
use chrono::NaiveDate;
use thiserror::Error;

/// Errors that can occur while searching the granule catalog.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// HTTP request failed or returned a non-success status
    #[error("HTTP error: {0}")]
    Http(String),

    /// The catalog answered with something that is not a granule search result
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// The search request could not be built
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Every attempt within the retry budget failed
    #[error("Catalog unreachable after {attempts} attempt(s): {last_error}")]
    Unreachable { attempts: u32, last_error: String },
}

impl CatalogError {
    /// True for failures of the remote exchange that another attempt may fix.
    pub fn is_transient(&self) -> bool {
        matches!(self, CatalogError::Http(_) | CatalogError::InvalidResponse(_))
    }
}

/// A single search attempt against a granule catalog.
///
/// Implementations perform exactly one attempt and report failure through
/// [`CatalogError`]; retrying is the job of
/// [`CatalogClient`](super::CatalogClient).
pub trait GranuleSearch: Send + Sync {
    /// Find every granule of either sensor for `tile` acquired within
    /// `[start, end]` (whole UTC days).
    ///
    /// An empty result is a valid answer, not an error.
    fn search(
        &self,
        tile: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<GranuleRecord>, CatalogError>;

    /// Returns the backend name for logging.
    fn name(&self) -> &str;
}
