//! Error types for listing requests.

use crate::catalog::CatalogError;
use chrono::NaiveDate;
use thiserror::Error;

/// Errors returned by [`super::ListingCache::listing`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ListingError {
    /// Start date is after end date
    #[error("Invalid date range: {start} is after {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    /// Tile code is not a 5-character grid code
    #[error("Invalid tile code: '{0}'")]
    InvalidTile(String),

    /// Catalog search failed
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

impl ListingError {
    /// True if the catalog exhausted its retry budget.
    pub fn is_unreachable(&self) -> bool {
        matches!(self, ListingError::Catalog(CatalogError::Unreachable { .. }))
    }
}
