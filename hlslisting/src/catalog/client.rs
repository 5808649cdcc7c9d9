//! Bounded-retry catalog client.

use super::types::{CatalogError, GranuleSearch};
use crate::config::ListingConfig;
use crate::granule::GranuleRecord;
use chrono::NaiveDate;
use std::thread;
use std::time::Duration;
use tracing::{debug, warn};

/// Wraps a [`GranuleSearch`] backend with a fixed retry budget.
///
/// Each transient failure is followed by a blocking sleep of `retry_wait`
/// before the next attempt. There is no backoff growth and no jitter. When
/// every attempt fails the call returns [`CatalogError::Unreachable`].
pub struct CatalogClient<S: GranuleSearch> {
    search: S,
    retry_count: u32,
    retry_wait: Duration,
}

impl<S: GranuleSearch> CatalogClient<S> {
    /// Creates a client.
    ///
    /// # Arguments
    ///
    /// * `search` - Backend performing single search attempts
    /// * `retry_count` - Total attempts per search (0 is treated as 1)
    /// * `retry_wait` - Sleep between consecutive attempts
    pub fn new(search: S, retry_count: u32, retry_wait: Duration) -> Self {
        Self {
            search,
            retry_count,
            retry_wait,
        }
    }

    /// Creates a client using the retry settings of a [`ListingConfig`].
    pub fn from_config(search: S, config: &ListingConfig) -> Self {
        Self::new(search, config.retry_count(), config.retry_wait())
    }

    /// Search for every granule of `tile` within `[start, end]`.
    ///
    /// Returns records sorted ascending by acquisition timestamp. An empty
    /// vector means the catalog has nothing for the window.
    pub fn search(
        &self,
        tile: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<GranuleRecord>, CatalogError> {
        let attempts = self.retry_count.max(1);
        let mut last_error = String::new();

        for attempt in 1..=attempts {
            debug!(
                backend = self.search.name(),
                tile = tile,
                start = %start,
                end = %end,
                attempt = attempt,
                "Searching catalog"
            );

            match self.search.search(tile, start, end) {
                Ok(mut records) => {
                    records.sort_by(|a, b| {
                        a.timestamp()
                            .cmp(&b.timestamp())
                            .then_with(|| a.identifier().cmp(b.identifier()))
                    });
                    debug!(tile = tile, granules = records.len(), "Catalog search complete");
                    return Ok(records);
                }
                Err(e) if !e.is_transient() => return Err(e),
                Err(e) => {
                    warn!(
                        tile = tile,
                        attempt = attempt,
                        max_attempts = attempts,
                        error = %e,
                        "Catalog search failed"
                    );
                    last_error = e.to_string();
                    if attempt < attempts {
                        thread::sleep(self.retry_wait);
                    }
                }
            }
        }

        warn!(
            tile = tile,
            attempts = attempts,
            "Catalog unreachable, retry budget exhausted"
        );
        Err(CatalogError::Unreachable {
            attempts,
            last_error,
        })
    }

    /// Access the underlying search backend.
    pub fn backend(&self) -> &S {
        &self.search
    }

    /// Total attempts per search.
    pub fn retry_count(&self) -> u32 {
        self.retry_count.max(1)
    }
}
