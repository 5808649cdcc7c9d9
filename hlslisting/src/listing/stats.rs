//! Listing cache statistics.

/// Counters for monitoring cache behaviour.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListingStats {
    /// Catalog searches that succeeded
    pub catalog_queries: u64,
    /// Uncovered dates filled by a successful search
    pub gap_dates: u64,
    /// New rows merged into the cache
    pub rows_merged: u64,
    /// Merges that met an existing row with a different value
    pub stale_overlaps: u64,
}

impl ListingStats {
    /// Create an empty set of counters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Average rows merged per catalog search.
    ///
    /// Returns `None` until a search has been issued.
    pub fn rows_per_query(&self) -> Option<f64> {
        if self.catalog_queries == 0 {
            return None;
        }
        Some(self.rows_merged as f64 / self.catalog_queries as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_stats_are_zero() {
        let stats = ListingStats::new();
        assert_eq!(stats, ListingStats::default());
        assert_eq!(stats.rows_per_query(), None);
    }

    #[test]
    fn test_rows_per_query() {
        let stats = ListingStats {
            catalog_queries: 2,
            rows_merged: 30,
            ..Default::default()
        };
        assert_eq!(stats.rows_per_query(), Some(15.0));
    }
}
