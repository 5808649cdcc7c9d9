//! De-duplicating in-memory store of granule records.

use super::record::GranuleRecord;
use crate::sensor::Sensor;
use chrono::NaiveDate;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

/// Accumulates every record returned by the catalog for the process lifetime.
///
/// Records are keyed by `(identifier, date)`; ingesting a record whose key is
/// already present is a no-op. There is no eviction: the store only grows
/// with the date ranges actually queried.
#[derive(Debug, Default)]
pub struct GranuleStore {
    /// Primary index keyed by identity.
    records: HashMap<(String, NaiveDate), Arc<GranuleRecord>>,
    /// Per-tile date index for range queries.
    by_tile: HashMap<String, BTreeMap<NaiveDate, Vec<Arc<GranuleRecord>>>>,
}

impl GranuleStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge records into the store.
    ///
    /// Returns the number of records that were not already present.
    pub fn ingest<I>(&mut self, records: I) -> usize
    where
        I: IntoIterator<Item = GranuleRecord>,
    {
        let mut added = 0;

        for record in records {
            let key = record.key();
            if self.records.contains_key(&key) {
                continue;
            }

            let record = Arc::new(record);
            self.by_tile
                .entry(record.tile().to_string())
                .or_default()
                .entry(record.date())
                .or_default()
                .push(Arc::clone(&record));
            self.records.insert(key, record);
            added += 1;
        }

        added
    }

    /// Records for a tile acquired within `[start, end]`, ordered by
    /// acquisition time.
    pub fn by_tile_and_date_range(
        &self,
        tile: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Vec<Arc<GranuleRecord>> {
        if start > end {
            return Vec::new();
        }

        let mut records: Vec<_> = self
            .by_tile
            .get(tile)
            .into_iter()
            .flat_map(|dates| dates.range(start..=end))
            .flat_map(|(_, records)| records.iter().cloned())
            .collect();

        records.sort_by(|a, b| {
            a.timestamp()
                .cmp(&b.timestamp())
                .then_with(|| a.identifier().cmp(b.identifier()))
        });
        records
    }

    /// Records for one sensor, tile and date range, ordered by acquisition
    /// time.
    pub fn by_sensor(
        &self,
        sensor: Sensor,
        tile: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Vec<Arc<GranuleRecord>> {
        self.by_tile_and_date_range(tile, start, end)
            .into_iter()
            .filter(|r| r.sensor() == sensor)
            .collect()
    }

    /// Number of distinct records held.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True if nothing has been ingested.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
