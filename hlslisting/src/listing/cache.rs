//! Incremental per-tile listing cache.

use super::cell::ListingCell;
use super::error::ListingError;
use super::stats::ListingStats;
use crate::availability::{AvailabilityClassifier, RepeatCycleExpector};
use crate::catalog::{CatalogClient, GranuleSearch};
use crate::config::ListingConfig;
use crate::granule::{normalize_tile, GranuleStore};
use crate::sensor::Sensor;
use crate::time::{date_range, days_before, Clock, SystemClock};
use chrono::NaiveDate;
use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use tracing::{debug, info, warn};

/// Cached state for one tile.
#[derive(Debug, Default)]
struct TileListing {
    /// Resolved rows; the key set is the tile's coverage.
    cells: BTreeMap<NaiveDate, ListingCell>,
    /// Dates each sensor has been inferred to image the tile.
    expected: HashMap<Sensor, BTreeSet<NaiveDate>>,
}

/// Per-tile table of classified listing rows.
///
/// A request only searches the catalog for dates that are not yet covered.
/// The search window is widened backwards by the longest repeat cycle so
/// that expectation can be inferred at the start of the gap; the widened
/// pre-roll is never stored as coverage. Rows, once cached, are never
/// rewritten.
///
/// The cache is not synchronised. Concurrent callers must serialise access,
/// for example through [`HlsService`](crate::service::HlsService).
pub struct ListingCache<S: GranuleSearch, K: Clock = SystemClock> {
    catalog: CatalogClient<S>,
    store: GranuleStore,
    config: ListingConfig,
    clock: K,
    tiles: HashMap<String, TileListing>,
    stats: ListingStats,
}

impl<S: GranuleSearch> ListingCache<S, SystemClock> {
    /// Create a cache over a search backend using the system clock.
    pub fn with_search(search: S, config: ListingConfig) -> Self {
        Self::new(CatalogClient::from_config(search, &config), config, SystemClock)
    }
}

impl<S: GranuleSearch, K: Clock> ListingCache<S, K> {
    /// Create a cache.
    ///
    /// # Arguments
    ///
    /// * `catalog` - Retrying catalog client
    /// * `config` - Give-up window and repeat cycles
    /// * `clock` - Source of "today" for give-up decisions
    pub fn new(catalog: CatalogClient<S>, config: ListingConfig, clock: K) -> Self {
        Self {
            catalog,
            store: GranuleStore::new(),
            config,
            clock,
            tiles: HashMap::new(),
            stats: ListingStats::new(),
        }
    }

    /// Rows for `tile` covering exactly `[start, end]`, one per date.
    ///
    /// Searches the catalog only for uncovered dates. If the search fails
    /// the cache is left unchanged and the error is returned.
    pub fn listing(
        &mut self,
        tile: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<ListingCell>, ListingError> {
        if start > end {
            return Err(ListingError::InvalidRange { start, end });
        }
        let tile = normalize_tile(tile).ok_or_else(|| ListingError::InvalidTile(tile.to_string()))?;

        let gaps = self.gaps(&tile, start, end);
        if !gaps.is_empty() {
            self.fill(&tile, &gaps)?;
        }

        Ok(self
            .tiles
            .get(&tile)
            .map(|listing| listing.cells.range(start..=end).map(|(_, c)| c.clone()).collect())
            .unwrap_or_default())
    }

    /// Requested dates that have no cached row.
    fn gaps(&self, tile: &str, start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
        let covered = self.tiles.get(tile).map(|listing| &listing.cells);
        date_range(start, end)
            .filter(|date| !covered.is_some_and(|cells| cells.contains_key(date)))
            .collect()
    }

    /// Search, infer, classify and merge rows for the gap dates.
    fn fill(&mut self, tile: &str, gaps: &[NaiveDate]) -> Result<(), ListingError> {
        let (Some(&first_gap), Some(&last_gap)) = (gaps.first(), gaps.last()) else {
            return Ok(());
        };
        let search_start = days_before(first_gap, self.config.max_repeat_days());

        debug!(
            tile = tile,
            gap_dates = gaps.len(),
            first_gap = %first_gap,
            last_gap = %last_gap,
            search_start = %search_start,
            "Listing gap"
        );
        // Nothing below runs unless the search succeeded
        let records = self.catalog.search(tile, search_start, last_gap)?;
        self.stats.gap_dates += gaps.len() as u64;
        self.stats.catalog_queries += 1;
        let added = self.store.ingest(records);
        debug!(tile = tile, new_granules = added, "Ingested catalog results");

        let classifier = AvailabilityClassifier::new(self.clock.today(), self.config.give_up_days());
        let listing = self.tiles.entry(tile.to_string()).or_default();

        let mut expected_by_sensor = HashMap::new();
        for sensor in Sensor::ALL {
            let mut seeds: BTreeSet<NaiveDate> = self
                .store
                .by_sensor(sensor, tile, search_start, last_gap)
                .iter()
                .map(|record| record.date())
                .collect();
            let known = listing.expected.entry(sensor).or_default();
            seeds.extend(known.iter().copied());

            let expector = RepeatCycleExpector::new(self.config.repeat_days(sensor));
            let expected = expector.expected_dates(&seeds, search_start, last_gap);
            known.extend(expected.iter().copied());
            expected_by_sensor.insert(sensor, expected);
        }

        let mut merged = 0u64;
        for &date in gaps {
            let slot = |sensor: Sensor| {
                let record = self
                    .store
                    .by_sensor(sensor, tile, date, date)
                    .into_iter()
                    .next();
                let expected = expected_by_sensor
                    .get(&sensor)
                    .is_some_and(|dates| dates.contains(&date));
                classifier.classify(date, record, expected)
            };
            let cell = ListingCell::new(date, tile, slot(Sensor::Sentinel), slot(Sensor::Landsat));

            match listing.cells.entry(date) {
                Entry::Vacant(entry) => {
                    entry.insert(cell);
                    merged += 1;
                }
                Entry::Occupied(existing) => {
                    if existing.get() != &cell {
                        warn!(
                            tile = tile,
                            date = %date,
                            cached = %existing.get(),
                            computed = %cell,
                            "StaleCoverage: keeping cached row"
                        );
                        self.stats.stale_overlaps += 1;
                    }
                }
            }
        }

        self.stats.rows_merged += merged;
        info!(tile = tile, rows = merged, "Merged listing rows");
        Ok(())
    }

    /// Covered dates for a tile, ascending.
    pub fn covered_dates(&self, tile: &str) -> Vec<NaiveDate> {
        self.tile_listing(tile)
            .map(|listing| listing.cells.keys().copied().collect())
            .unwrap_or_default()
    }

    /// Covered dates on which at least one sensor has a granule, ascending.
    pub fn dates_listed(&self, tile: &str) -> Vec<NaiveDate> {
        self.tile_listing(tile)
            .map(|listing| {
                listing
                    .cells
                    .values()
                    .filter(|cell| cell.has_granule())
                    .map(|cell| cell.date())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Cached row for a tile and date, without searching.
    pub fn cell(&self, tile: &str, date: NaiveDate) -> Option<&ListingCell> {
        self.tile_listing(tile)?.cells.get(&date)
    }

    fn tile_listing(&self, tile: &str) -> Option<&TileListing> {
        self.tiles.get(&normalize_tile(tile)?)
    }

    /// Cache counters.
    pub fn stats(&self) -> ListingStats {
        self.stats
    }

    /// Every granule record seen so far.
    pub fn store(&self) -> &GranuleStore {
        &self.store
    }

    /// Listing configuration.
    pub fn config(&self) -> &ListingConfig {
        &self.config
    }

    /// The retrying catalog client.
    pub fn catalog(&self) -> &CatalogClient<S> {
        &self.catalog
    }
}
