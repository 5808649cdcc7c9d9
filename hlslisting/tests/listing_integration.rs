//! Integration tests for the listing cache and service facade.
//!
//! These tests drive the public API end-to-end:
//! - ListingCache over a scripted catalog (retry, coverage, give-up rules)
//! - HlsService over a fake CMR endpoint (search, pagination, download)
//!
//! Run with: `cargo test --test listing_integration`

use std::collections::HashMap;
use std::sync::atomic::{AtomicI32, AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::{Datelike, NaiveDate, TimeZone, Utc};
use tempfile::TempDir;

use hlslisting::availability::Availability;
use hlslisting::catalog::{
    CatalogClient, CatalogError, CmrSearch, GranuleSearch, HttpClient, Session,
};
use hlslisting::config::ListingConfig;
use hlslisting::download::GranuleDownloader;
use hlslisting::granule::GranuleRecord;
use hlslisting::listing::{ListingCache, ListingCell, ListingError};
use hlslisting::sensor::Sensor;
use hlslisting::service::{HlsService, ServiceError};
use hlslisting::time::{date_range, Clock, FixedClock};

// ============================================================================
// Test Helpers
// ============================================================================

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn granule_name(sensor: Sensor, tile: &str, day: NaiveDate) -> String {
    format!(
        "HLS.{}.T{}.{}{:03}T184721.v2.0",
        sensor.product_code(),
        tile,
        day.year(),
        day.ordinal()
    )
}

fn granule(sensor: Sensor, day: NaiveDate) -> GranuleRecord {
    GranuleRecord::new(
        granule_name(sensor, "10SEG", day),
        sensor,
        "10SEG",
        Utc.from_utc_datetime(&day.and_hms_opt(18, 47, 21).unwrap()),
        "{}",
    )
}

/// Catalog backend over a fixed record set that fails a set number of
/// times before answering.
struct ScriptedSearch {
    records: Mutex<Vec<GranuleRecord>>,
    failures: AtomicU32,
    calls: AtomicU32,
}

impl ScriptedSearch {
    fn new(records: Vec<GranuleRecord>) -> Self {
        Self {
            records: Mutex::new(records),
            failures: AtomicU32::new(0),
            calls: AtomicU32::new(0),
        }
    }

    fn fail_next(&self, n: u32) {
        self.failures.store(n, Ordering::SeqCst);
    }

    fn publish(&self, record: GranuleRecord) {
        self.records.lock().unwrap().push(record);
    }

    fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

impl GranuleSearch for ScriptedSearch {
    fn search(
        &self,
        tile: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<GranuleRecord>, CatalogError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self
            .failures
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
        {
            return Err(CatalogError::Http("503 Service Unavailable".to_string()));
        }
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.tile() == tile && r.date() >= start && r.date() <= end)
            .cloned()
            .collect())
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

fn config() -> ListingConfig {
    ListingConfig::new()
        .with_retry_count(3)
        .with_retry_wait(Duration::ZERO)
        .with_give_up_days(10)
}

fn cache_at(
    search: ScriptedSearch,
    today: NaiveDate,
) -> ListingCache<ScriptedSearch, FixedClock> {
    let config = config();
    ListingCache::new(
        CatalogClient::from_config(search, &config),
        config,
        FixedClock(today),
    )
}

/// Clock whose date can be moved forward while a cache holds it.
#[derive(Clone)]
struct SteppingClock(Arc<AtomicI32>);

impl SteppingClock {
    fn new(today: NaiveDate) -> Self {
        Self(Arc::new(AtomicI32::new(today.num_days_from_ce())))
    }

    fn set(&self, today: NaiveDate) {
        self.0.store(today.num_days_from_ce(), Ordering::SeqCst);
    }
}

impl Clock for SteppingClock {
    fn today(&self) -> NaiveDate {
        NaiveDate::from_num_days_from_ce_opt(self.0.load(Ordering::SeqCst)).unwrap()
    }
}

fn by_date(rows: &[ListingCell]) -> HashMap<NaiveDate, ListingCell> {
    rows.iter().map(|r| (r.date(), r.clone())).collect()
}

// ============================================================================
// ListingCache
// ============================================================================

#[test]
fn test_sentinel_give_up_scenario() {
    let search = ScriptedSearch::new(vec![granule(Sensor::Sentinel, date(2024, 1, 1))]);
    let mut cache = cache_at(search, date(2024, 1, 20));

    let rows = cache
        .listing("10SEG", date(2024, 1, 1), date(2024, 1, 20))
        .unwrap();
    let rows = by_date(&rows);

    assert!(rows[&date(2024, 1, 1)].sentinel().is_available());
    assert_eq!(rows[&date(2024, 1, 6)].sentinel(), &Availability::Missing);
    assert_eq!(rows[&date(2024, 1, 11)].sentinel(), &Availability::NotYetAvailable);
    assert_eq!(rows[&date(2024, 1, 16)].sentinel(), &Availability::NotYetAvailable);
    assert_eq!(rows[&date(2024, 1, 7)].sentinel(), &Availability::NotYetAvailable);
}

#[test]
fn test_retry_then_success() {
    let search = ScriptedSearch::new(vec![granule(Sensor::Landsat, date(2024, 1, 4))]);
    search.fail_next(2);
    let mut cache = cache_at(search, date(2024, 2, 1));

    let rows = cache
        .listing("10SEG", date(2024, 1, 1), date(2024, 1, 10))
        .unwrap();

    assert_eq!(rows.len(), 10);
    assert!(rows[3].landsat().is_available());
    assert_eq!(cache.catalog().backend().calls(), 3);
}

#[test]
fn test_unreachable_leaves_cache_unmodified() {
    let search = ScriptedSearch::new(vec![granule(Sensor::Sentinel, date(2024, 1, 1))]);
    let mut cache = cache_at(search, date(2024, 2, 1));
    let before = cache
        .listing("10SEG", date(2024, 1, 1), date(2024, 1, 5))
        .unwrap();
    cache.catalog().backend().fail_next(3);

    let err = cache
        .listing("10SEG", date(2024, 1, 1), date(2024, 1, 20))
        .unwrap_err();

    assert!(matches!(
        err,
        ListingError::Catalog(CatalogError::Unreachable { attempts: 3, .. })
    ));
    assert_eq!(
        cache.covered_dates("10SEG"),
        date_range(date(2024, 1, 1), date(2024, 1, 5)).collect::<Vec<_>>()
    );
    assert_eq!(cache.store().len(), 1);

    // The cache recovers once the catalog does
    let after = cache
        .listing("10SEG", date(2024, 1, 1), date(2024, 1, 20))
        .unwrap();
    assert_eq!(&after[..5], &before[..]);
}

#[test]
fn test_listing_is_idempotent() {
    let search = ScriptedSearch::new(vec![
        granule(Sensor::Sentinel, date(2024, 1, 2)),
        granule(Sensor::Landsat, date(2024, 1, 8)),
    ]);
    let mut cache = cache_at(search, date(2024, 2, 15));

    let first = cache
        .listing("10SEG", date(2024, 1, 1), date(2024, 1, 31))
        .unwrap();
    let second = cache
        .listing("10SEG", date(2024, 1, 1), date(2024, 1, 31))
        .unwrap();

    assert_eq!(first, second);
    assert_eq!(cache.catalog().backend().calls(), 1);
}

#[test]
fn test_superset_query_keeps_earlier_cells() {
    let search = ScriptedSearch::new(vec![granule(Sensor::Sentinel, date(2024, 1, 3))]);
    let mut cache = cache_at(search, date(2024, 3, 1));

    let inner = cache
        .listing("10SEG", date(2024, 1, 10), date(2024, 1, 20))
        .unwrap();
    // A granule published later for an already covered date does not
    // rewrite the cached row
    cache
        .catalog()
        .backend()
        .publish(granule(Sensor::Landsat, date(2024, 1, 12)));
    let outer = cache
        .listing("10SEG", date(2024, 1, 1), date(2024, 1, 31))
        .unwrap();
    let outer = by_date(&outer);

    for row in &inner {
        assert_eq!(&outer[&row.date()], row);
    }
    assert_eq!(outer.len(), 31);
    assert_eq!(cache.stats().stale_overlaps, 0);
}

#[test]
fn test_give_up_is_monotonic() {
    // Same catalog, one cache classifying on 01-20 and another on 03-01
    let early = {
        let search = ScriptedSearch::new(vec![granule(Sensor::Sentinel, date(2024, 1, 1))]);
        let mut cache = cache_at(search, date(2024, 1, 20));
        cache
            .listing("10SEG", date(2024, 1, 1), date(2024, 1, 20))
            .unwrap()
    };
    let late = {
        let search = ScriptedSearch::new(vec![granule(Sensor::Sentinel, date(2024, 1, 1))]);
        let mut cache = cache_at(search, date(2024, 3, 1));
        cache
            .listing("10SEG", date(2024, 1, 1), date(2024, 1, 20))
            .unwrap()
    };

    for (e, l) in early.iter().zip(&late) {
        if e.sentinel().is_missing() {
            assert!(l.sentinel().is_missing(), "{} regressed", e.date());
        }
    }
    // The later view has given up on 01-16 as well
    assert!(late[15].sentinel().is_missing());
}

#[test]
fn test_cached_rows_keep_their_state_as_today_advances() {
    let search = ScriptedSearch::new(vec![granule(Sensor::Sentinel, date(2024, 1, 1))]);
    let clock = SteppingClock::new(date(2024, 1, 20));
    let config = config();
    let mut cache = ListingCache::new(
        CatalogClient::from_config(search, &config),
        config,
        clock.clone(),
    );

    let before = cache
        .listing("10SEG", date(2024, 1, 1), date(2024, 1, 20))
        .unwrap();
    let before = by_date(&before);
    assert_eq!(before[&date(2024, 1, 6)].sentinel(), &Availability::Missing);
    assert_eq!(before[&date(2024, 1, 16)].sentinel(), &Availability::NotYetAvailable);

    // Well past the give-up window for every January date
    clock.set(date(2024, 3, 1));
    let after = cache
        .listing("10SEG", date(2024, 1, 1), date(2024, 1, 31))
        .unwrap();
    let after = by_date(&after);

    for day in date_range(date(2024, 1, 1), date(2024, 1, 20)) {
        assert_eq!(after[&day], before[&day], "{} was rewritten", day);
    }
    // Cached pending rows are not revisited; newly covered dates are
    assert_eq!(after[&date(2024, 1, 16)].sentinel(), &Availability::NotYetAvailable);
    assert_eq!(after[&date(2024, 1, 26)].sentinel(), &Availability::Missing);
    assert_eq!(after[&date(2024, 1, 31)].sentinel(), &Availability::Missing);
    assert_eq!(cache.catalog().backend().calls(), 2);
    assert_eq!(cache.stats().stale_overlaps, 0);
}

#[test]
fn test_cached_missing_survives_later_queries() {
    let search = ScriptedSearch::new(vec![granule(Sensor::Sentinel, date(2024, 1, 1))]);
    let mut cache = cache_at(search, date(2024, 1, 20));

    cache
        .listing("10SEG", date(2024, 1, 1), date(2024, 1, 10))
        .unwrap();
    let again = cache
        .listing("10SEG", date(2024, 1, 6), date(2024, 1, 6))
        .unwrap();

    assert_eq!(again.len(), 1);
    assert_eq!(again[0].sentinel(), &Availability::Missing);
    assert_eq!(cache.catalog().backend().calls(), 1);
}

#[test]
fn test_every_range_covered_exactly() {
    let search = ScriptedSearch::new(Vec::new());
    let mut cache = cache_at(search, date(2024, 6, 1));

    for (start, end) in [
        (date(2024, 1, 10), date(2024, 1, 12)),
        (date(2024, 1, 1), date(2024, 1, 31)),
        (date(2024, 1, 31), date(2024, 1, 31)),
        (date(2023, 12, 25), date(2024, 1, 5)),
    ] {
        let rows = cache.listing("10SEG", start, end).unwrap();
        let dates: Vec<_> = rows.iter().map(|r| r.date()).collect();
        assert_eq!(dates, date_range(start, end).collect::<Vec<_>>());
    }
}

// ============================================================================
// HlsService over a fake CMR endpoint
// ============================================================================

/// Serves CMR `granules.json` pages from an in-memory granule list and
/// plain bytes for any other URL.
struct FakeCmr {
    granules: Vec<(Sensor, NaiveDate)>,
    requests: Mutex<Vec<String>>,
}

impl FakeCmr {
    fn new(granules: Vec<(Sensor, NaiveDate)>) -> Self {
        Self {
            granules,
            requests: Mutex::new(Vec::new()),
        }
    }

    fn search_requests(&self) -> usize {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|u| u.contains("granules.json"))
            .count()
    }

    fn entry(sensor: Sensor, day: NaiveDate) -> serde_json::Value {
        let name = granule_name(sensor, "10SEG", day);
        serde_json::json!({
            "title": name,
            "time_start": format!("{}T18:47:21.000Z", day.format("%Y-%m-%d")),
            "links": [{
                "rel": "http://esipfed.org/ns/fedsearch/1.1/data#",
                "href": format!("https://data.example.com/{}/{}.Fmask.tif", name, name),
            }],
        })
    }

    fn search_page(&self, url: &str) -> Vec<u8> {
        let url = reqwest::Url::parse(url).unwrap();
        let params: HashMap<String, String> = url.query_pairs().into_owned().collect();
        let (start, end) = params["temporal"].split_once(',').unwrap();
        let start = NaiveDate::parse_from_str(&start[..10], "%Y-%m-%d").unwrap();
        let end = NaiveDate::parse_from_str(&end[..10], "%Y-%m-%d").unwrap();
        let page_size: usize = params["page_size"].parse().unwrap();
        let page_num: usize = params["page_num"].parse().unwrap();

        let entries: Vec<_> = self
            .granules
            .iter()
            .filter(|(_, d)| *d >= start && *d <= end)
            .skip((page_num - 1) * page_size)
            .take(page_size)
            .map(|(s, d)| Self::entry(*s, *d))
            .collect();

        serde_json::json!({ "feed": { "entry": entries } })
            .to_string()
            .into_bytes()
    }
}

impl HttpClient for FakeCmr {
    fn get(&self, url: &str) -> Result<Vec<u8>, CatalogError> {
        self.requests.lock().unwrap().push(url.to_string());
        if url.contains("granules.json") {
            Ok(self.search_page(url))
        } else {
            Ok(b"tif".to_vec())
        }
    }

    fn get_with_bearer(&self, url: &str, _bearer_token: &str) -> Result<Vec<u8>, CatalogError> {
        self.get(url)
    }
}

impl HttpClient for &'static FakeCmr {
    fn get(&self, url: &str) -> Result<Vec<u8>, CatalogError> {
        (**self).get(url)
    }

    fn get_with_bearer(&self, url: &str, bearer_token: &str) -> Result<Vec<u8>, CatalogError> {
        (**self).get_with_bearer(url, bearer_token)
    }
}

fn cmr_service(
    granules: Vec<(Sensor, NaiveDate)>,
    page_size: usize,
    dir: &TempDir,
) -> (
    HlsService<CmrSearch<&'static FakeCmr>, &'static FakeCmr, FixedClock>,
    &'static FakeCmr,
) {
    let fake: &'static FakeCmr = Box::leak(Box::new(FakeCmr::new(granules)));
    let session = Arc::new(Session::with_token("token"));
    let config = config().with_page_size(page_size);

    let search = CmrSearch::new(
        fake,
        Arc::clone(&session),
        "https://cmr.example.com/search",
        config.page_size(),
    );
    let cache = ListingCache::new(
        CatalogClient::from_config(search, &config),
        config,
        FixedClock(date(2024, 1, 20)),
    );
    let downloader = GranuleDownloader::new(fake, Arc::clone(&session), dir.path());
    (HlsService::new(cache, downloader, session), fake)
}

#[test]
fn test_service_over_cmr_pages() {
    let dir = TempDir::new().unwrap();
    let granules: Vec<_> = [1, 2, 6, 11, 14]
        .into_iter()
        .map(|d| {
            let sensor = if d == 2 || d == 14 {
                Sensor::Landsat
            } else {
                Sensor::Sentinel
            };
            (sensor, date(2024, 1, d))
        })
        .collect();
    // Two entries per page forces three pages
    let (service, fake) = cmr_service(granules, 2, &dir);

    let rows = service
        .listing("10SEG", date(2024, 1, 1), date(2024, 1, 20))
        .unwrap();

    assert_eq!(rows.len(), 20);
    assert_eq!(fake.search_requests(), 3);
    assert_eq!(
        service.dates_listed("10SEG"),
        vec![
            date(2024, 1, 1),
            date(2024, 1, 2),
            date(2024, 1, 6),
            date(2024, 1, 11),
            date(2024, 1, 14)
        ]
    );
    assert!(service.sentinel("10SEG", date(2024, 1, 6)).is_ok());
    assert!(service.landsat("10SEG", date(2024, 1, 14)).is_ok());
    assert!(matches!(
        service.sentinel("10SEG", date(2024, 1, 16)),
        Err(ServiceError::SensorNotAvailable { .. })
    ));
    // No further catalog traffic for covered dates
    assert_eq!(fake.search_requests(), 3);
}

#[test]
fn test_service_download_round_trip() {
    let dir = TempDir::new().unwrap();
    let (service, fake) = cmr_service(vec![(Sensor::Sentinel, date(2024, 1, 6))], 2000, &dir);

    let path = service
        .download(Sensor::Sentinel, "T10SEG", date(2024, 1, 6))
        .unwrap();

    let name = granule_name(Sensor::Sentinel, "10SEG", date(2024, 1, 6));
    assert_eq!(
        path,
        dir.path()
            .join("S30")
            .join("10SEG")
            .join("2024-01-06")
            .join(&name)
    );
    assert_eq!(
        std::fs::read(path.join(format!("{}.Fmask.tif", name))).unwrap(),
        b"tif"
    );

    // Second download reuses the directory
    let before = fake.requests.lock().unwrap().len();
    service
        .download(Sensor::Sentinel, "10SEG", date(2024, 1, 6))
        .unwrap();
    assert_eq!(fake.requests.lock().unwrap().len(), before);
}

#[test]
fn test_closed_session_surfaces_unreachable() {
    let dir = TempDir::new().unwrap();
    let (service, _fake) = cmr_service(Vec::new(), 2000, &dir);

    service.close();
    let err = service
        .listing("10SEG", date(2024, 1, 1), date(2024, 1, 2))
        .unwrap_err();

    assert!(matches!(
        err,
        ServiceError::Listing(ListingError::Catalog(CatalogError::Unreachable { .. }))
    ));
}
