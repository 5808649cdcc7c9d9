//! HLS service facade implementation.

use super::error::ServiceError;
use crate::availability::Availability;
use crate::catalog::{CmrSearch, GranuleSearch, HttpClient, ReqwestClient, Session};
use crate::config::ConfigFile;
use crate::download::GranuleDownloader;
use crate::granule::GranuleRecord;
use crate::listing::{ListingCache, ListingCell, ListingStats};
use crate::sensor::Sensor;
use crate::time::{Clock, SystemClock};
use chrono::NaiveDate;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::info;

/// Service talking to the real CMR catalog over HTTPS.
pub type RemoteHlsService = HlsService<CmrSearch<ReqwestClient>, ReqwestClient>;

/// High-level facade for HLS availability queries.
///
/// Owns the listing cache behind a single mutex so overlapping requests
/// from several threads are serialised, plus the downloader and the
/// session shared by both.
///
/// # Example
///
/// ```ignore
/// use hlslisting::catalog::Session;
/// use hlslisting::config::ConfigFile;
/// use hlslisting::service::RemoteHlsService;
/// use std::sync::Arc;
///
/// let config = ConfigFile::load()?;
/// let service = RemoteHlsService::from_config(&config, Arc::new(Session::from_env()))?;
///
/// match service.sentinel("10SEG", date) {
///     Ok(granule) => println!("{}", granule.identifier()),
///     Err(e) if e.is_retryable() => println!("not yet: {}", e),
///     Err(e) => println!("{}", e),
/// }
/// service.close();
/// ```
pub struct HlsService<S: GranuleSearch, C: HttpClient, K: Clock = SystemClock> {
    cache: Mutex<ListingCache<S, K>>,
    downloader: GranuleDownloader<C>,
    session: Arc<Session>,
}

impl RemoteHlsService {
    /// Wire up a service from the user configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn from_config(config: &ConfigFile, session: Arc<Session>) -> Result<Self, ServiceError> {
        let http = ReqwestClient::with_timeout(config.catalog.timeout_secs)
            .map_err(|e| ServiceError::HttpClientError(e.to_string()))?;
        let listing_config = config.listing_config();

        let search = CmrSearch::new(
            http.clone(),
            Arc::clone(&session),
            &config.catalog.url,
            listing_config.page_size(),
        );
        let cache = ListingCache::with_search(search, listing_config);
        let downloader =
            GranuleDownloader::new(http, Arc::clone(&session), &config.download.directory);

        info!(
            catalog = %config.catalog.url,
            download_dir = %config.download.directory.display(),
            "HLS service created"
        );

        Ok(Self::new(cache, downloader, session))
    }
}

impl<S: GranuleSearch, C: HttpClient, K: Clock> HlsService<S, C, K> {
    /// Create a service from already-built parts.
    pub fn new(
        cache: ListingCache<S, K>,
        downloader: GranuleDownloader<C>,
        session: Arc<Session>,
    ) -> Self {
        Self {
            cache: Mutex::new(cache),
            downloader,
            session,
        }
    }

    fn cache(&self) -> MutexGuard<'_, ListingCache<S, K>> {
        // Rows are inserted whole, so a poisoned cache is still consistent
        self.cache.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Listing rows for `tile` covering `[start, end]`.
    pub fn listing(
        &self,
        tile: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<ListingCell>, ServiceError> {
        Ok(self.cache().listing(tile, start, end)?)
    }

    /// Dates already resolved for `tile` on which any granule exists.
    pub fn dates_listed(&self, tile: &str) -> Vec<NaiveDate> {
        self.cache().dates_listed(tile)
    }

    /// Resolve the granule of one sensor for a tile and date.
    ///
    /// Absence is reported as [`ServiceError::SensorNotAvailable`] or
    /// [`ServiceError::SensorMissing`] so callers can tell a pending
    /// acquisition from a permanent gap.
    pub fn granule(
        &self,
        sensor: Sensor,
        tile: &str,
        date: NaiveDate,
    ) -> Result<Arc<GranuleRecord>, ServiceError> {
        let cell = self.listing(tile, date, date)?.into_iter().next();

        let (tile, availability) = match cell {
            Some(cell) => (cell.tile().to_string(), cell.get(sensor).clone()),
            None => (tile.to_string(), Availability::NotYetAvailable),
        };

        match availability {
            Availability::Available(record) => Ok(record),
            Availability::Missing => Err(ServiceError::SensorMissing { sensor, tile, date }),
            Availability::NotYetAvailable => {
                Err(ServiceError::SensorNotAvailable { sensor, tile, date })
            }
        }
    }

    /// Sentinel-2 granule for a tile and date.
    pub fn sentinel(&self, tile: &str, date: NaiveDate) -> Result<Arc<GranuleRecord>, ServiceError> {
        self.granule(Sensor::Sentinel, tile, date)
    }

    /// Landsat granule for a tile and date.
    pub fn landsat(&self, tile: &str, date: NaiveDate) -> Result<Arc<GranuleRecord>, ServiceError> {
        self.granule(Sensor::Landsat, tile, date)
    }

    /// Resolve and download a granule, returning its local directory.
    pub fn download(
        &self,
        sensor: Sensor,
        tile: &str,
        date: NaiveDate,
    ) -> Result<PathBuf, ServiceError> {
        let record = self.granule(sensor, tile, date)?;
        Ok(self.downloader.download(&record)?)
    }

    /// Listing cache counters.
    pub fn stats(&self) -> ListingStats {
        self.cache().stats()
    }

    /// The session shared by search and download.
    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    /// The granule downloader.
    pub fn downloader(&self) -> &GranuleDownloader<C> {
        &self.downloader
    }

    /// Close the session. Later catalog searches and downloads fail.
    pub fn close(&self) {
        self.session.close();
    }
}
