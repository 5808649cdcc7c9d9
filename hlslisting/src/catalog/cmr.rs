//! CMR granule search backend.
//!
//! Queries a CMR-style `granules.json` endpoint for both HLS collections in a
//! single paginated search.
//!
//! # Query
//!
//! `<base>/granules.json?collection_concept_id[]=<S30>&collection_concept_id[]=<L30>
//! &temporal=<start>T00:00:00Z,<end>T23:59:59Z&readable_granule_name=HLS.*.T<tile>.*
//! &options[readable_granule_name][pattern]=true&sort_key=start_date
//! &page_size=<n>&page_num=<k>`
//!
//! Pages are requested until one comes back shorter than `page_size`.
//!
//! Only `title` (the granule name) and `time_start` are read from each entry.
//! The entry itself is kept verbatim as the record payload.

use super::http::HttpClient;
use super::session::Session;
use super::types::{CatalogError, GranuleSearch};
use crate::granule::{GranuleId, GranuleRecord};
use crate::sensor::Sensor;
use crate::time::{end_of_day_utc, start_of_day_utc};
use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, warn};

/// Default CMR search root.
pub const DEFAULT_CMR_URL: &str = "https://cmr.earthdata.nasa.gov/search";

/// Hard stop on pagination; a tile/date search never legitimately needs this many pages.
const MAX_PAGES: usize = 1000;

#[derive(Deserialize)]
struct CmrResponse {
    feed: CmrFeed,
}

#[derive(Deserialize)]
struct CmrFeed {
    #[serde(default)]
    entry: Vec<serde_json::Value>,
}

/// Granule search against the CMR JSON API.
pub struct CmrSearch<C: HttpClient> {
    http: C,
    session: Arc<Session>,
    base_url: String,
    page_size: usize,
}

impl<C: HttpClient> CmrSearch<C> {
    /// Create a search backend.
    ///
    /// # Arguments
    ///
    /// * `http` - HTTP client used for every page request
    /// * `session` - Session whose credentials accompany each request
    /// * `base_url` - Search root, e.g. [`DEFAULT_CMR_URL`]
    /// * `page_size` - Entries per page (minimum 1)
    pub fn new(
        http: C,
        session: Arc<Session>,
        base_url: impl Into<String>,
        page_size: usize,
    ) -> Self {
        Self {
            http,
            session,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            page_size: page_size.max(1),
        }
    }

    /// Build the request URL for one page.
    fn page_url(
        &self,
        tile: &str,
        start: NaiveDate,
        end: NaiveDate,
        page_num: usize,
    ) -> Result<reqwest::Url, CatalogError> {
        let mut params: Vec<(&str, String)> = Sensor::ALL
            .iter()
            .map(|s| ("collection_concept_id[]", s.concept_id().to_string()))
            .collect();
        params.push((
            "temporal",
            format!("{},{}", start_of_day_utc(start), end_of_day_utc(end)),
        ));
        params.push(("readable_granule_name", format!("HLS.*.T{}.*", tile)));
        params.push((
            "options[readable_granule_name][pattern]",
            "true".to_string(),
        ));
        params.push(("sort_key", "start_date".to_string()));
        params.push(("page_size", self.page_size.to_string()));
        params.push(("page_num", page_num.to_string()));

        let endpoint = format!("{}/granules.json", self.base_url);
        reqwest::Url::parse_with_params(&endpoint, &params)
            .map_err(|e| CatalogError::InvalidRequest(format!("{}: {}", endpoint, e)))
    }

    fn fetch_page(&self, url: &reqwest::Url) -> Result<Vec<serde_json::Value>, CatalogError> {
        if !self.session.is_open() {
            return Err(CatalogError::Http("session closed".to_string()));
        }

        let body = match self.session.token() {
            Some(token) => self.http.get_with_bearer(url.as_str(), token)?,
            None => self.http.get(url.as_str())?,
        };

        let response: CmrResponse = serde_json::from_slice(&body)
            .map_err(|e| CatalogError::InvalidResponse(format!("granule search: {}", e)))?;
        Ok(response.feed.entry)
    }
}

/// Convert one catalog entry into a record, if it names an HLS granule.
fn entry_to_record(entry: &serde_json::Value) -> Option<GranuleRecord> {
    let title = entry
        .get("title")
        .or_else(|| entry.get("producer_granule_id"))
        .and_then(|v| v.as_str())?;

    let id: GranuleId = match title.parse() {
        Ok(id) => id,
        Err(e) => {
            warn!(title = title, error = %e, "Skipping catalog entry with unrecognised name");
            return None;
        }
    };

    let timestamp = entry
        .get("time_start")
        .and_then(|v| v.as_str())
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|| id.timestamp());

    Some(GranuleRecord::new(
        id.name(),
        id.sensor(),
        id.tile(),
        timestamp,
        entry.to_string(),
    ))
}

impl<C: HttpClient> GranuleSearch for CmrSearch<C> {
    fn search(
        &self,
        tile: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<GranuleRecord>, CatalogError> {
        let mut records = Vec::new();

        for page_num in 1..=MAX_PAGES {
            let url = self.page_url(tile, start, end, page_num)?;
            let entries = self.fetch_page(&url)?;
            let count = entries.len();

            debug!(
                tile = tile,
                page = page_num,
                entries = count,
                "Catalog page received"
            );

            records.extend(
                entries
                    .iter()
                    .filter_map(entry_to_record)
                    .filter(|r| r.tile() == tile),
            );

            if count < self.page_size {
                break;
            }
        }

        records.sort_by(|a, b| {
            a.timestamp()
                .cmp(&b.timestamp())
                .then_with(|| a.identifier().cmp(b.identifier()))
        });
        Ok(records)
    }

    fn name(&self) -> &str {
        "cmr"
    }
}
