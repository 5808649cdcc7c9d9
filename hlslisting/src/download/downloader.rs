//! Granule file retrieval.

use super::error::DownloadError;
use crate::catalog::{HttpClient, Session};
use crate::granule::GranuleRecord;
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Suffix of the CMR link relation marking a data file.
const DATA_REL_SUFFIX: &str = "/data#";

#[derive(Debug, Deserialize)]
struct GranulePayload {
    #[serde(default)]
    links: Vec<GranuleLink>,
}

#[derive(Debug, Deserialize)]
struct GranuleLink {
    href: String,
    #[serde(default)]
    rel: String,
}

/// Downloads every data file of a granule into a local directory.
///
/// Files land in `<directory>/<product>/<tile>/<YYYY-MM-DD>/<granule>/`.
/// They are first written to a sibling `<granule>.partial` directory which
/// is renamed into place only after the last file succeeds, so a granule
/// directory is either complete or absent.
pub struct GranuleDownloader<C: HttpClient> {
    http: C,
    session: Arc<Session>,
    directory: PathBuf,
}

impl<C: HttpClient> GranuleDownloader<C> {
    /// Create a downloader rooted at `directory`.
    pub fn new(http: C, session: Arc<Session>, directory: impl Into<PathBuf>) -> Self {
        Self {
            http,
            session,
            directory: directory.into(),
        }
    }

    /// Root download directory.
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Final directory for a granule.
    pub fn granule_directory(&self, record: &GranuleRecord) -> PathBuf {
        self.directory
            .join(record.sensor().product_code())
            .join(record.tile())
            .join(record.date().format("%Y-%m-%d").to_string())
            .join(record.identifier())
    }

    /// HTTP(S) data file URLs listed in the granule metadata, in order and
    /// without duplicates.
    pub fn data_urls(&self, record: &GranuleRecord) -> Result<Vec<String>, DownloadError> {
        let payload: GranulePayload =
            serde_json::from_str(record.payload()).map_err(|e| DownloadError::InvalidPayload {
                granule: record.identifier().to_string(),
                reason: e.to_string(),
            })?;

        let mut seen = HashSet::new();
        Ok(payload
            .links
            .into_iter()
            .filter(|link| link.rel.ends_with(DATA_REL_SUFFIX))
            .filter(|link| link.href.starts_with("https://") || link.href.starts_with("http://"))
            .map(|link| link.href)
            .filter(|href| seen.insert(href.clone()))
            .collect())
    }

    /// Download a granule, returning its directory.
    ///
    /// An existing granule directory is returned without fetching anything.
    pub fn download(&self, record: &GranuleRecord) -> Result<PathBuf, DownloadError> {
        let target = self.granule_directory(record);
        if target.is_dir() {
            debug!(granule = record.identifier(), path = %target.display(), "Granule already downloaded");
            return Ok(target);
        }

        let urls = self.data_urls(record)?;
        if urls.is_empty() {
            return Err(DownloadError::NoDataFiles {
                granule: record.identifier().to_string(),
            });
        }

        let staging = target.with_file_name(format!("{}.partial", record.identifier()));
        if staging.exists() {
            fs::remove_dir_all(&staging).map_err(|e| DownloadError::io(&staging, e))?;
        }
        fs::create_dir_all(&staging).map_err(|e| DownloadError::io(&staging, e))?;

        info!(granule = record.identifier(), files = urls.len(), "Downloading granule");

        if let Err(e) = self.fetch_all(record, &urls, &staging) {
            if let Err(cleanup) = fs::remove_dir_all(&staging) {
                warn!(path = %staging.display(), error = %cleanup, "Failed to remove partial download");
            }
            return Err(e);
        }

        fs::rename(&staging, &target).map_err(|e| DownloadError::io(&target, e))?;
        info!(granule = record.identifier(), path = %target.display(), "Granule downloaded");
        Ok(target)
    }

    fn fetch_all(
        &self,
        record: &GranuleRecord,
        urls: &[String],
        staging: &Path,
    ) -> Result<(), DownloadError> {
        let failed = |url: &str, reason: String| DownloadError::FileFailed {
            granule: record.identifier().to_string(),
            url: url.to_string(),
            reason,
        };

        for url in urls {
            if !self.session.is_open() {
                return Err(failed(url, "session closed".to_string()));
            }
            let name = file_name(url).ok_or_else(|| failed(url, "no file name in URL".to_string()))?;

            let bytes = match self.session.token() {
                Some(token) => self.http.get_with_bearer(url, token),
                None => self.http.get(url),
            }
            .map_err(|e| failed(url, e.to_string()))?;

            let path = staging.join(name);
            fs::write(&path, &bytes).map_err(|e| DownloadError::io(&path, e))?;
            debug!(file = name, bytes = bytes.len(), "Downloaded granule file");
        }

        Ok(())
    }
}

/// Last path segment of a URL, ignoring any query string.
fn file_name(url: &str) -> Option<&str> {
    let path = url.split(['?', '#']).next()?;
    path.rsplit('/').next().filter(|name| !name.is_empty())
}
