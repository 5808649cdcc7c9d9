//! INI serialization logic for converting `ConfigFile` → INI string.
//!
//! This module contains the `to_config_string()` function that produces
//! the commented INI representation written to `config.ini`.

use std::path::Path;

use super::settings::ConfigFile;

/// Convert a `ConfigFile` to a commented INI string for saving.
pub(super) fn to_config_string(config: &ConfigFile) -> String {
    let token = config.catalog.token.as_deref().unwrap_or("");

    format!(
        r#"[catalog]
; CMR search root (granules are queried at <url>/granules.json)
url = {}
; Entries requested per page (CMR maximum is 2000)
page_size = {}
; Total search attempts before the catalog is declared unreachable
retry_count = {}
; Seconds to wait between attempts
retry_wait_secs = {}
; HTTP request timeout in seconds
timeout_secs = {}
; Earthdata Login bearer token (optional, required for downloads)
; Can also be supplied via the EARTHDATA_TOKEN environment variable
token = {}

[availability]
; Days after an expected acquisition before it is reported missing
give_up_days = {}
; Sentinel-2 (S30) repeat cycle in days
sentinel_repeat_days = {}
; Landsat (L30) repeat cycle in days
landsat_repeat_days = {}

[download]
; Root directory for downloaded granules
; Layout: <directory>/<product>/<tile>/<YYYY-MM-DD>/<granule>/
directory = {}

[logging]
; Log file path
file = {}
"#,
        config.catalog.url,
        config.catalog.page_size,
        config.catalog.retry_count,
        config.catalog.retry_wait_secs,
        config.catalog.timeout_secs,
        token,
        config.availability.give_up_days,
        config.availability.sentinel_repeat_days,
        config.availability.landsat_repeat_days,
        path_to_string(&config.download.directory),
        path_to_string(&config.logging.file),
    )
}

/// Render a path, collapsing the home directory back to `~`.
fn path_to_string(path: &Path) -> String {
    if let Some(home) = dirs::home_dir() {
        if let Ok(stripped) = path.strip_prefix(&home) {
            return format!("~/{}", stripped.display());
        }
    }
    path.display().to_string()
}
