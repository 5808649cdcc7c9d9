//! INI parsing logic for converting `Ini` → `ConfigFile`.
//!
//! This module contains the `parse_ini()` function and its helpers.
//! It is the single place where INI key names are mapped to struct fields.

use ini::Ini;
use std::path::PathBuf;
use std::str::FromStr;

use super::file::ConfigFileError;
use super::settings::ConfigFile;

/// Parse an `Ini` object into a `ConfigFile`.
///
/// Starts from `ConfigFile::default()` and overlays any values found in the INI.
pub(super) fn parse_ini(ini: &Ini) -> Result<ConfigFile, ConfigFileError> {
    let mut config = ConfigFile::default();

    // [catalog] section
    if let Some(section) = ini.section(Some("catalog")) {
        if let Some(v) = section.get("url") {
            let v = v.trim();
            if !v.starts_with("http://") && !v.starts_with("https://") {
                return Err(invalid("catalog", "url", v, "must be an http(s) URL"));
            }
            config.catalog.url = v.to_string();
        }
        if let Some(v) = section.get("page_size") {
            config.catalog.page_size =
                parse_positive(v).ok_or_else(|| {
                    invalid("catalog", "page_size", v, "must be a positive integer")
                })?;
        }
        if let Some(v) = section.get("retry_count") {
            config.catalog.retry_count =
                parse_positive(v).ok_or_else(|| {
                    invalid("catalog", "retry_count", v, "must be a positive integer")
                })?;
        }
        if let Some(v) = section.get("retry_wait_secs") {
            config.catalog.retry_wait_secs = v.trim().parse().map_err(|_| {
                invalid(
                    "catalog",
                    "retry_wait_secs",
                    v,
                    "must be a non-negative integer (seconds)",
                )
            })?;
        }
        if let Some(v) = section.get("timeout_secs") {
            config.catalog.timeout_secs = parse_positive(v).ok_or_else(|| {
                invalid(
                    "catalog",
                    "timeout_secs",
                    v,
                    "must be a positive integer (seconds)",
                )
            })?;
        }
        if let Some(v) = section.get("token") {
            let v = v.trim();
            if !v.is_empty() {
                config.catalog.token = Some(v.to_string());
            }
        }
    }

    // [availability] section
    if let Some(section) = ini.section(Some("availability")) {
        if let Some(v) = section.get("give_up_days") {
            config.availability.give_up_days = v.trim().parse().map_err(|_| {
                invalid(
                    "availability",
                    "give_up_days",
                    v,
                    "must be a non-negative integer (days)",
                )
            })?;
        }
        if let Some(v) = section.get("sentinel_repeat_days") {
            config.availability.sentinel_repeat_days = parse_positive(v).ok_or_else(|| {
                invalid(
                    "availability",
                    "sentinel_repeat_days",
                    v,
                    "must be a positive integer (days)",
                )
            })?;
        }
        if let Some(v) = section.get("landsat_repeat_days") {
            config.availability.landsat_repeat_days = parse_positive(v).ok_or_else(|| {
                invalid(
                    "availability",
                    "landsat_repeat_days",
                    v,
                    "must be a positive integer (days)",
                )
            })?;
        }
    }

    // [download] section
    if let Some(section) = ini.section(Some("download")) {
        if let Some(v) = section.get("directory") {
            let v = v.trim();
            if !v.is_empty() {
                config.download.directory = expand_tilde(v);
            }
        }
    }

    // [logging] section
    if let Some(section) = ini.section(Some("logging")) {
        if let Some(v) = section.get("file") {
            let v = v.trim();
            if !v.is_empty() {
                config.logging.file = expand_tilde(v);
            }
        }
    }

    Ok(config)
}

fn invalid(section: &str, key: &str, value: &str, reason: &str) -> ConfigFileError {
    ConfigFileError::InvalidValue {
        section: section.to_string(),
        key: key.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Parse an integer that must be greater than zero.
fn parse_positive<T>(value: &str) -> Option<T>
where
    T: FromStr + PartialOrd + Default,
{
    value
        .trim()
        .parse::<T>()
        .ok()
        .filter(|v| *v > T::default())
}

/// Expand a leading `~/` to the user's home directory.
pub(super) fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}
