//! Configuration file handling for ~/.hlslisting/config.ini.
//!
//! Loads and saves user configuration with sensible defaults.
//! Settings structs live in [`super::settings`], constants in [`super::defaults`],
//! parsing in [`super::parser`], and serialization in [`super::writer`].

use ini::Ini;
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::settings::ConfigFile;

/// Configuration file errors.
#[derive(Debug, Error)]
pub enum ConfigFileError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] ini::Error),

    /// Failed to write config file
    #[error("Failed to write config file: {0}")]
    WriteError(String),

    /// Invalid configuration value
    #[error("Invalid configuration: {section}.{key} = '{value}' - {reason}")]
    InvalidValue {
        section: String,
        key: String,
        value: String,
        reason: String,
    },

    /// Failed to create config directory
    #[error("Failed to create config directory: {0}")]
    DirectoryError(std::io::Error),
}

impl ConfigFile {
    /// Load configuration from the default path (~/.hlslisting/config.ini).
    ///
    /// If the file doesn't exist, returns defaults.
    pub fn load() -> Result<Self, ConfigFileError> {
        let path = config_file_path();
        Self::load_from(&path)
    }

    /// Load configuration from a specific path.
    ///
    /// If the file doesn't exist, returns defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigFileError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let ini = Ini::load_from_file(path)?;
        super::parser::parse_ini(&ini)
    }

    /// Save configuration to the default path (~/.hlslisting/config.ini).
    pub fn save(&self) -> Result<(), ConfigFileError> {
        let path = config_file_path();
        self.save_to(&path)
    }

    /// Save configuration to a specific path.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigFileError> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(ConfigFileError::DirectoryError)?;
        }

        let content = super::writer::to_config_string(self);
        std::fs::write(path, content).map_err(|e| ConfigFileError::WriteError(e.to_string()))
    }

    /// Write the default configuration to `path`.
    ///
    /// An existing file is kept unless `overwrite` is set. Returns whether
    /// the file was written.
    pub fn write_defaults_to(path: &Path, overwrite: bool) -> Result<bool, ConfigFileError> {
        if path.exists() && !overwrite {
            return Ok(false);
        }
        Self::default().save_to(path)?;
        Ok(true)
    }
}

/// Get the path to the config directory (~/.hlslisting).
pub fn config_directory() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".hlslisting")
}

/// Get the path to the config file (~/.hlslisting/config.ini).
pub fn config_file_path() -> PathBuf {
    config_directory().join("config.ini")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::defaults::*;

    #[test]
    fn test_default_config() {
        let config = ConfigFile::default();

        assert_eq!(config.catalog.url, crate::catalog::DEFAULT_CMR_URL);
        assert_eq!(config.catalog.page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(config.catalog.retry_count, DEFAULT_RETRY_COUNT);
        assert_eq!(config.catalog.retry_wait_secs, DEFAULT_RETRY_WAIT_SECS);
        assert!(config.catalog.token.is_none());
        assert_eq!(config.availability.give_up_days, DEFAULT_GIVE_UP_DAYS);
        assert_eq!(config.availability.sentinel_repeat_days, 5);
        assert_eq!(config.availability.landsat_repeat_days, 16);
    }

    #[test]
    fn test_load_nonexistent_returns_defaults() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let config_path = temp_dir.path().join("nonexistent.ini");

        let config = ConfigFile::load_from(&config_path).unwrap();
        let default = ConfigFile::default();

        assert_eq!(config.catalog.url, default.catalog.url);
        assert_eq!(
            config.availability.give_up_days,
            default.availability.give_up_days
        );
    }

    #[test]
    fn test_save_and_reload() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let config_path = temp_dir.path().join("nested").join("config.ini");

        let mut config = ConfigFile::default();
        config.catalog.retry_count = 5;
        config.catalog.token = Some("abc123".to_string());
        config.availability.give_up_days = 12;
        config.download.directory = temp_dir.path().join("granules");
        config.save_to(&config_path).unwrap();

        let loaded = ConfigFile::load_from(&config_path).unwrap();
        assert_eq!(loaded.catalog.retry_count, 5);
        assert_eq!(loaded.catalog.token.as_deref(), Some("abc123"));
        assert_eq!(loaded.availability.give_up_days, 12);
        assert_eq!(loaded.download.directory, temp_dir.path().join("granules"));
    }

    #[test]
    fn test_write_defaults_keeps_existing_file() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("config.ini");

        assert!(ConfigFile::write_defaults_to(&path, false).unwrap());
        assert!(path.exists());

        let mut edited = ConfigFile::default();
        edited.availability.give_up_days = 30;
        edited.save_to(&path).unwrap();

        assert!(!ConfigFile::write_defaults_to(&path, false).unwrap());
        assert_eq!(ConfigFile::load_from(&path).unwrap().availability.give_up_days, 30);

        assert!(ConfigFile::write_defaults_to(&path, true).unwrap());
        assert_eq!(
            ConfigFile::load_from(&path).unwrap().availability.give_up_days,
            DEFAULT_GIVE_UP_DAYS
        );
    }

    #[test]
    fn test_config_file_path_under_config_directory() {
        assert!(config_file_path().starts_with(config_directory()));
        assert!(config_file_path().ends_with("config.ini"));
    }
}
