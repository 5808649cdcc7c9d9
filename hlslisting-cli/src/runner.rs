//! CLI runner for common setup and operations.
//!
//! Encapsulates config loading, logging initialization and service creation
//! to reduce duplication across command handlers.

use crate::error::CliError;
use hlslisting::catalog::{Session, TOKEN_ENV_VAR};
use hlslisting::config::ConfigFile;
use hlslisting::logging::{default_log_file, init_logging, LoggingGuard};
use hlslisting::service::RemoteHlsService;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

/// Runner that manages CLI lifecycle and common operations.
pub struct CliRunner {
    /// Logging guard - keeps logging active while runner exists
    #[allow(dead_code)]
    logging_guard: LoggingGuard,
    /// Loaded configuration file
    config: ConfigFile,
}

impl CliRunner {
    /// Create a new CLI runner with optional debug logging.
    ///
    /// Log records always go to the configured file. In debug mode they are
    /// also echoed to stdout.
    pub fn with_debug(debug_mode: bool) -> Result<Self, CliError> {
        // Load config file (or use defaults if not present)
        let config = ConfigFile::load()?;

        let (log_dir, log_file) = split_log_path(&config.logging.file);

        let logging_guard = init_logging(&log_dir, &log_file, debug_mode, debug_mode)
            .map_err(|e| CliError::LoggingInit(e.to_string()))?;

        Ok(Self {
            logging_guard,
            config,
        })
    }

    /// Get the loaded configuration.
    pub fn config(&self) -> &ConfigFile {
        &self.config
    }

    /// Log startup information for a command.
    pub fn log_startup(&self, command: &str) {
        info!("hlslisting v{}", hlslisting::VERSION);
        info!("hlslisting CLI: {} command", command);
    }

    /// Open a catalog session and create the remote service.
    pub fn create_service(&self) -> Result<RemoteHlsService, CliError> {
        let session = Arc::new(open_session(self.config.catalog.token.as_deref()));

        RemoteHlsService::from_config(&self.config, session)
            .map_err(CliError::ServiceCreation)
            .inspect(|_| info!("Service created successfully"))
    }
}

/// Split the configured log path into directory and file name.
fn split_log_path(path: &Path) -> (PathBuf, String) {
    let log_dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));
    let log_file = path
        .file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| default_log_file().to_string());
    (log_dir, log_file)
}

/// The environment token takes precedence over the configured one.
fn open_session(configured_token: Option<&str>) -> Session {
    let env_token = std::env::var(TOKEN_ENV_VAR)
        .ok()
        .filter(|t| !t.trim().is_empty());

    match (env_token, configured_token) {
        (Some(_), _) => Session::from_env(),
        (None, Some(token)) => Session::with_token(token),
        (None, None) => Session::anonymous(),
    }
}
