//! CLI error handling with user-friendly messages.
//!
//! Centralizes error handling for the CLI, providing consistent formatting
//! and appropriate exit codes.

use hlslisting::catalog::TOKEN_ENV_VAR;
use hlslisting::config::ConfigFileError;
use hlslisting::download::DownloadError;
use hlslisting::service::ServiceError;
use std::fmt;
use std::process;

/// CLI-specific errors with user-friendly messages.
#[derive(Debug)]
pub enum CliError {
    /// Failed to initialize logging
    LoggingInit(String),
    /// Configuration error
    Config(String),
    /// Failed to create service
    ServiceCreation(ServiceError),
    /// A listing, lookup or download failed
    Service(ServiceError),
    /// Argument rejected after parsing
    InvalidArgument(String),
}

impl CliError {
    /// Exit code for this error.
    ///
    /// A granule that is not available yet exits with 2 so scripts can poll;
    /// everything else exits with 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Service(ServiceError::SensorNotAvailable { .. }) => 2,
            _ => 1,
        }
    }

    /// Exit the process with an appropriate error message and code.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self);

        // Print additional help for specific errors
        match self {
            CliError::Service(ServiceError::Download(DownloadError::FileFailed { .. })) => {
                eprintln!();
                eprintln!(
                    "Granule files require Earthdata credentials. Set {} or the",
                    TOKEN_ENV_VAR
                );
                eprintln!("token key in the [catalog] section of config.ini.");
            }
            CliError::Service(e) if e.is_retryable() => {
                eprintln!();
                eprintln!("This may succeed if you try again later.");
            }
            CliError::Config(_) => {
                eprintln!();
                eprintln!("Run 'hlslisting config path' to locate the configuration file.");
            }
            _ => {}
        }

        process::exit(self.exit_code())
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::LoggingInit(msg) => write!(f, "Failed to initialize logging: {}", msg),
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::ServiceCreation(e) => write!(f, "Failed to create service: {}", e),
            CliError::Service(e) => write!(f, "{}", e),
            CliError::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::ServiceCreation(e) => Some(e),
            CliError::Service(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ServiceError> for CliError {
    fn from(e: ServiceError) -> Self {
        CliError::Service(e)
    }
}

impl From<ConfigFileError> for CliError {
    fn from(e: ConfigFileError) -> Self {
        CliError::Config(e.to_string())
    }
}
