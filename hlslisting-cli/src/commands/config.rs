//! Configuration management CLI commands.
//!
//! Provides `config path`, `config list` and `config init` for inspecting
//! and creating the configuration file.

use clap::Subcommand;
use hlslisting::config::{config_file_path, ConfigFile};

use crate::error::CliError;

/// Config subcommands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// List all configuration settings
    List,

    /// Show the configuration file path
    Path,

    /// Create the configuration file with default settings
    Init {
        /// Overwrite an existing file with defaults
        #[arg(long)]
        force: bool,
    },
}

/// Run a config subcommand.
pub fn run(command: ConfigCommands) -> Result<(), CliError> {
    match command {
        ConfigCommands::List => run_list(),
        ConfigCommands::Path => run_path(),
        ConfigCommands::Init { force } => run_init(force),
    }
}

/// List all configuration settings.
fn run_list() -> Result<(), CliError> {
    let config = ConfigFile::load()?;

    println!("Configuration Settings");
    println!("======================");
    println!();

    for (section, entries) in settings(&config) {
        println!("[{}]", section);
        for (key, value) in entries {
            if value.is_empty() {
                println!("  {} = (not set)", key);
            } else {
                println!("  {} = {}", key, value);
            }
        }
        println!();
    }

    Ok(())
}

/// Show the configuration file path.
fn run_path() -> Result<(), CliError> {
    println!("{}", config_file_path().display());
    Ok(())
}

/// Write the default configuration file.
fn run_init(force: bool) -> Result<(), CliError> {
    let path = config_file_path();
    if ConfigFile::write_defaults_to(&path, force)? {
        println!("Wrote default configuration to {}", path.display());
    } else {
        println!("Configuration already exists: {}", path.display());
        println!("Use --force to overwrite it with defaults.");
    }
    Ok(())
}

type Section = (&'static str, Vec<(&'static str, String)>);

/// Flatten the configuration into displayable sections. Tokens are masked.
fn settings(config: &ConfigFile) -> Vec<Section> {
    let token = match &config.catalog.token {
        Some(_) => "********".to_string(),
        None => String::new(),
    };

    vec![
        (
            "catalog",
            vec![
                ("url", config.catalog.url.clone()),
                ("page_size", config.catalog.page_size.to_string()),
                ("retry_count", config.catalog.retry_count.to_string()),
                ("retry_wait_secs", config.catalog.retry_wait_secs.to_string()),
                ("timeout_secs", config.catalog.timeout_secs.to_string()),
                ("token", token),
            ],
        ),
        (
            "availability",
            vec![
                ("give_up_days", config.availability.give_up_days.to_string()),
                (
                    "sentinel_repeat_days",
                    config.availability.sentinel_repeat_days.to_string(),
                ),
                (
                    "landsat_repeat_days",
                    config.availability.landsat_repeat_days.to_string(),
                ),
            ],
        ),
        (
            "download",
            vec![(
                "directory",
                config.download.directory.display().to_string(),
            )],
        ),
        (
            "logging",
            vec![("file", config.logging.file.display().to_string())],
        ),
    ]
}
