//! hlslisting CLI - Command-line interface
//!
//! This binary provides a command-line interface to the hlslisting library.

mod commands;
mod error;
mod runner;

use clap::{Parser, Subcommand};

use commands::common::RangeArgs;
use commands::config::ConfigCommands;
use commands::granule::GranuleArgs;

#[derive(Parser)]
#[command(name = "hlslisting")]
#[command(version = hlslisting::VERSION)]
#[command(about = "Resolve Harmonized Landsat Sentinel granule availability", long_about = None)]
struct Cli {
    /// Enable debug logging (also echoed to stdout)
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show Sentinel and Landsat availability for every date in a range
    Listing(RangeArgs),

    /// Resolve one sensor's granule for a tile and date
    Granule(GranuleArgs),

    /// List dates in a range on which any granule exists
    Dates(RangeArgs),

    /// Manage the configuration file
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Listing(args) => commands::listing::run(args, cli.debug),
        Commands::Granule(args) => commands::granule::run(args, cli.debug),
        Commands::Dates(args) => commands::dates::run(args, cli.debug),
        Commands::Config { command } => commands::config::run(command),
    };

    if let Err(e) = result {
        e.exit();
    }
}
