//! `granule` command: resolve, and optionally download, one sensor's granule.

use chrono::NaiveDate;
use clap::Args;
use hlslisting::sensor::Sensor;
use hlslisting::service::RemoteHlsService;

use super::common::{day_of_year, parse_date};
use crate::error::CliError;
use crate::runner::CliRunner;

/// Arguments for the granule command.
#[derive(Debug, Clone, Args)]
pub struct GranuleArgs {
    /// MGRS tile identifier (e.g. 10SEG or T10SEG)
    #[arg(long)]
    pub tile: String,

    /// Acquisition date (YYYY-MM-DD or YYYYDDD)
    #[arg(long, value_parser = parse_date)]
    pub date: NaiveDate,

    /// Sensor: sentinel (S30) or landsat (L30)
    #[arg(long)]
    pub sensor: Sensor,

    /// Download the granule's data files
    #[arg(long)]
    pub download: bool,
}

/// Resolve a single granule and print its identifier and data files.
pub fn run(args: GranuleArgs, debug: bool) -> Result<(), CliError> {
    let runner = CliRunner::with_debug(debug)?;
    runner.log_startup("granule");

    let service = runner.create_service()?;
    let result = resolve(&service, &args);
    service.close();
    result
}

fn resolve(service: &RemoteHlsService, args: &GranuleArgs) -> Result<(), CliError> {
    let record = service.granule(args.sensor, &args.tile, args.date)?;

    println!("{}", record.identifier());
    println!("  Sensor:   {} ({})", record.sensor(), record.sensor().product_code());
    println!("  Tile:     {}", record.tile());
    println!("  Date:     {} ({})", record.date(), day_of_year(record.date()));
    println!("  Acquired: {}", record.timestamp().to_rfc3339());

    let urls = service
        .downloader()
        .data_urls(&record)
        .map_err(|e| CliError::Service(e.into()))?;
    println!("  Files:    {}", urls.len());
    for url in &urls {
        println!("    {}", url);
    }

    if args.download {
        let dir = service.download(args.sensor, &args.tile, args.date)?;
        println!();
        println!("Downloaded to {}", dir.display());
    }

    Ok(())
}
