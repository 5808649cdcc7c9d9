//! `listing` command: per-date availability of both sensors for a tile.

use hlslisting::listing::ListingCell;
use hlslisting::sensor::Sensor;

use super::common::RangeArgs;
use crate::error::CliError;
use crate::runner::CliRunner;

/// Resolve and print the listing for a tile and date range.
pub fn run(args: RangeArgs, debug: bool) -> Result<(), CliError> {
    args.validate()?;

    let runner = CliRunner::with_debug(debug)?;
    runner.log_startup("listing");

    let service = runner.create_service()?;
    let rows = service.listing(&args.tile, args.start, args.end());
    service.close();
    let rows = rows?;

    print_rows(&rows);

    let stats = service.stats();
    println!();
    println!(
        "{} dates, {} with granules ({} catalog queries)",
        rows.len(),
        rows.iter().filter(|row| row.has_granule()).count(),
        stats.catalog_queries
    );

    Ok(())
}

fn print_rows(rows: &[ListingCell]) {
    println!("{:<12} {:<7} {:<40} {}", "DATE", "TILE", "SENTINEL", "LANDSAT");
    for row in rows {
        println!(
            "{:<12} {:<7} {:<40} {}",
            row.date().to_string(),
            row.tile(),
            row.get(Sensor::Sentinel).label(),
            row.get(Sensor::Landsat).label()
        );
    }
}
