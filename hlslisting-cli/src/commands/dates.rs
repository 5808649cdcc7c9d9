//! `dates` command: dates in a range on which any granule exists.

use super::common::RangeArgs;
use crate::error::CliError;
use crate::runner::CliRunner;

/// Print each date with at least one granule, one per line.
pub fn run(args: RangeArgs, debug: bool) -> Result<(), CliError> {
    args.validate()?;

    let runner = CliRunner::with_debug(debug)?;
    runner.log_startup("dates");

    let service = runner.create_service()?;
    let rows = service.listing(&args.tile, args.start, args.end());
    service.close();

    for row in rows?.iter().filter(|row| row.has_granule()) {
        println!("{}", row.date());
    }

    Ok(())
}
