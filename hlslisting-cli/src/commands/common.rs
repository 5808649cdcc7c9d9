//! Argument types and parsers shared across CLI commands.

use chrono::{Datelike, NaiveDate};
use clap::Args;

use crate::error::CliError;

/// Tile and inclusive date range arguments.
#[derive(Debug, Clone, Args)]
pub struct RangeArgs {
    /// MGRS tile identifier (e.g. 10SEG or T10SEG)
    #[arg(long)]
    pub tile: String,

    /// First date (YYYY-MM-DD or YYYYDDD)
    #[arg(long, value_parser = parse_date)]
    pub start: NaiveDate,

    /// Last date, inclusive (defaults to the start date)
    #[arg(long, value_parser = parse_date)]
    pub end: Option<NaiveDate>,
}

impl RangeArgs {
    /// End of the range, falling back to the start date.
    pub fn end(&self) -> NaiveDate {
        self.end.unwrap_or(self.start)
    }

    /// Reject ranges that end before they start.
    pub fn validate(&self) -> Result<(), CliError> {
        if self.end() < self.start {
            return Err(CliError::InvalidArgument(format!(
                "--end {} is before --start {}",
                self.end(),
                self.start
            )));
        }
        Ok(())
    }
}

/// Parse a calendar date (`2024-01-16`) or an HLS day-of-year date (`2024016`).
pub fn parse_date(s: &str) -> Result<NaiveDate, String> {
    let s = s.trim();
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(date);
    }
    if s.len() == 7 && s.chars().all(|c| c.is_ascii_digit()) {
        if let Ok(date) = NaiveDate::parse_from_str(s, "%Y%j") {
            return Ok(date);
        }
    }
    Err(format!(
        "invalid date '{}', expected YYYY-MM-DD or YYYYDDD",
        s
    ))
}

/// Format a date the way HLS granule identifiers do (`YYYYDDD`).
pub fn day_of_year(date: NaiveDate) -> String {
    format!("{}{:03}", date.year(), date.ordinal())
}
