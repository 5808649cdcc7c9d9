//! CLI command implementations.
//!
//! Each subcommand has its own module with argument definitions and handlers.
//!
//! # Command Modules
//!
//! - [`config`] - Configuration management (list, path, init)
//! - [`dates`] - Dates in a range with at least one granule
//! - [`granule`] - Resolve or download a single sensor's granule
//! - [`listing`] - Per-date availability table for a tile

pub mod common;
pub mod config;
pub mod dates;
pub mod granule;
pub mod listing;
