//! hlslisting - Harmonized Landsat Sentinel availability resolver
//!
//! This library answers, for a tile and date, which HLS granules exist for
//! each sensor, which expected acquisitions the catalog never published, and
//! which are simply not there yet. Resolved listings are cached so that
//! overlapping requests only search the remote catalog for new dates.
//!
//! # High-Level API
//!
//! For most use cases, the [`service`] module provides a simplified facade:
//!
//! ```ignore
//! use hlslisting::catalog::Session;
//! use hlslisting::config::ConfigFile;
//! use hlslisting::service::RemoteHlsService;
//! use std::sync::Arc;
//!
//! let config = ConfigFile::load()?;
//! let service = RemoteHlsService::from_config(&config, Arc::new(Session::from_env()))?;
//!
//! for row in service.listing("10SEG", start, end)? {
//!     println!("{}", row);
//! }
//! ```

pub mod availability;
pub mod catalog;
pub mod config;
pub mod download;
pub mod granule;
pub mod listing;
pub mod logging;
pub mod sensor;
pub mod service;
pub mod time;

/// Version of the hlslisting library and CLI.
///
/// This is synchronized across all components in the workspace.
/// The version is defined in `Cargo.toml` and injected at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
