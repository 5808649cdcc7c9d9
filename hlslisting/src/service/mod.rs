//! High-level service facade for HLS availability queries.
//!
//! Wires the catalog search, listing cache and downloader together behind a
//! thread-safe API.
//!
//! # Example
//!
//! ```ignore
//! use hlslisting::catalog::Session;
//! use hlslisting::config::ConfigFile;
//! use hlslisting::sensor::Sensor;
//! use hlslisting::service::RemoteHlsService;
//! use std::sync::Arc;
//!
//! let service = RemoteHlsService::from_config(&ConfigFile::load()?, Arc::new(Session::from_env()))?;
//! let rows = service.listing("10SEG", start, end)?;
//! let dir = service.download(Sensor::Landsat, "10SEG", date)?;
//! ```

mod error;
mod facade;

pub use error::ServiceError;
pub use facade::{HlsService, RemoteHlsService};
