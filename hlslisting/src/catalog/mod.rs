//! Granule catalog access.
//!
//! This module provides the traits and implementations used to query the
//! remote granule catalog for HLS acquisitions.
//!
//! # Layers
//!
//! - [`HttpClient`] / [`ReqwestClient`]: blocking HTTP transport
//! - [`Session`]: explicit credentials handle, opened at startup and closed at shutdown
//! - [`GranuleSearch`] / [`CmrSearch`]: one paginated search attempt
//! - [`CatalogClient`]: bounded retry with a fixed wait between attempts
//!
//! ```ignore
//! use hlslisting::catalog::{CatalogClient, CmrSearch, ReqwestClient, Session, DEFAULT_CMR_URL};
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! let session = Arc::new(Session::from_env());
//! let search = CmrSearch::new(ReqwestClient::new()?, Arc::clone(&session), DEFAULT_CMR_URL, 2000);
//! let client = CatalogClient::new(search, 3, Duration::from_secs(20));
//! let records = client.search("10SEG", start, end)?;
//! session.close();
//! ```

mod client;
mod cmr;
mod http;
mod session;
mod types;

pub use client::CatalogClient;
pub use cmr::{CmrSearch, DEFAULT_CMR_URL};
pub use http::{HttpClient, ReqwestClient, DEFAULT_HTTP_TIMEOUT_SECS};
pub use session::{Session, TOKEN_ENV_VAR};
pub use types::{CatalogError, GranuleSearch};

#[cfg(test)]
pub use http::tests::MockHttpClient;
