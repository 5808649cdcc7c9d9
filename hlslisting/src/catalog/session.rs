//! Authenticated catalog session.
//!
//! A [`Session`] is opened once at startup and handed to every component that
//! talks to the remote archive (catalog search and granule download). It is
//! closed explicitly at shutdown; requests made through a closed session fail.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::info;

/// Environment variable holding an Earthdata bearer token.
pub const TOKEN_ENV_VAR: &str = "EARTHDATA_TOKEN";

/// Session handle carrying optional bearer credentials.
pub struct Session {
    token: Option<String>,
    open: AtomicBool,
}

impl Session {
    /// Open a session without credentials.
    ///
    /// Catalog search works anonymously; protected downloads will be refused
    /// by the server.
    pub fn anonymous() -> Self {
        Self::open(None)
    }

    /// Open a session that authenticates with a bearer token.
    pub fn with_token(token: impl Into<String>) -> Self {
        Self::open(Some(token.into()))
    }

    /// Open a session using `EARTHDATA_TOKEN` when it is set and non-empty.
    pub fn from_env() -> Self {
        let token = std::env::var(TOKEN_ENV_VAR)
            .ok()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());
        Self::open(token)
    }

    fn open(token: Option<String>) -> Self {
        info!(authenticated = token.is_some(), "Catalog session opened");
        Self {
            token,
            open: AtomicBool::new(true),
        }
    }

    /// Bearer token, if the session is authenticated.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// True until [`close`](Self::close) is called.
    pub fn is_open(&self) -> bool {
        self.open.load(Ordering::Acquire)
    }

    /// Close the session. Closing twice is harmless.
    pub fn close(&self) {
        if self.open.swap(false, Ordering::AcqRel) {
            info!("Catalog session closed");
        }
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("authenticated", &self.token.is_some())
            .field("open", &self.is_open())
            .finish()
    }
}
