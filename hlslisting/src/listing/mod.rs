//! Per-tile listing of classified availability.
//!
//! A listing is one [`ListingCell`] per date holding the [`Availability`]
//! of both sensors. The [`ListingCache`] resolves listings incrementally:
//! only dates not yet covered for a tile cause a catalog search.
//!
//! [`Availability`]: crate::availability::Availability

mod cache;
mod cell;
mod error;
mod stats;

pub use cache::ListingCache;
pub use cell::ListingCell;
pub use error::ListingError;
pub use stats::ListingStats;
