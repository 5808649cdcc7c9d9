//! Granule identifiers, records, and the record store.
//!
//! A granule is one acquisition of one tile by one sensor. The catalog
//! returns [`GranuleRecord`]s which accumulate in a [`GranuleStore`] for the
//! life of the process.

mod id;
mod record;
mod store;

pub use id::{normalize_tile, GranuleId, GranuleIdError};
pub use record::GranuleRecord;
pub use store::GranuleStore;
