//! Day-bucketed storage layer for the rabbit activity statistics engine.
//!
//! Statistics are persisted as one XML document per calendar day per event
//! kind, under a configurable storage root:
//!
//! ```text
//! <root>/<kind>/<YYYY-MM-DD>.xml
//! ```
//!
//! Each document holds a date header and a flat list of merged records (see
//! [`rabbit_core::DayLog`]). Files are read and rewritten wholesale on every
//! write for a day; there is no append-only log.
//!
//! # Failure semantics
//!
//! This is best-effort telemetry storage. A day file that is missing,
//! unreadable, or malformed reads back as "no data for that day" (with a
//! warning logged), never as a hard error. Writes are last-writer-wins; the
//! single-writer-per-day discipline is upheld by the tracker enable/disable
//! boundary upstream, not by this layer.

mod accessor;
mod datastore;
mod storer;

use std::path::PathBuf;

use thiserror::Error;

pub use accessor::Accessor;
pub use datastore::DataStore;
pub use storer::Storer;

/// Storage layer errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A filesystem operation failed.
    #[error("io error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A day file could not be parsed.
    #[error("failed to parse day log {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: quick_xml::DeError,
    },

    /// A day log could not be serialized.
    #[error("failed to serialize day log: {0}")]
    Serialize(#[from] quick_xml::SeError),
}
