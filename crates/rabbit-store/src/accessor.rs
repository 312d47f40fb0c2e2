//! Read-path orchestration: unmarshal day files and fold into descriptors.

use chrono::NaiveDate;
use rabbit_core::{Descriptor, LogRecord};
use rayon::prelude::*;

use crate::DataStore;

/// Reads day files across a date range and folds their records into
/// display descriptors.
///
/// Every record maps 1:1 to a descriptor keyed by (date, identity); within
/// one day there is at most one record per identity by construction of the
/// write path. Days whose files are malformed or unreadable contribute no
/// descriptors.
#[derive(Debug)]
pub struct Accessor<R: LogRecord> {
    store: DataStore<R>,
}

impl<R: LogRecord> Accessor<R> {
    /// Creates an accessor reading through the given data store.
    #[must_use]
    pub const fn new(store: DataStore<R>) -> Self {
        Self { store }
    }

    /// Returns descriptors for every record persisted in `[start, end]`
    /// (inclusive), ordered by date. An inverted range yields no data.
    ///
    /// Day files are independent documents, so they are unmarshalled in
    /// parallel.
    pub fn data_in_range(&self, start: NaiveDate, end: NaiveDate) -> Vec<Descriptor<R::Id>> {
        self.store
            .dates_in_range(start, end)
            .into_par_iter()
            .flat_map_iter(|date| {
                let log = self.store.read_day(date);
                log.records()
                    .iter()
                    .map(|record| Descriptor::from_record(date, record))
                    .collect::<Vec<_>>()
            })
            .collect()
    }
}
