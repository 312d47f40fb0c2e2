//! Write-path orchestration: convert, merge, persist.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rabbit_core::{DayLog, LogRecord, TrackedEvent};

use crate::{DataStore, StoreError};

/// Accumulates a batch of events into their day logs and writes them back.
///
/// `insert` groups events by the UTC calendar day of their timestamp. The
/// first touch of a day loads whatever is already on disk, so inserting is
/// always a merge against the existing document; `commit` then rewrites
/// every touched day wholesale.
///
/// There is no isolation across storers: the single-writer-per-day
/// discipline comes from the tracker enable/disable boundary upstream.
#[derive(Debug)]
pub struct Storer<R: LogRecord> {
    store: DataStore<R>,
    pending: BTreeMap<NaiveDate, DayLog<R>>,
}

impl<R: LogRecord> Storer<R> {
    /// Creates a storer writing through the given data store.
    #[must_use]
    pub const fn new(store: DataStore<R>) -> Self {
        Self {
            store,
            pending: BTreeMap::new(),
        }
    }

    /// Folds a batch of events into the pending day logs.
    ///
    /// Each event is converted to a record and merged into its day: if the
    /// day already holds a mergeable record the values are summed, otherwise
    /// the record is appended as a distinct entry. Nothing is written until
    /// [`commit`](Self::commit).
    pub fn insert<E>(&mut self, events: impl IntoIterator<Item = E>)
    where
        E: TrackedEvent<Record = R>,
    {
        let store = &self.store;
        for event in events {
            let date = event.timestamp().date_naive();
            let log = self
                .pending
                .entry(date)
                .or_insert_with(|| store.read_day(date));
            log.merge_record(event.to_record());
        }
    }

    /// Writes all touched day logs back to disk and clears the pending set.
    ///
    /// Returns the number of day files written. On error, days written so
    /// far stay written and the pending set is left intact.
    pub fn commit(&mut self) -> Result<usize, StoreError> {
        for log in self.pending.values() {
            self.store.write_day(log)?;
        }
        let written = self.pending.len();
        self.pending.clear();
        Ok(written)
    }

    /// Number of days touched since the last commit.
    #[must_use]
    pub fn pending_days(&self) -> usize {
        self.pending.len()
    }
}
