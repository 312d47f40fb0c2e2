//! Day-bucket resolution and whole-document XML I/O.

use std::fs;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use rabbit_core::{DayLog, LogRecord};

use crate::StoreError;

/// Root element name of every day document.
const ROOT_ELEMENT: &str = "events";

const XML_DECLARATION: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n";

/// Maps calendar days to on-disk XML documents for one record kind.
///
/// Path resolution is a pure function of (storage root, kind, date): the
/// same date always maps to the same file.
#[derive(Debug, Clone)]
pub struct DataStore<R> {
    root: PathBuf,
    _kind: PhantomData<fn() -> R>,
}

impl<R: LogRecord> DataStore<R> {
    /// Creates a store for `R`'s kind under the given storage root.
    ///
    /// Nothing is created on disk until the first write.
    pub fn new(storage_root: impl Into<PathBuf>) -> Self {
        Self {
            root: storage_root.into(),
            _kind: PhantomData,
        }
    }

    /// The directory holding this kind's day files.
    #[must_use]
    pub fn kind_dir(&self) -> PathBuf {
        self.root.join(R::KIND)
    }

    /// The file the given day's records live in, whether or not it exists.
    #[must_use]
    pub fn data_file_for(&self, date: NaiveDate) -> PathBuf {
        self.kind_dir().join(format!("{date}.xml"))
    }

    /// Reads the given day's log.
    ///
    /// A missing file yields an empty log. An unreadable or malformed file
    /// also yields an empty log, with a warning; read failures degrade to
    /// "no data for that day".
    pub fn read_day(&self, date: NaiveDate) -> DayLog<R> {
        match self.try_read_day(date) {
            Ok(Some(log)) => log,
            Ok(None) => DayLog::empty(date),
            Err(err) => {
                tracing::warn!(kind = R::KIND, %date, error = %err, "skipping unreadable day file");
                DayLog::empty(date)
            }
        }
    }

    /// Reads the given day's log, surfacing failures.
    ///
    /// Returns `Ok(None)` when no file exists for the day.
    pub fn try_read_day(&self, date: NaiveDate) -> Result<Option<DayLog<R>>, StoreError> {
        let path = self.data_file_for(date);
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => {
                return Err(StoreError::Io {
                    path,
                    source: err,
                });
            }
        };
        let log = quick_xml::de::from_str(&text).map_err(|err| StoreError::Parse {
            path,
            source: err,
        })?;
        Ok(Some(log))
    }

    /// Writes the given day's log, replacing any existing document.
    ///
    /// The document is written to a temporary sibling and renamed into
    /// place. Last-writer-wins; no stronger guarantee is made.
    pub fn write_day(&self, log: &DayLog<R>) -> Result<(), StoreError> {
        let dir = self.kind_dir();
        fs::create_dir_all(&dir).map_err(|err| StoreError::Io {
            path: dir.clone(),
            source: err,
        })?;

        let body = quick_xml::se::to_string_with_root(ROOT_ELEMENT, log)?;
        let path = self.data_file_for(log.date());
        let tmp = path.with_extension("xml.tmp");

        fs::write(&tmp, format!("{XML_DECLARATION}{body}\n")).map_err(|err| StoreError::Io {
            path: tmp.clone(),
            source: err,
        })?;
        fs::rename(&tmp, &path).map_err(|err| StoreError::Io {
            path,
            source: err,
        })?;

        tracing::debug!(kind = R::KIND, date = %log.date(), records = log.len(), "wrote day file");
        Ok(())
    }

    /// Lists the days in `[start, end]` (inclusive) that have an existing
    /// day file, in ascending date order.
    ///
    /// An inverted range (`start > end`) yields an empty list, as does a
    /// kind directory that does not exist yet.
    pub fn dates_in_range(&self, start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
        if start > end {
            return Vec::new();
        }
        let Ok(entries) = fs::read_dir(self.kind_dir()) else {
            return Vec::new();
        };

        let mut dates: Vec<NaiveDate> = entries
            .filter_map(Result::ok)
            .filter_map(|entry| date_of_day_file(&entry.path()))
            .filter(|date| (start..=end).contains(date))
            .collect();
        dates.sort_unstable();
        dates
    }
}

/// Parses the calendar date out of a day file path; `None` for anything
/// that is not a `YYYY-MM-DD.xml` file (temp files, strays).
fn date_of_day_file(path: &Path) -> Option<NaiveDate> {
    if path.extension()? != "xml" {
        return None;
    }
    path.file_stem()?.to_str()?.parse().ok()
}
