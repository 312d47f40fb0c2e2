//! Day logs: the per-day containers records are persisted in.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::record::LogRecord;

/// All records of one kind for one calendar day.
///
/// Serialized as a single XML document: a root element carrying the date,
/// containing one `event` element per distinct identity. The container
/// maintains the at-most-one-record-per-identity invariant through
/// [`merge_record`](Self::merge_record); same-identity insertions collapse
/// into the existing record instead of appending.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayLog<R> {
    #[serde(rename = "@date")]
    date: NaiveDate,
    // An explicit default path: the inferred `default` would put a
    // `Default` bound on `R`, which record types do not carry.
    #[serde(rename = "event", default = "Vec::new")]
    events: Vec<R>,
}

impl<R: LogRecord> DayLog<R> {
    /// Creates an empty log for the given day.
    #[must_use]
    pub const fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            events: Vec::new(),
        }
    }

    /// The calendar day this log covers.
    #[must_use]
    pub const fn date(&self) -> NaiveDate {
        self.date
    }

    /// The records currently in the log.
    #[must_use]
    pub fn records(&self) -> &[R] {
        &self.events
    }

    /// Number of distinct identities in the log.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether the log holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Folds a record into the log.
    ///
    /// If an existing record is mergeable with `record`, its values absorb
    /// the new ones; otherwise the record is appended as a distinct entry.
    /// Day logs stay small (bounded by one day's distinct activities), so a
    /// linear scan is fine here.
    pub fn merge_record(&mut self, record: R) {
        match self
            .events
            .iter_mut()
            .find(|existing| existing.is_mergeable_with(&record))
        {
            Some(existing) => existing.absorb(&record),
            None => self.events.push(record),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::FileRecord;
    use crate::types::FileId;

    fn file_record(id: &str, ms: u64) -> FileRecord {
        FileRecord {
            file_id: FileId::new(id).unwrap(),
            duration_ms: ms,
        }
    }

    fn march_14() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 14).unwrap()
    }

    #[test]
    fn same_identity_collapses_into_one_record() {
        let mut log = DayLog::empty(march_14());
        log.merge_record(file_record("abc", 10));
        log.merge_record(file_record("abc", 20));

        assert_eq!(log.len(), 1);
        assert_eq!(log.records()[0].duration_ms, 30);
    }

    #[test]
    fn distinct_identities_stay_distinct() {
        let mut log = DayLog::empty(march_14());
        log.merge_record(file_record("abc", 10));
        log.merge_record(file_record("xyz", 20));

        assert_eq!(log.len(), 2);
    }

    #[test]
    fn empty_log_has_no_records() {
        let log: DayLog<FileRecord> = DayLog::empty(march_14());
        assert!(log.is_empty());
        assert_eq!(log.date(), march_14());
    }

    #[test]
    fn serializes_as_date_header_plus_flat_record_list() {
        let mut log = DayLog::empty(march_14());
        log.merge_record(file_record("abc", 30));

        let xml = quick_xml::se::to_string_with_root("events", &log).unwrap();
        assert_eq!(
            xml,
            r#"<events date="2026-03-14"><event fileId="abc" duration="30"/></events>"#
        );
    }

    #[test]
    fn deserializes_a_document_without_records() {
        let log: DayLog<FileRecord> =
            quick_xml::de::from_str(r#"<events date="2026-03-14"/>"#).unwrap();
        assert!(log.is_empty());
    }

    #[test]
    fn xml_roundtrip_preserves_records() {
        let mut log = DayLog::empty(march_14());
        log.merge_record(file_record("abc", 10));
        log.merge_record(file_record("xyz", 20));

        let xml = quick_xml::se::to_string_with_root("events", &log).unwrap();
        let parsed: DayLog<FileRecord> = quick_xml::de::from_str(&xml).unwrap();

        assert_eq!(parsed.date(), log.date());
        assert_eq!(parsed.records(), log.records());
    }
}
