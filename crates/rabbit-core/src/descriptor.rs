//! Read-side aggregates built from persisted records.

use chrono::NaiveDate;
use serde::Serialize;

use crate::record::LogRecord;

/// A display-oriented aggregate for one (day, identity) pair.
///
/// Descriptors are derived from records when a date range is queried and are
/// never persisted. Within one day there is at most one record per identity,
/// so each record maps to exactly one descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Descriptor<I> {
    /// The day the activity happened on.
    pub date: NaiveDate,
    /// The activity's identity key.
    pub id: I,
    /// The aggregated value (milliseconds or occurrence count).
    pub value: u64,
}

impl<I> Descriptor<I> {
    /// Builds the descriptor for one record of one day.
    pub fn from_record<R>(date: NaiveDate, record: &R) -> Self
    where
        R: LogRecord<Id = I>,
    {
        Self {
            date,
            id: record.identity(),
            value: record.amount(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::CommandRecord;
    use crate::types::CommandId;

    #[test]
    fn descriptor_copies_identity_and_value() {
        let record = CommandRecord {
            command_id: CommandId::new("org.example.save").unwrap(),
            count: 4,
        };
        let date = NaiveDate::from_ymd_opt(2026, 3, 14).unwrap();

        let descriptor = Descriptor::from_record(date, &record);
        assert_eq!(descriptor.date, date);
        assert_eq!(descriptor.id, record.command_id);
        assert_eq!(descriptor.value, 4);
    }
}
