//! Observed activity events and their conversion into persisted records.
//!
//! An event describes one time-bounded unit of activity reported by a live
//! source: an interval spent in a file or perspective, a command execution,
//! a finished launch. Events are buffered in memory by a tracker and only
//! turned into [records](crate::record) when the buffer is persisted.
//!
//! Durations are carried as non-negative millisecond counts, so the
//! "duration >= 0" invariant holds by construction.

use chrono::{DateTime, NaiveDate, Utc};

use crate::record::{
    CommandRecord, FileRecord, LaunchRecord, LogRecord, PerspectiveRecord, TaskFileRecord,
};
use crate::types::{CommandId, FileId, LaunchMode, LaunchName, PerspectiveId, TaskHandle};

/// An observed activity event that can be persisted as a record.
///
/// The conversion is total: every event produces exactly one record carrying
/// the event's identity fields and a base value (its duration, or a count
/// of one).
pub trait TrackedEvent: Clone + Send + 'static {
    /// The record kind this event collapses into.
    type Record: LogRecord;

    /// When the activity interval ended.
    fn timestamp(&self) -> DateTime<Utc>;

    /// Converts this event into a single record.
    fn to_record(&self) -> Self::Record;
}

/// An interval of work in one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEvent {
    /// When the interval ended.
    pub timestamp: DateTime<Utc>,
    /// Interval length in milliseconds.
    pub duration_ms: u64,
    /// The file worked on.
    pub file_id: FileId,
}

impl TrackedEvent for FileEvent {
    type Record = FileRecord;

    fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    fn to_record(&self) -> FileRecord {
        FileRecord {
            file_id: self.file_id.clone(),
            duration_ms: self.duration_ms,
        }
    }
}

/// One command execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandEvent {
    /// When the command ran.
    pub timestamp: DateTime<Utc>,
    /// The command executed.
    pub command_id: CommandId,
}

impl TrackedEvent for CommandEvent {
    type Record = CommandRecord;

    fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    fn to_record(&self) -> CommandRecord {
        CommandRecord {
            command_id: self.command_id.clone(),
            count: 1,
        }
    }
}

/// An interval of work in one perspective.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PerspectiveEvent {
    /// When the interval ended.
    pub timestamp: DateTime<Utc>,
    /// Interval length in milliseconds.
    pub duration_ms: u64,
    /// The perspective used.
    pub perspective_id: PerspectiveId,
}

impl TrackedEvent for PerspectiveEvent {
    type Record = PerspectiveRecord;

    fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    fn to_record(&self) -> PerspectiveRecord {
        PerspectiveRecord {
            perspective_id: self.perspective_id.clone(),
            duration_ms: self.duration_ms,
        }
    }
}

/// One finished launch of a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchEvent {
    /// When the launch finished.
    pub timestamp: DateTime<Utc>,
    /// Run time in milliseconds.
    pub duration_ms: u64,
    /// The launch configuration name.
    pub name: LaunchName,
    /// How the launch was started.
    pub mode: LaunchMode,
}

impl TrackedEvent for LaunchEvent {
    type Record = LaunchRecord;

    fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    fn to_record(&self) -> LaunchRecord {
        LaunchRecord {
            name: self.name.clone(),
            mode: self.mode,
            count: 1,
            total_duration_ms: self.duration_ms,
        }
    }
}

/// An interval of work in one file while a task was active.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskFileEvent {
    /// When the interval ended.
    pub timestamp: DateTime<Utc>,
    /// Interval length in milliseconds.
    pub duration_ms: u64,
    /// The file worked on.
    pub file_id: FileId,
    /// The active task's handle.
    pub task_handle: TaskHandle,
    /// The active task's creation date.
    pub task_created: NaiveDate,
}

impl TrackedEvent for TaskFileEvent {
    type Record = TaskFileRecord;

    fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    fn to_record(&self) -> TaskFileRecord {
        TaskFileRecord {
            file_id: self.file_id.clone(),
            task_handle: self.task_handle.clone(),
            task_created: self.task_created,
            duration_ms: self.duration_ms,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn at_noon() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 14, 12, 0, 0).unwrap()
    }

    #[test]
    fn file_event_converts_to_record_with_base_duration() {
        let event = FileEvent {
            timestamp: at_noon(),
            duration_ms: 250,
            file_id: FileId::new("abc").unwrap(),
        };
        let record = event.to_record();
        assert_eq!(record.file_id, event.file_id);
        assert_eq!(record.duration_ms, 250);
    }

    #[test]
    fn command_event_converts_to_count_of_one() {
        let event = CommandEvent {
            timestamp: at_noon(),
            command_id: CommandId::new("org.example.save").unwrap(),
        };
        let record = event.to_record();
        assert_eq!(record.count, 1);
    }

    #[test]
    fn launch_event_converts_to_count_one_with_duration() {
        let event = LaunchEvent {
            timestamp: at_noon(),
            duration_ms: 4_000,
            name: LaunchName::new("server").unwrap(),
            mode: LaunchMode::Debug,
        };
        let record = event.to_record();
        assert_eq!(record.count, 1);
        assert_eq!(record.total_duration_ms, 4_000);
        assert_eq!(record.identity(), (event.name, LaunchMode::Debug));
    }

    #[test]
    fn zero_duration_events_are_valid() {
        let event = FileEvent {
            timestamp: at_noon(),
            duration_ms: 0,
            file_id: FileId::new("abc").unwrap(),
        };
        assert_eq!(event.to_record().amount(), 0);
    }
}
