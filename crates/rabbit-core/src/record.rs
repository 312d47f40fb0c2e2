//! Persisted record types and the merge rules between them.
//!
//! A record is the on-disk representation of one or more same-identity events
//! for one calendar day. Records are serialized as attribute-bearing XML
//! elements inside a day log (see [`crate::daylog`]).
//!
//! # Identity and merging
//!
//! Two records of the same kind are *mergeable* iff their identity fields are
//! equal; the aggregated value fields are ignored by the comparison. Merging
//! keeps the identity and sums the values. Each record kind defines what
//! "the same activity" means through its [`LogRecord::Id`] type:
//!
//! - file records merge by file ID
//! - command records merge by command ID
//! - perspective records merge by perspective ID
//! - launch records merge by (name, mode)
//! - task file records merge by (file ID, task handle, task creation date)

use std::fmt;
use std::hash::Hash;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde::de::DeserializeOwned;

use crate::types::{CommandId, FileId, LaunchMode, LaunchName, PerspectiveId, TaskHandle};

/// A persisted, mergeable record of one event kind.
///
/// Implementations are plain serde structs whose XML attributes carry the
/// identity fields plus the aggregated value(s).
pub trait LogRecord:
    fmt::Debug + Clone + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// Directory segment naming this kind in the store layout.
    const KIND: &'static str;

    /// The identity key: equal keys mean the records describe the same
    /// activity and must be merged.
    type Id: Clone + PartialEq + Eq + Hash + fmt::Debug + Serialize + Send;

    /// Returns this record's identity key.
    fn identity(&self) -> Self::Id;

    /// The aggregated display value (milliseconds or occurrence count).
    fn amount(&self) -> u64;

    /// Folds `other`'s values into this record. Only defined when
    /// [`is_mergeable_with`](Self::is_mergeable_with) holds; callers guard.
    fn absorb(&mut self, other: &Self);

    /// Whether `other` describes the same activity as this record.
    fn is_mergeable_with(&self, other: &Self) -> bool {
        self.identity() == other.identity()
    }
}

/// Accumulated time spent in one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    /// Identity: the file worked on.
    #[serde(rename = "@fileId")]
    pub file_id: FileId,
    /// Total time in milliseconds.
    #[serde(rename = "@duration")]
    pub duration_ms: u64,
}

impl LogRecord for FileRecord {
    const KIND: &'static str = "files";

    type Id = FileId;

    fn identity(&self) -> FileId {
        self.file_id.clone()
    }

    fn amount(&self) -> u64 {
        self.duration_ms
    }

    fn absorb(&mut self, other: &Self) {
        self.duration_ms += other.duration_ms;
    }
}

/// Accumulated executions of one command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandRecord {
    /// Identity: the command executed.
    #[serde(rename = "@commandId")]
    pub command_id: CommandId,
    /// Number of executions.
    #[serde(rename = "@count")]
    pub count: u64,
}

impl LogRecord for CommandRecord {
    const KIND: &'static str = "commands";

    type Id = CommandId;

    fn identity(&self) -> CommandId {
        self.command_id.clone()
    }

    fn amount(&self) -> u64 {
        self.count
    }

    fn absorb(&mut self, other: &Self) {
        self.count += other.count;
    }
}

/// Accumulated time spent in one perspective.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerspectiveRecord {
    /// Identity: the perspective used.
    #[serde(rename = "@perspectiveId")]
    pub perspective_id: PerspectiveId,
    /// Total time in milliseconds.
    #[serde(rename = "@duration")]
    pub duration_ms: u64,
}

impl LogRecord for PerspectiveRecord {
    const KIND: &'static str = "perspectives";

    type Id = PerspectiveId;

    fn identity(&self) -> PerspectiveId {
        self.perspective_id.clone()
    }

    fn amount(&self) -> u64 {
        self.duration_ms
    }

    fn absorb(&mut self, other: &Self) {
        self.duration_ms += other.duration_ms;
    }
}

/// Accumulated launches of one configuration in one mode.
///
/// Launch records carry two value fields; merging sums both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaunchRecord {
    /// Identity: the launch configuration name.
    #[serde(rename = "@name")]
    pub name: LaunchName,
    /// Identity: how the launch was started.
    #[serde(rename = "@mode")]
    pub mode: LaunchMode,
    /// Number of launches.
    #[serde(rename = "@count")]
    pub count: u64,
    /// Total run time in milliseconds.
    #[serde(rename = "@totalDuration")]
    pub total_duration_ms: u64,
}

impl LogRecord for LaunchRecord {
    const KIND: &'static str = "launches";

    type Id = (LaunchName, LaunchMode);

    fn identity(&self) -> Self::Id {
        (self.name.clone(), self.mode)
    }

    fn amount(&self) -> u64 {
        self.total_duration_ms
    }

    fn absorb(&mut self, other: &Self) {
        self.count += other.count;
        self.total_duration_ms += other.total_duration_ms;
    }
}

/// Accumulated time spent in one file while one task was active.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskFileRecord {
    /// Identity: the file worked on.
    #[serde(rename = "@fileId")]
    pub file_id: FileId,
    /// Identity: the task handle in the host task manager.
    #[serde(rename = "@taskHandle")]
    pub task_handle: TaskHandle,
    /// Identity: when the task was created. Handles may be reused, so the
    /// creation date is part of the identity.
    #[serde(rename = "@taskCreated")]
    pub task_created: NaiveDate,
    /// Total time in milliseconds.
    #[serde(rename = "@duration")]
    pub duration_ms: u64,
}

impl LogRecord for TaskFileRecord {
    const KIND: &'static str = "task-files";

    type Id = (FileId, TaskHandle, NaiveDate);

    fn identity(&self) -> Self::Id {
        (
            self.file_id.clone(),
            self.task_handle.clone(),
            self.task_created,
        )
    }

    fn amount(&self) -> u64 {
        self.duration_ms
    }

    fn absorb(&mut self, other: &Self) {
        self.duration_ms += other.duration_ms;
    }
}
