//! Core domain model for the rabbit activity statistics engine.
//!
//! This crate contains the fundamental types and rules for:
//! - Events: observed, time-bounded units of developer activity
//! - Records: the persisted per-day representation of merged events
//! - Merging: the per-kind identity rules deciding what "the same
//!   activity" means
//! - Day logs and descriptors: the persisted container and the read-side
//!   aggregate derived from it

mod daylog;
mod descriptor;
pub mod event;
pub mod record;
pub mod types;

pub use daylog::DayLog;
pub use descriptor::Descriptor;
pub use event::{CommandEvent, FileEvent, LaunchEvent, PerspectiveEvent, TaskFileEvent, TrackedEvent};
pub use record::{
    CommandRecord, FileRecord, LaunchRecord, LogRecord, PerspectiveRecord, TaskFileRecord,
};
pub use types::{
    CommandId, FileId, LaunchMode, LaunchName, PerspectiveId, TaskHandle, ValidationError,
};
