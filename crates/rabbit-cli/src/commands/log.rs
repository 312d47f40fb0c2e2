//! Record a single activity event into the store.

use anyhow::{Context, Result};
use chrono::Utc;
use rabbit_core::{
    CommandEvent, CommandId, FileEvent, FileId, LaunchEvent, LaunchName, PerspectiveEvent,
    PerspectiveId, TaskFileEvent, TaskHandle, TrackedEvent,
};
use rabbit_store::{DataStore, Storer};

use crate::cli::LogEvent;
use crate::config::Config;

/// Converts the parsed arguments into an event and persists it.
pub fn run(config: &Config, event: &LogEvent) -> Result<()> {
    match event {
        LogEvent::File {
            file_id,
            duration,
            at,
        } => write_one(
            config,
            FileEvent {
                timestamp: at.unwrap_or_else(Utc::now),
                duration_ms: *duration,
                file_id: FileId::new(file_id.as_str())?,
            },
        ),
        LogEvent::Command { command_id, at } => write_one(
            config,
            CommandEvent {
                timestamp: at.unwrap_or_else(Utc::now),
                command_id: CommandId::new(command_id.as_str())?,
            },
        ),
        LogEvent::Perspective {
            perspective_id,
            duration,
            at,
        } => write_one(
            config,
            PerspectiveEvent {
                timestamp: at.unwrap_or_else(Utc::now),
                duration_ms: *duration,
                perspective_id: PerspectiveId::new(perspective_id.as_str())?,
            },
        ),
        LogEvent::Launch {
            name,
            mode,
            duration,
            at,
        } => write_one(
            config,
            LaunchEvent {
                timestamp: at.unwrap_or_else(Utc::now),
                duration_ms: *duration,
                name: LaunchName::new(name.as_str())?,
                mode: *mode,
            },
        ),
        LogEvent::TaskFile {
            file_id,
            task_handle,
            task_created,
            duration,
            at,
        } => write_one(
            config,
            TaskFileEvent {
                timestamp: at.unwrap_or_else(Utc::now),
                duration_ms: *duration,
                file_id: FileId::new(file_id.as_str())?,
                task_handle: TaskHandle::new(task_handle.as_str())?,
                task_created: *task_created,
            },
        ),
    }
}

/// Merges one event into its day file and writes the file back.
fn write_one<E: TrackedEvent>(config: &Config, event: E) -> Result<()> {
    let date = event.timestamp().date_naive();
    let mut storer = Storer::new(DataStore::<E::Record>::new(&config.storage_root));
    storer.insert(std::iter::once(event));
    storer.commit().context("failed to write day file")?;
    tracing::debug!(%date, "event recorded");
    Ok(())
}
