//! Command-line argument definitions.

use std::path::PathBuf;

use chrono::{DateTime, NaiveDate, Utc};
use clap::{Parser, Subcommand};
use rabbit_core::LaunchMode;

/// Developer activity statistics.
///
/// Passively accumulates activity events into per-day XML files and renders
/// aggregated statistics from them.
#[derive(Debug, Parser)]
#[command(name = "rabbit", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Record one activity event into the store.
    Log {
        #[command(subcommand)]
        event: LogEvent,
    },

    /// Render aggregated statistics for a date range.
    Report {
        /// First day of the range (default: window start, per config).
        #[arg(long)]
        from: Option<NaiveDate>,

        /// Last day of the range, inclusive (default: today, UTC).
        #[arg(long)]
        to: Option<NaiveDate>,

        /// Emit machine-readable JSON instead of text.
        #[arg(long)]
        json: bool,
    },

    /// Show the storage root and per-kind day file coverage.
    Status,
}

/// Event kinds that can be recorded.
#[derive(Debug, Subcommand)]
pub enum LogEvent {
    /// Time spent working in a file.
    File {
        /// Stable identifier of the file.
        #[arg(long)]
        file_id: String,

        /// Interval length in milliseconds.
        #[arg(long)]
        duration: u64,

        /// End of the interval as RFC 3339 (default: now).
        #[arg(long)]
        at: Option<DateTime<Utc>>,
    },

    /// One command execution.
    Command {
        /// Identifier of the command (e.g., org.example.save).
        #[arg(long)]
        command_id: String,

        /// When the command ran, RFC 3339 (default: now).
        #[arg(long)]
        at: Option<DateTime<Utc>>,
    },

    /// Time spent in a perspective.
    Perspective {
        /// Identifier of the perspective.
        #[arg(long)]
        perspective_id: String,

        /// Interval length in milliseconds.
        #[arg(long)]
        duration: u64,

        /// End of the interval as RFC 3339 (default: now).
        #[arg(long)]
        at: Option<DateTime<Utc>>,
    },

    /// One finished launch of a configuration.
    Launch {
        /// The launch configuration name.
        #[arg(long)]
        name: String,

        /// How the launch was started: run, debug or profile.
        #[arg(long)]
        mode: LaunchMode,

        /// Run time in milliseconds.
        #[arg(long)]
        duration: u64,

        /// When the launch finished, RFC 3339 (default: now).
        #[arg(long)]
        at: Option<DateTime<Utc>>,
    },

    /// Time spent in a file while a task was active.
    TaskFile {
        /// Stable identifier of the file.
        #[arg(long)]
        file_id: String,

        /// Handle of the active task.
        #[arg(long)]
        task_handle: String,

        /// Creation date of the active task (YYYY-MM-DD).
        #[arg(long)]
        task_created: NaiveDate,

        /// Interval length in milliseconds.
        #[arg(long)]
        duration: u64,

        /// End of the interval as RFC 3339 (default: now).
        #[arg(long)]
        at: Option<DateTime<Utc>>,
    },
}
