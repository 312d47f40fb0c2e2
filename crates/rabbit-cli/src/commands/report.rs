//! Render aggregated statistics for a date range.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use anyhow::Result;
use chrono::{Duration, NaiveDate, Utc};
use rabbit_core::{
    CommandRecord, FileRecord, LaunchMode, LaunchRecord, LogRecord, PerspectiveRecord,
    TaskFileRecord,
};
use rabbit_store::{Accessor, DataStore};
use serde::Serialize;

use crate::config::Config;

/// Aggregated statistics for one date range, identity totals summed across
/// days within each kind.
#[derive(Debug, Serialize)]
pub struct Report {
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub files: Vec<FileRow>,
    pub commands: Vec<CommandRow>,
    pub perspectives: Vec<PerspectiveRow>,
    pub launches: Vec<LaunchRow>,
    pub task_files: Vec<TaskFileRow>,
}

#[derive(Debug, Serialize)]
pub struct FileRow {
    pub id: String,
    pub duration_ms: u64,
}

#[derive(Debug, Serialize)]
pub struct CommandRow {
    pub id: String,
    pub count: u64,
}

#[derive(Debug, Serialize)]
pub struct PerspectiveRow {
    pub id: String,
    pub duration_ms: u64,
}

#[derive(Debug, Serialize)]
pub struct LaunchRow {
    pub name: String,
    pub mode: LaunchMode,
    pub duration_ms: u64,
}

#[derive(Debug, Serialize)]
pub struct TaskFileRow {
    pub file_id: String,
    pub task_handle: String,
    pub task_created: NaiveDate,
    pub duration_ms: u64,
}

/// Renders statistics for the requested range to stdout.
pub fn run(
    config: &Config,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
    json: bool,
) -> Result<()> {
    let to = to.unwrap_or_else(|| Utc::now().date_naive());
    let from = from.unwrap_or_else(|| window_start(to, config.window_days));
    tracing::debug!(%from, %to, "building report");

    let report = build_report(config, from, to);
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", render(&report));
    }
    Ok(())
}

/// First day of the default display window ending at `to`.
///
/// A zero-length window yields an inverted range, which reads back as no
/// data.
fn window_start(to: NaiveDate, window_days: u32) -> NaiveDate {
    if window_days == 0 {
        to + Duration::days(1)
    } else {
        to - Duration::days(i64::from(window_days) - 1)
    }
}

/// Sums descriptor values across the range per identity, most active first.
fn fold_kind<R>(config: &Config, from: NaiveDate, to: NaiveDate) -> Vec<(R::Id, u64)>
where
    R: LogRecord,
    R::Id: Ord,
{
    let accessor = Accessor::new(DataStore::<R>::new(&config.storage_root));
    let mut totals: BTreeMap<R::Id, u64> = BTreeMap::new();
    for descriptor in accessor.data_in_range(from, to) {
        *totals.entry(descriptor.id).or_default() += descriptor.value;
    }

    let mut rows: Vec<_> = totals.into_iter().collect();
    rows.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    rows
}

fn build_report(config: &Config, from: NaiveDate, to: NaiveDate) -> Report {
    Report {
        from,
        to,
        files: fold_kind::<FileRecord>(config, from, to)
            .into_iter()
            .map(|(id, value)| FileRow {
                id: id.to_string(),
                duration_ms: value,
            })
            .collect(),
        commands: fold_kind::<CommandRecord>(config, from, to)
            .into_iter()
            .map(|(id, value)| CommandRow {
                id: id.to_string(),
                count: value,
            })
            .collect(),
        perspectives: fold_kind::<PerspectiveRecord>(config, from, to)
            .into_iter()
            .map(|(id, value)| PerspectiveRow {
                id: id.to_string(),
                duration_ms: value,
            })
            .collect(),
        launches: fold_kind::<LaunchRecord>(config, from, to)
            .into_iter()
            .map(|((name, mode), value)| LaunchRow {
                name: name.to_string(),
                mode,
                duration_ms: value,
            })
            .collect(),
        task_files: fold_kind::<TaskFileRecord>(config, from, to)
            .into_iter()
            .map(|((file_id, task_handle, task_created), value)| TaskFileRow {
                file_id: file_id.to_string(),
                task_handle: task_handle.to_string(),
                task_created,
                duration_ms: value,
            })
            .collect(),
    }
}

/// Formats a millisecond total for humans: `750ms`, `45s`, `1m 30s`, `2h 5m`.
fn fmt_duration(ms: u64) -> String {
    if ms < 1000 {
        return format!("{ms}ms");
    }
    let secs = ms / 1000;
    let (hours, minutes, seconds) = (secs / 3600, (secs % 3600) / 60, secs % 60);

    let mut parts = Vec::new();
    if hours > 0 {
        parts.push(format!("{hours}h"));
    }
    if minutes > 0 {
        parts.push(format!("{minutes}m"));
    }
    if seconds > 0 || parts.is_empty() {
        parts.push(format!("{seconds}s"));
    }
    parts.join(" ")
}

fn render(report: &Report) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Activity from {} to {}", report.from, report.to);

    let mut any = false;
    let mut section = |out: &mut String, name: &str, rows: &[(String, String)]| {
        if rows.is_empty() {
            return;
        }
        any = true;
        let _ = writeln!(out);
        let _ = writeln!(out, "{name}:");
        for (label, value) in rows {
            let _ = writeln!(out, "  {label}  {value}");
        }
    };

    let files: Vec<_> = report
        .files
        .iter()
        .map(|r| (r.id.clone(), fmt_duration(r.duration_ms)))
        .collect();
    section(&mut out, "files", &files);

    let commands: Vec<_> = report
        .commands
        .iter()
        .map(|r| (r.id.clone(), r.count.to_string()))
        .collect();
    section(&mut out, "commands", &commands);

    let perspectives: Vec<_> = report
        .perspectives
        .iter()
        .map(|r| (r.id.clone(), fmt_duration(r.duration_ms)))
        .collect();
    section(&mut out, "perspectives", &perspectives);

    let launches: Vec<_> = report
        .launches
        .iter()
        .map(|r| (format!("{} ({})", r.name, r.mode), fmt_duration(r.duration_ms)))
        .collect();
    section(&mut out, "launches", &launches);

    let task_files: Vec<_> = report
        .task_files
        .iter()
        .map(|r| {
            (
                format!("{} [{} {}]", r.file_id, r.task_handle, r.task_created),
                fmt_duration(r.duration_ms),
            )
        })
        .collect();
    section(&mut out, "task files", &task_files);

    if !any {
        let _ = writeln!(out);
        let _ = writeln!(out, "No activity recorded in this range.");
    }
    out
}
