//! Markdown report rendering.
//!
//! # Responsibility
//! - Turn built indexes into the markdown report set.
//! - Write the report set into one output directory.
//!
//! # Invariants
//! - Renderers are pure: identical indexes and context give identical text.
//! - The report set is written in [`REPORT_FILES`] order; a failed write stops
//!   the run and names the file.

mod dashboard;
mod graph;
mod missing_pages;
mod tasks;
mod time_tracking;
mod timeline;

pub use dashboard::render_dashboard;
pub use graph::render_reference_graph;
pub use missing_pages::render_missing_pages;
pub use tasks::{render_tasks_by_priority, render_tasks_by_status};
pub use time_tracking::render_time_tracking;
pub use timeline::{render_timeline_full, render_timeline_recent};

use crate::config::IndexerConfig;
use crate::pipeline::{IndexSet, RunStats};
use chrono::{NaiveDateTime, TimeDelta};
use log::info;
use std::error::Error;
use std::fmt::{self, Display, Formatter};
use std::path::{Path, PathBuf};

pub const DASHBOARD_FILE: &str = "dashboard.md";
pub const TASKS_BY_STATUS_FILE: &str = "tasks-by-status.md";
pub const TASKS_BY_PRIORITY_FILE: &str = "tasks-by-priority.md";
pub const TIMELINE_RECENT_FILE: &str = "timeline-recent.md";
pub const TIMELINE_FULL_FILE: &str = "timeline-full.md";
pub const MISSING_PAGES_FILE: &str = "missing-pages.md";
pub const TIME_TRACKING_FILE: &str = "time-tracking.md";
pub const REFERENCE_GRAPH_FILE: &str = "reference-graph.md";

/// Every report file, in write order.
pub const REPORT_FILES: [&str; 8] = [
    DASHBOARD_FILE,
    TASKS_BY_STATUS_FILE,
    TASKS_BY_PRIORITY_FILE,
    TIMELINE_RECENT_FILE,
    TIMELINE_FULL_FILE,
    MISSING_PAGES_FILE,
    TIME_TRACKING_FILE,
    REFERENCE_GRAPH_FILE,
];

const GENERATED_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Values shared by all renderers of one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportContext {
    pub generated_at: NaiveDateTime,
    /// Days covered by the recent timeline, counting back from `generated_at`.
    pub timeline_recent_days: u32,
}

impl ReportContext {
    pub fn new(generated_at: NaiveDateTime, config: &IndexerConfig) -> Self {
        Self {
            generated_at,
            timeline_recent_days: config.timeline_recent_days,
        }
    }

    fn generated_label(&self) -> String {
        self.generated_at.format(GENERATED_FORMAT).to_string()
    }
}

#[derive(Debug)]
pub enum ReportError {
    CreateDir { path: PathBuf, source: std::io::Error },
    Write { path: PathBuf, source: std::io::Error },
}

impl Display for ReportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::CreateDir { path, source } => write!(
                f,
                "cannot create output directory `{}`: {source}",
                path.display()
            ),
            Self::Write { path, source } => {
                write!(f, "cannot write report `{}`: {source}", path.display())
            }
        }
    }
}

impl Error for ReportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::CreateDir { source, .. } | Self::Write { source, .. } => Some(source),
        }
    }
}

/// Renders the full report set as `(file name, markdown)` pairs.
pub fn render_reports(
    indexes: &IndexSet,
    stats: &RunStats,
    ctx: &ReportContext,
) -> Vec<(&'static str, String)> {
    vec![
        (DASHBOARD_FILE, render_dashboard(indexes, stats, ctx)),
        (
            TASKS_BY_STATUS_FILE,
            render_tasks_by_status(&indexes.tasks, ctx),
        ),
        (
            TASKS_BY_PRIORITY_FILE,
            render_tasks_by_priority(&indexes.tasks, ctx),
        ),
        (
            TIMELINE_RECENT_FILE,
            render_timeline_recent(&indexes.timeline, ctx),
        ),
        (
            TIMELINE_FULL_FILE,
            render_timeline_full(&indexes.timeline, ctx),
        ),
        (
            MISSING_PAGES_FILE,
            render_missing_pages(&indexes.missing_pages, ctx),
        ),
        (
            TIME_TRACKING_FILE,
            render_time_tracking(&indexes.time_tracking, ctx),
        ),
        (
            REFERENCE_GRAPH_FILE,
            render_reference_graph(&indexes.graph, ctx),
        ),
    ]
}

/// Creates `out_dir` and writes every report into it.
///
/// Returns the written paths in [`REPORT_FILES`] order.
pub fn write_reports(
    indexes: &IndexSet,
    stats: &RunStats,
    out_dir: &Path,
    ctx: &ReportContext,
) -> Result<Vec<PathBuf>, ReportError> {
    std::fs::create_dir_all(out_dir).map_err(|source| ReportError::CreateDir {
        path: out_dir.to_path_buf(),
        source,
    })?;

    let mut written = Vec::with_capacity(REPORT_FILES.len());
    for (file_name, content) in render_reports(indexes, stats, ctx) {
        let path = out_dir.join(file_name);
        std::fs::write(&path, content).map_err(|source| ReportError::Write {
            path: path.clone(),
            source,
        })?;
        written.push(path);
    }

    info!(
        "event=write_reports module=report status=ok dir={} files={}",
        out_dir.display(),
        written.len()
    );
    Ok(written)
}

/// Renders a duration as `Xh Ym`, `Xh`, `Ym Zs`, `Ym` or `Zs`.
///
/// Sub-second precision is dropped; negative values keep a leading `-`.
pub fn format_duration(duration: TimeDelta) -> String {
    let total = duration.num_seconds();
    if total < 0 {
        return format!("-{}", format_seconds(total.unsigned_abs()));
    }
    format_seconds(total.unsigned_abs())
}

fn format_seconds(total: u64) -> String {
    let hours = total / 3600;
    let minutes = total % 3600 / 60;
    let seconds = total % 60;

    match (hours, minutes, seconds) {
        (0, 0, seconds) => format!("{seconds}s"),
        (0, minutes, 0) => format!("{minutes}m"),
        (0, minutes, seconds) => format!("{minutes}m {seconds}s"),
        (hours, 0, _) => format!("{hours}h"),
        (hours, minutes, _) => format!("{hours}h {minutes}m"),
    }
}

/// `""` for one, `"s"` otherwise.
pub(crate) fn plural(count: usize) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}

/// Runs `render` against a fresh buffer.
pub(crate) fn rendered(render: impl FnOnce(&mut String) -> fmt::Result) -> String {
    let mut out = String::new();
    render(&mut out).expect("formatting into a String is infallible");
    out
}

#[cfg(test)]
mod tests {
    use super::{format_duration, plural, rendered};
    use chrono::TimeDelta;
    use std::fmt::Write;

    #[test]
    fn format_duration_covers_every_shape() {
        let cases = [
            (0, "0s"),
            (45, "45s"),
            (300, "5m"),
            (330, "5m 30s"),
            (7200, "2h"),
            (7230, "2h"),
            (9000, "2h 30m"),
            (938_804, "260h 46m"),
            (-90, "-1m 30s"),
        ];
        for (seconds, expected) in cases {
            assert_eq!(
                format_duration(TimeDelta::seconds(seconds)),
                expected,
                "seconds={seconds}"
            );
        }
    }

    #[test]
    fn plural_suffix() {
        assert_eq!(plural(1), "");
        assert_eq!(plural(0), "s");
        assert_eq!(plural(2), "s");
    }

    #[test]
    fn rendered_collects_every_write() {
        let out = rendered(|out| {
            writeln!(out, "# Title")?;
            write!(out, "{}", format_duration(TimeDelta::MAX))
        });
        assert!(out.starts_with("# Title\n"));
        assert!(out.ends_with('m'));
    }
}
