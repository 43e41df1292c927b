//! One indexing run, from scanned files to built indexes.
//!
//! # Responsibility
//! - Read every note and run the extractors over it.
//! - Build the five indexes from the extracted records.
//! - Account for the run in an explicit [`RunStats`] value.
//!
//! # Invariants
//! - A note that cannot be read contributes no records and one read error.
//! - Record order follows file order, then line order.
//! - No run state outlives the returned values.

use crate::config::IndexerConfig;
use crate::index::{
    build_link_graph_with_limit, build_missing_pages_index, build_task_index_at,
    build_time_tracking_index, build_timeline_index, LinkGraph, MissingPagesIndex, TaskIndex,
    TimeTrackingIndex, TimelineIndex,
};
use crate::model::link::LinkRecord;
use crate::model::note::NoteFile;
use crate::model::task::TaskRecord;
use crate::parser::extract_note;
use chrono::NaiveDateTime;
use log::{debug, info, warn};
use serde::Serialize;

/// Counters for one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunStats {
    pub files_scanned: usize,
    pub files_read: usize,
    pub read_errors: usize,
    pub tasks: usize,
    pub links: usize,
}

/// Records extracted from all readable notes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    pub tasks: Vec<TaskRecord>,
    pub links: Vec<LinkRecord>,
    pub stats: RunStats,
}

/// Every index derived from one extraction.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexSet {
    pub tasks: TaskIndex,
    pub graph: LinkGraph,
    pub timeline: TimelineIndex,
    pub time_tracking: TimeTrackingIndex,
    pub missing_pages: MissingPagesIndex,
}

/// Reads each note from disk and extracts its records.
pub fn extract_notes(files: &[NoteFile], config: &IndexerConfig) -> Extraction {
    extract_notes_with(files, config, |file| {
        std::fs::read_to_string(&file.absolute_path)
    })
}

/// Like [`extract_notes`] with a caller-supplied reader.
pub fn extract_notes_with<F>(files: &[NoteFile], config: &IndexerConfig, mut read: F) -> Extraction
where
    F: FnMut(&NoteFile) -> std::io::Result<String>,
{
    let mut extraction = Extraction {
        stats: RunStats {
            files_scanned: files.len(),
            ..RunStats::default()
        },
        ..Extraction::default()
    };

    for file in files {
        let content = match read(file) {
            Ok(content) => content,
            Err(err) => {
                extraction.stats.read_errors += 1;
                warn!(
                    "event=read_note module=pipeline status=error path={} error={}",
                    file.path, err
                );
                continue;
            }
        };
        extraction.stats.files_read += 1;

        let records = extract_note(&content, &file.path, config.context_max_chars);
        debug!(
            "event=read_note module=pipeline status=ok path={} tasks={} links={}",
            file.path,
            records.tasks.len(),
            records.links.len()
        );
        extraction.tasks.extend(records.tasks);
        extraction.links.extend(records.links);
    }

    extraction.stats.tasks = extraction.tasks.len();
    extraction.stats.links = extraction.links.len();
    info!(
        "event=extract_notes module=pipeline status=ok files={} read_errors={} tasks={} links={}",
        extraction.stats.files_scanned,
        extraction.stats.read_errors,
        extraction.stats.tasks,
        extraction.stats.links
    );
    extraction
}

/// Builds all indexes relative to `now`.
pub fn build_indexes(
    extraction: &Extraction,
    files: &[NoteFile],
    config: &IndexerConfig,
    now: NaiveDateTime,
) -> IndexSet {
    let tasks = build_task_index_at(
        &extraction.tasks,
        now,
        i64::from(config.recent_window_days),
    );
    let graph = build_link_graph_with_limit(&extraction.links, files, config.hub_limit);
    let timeline = build_timeline_index(&extraction.tasks, files);
    let time_tracking = build_time_tracking_index(&extraction.tasks);
    let missing_pages = build_missing_pages_index(&graph, config.missing_page_threshold);

    info!(
        "event=build_indexes module=pipeline status=ok pages={} hubs={} days={} missing={}",
        graph.nodes.len(),
        graph.hub_pages.len(),
        timeline.days.len(),
        missing_pages.pages.len()
    );

    IndexSet {
        tasks,
        graph,
        timeline,
        time_tracking,
        missing_pages,
    }
}
