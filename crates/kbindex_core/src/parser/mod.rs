//! Line-oriented extractors for markdown notes.
//!
//! # Responsibility
//! - Recover task, time-log and page-link records from raw note text.
//! - Derive page identity and journal dates from note paths.
//!
//! # Invariants
//! - Extraction never fails: unrecognized lines are skipped silently.
//! - Records are emitted in line order.

pub mod links;
pub mod paths;
pub mod tasks;
pub mod time_log;

use crate::model::link::LinkRecord;
use crate::model::task::TaskRecord;

pub use links::{
    extract_page_refs, parse_links, parse_links_with_limit, truncate_context,
    DEFAULT_CONTEXT_MAX_CHARS,
};
pub use paths::{journal_date_from_path, page_name_from_path};
pub use tasks::parse_tasks;
pub use time_log::{parse_clock_duration, parse_clock_line, parse_time_log};

/// Records extracted from one note.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteRecords {
    pub tasks: Vec<TaskRecord>,
    pub links: Vec<LinkRecord>,
}

/// Runs both extractors over one note.
pub fn extract_note(content: &str, path: &str, context_max_chars: usize) -> NoteRecords {
    NoteRecords {
        tasks: parse_tasks(content, path),
        links: parse_links_with_limit(content, path, context_max_chars),
    }
}
