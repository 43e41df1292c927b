//! Task line extraction.
//!
//! # Responsibility
//! - Detect bullet lines carrying a status marker.
//! - Split out priority, description, linked pages and the attached log block.
//!
//! # Invariants
//! - A line yields at most one task; the first marker in `TaskStatus::ALL`
//!   order wins.
//! - Only `[#A]`, `[#B]` and `[#C]` are priority markers; other bracket
//!   content stays in the description.

use crate::model::task::{Priority, TaskRecord, TaskStatus};
use crate::parser::links::extract_page_refs;
use crate::parser::time_log::{parse_time_log, LOG_BLOCK_OPEN};
use once_cell::sync::Lazy;
use regex::Regex;

const BULLET_PREFIXES: [&str; 3] = ["- ", "* ", "+ "];

static PRIORITY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[#([ABC])\]").expect("valid priority regex"));

/// Extracts every task from one note, in line order.
pub fn parse_tasks(content: &str, path: &str) -> Vec<TaskRecord> {
    let lines: Vec<&str> = content.lines().collect();
    let mut tasks = Vec::new();
    let mut index = 0;

    while index < lines.len() {
        let line = lines[index];
        let Some(mut task) = parse_task_line(line, path, index + 1) else {
            index += 1;
            continue;
        };

        if lines
            .get(index + 1)
            .is_some_and(|next| next.contains(LOG_BLOCK_OPEN))
        {
            let (entries, consumed) = parse_time_log(&lines, index + 1);
            task.time_log = entries;
            index += consumed;
        }

        tasks.push(task);
        index += 1;
    }

    tasks
}

/// Builds a task from a single line, without its log block.
pub fn parse_task_line(line: &str, path: &str, line_number: usize) -> Option<TaskRecord> {
    if !is_bullet_line(line) {
        return None;
    }
    let status = detect_status(line)?;
    let priority = detect_priority(line);

    Some(TaskRecord {
        status,
        priority,
        description: task_description(line, status, priority),
        page_refs: extract_page_refs(line),
        source_file: path.to_string(),
        line_number,
        time_log: Vec::new(),
    })
}

/// Whether the line starts with `- `, `* ` or `+ ` after leading whitespace.
pub fn is_bullet_line(line: &str) -> bool {
    let trimmed = line.trim_start();
    BULLET_PREFIXES
        .iter()
        .any(|prefix| trimmed.starts_with(prefix))
}

/// Returns the first status whose `"<MARKER> "` appears on the line.
pub fn detect_status(line: &str) -> Option<TaskStatus> {
    TaskStatus::ALL
        .into_iter()
        .find(|status| line.contains(&status_marker(*status)))
}

/// Returns the first valid priority marker on the line, or `Priority::None`.
pub fn detect_priority(line: &str) -> Priority {
    PRIORITY_RE
        .captures(line)
        .and_then(|caps| caps.get(1))
        .and_then(|m| Priority::from_marker_letter(m.as_str()))
        .unwrap_or(Priority::None)
}

fn status_marker(status: TaskStatus) -> String {
    format!("{} ", status.as_str())
}

fn task_description(line: &str, status: TaskStatus, priority: Priority) -> String {
    let marker = status_marker(status);
    let Some(position) = line.find(&marker) else {
        return line.trim().to_string();
    };
    let rest = &line[position + marker.len()..];
    strip_priority_marker(rest, priority).trim().to_string()
}

/// Removes one occurrence of the priority marker (with its trailing space
/// when present).
pub fn strip_priority_marker(text: &str, priority: Priority) -> String {
    let Some(marker) = priority.marker() else {
        return text.to_string();
    };
    let spaced = format!("{marker} ");
    if text.contains(&spaced) {
        text.replacen(&spaced, "", 1)
    } else {
        text.replacen(marker, "", 1)
    }
}
