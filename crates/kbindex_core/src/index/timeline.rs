//! Journal-day timeline.
//!
//! # Invariants
//! - Only notes of kind journal with a dated file name create days.
//! - Tasks from undated notes are excluded.
//! - Days are ordered newest first; a day without tasks has an empty digest.

use crate::model::note::{NoteFile, NoteKind};
use crate::model::task::{add_duration, Priority, TaskRecord, TaskStatus};
use crate::parser::paths::journal_date_from_path;
use chrono::{NaiveDate, TimeDelta};
use std::collections::BTreeMap;

const HIGHLIGHT_PREFIX: &str = "🔥 ";
const HIGHLIGHT_MAX_CHARS: usize = 60;
const MAX_HIGHLIGHTS: usize = 2;

/// Activity on one journal day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimelineDay {
    pub date: NaiveDate,
    pub journal_path: String,
    pub tasks: Vec<TaskRecord>,
    pub time_logged: TimeDelta,
    /// Generated summary lines.
    pub key_activity: Vec<String>,
}

/// Timeline ordered newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimelineIndex {
    pub days: Vec<TimelineDay>,
}

impl TimelineIndex {
    /// Days on or after `since`, newest first.
    pub fn days_since(&self, since: NaiveDate) -> impl Iterator<Item = &TimelineDay> {
        self.days.iter().take_while(move |day| day.date >= since)
    }
}

/// Buckets tasks by the date of their journal note.
pub fn build_timeline_index(tasks: &[TaskRecord], files: &[NoteFile]) -> TimelineIndex {
    let mut days: BTreeMap<NaiveDate, TimelineDay> = BTreeMap::new();

    for file in files.iter().filter(|file| file.kind == NoteKind::Journal) {
        let Some(date) = journal_date_from_path(&file.path) else {
            continue;
        };
        days.entry(date).or_insert_with(|| TimelineDay {
            date,
            journal_path: file.path.clone(),
            tasks: Vec::new(),
            time_logged: TimeDelta::zero(),
            key_activity: Vec::new(),
        });
    }

    for task in tasks {
        let Some(date) = journal_date_from_path(&task.source_file) else {
            continue;
        };
        let Some(day) = days.get_mut(&date) else {
            continue;
        };
        day.time_logged = add_duration(day.time_logged, task.total_duration());
        day.tasks.push(task.clone());
    }

    let days = days
        .into_values()
        .rev()
        .map(|mut day| {
            day.key_activity = key_activity(&day.tasks);
            day
        })
        .collect();

    TimelineIndex { days }
}

/// Summary lines for one day's tasks.
///
/// One count line per present status in `TaskStatus::ACTIVITY_ORDER`, then
/// up to two high-priority highlights.
pub fn key_activity(tasks: &[TaskRecord]) -> Vec<String> {
    let mut activity = Vec::new();
    if tasks.is_empty() {
        return activity;
    }

    for status in TaskStatus::ACTIVITY_ORDER {
        let count = tasks.iter().filter(|task| task.status == status).count();
        if count > 0 {
            activity.push(format_task_count(count, status));
        }
    }

    activity.extend(
        tasks
            .iter()
            .filter(|task| task.priority == Priority::A)
            .take(MAX_HIGHLIGHTS)
            .map(|task| {
                format!(
                    "{HIGHLIGHT_PREFIX}{}",
                    truncate_chars(&task.description, HIGHLIGHT_MAX_CHARS)
                )
            }),
    );

    activity
}

/// `"1 NOW task"` / `"3 DONE tasks"`.
pub fn format_task_count(count: usize, status: TaskStatus) -> String {
    if count == 1 {
        format!("1 {} task", status.as_str())
    } else {
        format!("{count} {} tasks", status.as_str())
    }
}

/// Caps text at `max_chars` characters, ending with `...` when cut.
pub(crate) fn truncate_chars(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut truncated: String = text.chars().take(max_chars.saturating_sub(3)).collect();
    truncated.push_str("...");
    truncated
}

#[cfg(test)]
mod tests {
    use super::{format_task_count, key_activity, truncate_chars};
    use crate::model::task::{Priority, TaskRecord, TaskStatus};

    #[test]
    fn task_count_pluralizes() {
        assert_eq!(format_task_count(1, TaskStatus::Now), "1 NOW task");
        assert_eq!(format_task_count(3, TaskStatus::Done), "3 DONE tasks");
    }

    #[test]
    fn key_activity_follows_fixed_status_order() {
        let tasks = vec![
            TaskRecord::new(TaskStatus::Done, "a", "journals/2025_11_06.md", 1),
            TaskRecord::new(TaskStatus::Now, "b", "journals/2025_11_06.md", 2),
            TaskRecord::new(TaskStatus::Done, "c", "journals/2025_11_06.md", 3),
        ];
        assert_eq!(key_activity(&tasks), vec!["1 NOW task", "2 DONE tasks"]);
    }

    #[test]
    fn key_activity_highlights_at_most_two_high_priority_tasks() {
        let mut tasks = Vec::new();
        for (index, description) in ["first", "second", "third"].into_iter().enumerate() {
            let mut task =
                TaskRecord::new(TaskStatus::Todo, description, "journals/2025_11_06.md", index + 1);
            task.priority = Priority::A;
            tasks.push(task);
        }

        let activity = key_activity(&tasks);
        assert_eq!(activity, vec!["3 TODO tasks", "🔥 first", "🔥 second"]);
    }

    #[test]
    fn long_highlight_is_truncated_to_sixty_chars() {
        let long = "This is a very long task description that should be truncated to 60 characters";
        let truncated = truncate_chars(long, 60);
        assert_eq!(truncated.chars().count(), 60);
        assert!(truncated.ends_with("..."));
        assert_eq!(truncate_chars("short", 60), "short");
    }

    #[test]
    fn empty_day_has_no_activity() {
        assert!(key_activity(&[]).is_empty());
    }
}
