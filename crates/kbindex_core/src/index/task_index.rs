//! Task grouping by status, priority and project.
//!
//! # Invariants
//! - `by_status` holds all five statuses and `by_priority` all four
//!   priorities, even when empty.
//! - Tasks without linked pages never appear in `by_project`.
//! - `recent` is sorted by latest log end, newest first.

use crate::index::percentage;
use crate::model::task::{add_duration, Priority, TaskRecord, TaskStatus};
use chrono::{Local, NaiveDateTime, TimeDelta};
use std::collections::BTreeMap;

/// Window used to decide whether a task counts as recent.
pub const DEFAULT_RECENT_WINDOW_DAYS: u32 = 30;

/// Summary statistics over all tasks.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskStatistics {
    /// Percentage of tasks in `DONE`.
    pub completion_rate: f64,
    pub status_breakdown: BTreeMap<TaskStatus, usize>,
    pub priority_breakdown: BTreeMap<Priority, usize>,
    /// Tasks carrying at least one time-log entry.
    pub with_time_tracking: usize,
    /// Percentage of tasks carrying at least one time-log entry.
    pub tracking_adoption: f64,
    pub total_time_logged: TimeDelta,
}

/// Tasks grouped for reporting.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskIndex {
    /// Reference time used for the recent window.
    pub generated_at: NaiveDateTime,
    pub total_tasks: usize,
    pub by_status: BTreeMap<TaskStatus, Vec<TaskRecord>>,
    pub by_priority: BTreeMap<Priority, Vec<TaskRecord>>,
    /// Keyed by first linked page.
    pub by_project: BTreeMap<String, Vec<TaskRecord>>,
    pub recent: Vec<TaskRecord>,
    pub statistics: TaskStatistics,
}

/// Task counts for one project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectSummary {
    pub project: String,
    pub total_tasks: usize,
    pub by_status: BTreeMap<TaskStatus, usize>,
}

impl TaskIndex {
    /// Tasks for one status; empty for statuses with no tasks.
    pub fn tasks_with_status(&self, status: TaskStatus) -> &[TaskRecord] {
        self.by_status.get(&status).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Tasks for one priority; empty for priorities with no tasks.
    pub fn tasks_with_priority(&self, priority: Priority) -> &[TaskRecord] {
        self.by_priority
            .get(&priority)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Per-project counts sorted by task count desc, then name asc.
    pub fn project_summaries(&self) -> Vec<ProjectSummary> {
        let mut summaries: Vec<ProjectSummary> = self
            .by_project
            .iter()
            .map(|(project, tasks)| {
                let mut by_status = BTreeMap::new();
                for task in tasks {
                    *by_status.entry(task.status).or_insert(0) += 1;
                }
                ProjectSummary {
                    project: project.clone(),
                    total_tasks: tasks.len(),
                    by_status,
                }
            })
            .collect();

        summaries.sort_by(|a, b| {
            b.total_tasks
                .cmp(&a.total_tasks)
                .then_with(|| a.project.cmp(&b.project))
        });
        summaries
    }
}

/// Builds the task index relative to the current local time.
pub fn build_task_index(tasks: &[TaskRecord]) -> TaskIndex {
    build_task_index_at(
        tasks,
        Local::now().naive_local(),
        i64::from(DEFAULT_RECENT_WINDOW_DAYS),
    )
}

/// Builds the task index relative to `now`.
///
/// A task is recent when any time-log entry starts or ends after
/// `now - recent_window_days`.
pub fn build_task_index_at(
    tasks: &[TaskRecord],
    now: NaiveDateTime,
    recent_window_days: i64,
) -> TaskIndex {
    let mut by_status: BTreeMap<TaskStatus, Vec<TaskRecord>> = TaskStatus::ALL
        .into_iter()
        .map(|status| (status, Vec::new()))
        .collect();
    let mut by_priority: BTreeMap<Priority, Vec<TaskRecord>> = Priority::ALL
        .into_iter()
        .map(|priority| (priority, Vec::new()))
        .collect();
    let mut by_project: BTreeMap<String, Vec<TaskRecord>> = BTreeMap::new();
    let mut status_breakdown: BTreeMap<TaskStatus, usize> =
        TaskStatus::ALL.into_iter().map(|status| (status, 0)).collect();
    let mut priority_breakdown: BTreeMap<Priority, usize> =
        Priority::ALL.into_iter().map(|priority| (priority, 0)).collect();
    let mut recent = Vec::new();
    let mut with_time_tracking = 0;
    let mut total_time_logged = TimeDelta::zero();

    let since = window_start(now, recent_window_days);

    for task in tasks {
        by_status.entry(task.status).or_default().push(task.clone());
        *status_breakdown.entry(task.status).or_insert(0) += 1;

        by_priority
            .entry(task.priority)
            .or_default()
            .push(task.clone());
        *priority_breakdown.entry(task.priority).or_insert(0) += 1;

        if let Some(project) = task.project() {
            by_project
                .entry(project.to_string())
                .or_default()
                .push(task.clone());
        }

        if has_activity_since(task, since) {
            recent.push(task.clone());
        }

        if task.has_time_log() {
            with_time_tracking += 1;
            total_time_logged = add_duration(total_time_logged, task.total_duration());
        }
    }

    recent.sort_by(|a, b| b.latest_log_end().cmp(&a.latest_log_end()));

    let done = status_breakdown
        .get(&TaskStatus::Done)
        .copied()
        .unwrap_or(0);

    TaskIndex {
        generated_at: now,
        total_tasks: tasks.len(),
        by_status,
        by_priority,
        by_project,
        recent,
        statistics: TaskStatistics {
            completion_rate: percentage(done, tasks.len()),
            status_breakdown,
            priority_breakdown,
            with_time_tracking,
            tracking_adoption: percentage(with_time_tracking, tasks.len()),
            total_time_logged,
        },
    }
}

/// Start of the recent window; windows reaching past the calendar range
/// start at `NaiveDateTime::MIN`.
fn window_start(now: NaiveDateTime, days: i64) -> NaiveDateTime {
    TimeDelta::try_days(days)
        .and_then(|window| now.checked_sub_signed(window))
        .unwrap_or(NaiveDateTime::MIN)
}

fn has_activity_since(task: &TaskRecord, since: NaiveDateTime) -> bool {
    task.time_log
        .iter()
        .any(|entry| entry.start > since || entry.end > since)
}
