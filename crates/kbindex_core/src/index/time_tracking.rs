//! Time-tracking rollups by project, week, priority and status.
//!
//! # Invariants
//! - Only tasks with a positive total logged duration feed the `by_*` maps.
//! - Every task counts toward `statistics.total_tasks`.
//! - Weeks start on Monday; keys are `YYYY-MM-DD` of that Monday.

use crate::index::percentage;
use crate::model::task::{add_duration, Priority, TaskRecord, TaskStatus};
use chrono::{Datelike, NaiveDate, NaiveDateTime, TimeDelta};
use std::collections::BTreeMap;

/// Project bucket for tasks that link to no page.
pub const NO_PROJECT: &str = "No Project";

const WEEK_KEY_FORMAT: &str = "%Y-%m-%d";

/// Time logged against one project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectTime {
    pub project: String,
    pub time_logged: TimeDelta,
    pub task_count: usize,
    pub avg_time_per_task: TimeDelta,
}

/// Time logged in one Monday-anchored week.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeeklyTime {
    pub week_start: NaiveDate,
    pub time_logged: TimeDelta,
    /// Time-log entries starting in this week.
    pub entry_count: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TimeStatistics {
    pub total_tasks: usize,
    pub tasks_with_tracking: usize,
    pub tasks_without_tracking: usize,
    /// Percentage of tasks with tracked time.
    pub adoption_rate: f64,
    pub avg_time_per_task: TimeDelta,
    /// Week with the most time; ties go to the first week seen.
    pub most_productive_week: Option<WeeklyTime>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TimeTrackingIndex {
    pub total_time_logged: TimeDelta,
    pub by_project: BTreeMap<String, TimeDelta>,
    pub by_week: BTreeMap<String, TimeDelta>,
    pub by_priority: BTreeMap<Priority, TimeDelta>,
    pub by_status: BTreeMap<TaskStatus, TimeDelta>,
    /// Projects by time desc, then name asc.
    pub top_projects: Vec<ProjectTime>,
    /// Weeks newest first.
    pub weekly_summary: Vec<WeeklyTime>,
    pub statistics: TimeStatistics,
}

/// Aggregates logged time over all tasks.
pub fn build_time_tracking_index(tasks: &[TaskRecord]) -> TimeTrackingIndex {
    let mut total_time_logged = TimeDelta::zero();
    let mut by_project: BTreeMap<String, TimeDelta> = BTreeMap::new();
    let mut by_priority: BTreeMap<Priority, TimeDelta> = BTreeMap::new();
    let mut by_status: BTreeMap<TaskStatus, TimeDelta> = BTreeMap::new();
    let mut project_task_counts: BTreeMap<String, usize> = BTreeMap::new();
    let mut weeks: BTreeMap<NaiveDate, (TimeDelta, usize)> = BTreeMap::new();
    let mut week_order: Vec<NaiveDate> = Vec::new();
    let mut tasks_with_tracking = 0;

    for task in tasks {
        let task_time = task.total_duration();
        if task_time <= TimeDelta::zero() {
            continue;
        }
        tasks_with_tracking += 1;
        total_time_logged = add_duration(total_time_logged, task_time);

        let project = task.project().unwrap_or(NO_PROJECT).to_string();
        add_time(&mut by_project, project.clone(), task_time);
        *project_task_counts.entry(project).or_insert(0) += 1;

        for entry in &task.time_log {
            let week = week_start(entry.start);
            let bucket = weeks.entry(week).or_insert_with(|| {
                week_order.push(week);
                (TimeDelta::zero(), 0)
            });
            bucket.0 = add_duration(bucket.0, entry.duration);
            bucket.1 += 1;
        }

        add_time(&mut by_priority, task.priority, task_time);
        add_time(&mut by_status, task.status, task_time);
    }

    let mut top_projects: Vec<ProjectTime> = by_project
        .iter()
        .map(|(project, time_logged)| {
            let task_count = project_task_counts.get(project).copied().unwrap_or(0);
            ProjectTime {
                project: project.clone(),
                time_logged: *time_logged,
                task_count,
                avg_time_per_task: average(*time_logged, task_count),
            }
        })
        .collect();
    top_projects.sort_by(|a, b| {
        b.time_logged
            .cmp(&a.time_logged)
            .then_with(|| a.project.cmp(&b.project))
    });

    let weekly = |week: &NaiveDate| {
        let (time_logged, entry_count) = weeks[week];
        WeeklyTime {
            week_start: *week,
            time_logged,
            entry_count,
        }
    };

    let mut most_productive_week: Option<WeeklyTime> = None;
    for week in &week_order {
        let candidate = weekly(week);
        let best = most_productive_week
            .as_ref()
            .map_or(TimeDelta::zero(), |current| current.time_logged);
        if candidate.time_logged > best {
            most_productive_week = Some(candidate);
        }
    }

    let weekly_summary: Vec<WeeklyTime> = weeks.keys().rev().map(weekly).collect();
    let by_week = weeks
        .iter()
        .map(|(week, (time_logged, _))| (week.format(WEEK_KEY_FORMAT).to_string(), *time_logged))
        .collect();

    TimeTrackingIndex {
        total_time_logged,
        by_project,
        by_week,
        by_priority,
        by_status,
        top_projects,
        weekly_summary,
        statistics: TimeStatistics {
            total_tasks: tasks.len(),
            tasks_with_tracking,
            tasks_without_tracking: tasks.len() - tasks_with_tracking,
            adoption_rate: percentage(tasks_with_tracking, tasks.len()),
            avg_time_per_task: average(total_time_logged, tasks_with_tracking),
            most_productive_week,
        },
    }
}

/// Monday at or before the timestamp's calendar date.
///
/// Sunday maps back six days; any other weekday maps back `weekday - 1`
/// days with Monday = 1.
pub fn week_start(timestamp: NaiveDateTime) -> NaiveDate {
    let weekday = i64::from(timestamp.weekday().num_days_from_sunday());
    let days_back = if weekday == 0 { 6 } else { weekday - 1 };
    timestamp.date() - TimeDelta::days(days_back)
}

fn add_time<K: Ord>(map: &mut BTreeMap<K, TimeDelta>, key: K, time: TimeDelta) {
    let slot = map.entry(key).or_insert_with(TimeDelta::zero);
    *slot = add_duration(*slot, time);
}

fn average(total: TimeDelta, count: usize) -> TimeDelta {
    match i64::try_from(count) {
        Ok(count) if count > 0 => TimeDelta::milliseconds(total.num_milliseconds() / count),
        _ => TimeDelta::zero(),
    }
}
