//! Time-tracking report.

use super::{format_duration, rendered, ReportContext};
use crate::index::TimeTrackingIndex;
use crate::model::task::{Priority, TaskStatus};
use chrono::TimeDelta;
use std::fmt::Write;

const MAX_PROJECTS: usize = 10;
const MAX_WEEKS: usize = 8;
const WEEK_FORMAT: &str = "%Y-%m-%d";

const STATUS_ORDER: [TaskStatus; 5] = [
    TaskStatus::Done,
    TaskStatus::Now,
    TaskStatus::Doing,
    TaskStatus::Todo,
    TaskStatus::Later,
];

pub fn render_time_tracking(index: &TimeTrackingIndex, ctx: &ReportContext) -> String {
    rendered(|out| {
        let stats = &index.statistics;
        writeln!(out, "# Time Tracking Analytics\n")?;
        writeln!(out, "Generated: {}\n", ctx.generated_label())?;

        writeln!(out, "## Summary\n")?;
        writeln!(
            out,
            "- **Total Time Logged**: {}",
            format_duration(index.total_time_logged)
        )?;
        writeln!(
            out,
            "- **Tasks Tracked**: {} / {} ({:.1}% adoption)",
            stats.tasks_with_tracking, stats.total_tasks, stats.adoption_rate
        )?;
        if stats.avg_time_per_task > TimeDelta::zero() {
            writeln!(
                out,
                "- **Avg Time/Task**: {}",
                format_duration(stats.avg_time_per_task)
            )?;
        }
        if let Some(week) = &stats.most_productive_week {
            writeln!(
                out,
                "- **Most Productive Week**: {} ({})",
                week.week_start.format(WEEK_FORMAT),
                format_duration(week.time_logged)
            )?;
        }
        writeln!(out, "\n---\n")?;

        if !index.top_projects.is_empty() {
            writeln!(out, "## Top Projects\n")?;
            for project in index.top_projects.iter().take(MAX_PROJECTS) {
                writeln!(out, "### {}", project.project)?;
                writeln!(
                    out,
                    "- **Time**: {} ({} tasks, avg {}/task)",
                    format_duration(project.time_logged),
                    project.task_count,
                    format_duration(project.avg_time_per_task)
                )?;
            }
            writeln!(out, "\n---\n")?;
        }

        if !index.weekly_summary.is_empty() {
            writeln!(out, "## Weekly Breakdown\n")?;
            for week in index.weekly_summary.iter().take(MAX_WEEKS) {
                writeln!(
                    out,
                    "- **Week of {}**: {} ({} entries)",
                    week.week_start.format(WEEK_FORMAT),
                    format_duration(week.time_logged),
                    week.entry_count
                )?;
            }
            if index.weekly_summary.len() > MAX_WEEKS {
                writeln!(
                    out,
                    "\n*Showing last {MAX_WEEKS} weeks of {} total*",
                    index.weekly_summary.len()
                )?;
            }
            writeln!(out, "\n---\n")?;
        }

        if !index.by_priority.is_empty() {
            writeln!(out, "## By Priority\n")?;
            for priority in Priority::ALL {
                let Some(duration) = index.by_priority.get(&priority) else {
                    continue;
                };
                if *duration > TimeDelta::zero() {
                    let label = priority.marker().unwrap_or("None");
                    writeln!(out, "- **{label}**: {}", format_duration(*duration))?;
                }
            }
            writeln!(out, "\n---\n")?;
        }

        if !index.by_status.is_empty() {
            writeln!(out, "## By Status\n")?;
            for status in STATUS_ORDER {
                let Some(duration) = index.by_status.get(&status) else {
                    continue;
                };
                if *duration > TimeDelta::zero() {
                    writeln!(out, "- **{}**: {}", status.as_str(), format_duration(*duration))?;
                }
            }
            writeln!(out)?;
        }
        Ok(())
    })
}
