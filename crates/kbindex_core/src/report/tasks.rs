//! Task reports: every task by status, high-priority tasks in detail.

use super::{format_duration, rendered, ReportContext};
use crate::index::timeline::truncate_chars;
use crate::index::TaskIndex;
use crate::model::task::{Priority, TaskRecord, TaskStatus};
use std::fmt::{self, Write};

const LEAN_DESCRIPTION_MAX_CHARS: usize = 100;
const MAX_PROJECT_LINES: usize = 10;
const LAST_ACTIVITY_FORMAT: &str = "%Y-%m-%d %H:%M";

pub fn render_tasks_by_status(index: &TaskIndex, ctx: &ReportContext) -> String {
    rendered(|out| {
        writeln!(out, "# Tasks by Status\n")?;
        writeln!(out, "Generated: {}\n", ctx.generated_label())?;
        write_statistics(out, index)?;

        for status in TaskStatus::ACTIVITY_ORDER {
            let tasks = index.tasks_with_status(status);
            if tasks.is_empty() {
                continue;
            }
            writeln!(out, "## {} ({})\n", status.as_str(), tasks.len())?;
            for task in tasks {
                write_lean_task(out, task)?;
            }
            writeln!(out, "---\n")?;
        }
        Ok(())
    })
}

pub fn render_tasks_by_priority(index: &TaskIndex, ctx: &ReportContext) -> String {
    rendered(|out| {
        writeln!(out, "# High Priority Tasks [#A]\n")?;
        writeln!(out, "Generated: {}\n", ctx.generated_label())?;

        let high = index.tasks_with_priority(Priority::A);
        writeln!(out, "**Total High Priority**: {} tasks\n", high.len())?;
        if high.is_empty() {
            writeln!(out, "*No high priority tasks found.*")?;
            return Ok(());
        }
        writeln!(out, "---\n")?;

        for status in TaskStatus::ACTIVITY_ORDER {
            let tasks: Vec<&TaskRecord> = high.iter().filter(|task| task.status == status).collect();
            if tasks.is_empty() {
                continue;
            }
            writeln!(out, "## {} ({})\n", status.as_str(), tasks.len())?;
            for task in tasks {
                write_full_task(out, task)?;
            }
            writeln!(out, "---\n")?;
        }
        Ok(())
    })
}

fn write_statistics(out: &mut String, index: &TaskIndex) -> fmt::Result {
    let stats = &index.statistics;
    let done = stats
        .status_breakdown
        .get(&TaskStatus::Done)
        .copied()
        .unwrap_or(0);

    writeln!(out, "## Statistics\n")?;
    writeln!(out, "- **Total Tasks**: {}", index.total_tasks)?;
    writeln!(
        out,
        "- **Completion Rate**: {:.1}% ({done} DONE)",
        stats.completion_rate
    )?;
    writeln!(
        out,
        "- **Time Tracking**: {} tasks ({:.1}% adoption)",
        stats.with_time_tracking, stats.tracking_adoption
    )?;
    writeln!(
        out,
        "- **Total Time Logged**: {}",
        format_duration(stats.total_time_logged)
    )?;

    writeln!(out, "\n**By Priority**:")?;
    for priority in Priority::ALL {
        let count = stats
            .priority_breakdown
            .get(&priority)
            .copied()
            .unwrap_or(0);
        if count > 0 {
            writeln!(out, "- {}: {count}", priority_label(priority))?;
        }
    }

    writeln!(out, "\n**By Status**:")?;
    for status in TaskStatus::ACTIVITY_ORDER {
        let count = stats.status_breakdown.get(&status).copied().unwrap_or(0);
        if count > 0 {
            writeln!(out, "- {}: {count}", status.as_str())?;
        }
    }

    let projects = index.project_summaries();
    if !projects.is_empty() {
        writeln!(out, "\n**By Project**:")?;
        for summary in projects.iter().take(MAX_PROJECT_LINES) {
            let done = summary
                .by_status
                .get(&TaskStatus::Done)
                .copied()
                .unwrap_or(0);
            writeln!(
                out,
                "- [[{}]]: {} ({done} DONE)",
                summary.project, summary.total_tasks
            )?;
        }
    }

    writeln!(out, "\n---\n")
}

fn priority_label(priority: Priority) -> &'static str {
    match priority {
        Priority::A => "High [#A]",
        Priority::B => "Medium [#B]",
        Priority::C => "Low [#C]",
        Priority::None => "None",
    }
}

/// One line per task: description, priority, time, location.
fn write_lean_task(out: &mut String, task: &TaskRecord) -> fmt::Result {
    write!(
        out,
        "- **{}**",
        truncate_chars(&task.description, LEAN_DESCRIPTION_MAX_CHARS)
    )?;
    if let Some(marker) = task.priority.marker() {
        write!(out, " {marker}")?;
    }
    if task.has_time_log() {
        write!(out, " ⏱ {}", format_duration(task.total_duration()))?;
    }
    writeln!(out, " `{}:{}`", task.source_file, task.line_number)
}

fn write_full_task(out: &mut String, task: &TaskRecord) -> fmt::Result {
    writeln!(out, "### {}", task.description)?;
    writeln!(out, "- **File**: `{}:{}`", task.source_file, task.line_number)?;

    if !task.page_refs.is_empty() {
        let refs: Vec<String> = task
            .page_refs
            .iter()
            .map(|page| format!("[[{page}]]"))
            .collect();
        writeln!(out, "- **References**: {}", refs.join(", "))?;
    }

    if let Some(last) = task.time_log.last() {
        writeln!(
            out,
            "- **Time Logged**: {} ({} entries)",
            format_duration(task.total_duration()),
            task.time_log.len()
        )?;
        writeln!(
            out,
            "- **Last Activity**: {}",
            last.end.format(LAST_ACTIVITY_FORMAT)
        )?;
    }

    writeln!(out)
}
