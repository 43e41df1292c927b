//! Dashboard: one-page overview linking to the detailed reports.

use super::{
    format_duration, plural, rendered, ReportContext, MISSING_PAGES_FILE, REFERENCE_GRAPH_FILE,
    TASKS_BY_PRIORITY_FILE, TASKS_BY_STATUS_FILE, TIMELINE_FULL_FILE, TIMELINE_RECENT_FILE,
    TIME_TRACKING_FILE,
};
use crate::index::timeline::truncate_chars;
use crate::index::{TaskIndex, TimeTrackingIndex, NO_PROJECT};
use crate::model::task::{Priority, TaskRecord, TaskStatus};
use crate::pipeline::{IndexSet, RunStats};
use chrono::TimeDelta;
use std::fmt::{self, Write};

const MAX_PRIORITIES: usize = 5;
const MAX_RECENT_DAYS: usize = 3;
const MAX_PROJECTS: usize = 5;
const MAX_MISSING_PAGES: usize = 5;
const PRIORITY_DESCRIPTION_MAX_CHARS: usize = 80;
const DAY_FORMAT: &str = "%A, %b %-d";

pub fn render_dashboard(indexes: &IndexSet, stats: &RunStats, ctx: &ReportContext) -> String {
    rendered(|out| {
        writeln!(out, "# Knowledge Dashboard\n")?;
        writeln!(out, "**Generated**: {}\n", ctx.generated_label())?;

        write_quick_stats(out, indexes, stats)?;
        write_current_priorities(out, &indexes.tasks)?;

        if !indexes.timeline.days.is_empty() {
            writeln!(out, "## 📅 Recent Activity\n")?;
            for day in indexes.timeline.days.iter().take(MAX_RECENT_DAYS) {
                writeln!(out, "### {}", day.date.format(DAY_FORMAT))?;
                if day.time_logged > TimeDelta::zero() {
                    writeln!(out, "- ⏱ {} logged", format_duration(day.time_logged))?;
                }
                for line in &day.key_activity {
                    writeln!(out, "- {line}")?;
                }
                writeln!(out)?;
            }
        }

        write_top_projects(out, &indexes.tasks, &indexes.time_tracking)?;

        let missing = &indexes.missing_pages;
        if !missing.pages.is_empty() {
            writeln!(out, "## 📝 Pages to Create\n")?;
            writeln!(
                out,
                "*Pages with {}+ references that don't exist yet*\n",
                missing.threshold
            )?;
            for page in missing.pages.iter().take(MAX_MISSING_PAGES) {
                writeln!(
                    out,
                    "- **{}** ({} refs, {})",
                    page.name,
                    page.reference_count,
                    page.page_type.as_str()
                )?;
            }
            if missing.pages.len() > MAX_MISSING_PAGES {
                writeln!(
                    out,
                    "\n*+{} more suggested pages*",
                    missing.pages.len() - MAX_MISSING_PAGES
                )?;
            }
            writeln!(out)?;
        }

        writeln!(out, "## 🔗 Detailed Reports\n")?;
        for (title, file, summary) in [
            ("Tasks by Status", TASKS_BY_STATUS_FILE, "All tasks organized by workflow stage"),
            ("Tasks by Priority", TASKS_BY_PRIORITY_FILE, "High priority tasks requiring attention"),
            ("Timeline (Recent)", TIMELINE_RECENT_FILE, "Recent journal activity"),
            ("Timeline (Full)", TIMELINE_FULL_FILE, "Complete activity history"),
            ("Missing Pages", MISSING_PAGES_FILE, "Suggested pages to create"),
            ("Time Tracking", TIME_TRACKING_FILE, "Time allocation analytics"),
            ("Reference Graph", REFERENCE_GRAPH_FILE, "Page connections and relationships"),
        ] {
            writeln!(out, "- [{title}](./{file}) - {summary}")?;
        }
        writeln!(out)
    })
}

fn write_quick_stats(out: &mut String, indexes: &IndexSet, stats: &RunStats) -> fmt::Result {
    let tasks = &indexes.tasks;
    let done = tasks
        .statistics
        .status_breakdown
        .get(&TaskStatus::Done)
        .copied()
        .unwrap_or(0);
    let tracking = &indexes.time_tracking;

    writeln!(out, "## 📊 Quick Stats\n")?;
    writeln!(out, "- **Notes Scanned**: {}", stats.files_scanned)?;
    if stats.read_errors > 0 {
        writeln!(out, "- **Unreadable Notes**: {}", stats.read_errors)?;
    }
    writeln!(out, "- **Total Tasks**: {}", tasks.total_tasks)?;
    writeln!(
        out,
        "- **Completion Rate**: {:.1}% ({done} DONE)",
        tasks.statistics.completion_rate
    )?;
    if tracking.statistics.tasks_with_tracking > 0 {
        writeln!(
            out,
            "- **Time Tracking**: {:.1}% adoption, {} logged",
            tracking.statistics.adoption_rate,
            format_duration(tracking.total_time_logged)
        )?;
    }
    writeln!(
        out,
        "- **Knowledge Graph**: {} pages, {} references\n",
        indexes.graph.nodes.len(),
        indexes.graph.total_references()
    )
}

/// High-priority tasks still waiting on work (NOW or TODO).
fn write_current_priorities(out: &mut String, tasks: &TaskIndex) -> fmt::Result {
    let current: Vec<&TaskRecord> = tasks
        .tasks_with_priority(Priority::A)
        .iter()
        .filter(|task| matches!(task.status, TaskStatus::Now | TaskStatus::Todo))
        .collect();
    if current.is_empty() {
        return Ok(());
    }

    writeln!(out, "## 🎯 Current Priorities [#A]\n")?;
    for task in current.iter().take(MAX_PRIORITIES) {
        writeln!(
            out,
            "- **[{}]** {} `{}:{}`",
            task.status.as_str(),
            truncate_chars(&task.description, PRIORITY_DESCRIPTION_MAX_CHARS),
            task.source_file,
            task.line_number
        )?;
    }
    if current.len() > MAX_PRIORITIES {
        writeln!(
            out,
            "\n*+{} more high priority tasks*",
            current.len() - MAX_PRIORITIES
        )?;
    }
    writeln!(out)
}

fn write_top_projects(
    out: &mut String,
    tasks: &TaskIndex,
    tracking: &TimeTrackingIndex,
) -> fmt::Result {
    let projects: Vec<_> = tracking
        .top_projects
        .iter()
        .filter(|project| project.project != NO_PROJECT)
        .take(MAX_PROJECTS)
        .collect();
    if projects.is_empty() {
        return Ok(());
    }

    writeln!(out, "## 📁 Top Projects\n")?;
    for project in projects {
        write!(
            out,
            "- **{}**: {}",
            project.project,
            format_duration(project.time_logged)
        )?;
        let active = tasks
            .by_project
            .get(&project.project)
            .map_or(0, |project_tasks| {
                project_tasks
                    .iter()
                    .filter(|task| task.status != TaskStatus::Done)
                    .count()
            });
        if active > 0 {
            write!(out, " ({active} active task{})", plural(active))?;
        }
        writeln!(out)?;
    }
    writeln!(out)
}
