//! Timeline reports: recent days in detail, full history condensed.

use super::{format_duration, rendered, ReportContext};
use crate::index::timeline::truncate_chars;
use crate::index::{TimelineDay, TimelineIndex};
use crate::model::task::TaskRecord;
use chrono::{NaiveDate, TimeDelta};
use std::fmt::{self, Write};

const TIMELINE_DESCRIPTION_MAX_CHARS: usize = 80;
const DETAIL_DATE_FORMAT: &str = "%A, %B %-d, %Y";
const CONDENSED_DATE_FORMAT: &str = "%Y-%m-%d (%a)";

pub fn render_timeline_recent(index: &TimelineIndex, ctx: &ReportContext) -> String {
    rendered(|out| {
        writeln!(out, "# Recent Activity Timeline\n")?;
        writeln!(out, "Generated: {}\n", ctx.generated_label())?;

        let since = TimeDelta::try_days(i64::from(ctx.timeline_recent_days))
            .and_then(|window| ctx.generated_at.date().checked_sub_signed(window))
            .unwrap_or(NaiveDate::MIN);
        let days: Vec<&TimelineDay> = index.days_since(since).collect();
        if days.is_empty() {
            writeln!(
                out,
                "*No activity in the last {} days.*",
                ctx.timeline_recent_days
            )?;
            return Ok(());
        }

        writeln!(
            out,
            "**Last {} Days**: {} days with activity\n",
            ctx.timeline_recent_days,
            days.len()
        )?;
        writeln!(out, "---\n")?;
        for day in days {
            write_day_detail(out, day)?;
        }
        Ok(())
    })
}

pub fn render_timeline_full(index: &TimelineIndex, ctx: &ReportContext) -> String {
    rendered(|out| {
        writeln!(out, "# Complete Activity Timeline\n")?;
        writeln!(out, "Generated: {}\n", ctx.generated_label())?;

        if index.days.is_empty() {
            writeln!(out, "*No activity recorded.*")?;
            return Ok(());
        }

        writeln!(
            out,
            "**Total Days**: {} days with activity\n",
            index.days.len()
        )?;
        writeln!(out, "---\n")?;
        for day in &index.days {
            write_day_condensed(out, day)?;
        }
        Ok(())
    })
}

fn write_day_detail(out: &mut String, day: &TimelineDay) -> fmt::Result {
    writeln!(out, "## {}\n", day.date.format(DETAIL_DATE_FORMAT))?;
    writeln!(out, "**Journal**: `{}`\n", day.journal_path)?;

    if !day.key_activity.is_empty() {
        writeln!(out, "**Activity**:")?;
        for line in &day.key_activity {
            writeln!(out, "- {line}")?;
        }
        writeln!(out)?;
    }

    if day.time_logged > TimeDelta::zero() {
        writeln!(
            out,
            "**Time Logged**: {}\n",
            format_duration(day.time_logged)
        )?;
    }

    if !day.tasks.is_empty() {
        writeln!(out, "**Tasks** ({}):", day.tasks.len())?;
        for task in &day.tasks {
            write_timeline_task(out, task)?;
        }
    }

    writeln!(out, "---\n")
}

fn write_day_condensed(out: &mut String, day: &TimelineDay) -> fmt::Result {
    writeln!(out, "## {}\n", day.date.format(CONDENSED_DATE_FORMAT))?;

    if day.key_activity.is_empty() {
        writeln!(out, "- *No tasks*")?;
    }
    for line in &day.key_activity {
        writeln!(out, "- {line}")?;
    }

    if day.time_logged > TimeDelta::zero() {
        writeln!(out, "- ⏱ {} logged", format_duration(day.time_logged))?;
    }

    writeln!(out)
}

/// `- **[STATUS]** description [#A] ⏱ 2h`
fn write_timeline_task(out: &mut String, task: &TaskRecord) -> fmt::Result {
    write!(
        out,
        "- **[{}]** {}",
        task.status.as_str(),
        truncate_chars(&task.description, TIMELINE_DESCRIPTION_MAX_CHARS)
    )?;
    if let Some(marker) = task.priority.marker() {
        write!(out, " {marker}")?;
    }
    if task.has_time_log() {
        write!(out, " ⏱ {}", format_duration(task.total_duration()))?;
    }
    writeln!(out)
}
