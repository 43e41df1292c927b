//! Log-block (`:LOGBOOK:` ... `:END:`) sub-parser.
//!
//! # Invariants
//! - Clock lines that do not match are ignored, never reported as errors.
//! - An entry with unparseable timestamps is dropped; its siblings are kept.
//! - An unparseable duration falls back to `end - start`.

use crate::model::task::TimeLogEntry;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Weekday};
use once_cell::sync::Lazy;
use regex::Regex;

/// Marker that opens a log block.
pub const LOG_BLOCK_OPEN: &str = ":LOGBOOK:";
/// Marker that closes a log block.
pub const LOG_BLOCK_CLOSE: &str = ":END:";

static CLOCK_LINE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"CLOCK:\s*\[([^\]]+)\]--\[([^\]]+)\]\s*=>\s*(.+)").expect("valid clock regex")
});

/// Parses a log block starting at `start`.
///
/// Returns the entries and the number of lines consumed, counting both the
/// open and close markers. Returns `(vec![], 0)` when `lines[start]` is not
/// a block opener. An unclosed block consumes the rest of the note.
pub fn parse_time_log(lines: &[&str], start: usize) -> (Vec<TimeLogEntry>, usize) {
    let mut entries = Vec::new();
    match lines.get(start) {
        Some(line) if line.contains(LOG_BLOCK_OPEN) => {}
        _ => return (entries, 0),
    }

    let mut consumed = 1;
    for line in &lines[start + 1..] {
        let line = line.trim();
        consumed += 1;
        if line.contains(LOG_BLOCK_CLOSE) {
            break;
        }
        if let Some(entry) = parse_clock_line(line) {
            entries.push(entry);
        }
    }

    (entries, consumed)
}

/// Parses `CLOCK: [<start>]--[<end>] => <duration>`.
pub fn parse_clock_line(line: &str) -> Option<TimeLogEntry> {
    let caps = CLOCK_LINE_RE.captures(line)?;
    let start = parse_clock_timestamp(caps.get(1)?.as_str())?;
    let end = parse_clock_timestamp(caps.get(2)?.as_str())?;
    let duration = caps
        .get(3)
        .and_then(|m| parse_clock_duration(m.as_str()))
        .unwrap_or_else(|| end.signed_duration_since(start));

    Some(TimeLogEntry {
        start,
        end,
        duration,
    })
}

/// Parses `YYYY-MM-DD Dow HH:MM:SS`.
///
/// The weekday token must be a weekday name but is not cross-checked
/// against the date.
pub fn parse_clock_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let mut parts = raw.split_whitespace();
    let date = NaiveDate::parse_from_str(parts.next()?, "%Y-%m-%d").ok()?;
    parts.next()?.parse::<Weekday>().ok()?;
    let time = NaiveTime::parse_from_str(parts.next()?, "%H:%M:%S").ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some(date.and_time(time))
}

/// Parses `HH:MM:SS` where hours may exceed 24 (`260:46:44`).
pub fn parse_clock_duration(raw: &str) -> Option<TimeDelta> {
    let mut fields = [0_i64; 3];
    let mut count = 0;
    for part in raw.trim().split(':') {
        if count == fields.len() || part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        fields[count] = part.parse().ok()?;
        count += 1;
    }
    if count != fields.len() {
        return None;
    }

    let [hours, minutes, seconds] = fields;
    let total = hours
        .checked_mul(3600)?
        .checked_add(minutes.checked_mul(60)?)?
        .checked_add(seconds)?;
    TimeDelta::try_seconds(total)
}
