//! Task and time-log records.
//!
//! # Invariants
//! - `TaskStatus` has exactly five variants; lines without a marker never
//!   become a `TaskRecord`.
//! - A `TimeLogEntry` is owned by exactly one task.

use chrono::{NaiveDateTime, TimeDelta};
use serde::{Serialize, Serializer};

/// Workflow marker of a task line.
///
/// Variant order matches marker detection order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TaskStatus {
    Now,
    Later,
    Todo,
    Doing,
    Done,
}

impl TaskStatus {
    /// Detection order: the first marker found on a line wins.
    pub const ALL: [TaskStatus; 5] = [
        TaskStatus::Now,
        TaskStatus::Later,
        TaskStatus::Todo,
        TaskStatus::Doing,
        TaskStatus::Done,
    ];

    /// Order used when summarising activity (active work first).
    pub const ACTIVITY_ORDER: [TaskStatus; 5] = [
        TaskStatus::Now,
        TaskStatus::Doing,
        TaskStatus::Todo,
        TaskStatus::Later,
        TaskStatus::Done,
    ];

    /// Marker text as written in notes.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Now => "NOW",
            Self::Later => "LATER",
            Self::Todo => "TODO",
            Self::Doing => "DOING",
            Self::Done => "DONE",
        }
    }
}

/// Priority from a `[#A]`/`[#B]`/`[#C]` marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Priority {
    #[serde(rename = "A")]
    A,
    #[serde(rename = "B")]
    B,
    #[serde(rename = "C")]
    C,
    #[serde(rename = "none")]
    None,
}

impl Priority {
    pub const ALL: [Priority; 4] = [Priority::A, Priority::B, Priority::C, Priority::None];

    /// Maps the letter inside `[#X]`; anything else is not a priority.
    pub fn from_marker_letter(letter: &str) -> Option<Self> {
        match letter {
            "A" => Some(Self::A),
            "B" => Some(Self::B),
            "C" => Some(Self::C),
            _ => None,
        }
    }

    /// Marker letter, empty for `None`.
    pub fn letter(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::None => "",
        }
    }

    /// Full marker text (`[#A]`), `None` for no priority.
    pub fn marker(self) -> Option<&'static str> {
        match self {
            Self::A => Some("[#A]"),
            Self::B => Some("[#B]"),
            Self::C => Some("[#C]"),
            Self::None => None,
        }
    }
}

/// One clock range from a task's log block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimeLogEntry {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    /// Encoded duration when parseable, otherwise `end - start`.
    #[serde(rename = "duration_secs", serialize_with = "serialize_seconds")]
    pub duration: TimeDelta,
}

/// One actionable bullet line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskRecord {
    pub status: TaskStatus,
    pub priority: Priority,
    /// Text after the status marker with the priority marker removed.
    pub description: String,
    /// Linked page names in appearance order, duplicates kept.
    pub page_refs: Vec<String>,
    /// Relative path of the source note.
    pub source_file: String,
    /// 1-indexed line number of the task line.
    pub line_number: usize,
    pub time_log: Vec<TimeLogEntry>,
}

impl TaskRecord {
    /// Creates a task with no priority, links or time log.
    pub fn new(
        status: TaskStatus,
        description: impl Into<String>,
        source_file: impl Into<String>,
        line_number: usize,
    ) -> Self {
        Self {
            status,
            priority: Priority::None,
            description: description.into(),
            page_refs: Vec::new(),
            source_file: source_file.into(),
            line_number,
            time_log: Vec::new(),
        }
    }

    /// Sum of all time-log durations, clamped to the `TimeDelta` range.
    pub fn total_duration(&self) -> TimeDelta {
        self.time_log
            .iter()
            .fold(TimeDelta::zero(), |total, entry| add_duration(total, entry.duration))
    }

    pub fn has_time_log(&self) -> bool {
        !self.time_log.is_empty()
    }

    /// Project used for aggregation: the first linked page.
    pub fn project(&self) -> Option<&str> {
        self.page_refs.first().map(String::as_str)
    }

    /// Latest end timestamp across the time log.
    pub fn latest_log_end(&self) -> Option<NaiveDateTime> {
        self.time_log.iter().map(|entry| entry.end).max()
    }
}

/// Adds two durations, saturating at `TimeDelta::MAX` / `TimeDelta::MIN`.
///
/// Clock lines may encode hour counts close to the `TimeDelta` range.
pub fn add_duration(total: TimeDelta, delta: TimeDelta) -> TimeDelta {
    total.checked_add(&delta).unwrap_or(if delta < TimeDelta::zero() {
        TimeDelta::MIN
    } else {
        TimeDelta::MAX
    })
}

fn serialize_seconds<S: Serializer>(value: &TimeDelta, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_i64(value.num_seconds())
}
