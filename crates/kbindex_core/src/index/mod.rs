//! Derived views built from extracted records.
//!
//! # Responsibility
//! - Group tasks, build the link graph, bucket activity by day and week.
//! - Infer pages that are referenced often but do not exist.
//!
//! # Invariants
//! - Builders are pure: they read record slices and return fresh structures.
//! - Only the missing-page inferrer depends on another builder's output.
//! - Every ranking uses an explicit tie-break so output is deterministic.

pub mod link_graph;
pub mod missing_pages;
pub mod task_index;
pub mod time_tracking;
pub mod timeline;

pub use link_graph::{
    build_link_graph, build_link_graph_with_limit, GraphNode, LinkGraph, DEFAULT_HUB_LIMIT,
};
pub use missing_pages::{
    build_missing_pages_index, classify_page_type, looks_like_name, MissingPage,
    MissingPagesIndex, PageType, DEFAULT_MISSING_PAGE_THRESHOLD,
};
pub use task_index::{
    build_task_index, build_task_index_at, ProjectSummary, TaskIndex, TaskStatistics,
    DEFAULT_RECENT_WINDOW_DAYS,
};
pub use time_tracking::{
    build_time_tracking_index, week_start, ProjectTime, TimeStatistics, TimeTrackingIndex,
    WeeklyTime, NO_PROJECT,
};
pub use timeline::{
    build_timeline_index, format_task_count, key_activity, TimelineDay, TimelineIndex,
};

/// Percentage of `part` in `whole`, `0.0` when `whole` is zero.
pub(crate) fn percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    part as f64 / whole as f64 * 100.0
}
