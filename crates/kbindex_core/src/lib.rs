//! Knowledge-base indexer core.
//!
//! Scans a markdown note repository (`journals/` and `pages/`), extracts
//! tasks, time logs and page links, builds derived indexes and renders them
//! as markdown reports.

pub mod config;
pub mod index;
pub mod logging;
pub mod model;
pub mod parser;
pub mod pipeline;
pub mod report;
pub mod scan;

pub use config::{load_config, resolve_config, ConfigError, IndexerConfig};
pub use logging::{
    default_log_level, init_logging, logging_status, LogTarget, LoggingConfig, LoggingError,
};
pub use model::link::LinkRecord;
pub use model::note::{NoteFile, NoteKind};
pub use model::task::{Priority, TaskRecord, TaskStatus, TimeLogEntry};
pub use pipeline::{build_indexes, extract_notes, Extraction, IndexSet, RunStats};
pub use report::{format_duration, render_reports, write_reports, ReportContext, ReportError};
pub use scan::{scan_repository, ScanError};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
