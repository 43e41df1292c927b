//! Page-reference occurrence record.

use serde::Serialize;

/// One `[[Target]]` occurrence inside a note.
///
/// Duplicates on the same line produce duplicate records; deduplication is
/// the link graph's concern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkRecord {
    /// Relative path of the note containing the link.
    pub source_file: String,
    /// Page name derived from the source file name.
    pub source_page: String,
    /// Text between the link brackets.
    pub target_page: String,
    /// 1-indexed line number.
    pub line_number: usize,
    /// Trimmed line text, truncated with `...` when long.
    pub context: String,
}
