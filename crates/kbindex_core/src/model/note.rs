//! Scanned note descriptor.

use serde::Serialize;
use std::path::PathBuf;
use std::time::SystemTime;

/// Which conventional top-level directory a note lives under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoteKind {
    /// Dated entry under `journals/`.
    Journal,
    /// Topical page under `pages/`.
    Page,
}

impl NoteKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Journal => "journal",
            Self::Page => "page",
        }
    }
}

/// One markdown file discovered in the repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NoteFile {
    /// Path relative to the repository root, `/`-separated (e.g. `pages/Project.md`).
    pub path: String,
    /// Absolute filesystem path used to read the note.
    pub absolute_path: PathBuf,
    pub kind: NoteKind,
    /// Last-modified time reported by the filesystem.
    pub modified: SystemTime,
}

impl NoteFile {
    /// Creates a descriptor whose absolute path equals the relative one.
    ///
    /// Used by callers that build file lists without touching disk.
    pub fn new(path: impl Into<String>, kind: NoteKind) -> Self {
        let path = path.into();
        Self {
            absolute_path: PathBuf::from(&path),
            path,
            kind,
            modified: SystemTime::UNIX_EPOCH,
        }
    }
}
