//! Repository scanner.
//!
//! # Responsibility
//! - Discover markdown notes under `journals/` and `pages/`.
//! - Attach the metadata later stages need (kind, relative path, mtime).
//!
//! # Invariants
//! - Output order is deterministic: journals first, then pages, each sorted
//!   by path.
//! - Hidden entries, `.recycle` and `bak` directories are never visited.
//! - A missing `journals/` or `pages/` directory yields no files, not an error.

use crate::model::note::{NoteFile, NoteKind};
use log::{debug, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use walkdir::{DirEntry, WalkDir};

pub const JOURNALS_DIR: &str = "journals";
pub const PAGES_DIR: &str = "pages";

const SKIPPED_DIR_NAMES: [&str; 2] = [".recycle", "bak"];
const NOTE_EXTENSION: &str = "md";

#[derive(Debug)]
pub enum ScanError {
    RootNotFound(PathBuf),
    RootNotDirectory(PathBuf),
}

impl Display for ScanError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RootNotFound(path) => {
                write!(f, "repository root `{}` does not exist", path.display())
            }
            Self::RootNotDirectory(path) => {
                write!(f, "repository root `{}` is not a directory", path.display())
            }
        }
    }
}

impl Error for ScanError {}

/// Lists every note in the repository at `root`.
///
/// # Errors
/// Fails only when `root` itself is missing or not a directory. Unreadable
/// entries below it are logged and skipped.
pub fn scan_repository(root: &Path) -> Result<Vec<NoteFile>, ScanError> {
    if !root.exists() {
        return Err(ScanError::RootNotFound(root.to_path_buf()));
    }
    if !root.is_dir() {
        return Err(ScanError::RootNotDirectory(root.to_path_buf()));
    }

    let mut files = scan_directory(root, JOURNALS_DIR, NoteKind::Journal);
    files.extend(scan_directory(root, PAGES_DIR, NoteKind::Page));

    info!(
        "event=scan_repository module=scan status=ok root={} files={}",
        root.display(),
        files.len()
    );
    Ok(files)
}

fn scan_directory(root: &Path, dir_name: &str, kind: NoteKind) -> Vec<NoteFile> {
    let dir = root.join(dir_name);
    if !dir.is_dir() {
        debug!(
            "event=scan_directory module=scan status=skipped dir={}",
            dir.display()
        );
        return Vec::new();
    }

    let mut files = Vec::new();
    let walker = WalkDir::new(&dir)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !is_skipped_entry(entry));

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                warn!("event=scan_entry module=scan status=error error={err}");
                continue;
            }
        };
        if !entry.file_type().is_file() || !is_note_file(entry.path()) {
            continue;
        }
        let Some(path) = relative_note_path(root, entry.path()) else {
            continue;
        };
        let modified = entry
            .metadata()
            .ok()
            .and_then(|metadata| metadata.modified().ok())
            .unwrap_or(SystemTime::UNIX_EPOCH);

        files.push(NoteFile {
            path,
            absolute_path: entry.path().to_path_buf(),
            kind,
            modified,
        });
    }
    files
}

fn is_skipped_entry(entry: &DirEntry) -> bool {
    let name = entry.file_name().to_string_lossy();
    if name.starts_with('.') {
        return true;
    }
    entry.file_type().is_dir() && SKIPPED_DIR_NAMES.contains(&name.as_ref())
}

fn is_note_file(path: &Path) -> bool {
    path.extension()
        .is_some_and(|extension| extension == NOTE_EXTENSION)
}

/// Root-relative path joined with `/` regardless of platform.
fn relative_note_path(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let parts: Vec<String> = relative
        .components()
        .map(|component| component.as_os_str().to_string_lossy().into_owned())
        .collect();
    Some(parts.join("/"))
}
