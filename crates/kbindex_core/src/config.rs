//! Indexer configuration.
//!
//! # Responsibility
//! - Describe every tunable of a run with its default.
//! - Load overrides from a TOML file (`kbindex.toml` next to the notes by
//!   default).
//!
//! # Invariants
//! - A missing default config file is not an error; a missing explicit one is.
//! - Numeric limits are strictly positive after validation.
//! - Day windows never exceed `MAX_WINDOW_DAYS`.

use crate::index::{DEFAULT_HUB_LIMIT, DEFAULT_MISSING_PAGE_THRESHOLD, DEFAULT_RECENT_WINDOW_DAYS};
use crate::parser::DEFAULT_CONTEXT_MAX_CHARS;
use log::debug;
use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "kbindex.toml";
pub const DEFAULT_OUTPUT_DIR: &str = ".claude/indexes";
pub const DEFAULT_TIMELINE_RECENT_DAYS: u32 = 7;
/// Upper bound for `recent_window_days` and `timeline_recent_days` (about a century).
pub const MAX_WINDOW_DAYS: u32 = 36_500;

/// Run configuration. Unknown keys are rejected so typos surface early.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IndexerConfig {
    /// Report directory, relative to the repository root unless absolute.
    pub output_dir: PathBuf,
    pub missing_page_threshold: usize,
    pub hub_limit: usize,
    pub recent_window_days: u32,
    pub context_max_chars: usize,
    pub timeline_recent_days: u32,
}

impl Default for IndexerConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            missing_page_threshold: DEFAULT_MISSING_PAGE_THRESHOLD,
            hub_limit: DEFAULT_HUB_LIMIT,
            recent_window_days: DEFAULT_RECENT_WINDOW_DAYS,
            context_max_chars: DEFAULT_CONTEXT_MAX_CHARS,
            timeline_recent_days: DEFAULT_TIMELINE_RECENT_DAYS,
        }
    }
}

impl IndexerConfig {
    /// Resolves `output_dir` against the repository root.
    pub fn output_path(&self, repo_root: &Path) -> PathBuf {
        if self.output_dir.is_absolute() {
            self.output_dir.clone()
        } else {
            repo_root.join(&self.output_dir)
        }
    }

    /// # Errors
    /// Returns [`ConfigError::Invalid`] naming the first zero-valued limit or
    /// the first day window above [`MAX_WINDOW_DAYS`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        let limits = [
            ("missing_page_threshold", self.missing_page_threshold as u64),
            ("hub_limit", self.hub_limit as u64),
            ("recent_window_days", u64::from(self.recent_window_days)),
            ("context_max_chars", self.context_max_chars as u64),
            ("timeline_recent_days", u64::from(self.timeline_recent_days)),
        ];
        if let Some((key, _)) = limits.iter().find(|(_, value)| *value == 0) {
            return Err(ConfigError::Invalid(format!("`{key}` must be greater than 0")));
        }
        let windows = [
            ("recent_window_days", self.recent_window_days),
            ("timeline_recent_days", self.timeline_recent_days),
        ];
        if let Some((key, _)) = windows.iter().find(|(_, days)| *days > MAX_WINDOW_DAYS) {
            return Err(ConfigError::Invalid(format!(
                "`{key}` must be at most {MAX_WINDOW_DAYS}"
            )));
        }
        if self.output_dir.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("`output_dir` must not be empty".to_string()));
        }
        Ok(())
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io { path: PathBuf, source: std::io::Error },
    Parse { path: PathBuf, source: toml::de::Error },
    Invalid(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "cannot read config `{}`: {source}", path.display())
            }
            Self::Parse { path, source } => {
                write!(f, "invalid config `{}`: {source}", path.display())
            }
            Self::Invalid(message) => write!(f, "invalid config: {message}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
            Self::Invalid(_) => None,
        }
    }
}

/// Parses a config document; absent keys take their defaults.
pub fn parse_config(text: &str, path: &Path) -> Result<IndexerConfig, ConfigError> {
    let config: IndexerConfig = toml::from_str(text).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    config.validate()?;
    Ok(config)
}

/// Reads and validates the config file at `path`.
pub fn load_config(path: &Path) -> Result<IndexerConfig, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_config(&text, path)
}

/// Uses `explicit` when given, else `<repo_root>/kbindex.toml` if present,
/// else defaults.
pub fn resolve_config(
    repo_root: &Path,
    explicit: Option<&Path>,
) -> Result<IndexerConfig, ConfigError> {
    if let Some(path) = explicit {
        return load_config(path);
    }

    let candidate = repo_root.join(CONFIG_FILE_NAME);
    if candidate.is_file() {
        debug!(
            "event=config_load module=config status=found path={}",
            candidate.display()
        );
        return load_config(&candidate);
    }

    debug!("event=config_load module=config status=defaults");
    Ok(IndexerConfig::default())
}
