//! Page identity and journal-date helpers shared by every builder.
//!
//! # Invariants
//! - Graph nodes, link sources and timeline days all derive page identity
//!   through `page_name_from_path`, so they agree bit-for-bit.
//! - Journal names must be exactly `YYYY_MM_DD` or `YYYY-MM-DD`.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

const NOTE_EXTENSION: &str = ".md";

static UNDERSCORE_DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}_\d{2}_\d{2}$").expect("valid underscore date regex"));
static DASH_DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid dash date regex"));

/// Converts a note path into its page name.
///
/// `journals/2025_04_06.md` -> `2025_04_06`, `pages/Hearth Insights.md` ->
/// `Hearth Insights`. Both `/` and `\` separate directories.
pub fn page_name_from_path(path: &str) -> &str {
    let base = path.rsplit(['/', '\\']).next().unwrap_or(path);
    base.strip_suffix(NOTE_EXTENSION).unwrap_or(base)
}

/// Parses the calendar date encoded in a journal file name.
///
/// Returns `None` for any name that is not a valid `YYYY_MM_DD` or
/// `YYYY-MM-DD` date.
pub fn journal_date_from_path(path: &str) -> Option<NaiveDate> {
    let name = page_name_from_path(path);
    if UNDERSCORE_DATE_RE.is_match(name) {
        return NaiveDate::parse_from_str(name, "%Y_%m_%d").ok();
    }
    if DASH_DATE_RE.is_match(name) {
        return NaiveDate::parse_from_str(name, "%Y-%m-%d").ok();
    }
    None
}
