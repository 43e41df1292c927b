//! `[[Page]]` link extraction.

use crate::model::link::LinkRecord;
use crate::parser::paths::page_name_from_path;
use once_cell::sync::Lazy;
use regex::Regex;

/// Default bound for `LinkRecord::context`.
pub const DEFAULT_CONTEXT_MAX_CHARS: usize = 100;

static PAGE_REF_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[\[([^\]]+)\]\]").expect("valid page ref regex"));

/// Returns every linked page name on a line, in appearance order.
pub fn extract_page_refs(line: &str) -> Vec<String> {
    PAGE_REF_RE
        .captures_iter(line)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str().to_string()))
        .collect()
}

/// Trims a line and caps it at `max_chars` characters, appending `...`.
pub fn truncate_context(line: &str, max_chars: usize) -> String {
    let trimmed = line.trim();
    if trimmed.chars().count() <= max_chars {
        return trimmed.to_string();
    }
    let mut truncated = trimmed.chars().take(max_chars).collect::<String>();
    truncated.push_str("...");
    truncated
}

/// Extracts one `LinkRecord` per link occurrence with the default context bound.
pub fn parse_links(content: &str, path: &str) -> Vec<LinkRecord> {
    parse_links_with_limit(content, path, DEFAULT_CONTEXT_MAX_CHARS)
}

/// Extracts one `LinkRecord` per link occurrence.
pub fn parse_links_with_limit(content: &str, path: &str, context_max_chars: usize) -> Vec<LinkRecord> {
    let source_page = page_name_from_path(path);
    let mut links = Vec::new();

    for (index, line) in content.lines().enumerate() {
        for target in extract_page_refs(line) {
            links.push(LinkRecord {
                source_file: path.to_string(),
                source_page: source_page.to_string(),
                target_page: target,
                line_number: index + 1,
                context: truncate_context(line, context_max_chars),
            });
        }
    }

    links
}

#[cfg(test)]
mod tests {
    use super::{extract_page_refs, parse_links, truncate_context};

    #[test]
    fn extracts_refs_in_order_with_duplicates() {
        assert_eq!(
            extract_page_refs("see [[A]] and [[B]] then [[A]]"),
            vec!["A", "B", "A"]
        );
        assert!(extract_page_refs("no links [here] or [[]]").is_empty());
    }

    #[test]
    fn parse_links_records_source_and_line() {
        let content = "intro\n- [[Page A]] and [[Page B]]\n- back to [[Page A]]";
        let links = parse_links(content, "pages/Overview.md");

        assert_eq!(links.len(), 3);
        assert!(links.iter().all(|link| link.source_page == "Overview"));
        assert_eq!(links[0].target_page, "Page A");
        assert_eq!(links[0].line_number, 2);
        assert_eq!(links[1].target_page, "Page B");
        assert_eq!(links[2].line_number, 3);
        assert_eq!(links[2].context, "- back to [[Page A]]");
    }

    #[test]
    fn context_is_trimmed_and_truncated() {
        assert_eq!(truncate_context("   short  ", 10), "short");
        assert_eq!(truncate_context("abcdefghij", 5), "abcde...");
        assert_eq!(truncate_context("ééééé", 5), "ééééé");
    }
}
