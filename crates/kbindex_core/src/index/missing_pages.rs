//! Inference of pages that should exist.
//!
//! # Responsibility
//! - Select phantom graph nodes referenced at least `threshold` times.
//! - Guess each page's semantic type from its name.
//!
//! # Invariants
//! - Only phantom nodes are reported.
//! - Classification rules are evaluated in declaration order; first match wins.

use crate::index::link_graph::LinkGraph;
use serde::Serialize;

/// Minimum inbound references for a page to be suggested.
pub const DEFAULT_MISSING_PAGE_THRESHOLD: usize = 5;

const MAX_REFERENCED_FROM: usize = 10;
const ROLE_SEPARATOR: &str = " - ";
const DATE_KEYWORDS: &[&str] = &[
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec", "th,",
    "st,", "nd,", "rd,",
];
const PROJECT_KEYWORDS: &[&str] = &["Sprint", "Project", "Phase", "Release", "Milestone"];
const CONCEPT_KEYWORDS: &[&str] = &[
    "API",
    "Service",
    "Architecture",
    "System",
    "Design",
    "Framework",
    "Database",
    "Server",
    "Team",
    "Stack",
    "Platform",
];

/// Probable semantic type of a missing page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PageType {
    Person,
    Project,
    Date,
    Concept,
}

impl PageType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Person => "person",
            Self::Project => "project",
            Self::Date => "date",
            Self::Concept => "concept",
        }
    }
}

type Rule = (fn(&str) -> bool, PageType);

const CLASSIFICATION_RULES: &[Rule] = &[
    (is_named_role, PageType::Person),
    (has_role_separator, PageType::Concept),
    (has_date_keyword, PageType::Date),
    (has_project_keyword, PageType::Project),
    (has_concept_keyword, PageType::Concept),
    (is_short_name, PageType::Person),
];

/// One referenced page without a note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingPage {
    pub name: String,
    pub reference_count: usize,
    pub page_type: PageType,
    /// First referencing pages, at most ten.
    pub referenced_from: Vec<String>,
}

/// Missing pages sorted by reference count desc, then name asc.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingPagesIndex {
    pub pages: Vec<MissingPage>,
    pub threshold: usize,
}

/// Collects phantom nodes with at least `threshold` inbound references.
pub fn build_missing_pages_index(graph: &LinkGraph, threshold: usize) -> MissingPagesIndex {
    let mut pages: Vec<MissingPage> = graph
        .nodes
        .values()
        .filter(|node| node.is_phantom() && node.reference_count >= threshold)
        .map(|node| MissingPage {
            name: node.page_name.clone(),
            reference_count: node.reference_count,
            page_type: classify_page_type(&node.page_name),
            referenced_from: node
                .inbound
                .iter()
                .take(MAX_REFERENCED_FROM)
                .cloned()
                .collect(),
        })
        .collect();

    pages.sort_by(|a, b| {
        b.reference_count
            .cmp(&a.reference_count)
            .then_with(|| a.name.cmp(&b.name))
    });

    MissingPagesIndex { pages, threshold }
}

/// Guesses a page type from its name, defaulting to `Concept`.
pub fn classify_page_type(page_name: &str) -> PageType {
    CLASSIFICATION_RULES
        .iter()
        .find(|(matches, _)| matches(page_name))
        .map_or(PageType::Concept, |(_, page_type)| *page_type)
}

/// Two to four whitespace-separated words, each starting with `A`-`Z`.
pub fn looks_like_name(text: &str) -> bool {
    let words: Vec<&str> = text.split_whitespace().collect();
    (2..=4).contains(&words.len())
        && words
            .iter()
            .all(|word| word.bytes().next().is_some_and(|b| b.is_ascii_uppercase()))
}

/// `"First Last - Role"`: exactly one separator and a name before it.
fn is_named_role(name: &str) -> bool {
    let parts: Vec<&str> = name.split(ROLE_SEPARATOR).collect();
    parts.len() == 2 && looks_like_name(parts[0])
}

fn has_role_separator(name: &str) -> bool {
    name.contains(ROLE_SEPARATOR)
}

fn has_date_keyword(name: &str) -> bool {
    contains_any(name, DATE_KEYWORDS)
}

fn has_project_keyword(name: &str) -> bool {
    contains_any(name, PROJECT_KEYWORDS)
}

fn has_concept_keyword(name: &str) -> bool {
    contains_any(name, CONCEPT_KEYWORDS)
}

fn is_short_name(name: &str) -> bool {
    let words = name.split_whitespace().count();
    (2..=3).contains(&words) && looks_like_name(name)
}

fn contains_any(name: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|keyword| name.contains(keyword))
}
