//! Directed page-reference graph.
//!
//! # Responsibility
//! - Seed one node per note, then add one deduplicated edge per link.
//! - Create phantom nodes for targets without a backing note.
//! - Rank hub pages by inbound reference count.
//!
//! # Invariants
//! - `reference_count == inbound.len()` for every node.
//! - `file_path` is empty iff the node was created by edge insertion only.
//! - Nodes are never removed.

use crate::model::link::LinkRecord;
use crate::model::note::NoteFile;
use crate::parser::paths::page_name_from_path;
use std::collections::BTreeMap;

/// Number of hub pages kept by default.
pub const DEFAULT_HUB_LIMIT: usize = 10;

/// One page, existing or phantom.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphNode {
    pub page_name: String,
    /// Relative note path; empty for phantom pages.
    pub file_path: String,
    /// Deduplicated targets in first-seen order.
    pub outbound: Vec<String>,
    /// Deduplicated sources in first-seen order.
    pub inbound: Vec<String>,
    pub reference_count: usize,
}

impl GraphNode {
    fn new(page_name: &str, file_path: &str) -> Self {
        Self {
            page_name: page_name.to_string(),
            file_path: file_path.to_string(),
            outbound: Vec::new(),
            inbound: Vec::new(),
            reference_count: 0,
        }
    }

    /// Whether the page is referenced but has no note.
    pub fn is_phantom(&self) -> bool {
        self.file_path.is_empty()
    }
}

/// Page graph keyed by page name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkGraph {
    pub nodes: BTreeMap<String, GraphNode>,
    /// Most referenced pages, count desc then name asc.
    pub hub_pages: Vec<String>,
}

impl LinkGraph {
    pub fn node(&self, page_name: &str) -> Option<&GraphNode> {
        self.nodes.get(page_name)
    }

    /// Existing pages with neither inbound nor outbound references.
    pub fn orphan_pages(&self) -> Vec<String> {
        self.existing_pages_where(|node| node.inbound.is_empty() && node.outbound.is_empty())
    }

    /// Existing pages that nothing links to (superset of orphans).
    pub fn unreferenced_pages(&self) -> Vec<String> {
        self.existing_pages_where(|node| node.inbound.is_empty())
    }

    /// Number of distinct source -> target edges.
    pub fn total_references(&self) -> usize {
        self.nodes.values().map(|node| node.outbound.len()).sum()
    }

    fn existing_pages_where(&self, predicate: impl Fn(&GraphNode) -> bool) -> Vec<String> {
        // BTreeMap iteration keeps the result name-sorted.
        self.nodes
            .values()
            .filter(|node| !node.is_phantom() && predicate(node))
            .map(|node| node.page_name.clone())
            .collect()
    }
}

/// Builds the graph with the default hub limit.
pub fn build_link_graph(links: &[LinkRecord], files: &[NoteFile]) -> LinkGraph {
    build_link_graph_with_limit(links, files, DEFAULT_HUB_LIMIT)
}

/// Builds the graph keeping up to `hub_limit` hub pages.
pub fn build_link_graph_with_limit(
    links: &[LinkRecord],
    files: &[NoteFile],
    hub_limit: usize,
) -> LinkGraph {
    let mut nodes: BTreeMap<String, GraphNode> = BTreeMap::new();

    for file in files {
        let page_name = page_name_from_path(&file.path);
        nodes.insert(page_name.to_string(), GraphNode::new(page_name, &file.path));
    }

    for link in links {
        if let Some(source) = nodes.get_mut(&link.source_page) {
            push_unique(&mut source.outbound, &link.target_page);
        }

        let target = nodes
            .entry(link.target_page.clone())
            .or_insert_with(|| GraphNode::new(&link.target_page, ""));
        if push_unique(&mut target.inbound, &link.source_page) {
            target.reference_count += 1;
        }
    }

    let hub_pages = rank_hubs(&nodes, hub_limit);
    LinkGraph { nodes, hub_pages }
}

fn rank_hubs(nodes: &BTreeMap<String, GraphNode>, limit: usize) -> Vec<String> {
    let mut ranked: Vec<&GraphNode> = nodes
        .values()
        .filter(|node| node.reference_count > 0)
        .collect();
    ranked.sort_by(|a, b| {
        b.reference_count
            .cmp(&a.reference_count)
            .then_with(|| a.page_name.cmp(&b.page_name))
    });
    ranked
        .into_iter()
        .take(limit)
        .map(|node| node.page_name.clone())
        .collect()
}

fn push_unique(values: &mut Vec<String>, value: &str) -> bool {
    if values.iter().any(|existing| existing == value) {
        return false;
    }
    values.push(value.to_string());
    true
}
