//! Reference-graph report: hub pages, then the most connected notes.

use super::{rendered, ReportContext};
use crate::index::{GraphNode, LinkGraph};
use std::fmt::{self, Write};

const MAX_DETAILED_PAGES: usize = 20;
const MAX_LISTED_REFS: usize = 10;

pub fn render_reference_graph(graph: &LinkGraph, ctx: &ReportContext) -> String {
    rendered(|out| {
        writeln!(out, "# Reference Graph\n")?;
        writeln!(out, "Generated: {}", ctx.generated_label())?;
        writeln!(out, "Total Pages: {}", graph.nodes.len())?;
        writeln!(out, "Total References: {}\n", graph.total_references())?;
        writeln!(out, "---\n")?;

        if !graph.hub_pages.is_empty() {
            writeln!(out, "## Hub Pages (Most Referenced)\n")?;
            for (rank, page_name) in graph.hub_pages.iter().enumerate() {
                let Some(node) = graph.node(page_name) else {
                    continue;
                };
                writeln!(
                    out,
                    "{}. **[[{}]]** - {} inbound references",
                    rank + 1,
                    node.page_name,
                    node.reference_count
                )?;
                if node.is_phantom() {
                    writeln!(out, "   - *Page not yet created*\n")?;
                } else {
                    writeln!(out, "   - File: `{}`\n", node.file_path)?;
                }
            }
            writeln!(out, "---\n")?;
        }

        writeln!(out, "## Page Details\n")?;
        let mut existing: Vec<&GraphNode> =
            graph.nodes.values().filter(|node| !node.is_phantom()).collect();
        existing.sort_by(|a, b| {
            connections(b)
                .cmp(&connections(a))
                .then_with(|| a.page_name.cmp(&b.page_name))
        });

        for node in existing.iter().take(MAX_DETAILED_PAGES) {
            writeln!(out, "### [[{}]]", node.page_name)?;
            writeln!(out, "- **File**: `{}`", node.file_path)?;
            write_refs(out, "Outbound References", &node.outbound)?;
            write_refs(out, "Inbound References", &node.inbound)?;
            writeln!(out)?;
        }

        if existing.len() > MAX_DETAILED_PAGES {
            writeln!(
                out,
                "*Showing top {MAX_DETAILED_PAGES} of {} pages. Pages with fewer connections are omitted.*\n",
                existing.len()
            )?;
        }
        Ok(())
    })
}

fn connections(node: &GraphNode) -> usize {
    node.inbound.len() + node.outbound.len()
}

fn write_refs(out: &mut String, label: &str, refs: &[String]) -> fmt::Result {
    if refs.is_empty() {
        return Ok(());
    }
    writeln!(out, "- **{label}** ({}):", refs.len())?;
    for page in refs.iter().take(MAX_LISTED_REFS) {
        writeln!(out, "  - [[{page}]]")?;
    }
    if refs.len() > MAX_LISTED_REFS {
        writeln!(out, "  - *... and {} more*", refs.len() - MAX_LISTED_REFS)?;
    }
    Ok(())
}
