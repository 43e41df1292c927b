//! Missing-page report grouped by inferred page type.

use super::{rendered, ReportContext};
use crate::index::{MissingPage, MissingPagesIndex, PageType};
use std::fmt::{self, Write};

const TYPE_SECTIONS: [(PageType, &str); 4] = [
    (PageType::Person, "People"),
    (PageType::Project, "Projects"),
    (PageType::Date, "Dates"),
    (PageType::Concept, "Concepts"),
];

pub fn render_missing_pages(index: &MissingPagesIndex, ctx: &ReportContext) -> String {
    rendered(|out| {
        writeln!(out, "# Missing Pages to Create\n")?;
        writeln!(out, "Generated: {}\n", ctx.generated_label())?;

        if index.pages.is_empty() {
            writeln!(
                out,
                "*No missing pages with {}+ references found.*",
                index.threshold
            )?;
            return Ok(());
        }

        writeln!(
            out,
            "**Pages with {}+ references that don't exist yet**: {}\n",
            index.threshold,
            index.pages.len()
        )?;
        writeln!(out, "---\n")?;

        for (page_type, label) in TYPE_SECTIONS {
            let pages: Vec<&MissingPage> = index
                .pages
                .iter()
                .filter(|page| page.page_type == page_type)
                .collect();
            if pages.is_empty() {
                continue;
            }
            writeln!(out, "## {label} ({})\n", pages.len())?;
            for page in pages {
                write_missing_page(out, page)?;
            }
            writeln!(out, "---\n")?;
        }
        Ok(())
    })
}

fn write_missing_page(out: &mut String, page: &MissingPage) -> fmt::Result {
    writeln!(out, "### [[{}]]", page.name)?;
    writeln!(out, "- **References**: {}", page.reference_count)?;
    if !page.referenced_from.is_empty() {
        let sources: Vec<String> = page
            .referenced_from
            .iter()
            .map(|source| format!("[[{source}]]"))
            .collect();
        writeln!(out, "- **Referenced from**: {}", sources.join(", "))?;
    }
    writeln!(out)
}
