//! Text formatting for harvest summaries and id listings.

use crate::harvest::HarvestSummary;
use crate::ident::IdKind;
use crate::manifest::StableIdEntry;
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use owo_colors::OwoColorize;

/// Format a section heading with bold/underline.
pub fn format_section_heading(title: &str) -> String {
    format!("{}", title.bold().underline())
}

/// Format a harvest summary as human-readable text.
pub fn format_harvest_summary_text(summary: &HarvestSummary) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n\n", format_section_heading("Manifest")));
    out.push_str(&format!("  Output: {}\n", summary.output_file.display()));
    out.push_str(&format!("  Bytes: {}\n", summary.bytes));
    out.push_str(&format!("  Files: {}\n", summary.files));
    out.push_str(&format!("  Directories: {}\n", summary.directories));
    out.push_str(&format!("  Components: {}", summary.components.len()));
    out
}

/// Format stable ids as a table, root shown as `/`.
pub fn format_stable_ids_text(entries: &[StableIdEntry]) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Kind", "Tree path", "Id"]);
    for entry in entries {
        let kind = match entry.kind {
            IdKind::Directory => "directory",
            IdKind::Component => "component",
        };
        let path = if entry.tree_path.is_empty() {
            "/"
        } else {
            entry.tree_path.as_str()
        };
        table.add_row(vec![kind, path, entry.id.as_str()]);
    }
    format!("{}\n\n{}", format_section_heading("Stable ids"), table)
}
