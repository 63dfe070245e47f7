//! XML serialization for manifest documents.
//!
//! Output is UTF-8 with an explicit declaration, two spaces of indentation
//! per level, one element per line, and attributes in insertion order.
//! Elements without children are written self-closing (`<X a="b" />`).

use crate::error::HarvestError;
use crate::manifest::document::{Element, ManifestDocument};
use std::borrow::Cow;
use std::fmt::Write as _;
use std::path::Path;
use tracing::info;

const DECLARATION: &str = r#"<?xml version="1.0" encoding="utf-8"?>"#;
const INDENT: &str = "  ";

/// Render the whole document, declaration included.
pub fn to_xml_string(document: &ManifestDocument) -> String {
    let mut out = String::new();
    out.push_str(DECLARATION);
    out.push('\n');
    write_element(&mut out, document.root(), 0);
    out
}

/// Serialize in memory, then write `path` in one call.
///
/// Returns the number of bytes written.
pub fn write_document(document: &ManifestDocument, path: &Path) -> Result<usize, HarvestError> {
    let xml = to_xml_string(document);
    std::fs::write(path, xml.as_bytes()).map_err(|e| HarvestError::io(path, e))?;
    info!(path = %path.display(), bytes = xml.len(), "Wrote manifest");
    Ok(xml.len())
}

fn write_element(out: &mut String, element: &Element, depth: usize) {
    for _ in 0..depth {
        out.push_str(INDENT);
    }
    out.push('<');
    out.push_str(element.name());
    for (name, value) in element.attributes() {
        // Writing into a String cannot fail.
        let _ = write!(out, " {}=\"{}\"", name, escape_attribute(value));
    }
    if element.is_empty() {
        out.push_str(" />\n");
        return;
    }
    out.push_str(">\n");
    for child in element.children() {
        write_element(out, child, depth + 1);
    }
    for _ in 0..depth {
        out.push_str(INDENT);
    }
    out.push_str("</");
    out.push_str(element.name());
    out.push_str(">\n");
}

/// Whether `c` may appear in an XML 1.0 document at all, raw or as a
/// character reference.
pub fn is_xml_char(c: char) -> bool {
    matches!(c, '\t' | '\n' | '\r')
        || ('\u{20}'..='\u{D7FF}').contains(&c)
        || ('\u{E000}'..='\u{FFFD}').contains(&c)
        || c >= '\u{10000}'
}

/// Escape a value for use inside a double-quoted attribute.
///
/// Callers reject values failing [`is_xml_char`] before they get here.
pub fn escape_attribute(value: &str) -> Cow<'_, str> {
    if !value
        .chars()
        .any(|c| matches!(c, '&' | '<' | '>' | '"' | '\n' | '\r' | '\t'))
    {
        return Cow::Borrowed(value);
    }
    let mut escaped = String::with_capacity(value.len() + 8);
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\n' => escaped.push_str("&#xA;"),
            '\r' => escaped.push_str("&#xD;"),
            '\t' => escaped.push_str("&#x9;"),
            other => escaped.push(other),
        }
    }
    Cow::Owned(escaped)
}
