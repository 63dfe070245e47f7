//! Literal-marker text templating.
//!
//! Used to stamp version numbers and product codes into installer sources
//! before the manifest build runs.

use crate::error::HarvestError;
use std::path::Path;
use tracing::{debug, info};

/// Replace every occurrence of each marker, in the order given.
pub fn render(template: &str, replacements: &[(String, String)]) -> String {
    replacements
        .iter()
        .fold(template.to_string(), |text, (marker, value)| {
            if marker.is_empty() {
                text
            } else {
                text.replace(marker.as_str(), value)
            }
        })
}

/// Render `template` into `target`, writing only when the content changes.
///
/// Returns `true` when the target was written.
pub fn apply_template(
    template: &Path,
    target: &Path,
    replacements: &[(String, String)],
) -> Result<bool, HarvestError> {
    let source = std::fs::read_to_string(template).map_err(|e| HarvestError::io(template, e))?;
    let rendered = render(&source, replacements);

    if target.exists() {
        let current = std::fs::read_to_string(target).map_err(|e| HarvestError::io(target, e))?;
        if current == rendered {
            debug!(target = %target.display(), "Template output unchanged");
            return Ok(false);
        }
    }

    std::fs::write(target, rendered).map_err(|e| HarvestError::io(target, e))?;
    info!(target = %target.display(), "Template written");
    Ok(true)
}

/// Parse `MARKER=VALUE`; the first `=` splits.
pub fn parse_replacement(spec: &str) -> Result<(String, String), HarvestError> {
    match spec.split_once('=') {
        Some((marker, value)) if !marker.is_empty() => Ok((marker.to_string(), value.to_string())),
        _ => Err(HarvestError::Precondition(format!(
            "replacement '{}' must have the form MARKER=VALUE",
            spec
        ))),
    }
}
