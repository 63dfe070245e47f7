//! Component file collection: explicit lists, list files, and directory scans.

use crate::error::HarvestError;
use crate::tree::path::absolute_normalized;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// Read a list file: one path per line, blank lines and `#` comments skipped.
pub fn read_file_list(list: &Path) -> Result<Vec<PathBuf>, HarvestError> {
    let content = std::fs::read_to_string(list).map_err(|e| HarvestError::io(list, e))?;
    let files: Vec<PathBuf> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(PathBuf::from)
        .collect();
    debug!(list = %list.display(), files = files.len(), "Read file list");
    Ok(files)
}

/// Every regular file below `base`, sorted by path.
///
/// `exclude` (typically the manifest being written) is left out when the
/// scan finds it.
pub fn scan_directory(base: &Path, exclude: Option<&Path>) -> Result<Vec<PathBuf>, HarvestError> {
    let exclude = exclude
        .filter(|p| !p.as_os_str().is_empty())
        .map(absolute_normalized)
        .transpose()?;
    let mut files = Vec::new();
    for entry in WalkDir::new(base).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(base).to_path_buf();
            let source = e
                .into_io_error()
                .unwrap_or_else(|| std::io::Error::other("filesystem loop detected"));
            HarvestError::Io { path, source }
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        if let Some(exclude) = &exclude {
            if absolute_normalized(entry.path())? == *exclude {
                debug!(file = %entry.path().display(), "Skipping excluded file");
                continue;
            }
        }
        files.push(entry.into_path());
    }
    debug!(base = %base.display(), files = files.len(), "Scanned base directory");
    Ok(files)
}
