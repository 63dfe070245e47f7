//! Lexical path normalization.
//!
//! Input files usually exist, but normalization never touches the
//! filesystem: symlinks are not resolved, so a file keeps the location the
//! build tool reported for it.
//!
//! Containment compares whole segments. On Windows the comparison ignores
//! case, so `C:\Build\out` contains `c:\build\out\x.txt`; elsewhere it is
//! exact.

use crate::error::HarvestError;
use crate::manifest::is_xml_char;
use std::ffi::OsStr;
use std::path::{Component, Path, PathBuf};

/// Resolve `path` against the current directory and normalize it.
pub fn absolute_normalized(path: &Path) -> Result<PathBuf, HarvestError> {
    if path.is_absolute() {
        return Ok(normalize_lexically(path));
    }
    let cwd = std::env::current_dir().map_err(|e| HarvestError::io(Path::new("."), e))?;
    Ok(normalize_lexically(&cwd.join(path)))
}

/// Drop `.` segments and fold `..` into its parent.
///
/// `..` at the root stays at the root.
pub fn normalize_lexically(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => out.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            Component::Normal(name) => out.push(name),
        }
    }
    dunce::simplified(&out).to_path_buf()
}

/// Whether segment comparison ignores case on this platform.
pub(crate) const IGNORE_CASE: bool = cfg!(windows);

/// The part of `path` below `base`, or `None` if `base` is not a segment-wise
/// prefix of `path`.
pub(crate) fn relative_to<'p>(path: &'p Path, base: &Path, ignore_case: bool) -> Option<&'p Path> {
    let mut rest = path.components();
    for base_part in base.components() {
        let part = rest.next()?;
        if !segment_eq(part.as_os_str(), base_part.as_os_str(), ignore_case) {
            return None;
        }
    }
    Some(rest.as_path())
}

fn segment_eq(a: &OsStr, b: &OsStr, ignore_case: bool) -> bool {
    if a == b {
        return true;
    }
    match (ignore_case, a.to_str(), b.to_str()) {
        (true, Some(a), Some(b)) => a.to_uppercase() == b.to_uppercase(),
        _ => false,
    }
}

/// Split a relative path into UTF-8 segments that are valid XML text.
pub(crate) fn utf8_segments(relative: &Path) -> Result<Vec<&str>, HarvestError> {
    relative
        .components()
        .map(|component| match component {
            Component::Normal(name) => {
                let segment = name.to_str().ok_or_else(|| {
                    HarvestError::Precondition(format!(
                        "path segment {:?} in '{}' is not valid UTF-8",
                        name,
                        relative.display()
                    ))
                })?;
                if !segment.chars().all(is_xml_char) {
                    return Err(HarvestError::Precondition(format!(
                        "path segment {:?} in '{}' contains characters XML cannot represent",
                        segment,
                        relative.display()
                    )));
                }
                Ok(segment)
            }
            other => Err(HarvestError::Precondition(format!(
                "unexpected segment {:?} in relative path '{}'",
                other.as_os_str(),
                relative.display()
            ))),
        })
        .collect()
}
