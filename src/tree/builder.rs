//! Tree builder: turns a flat file list into a `PathTreeNode` tree.

use crate::error::HarvestError;
use crate::manifest::is_xml_char;
use crate::tree::node::PathTreeNode;
use crate::tree::path::{absolute_normalized, relative_to, utf8_segments, IGNORE_CASE};
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// Incremental builder for the path tree under one base directory.
#[derive(Debug)]
pub struct TreeBuilder {
    base: PathBuf,
    root: PathTreeNode,
    files: usize,
}

impl TreeBuilder {
    /// Create a builder for files under `base_directory`.
    pub fn new(base_directory: &Path) -> Result<Self, HarvestError> {
        if base_directory.as_os_str().is_empty() {
            return Err(HarvestError::MissingInput("base_directory"));
        }
        let base = absolute_normalized(base_directory)?;
        debug!(base = %base.display(), "Tree builder created");
        Ok(TreeBuilder {
            base,
            root: PathTreeNode::root(),
            files: 0,
        })
    }

    /// Insert one file.
    ///
    /// Fails if the file is not strictly below the base directory, or if it
    /// collides with an existing file or directory position.
    pub fn insert(&mut self, file: &Path) -> Result<(), HarvestError> {
        let normalized = absolute_normalized(file)?;
        match normalized.to_str() {
            None => {
                return Err(HarvestError::Precondition(format!(
                    "source path '{}' is not valid UTF-8",
                    normalized.display()
                )))
            }
            Some(text) if !text.chars().all(is_xml_char) => {
                return Err(HarvestError::Precondition(format!(
                    "source path {:?} contains characters XML cannot represent",
                    text
                )))
            }
            Some(_) => {}
        }
        let relative = relative_to(&normalized, &self.base, IGNORE_CASE).ok_or_else(|| {
            HarvestError::Containment {
                path: normalized.clone(),
                base: self.base.clone(),
            }
        })?;
        let segments = utf8_segments(relative)?;
        let Some((leaf, parents)) = segments.split_last() else {
            return Err(HarvestError::Containment {
                path: normalized.clone(),
                base: self.base.clone(),
            });
        };

        let mut tree_path = String::new();
        let mut current = &mut self.root;
        for segment in parents {
            tree_path.push('/');
            tree_path.push_str(segment);
            current = current.child_entry(segment);
            if current.is_file() {
                return Err(HarvestError::conflict(
                    &tree_path,
                    format!(
                        "already a file, but '{}' needs it as a directory",
                        normalized.display()
                    ),
                ));
            }
        }

        tree_path.push('/');
        tree_path.push_str(leaf);
        let node = current.child_entry(leaf);
        if let Some(existing) = node.source_path() {
            return Err(HarvestError::conflict(
                &tree_path,
                format!(
                    "'{}' and '{}' map to the same file",
                    existing.display(),
                    normalized.display()
                ),
            ));
        }
        if node.has_children() {
            return Err(HarvestError::conflict(
                &tree_path,
                format!(
                    "already a directory, but '{}' names it as a file",
                    normalized.display()
                ),
            ));
        }

        trace!(tree_path = %tree_path, "Inserted file");
        node.set_source_path(normalized);
        self.files += 1;
        Ok(())
    }

    /// Finish building. An empty tree is a precondition error.
    pub fn build(self) -> Result<PathTreeNode, HarvestError> {
        if self.files == 0 {
            return Err(HarvestError::Precondition(
                "component file list is empty".to_string(),
            ));
        }
        debug!(files = self.files, "Path tree built");
        Ok(self.root)
    }
}

/// Build a tree from `files` under `base_directory` in one call.
pub fn build_tree<I, P>(base_directory: &Path, files: I) -> Result<PathTreeNode, HarvestError>
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    let mut builder = TreeBuilder::new(base_directory)?;
    for file in files {
        builder.insert(file.as_ref())?;
    }
    builder.build()
}
