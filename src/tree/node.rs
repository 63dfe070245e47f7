//! Path tree node types

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// One segment of the logical tree rooted at the base directory.
///
/// A node is a file iff `source_path` is set. Children are kept in a
/// `BTreeMap` so iteration is always lexicographic by segment name; id
/// derivation and output order both depend on that.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathTreeNode {
    name: String,
    children: BTreeMap<String, PathTreeNode>,
    source_path: Option<PathBuf>,
}

impl PathTreeNode {
    /// The implicit, unnamed root.
    pub fn root() -> Self {
        Self::default()
    }

    pub(crate) fn directory(name: &str) -> Self {
        PathTreeNode {
            name: name.to_string(),
            ..Self::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn source_path(&self) -> Option<&Path> {
        self.source_path.as_deref()
    }

    pub fn is_file(&self) -> bool {
        self.source_path.is_some()
    }

    pub fn is_directory(&self) -> bool {
        self.source_path.is_none()
    }

    /// Children in lexicographic segment order.
    pub fn children(&self) -> impl Iterator<Item = &PathTreeNode> {
        self.children.values()
    }

    pub fn child(&self, name: &str) -> Option<&PathTreeNode> {
        self.children.get(name)
    }

    /// Direct file children, in order.
    pub fn files(&self) -> impl Iterator<Item = &PathTreeNode> {
        self.children().filter(|c| c.is_file())
    }

    /// Direct directory children, in order.
    pub fn directories(&self) -> impl Iterator<Item = &PathTreeNode> {
        self.children().filter(|c| c.is_directory())
    }

    pub(crate) fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    pub(crate) fn child_entry(&mut self, name: &str) -> &mut PathTreeNode {
        self.children
            .entry(name.to_string())
            .or_insert_with(|| PathTreeNode::directory(name))
    }

    pub(crate) fn set_source_path(&mut self, path: PathBuf) {
        self.source_path = Some(path);
    }

    /// Number of file leaves in this subtree.
    pub fn file_count(&self) -> usize {
        if self.is_file() {
            return 1;
        }
        self.children().map(PathTreeNode::file_count).sum()
    }

    /// Number of directory nodes below this one (excluding itself).
    pub fn directory_count(&self) -> usize {
        self.directories()
            .map(|d| 1 + d.directory_count())
            .sum()
    }
}
