//! Path tree
//!
//! Builds the hierarchical view of the flat file list that the manifest
//! assembler walks.

pub mod builder;
pub mod node;
pub mod path;

pub use builder::{build_tree, TreeBuilder};
pub use node::PathTreeNode;
