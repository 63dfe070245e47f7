//! wixtree: stable WiX component manifests
//!
//! Compiles a flat, build-tool-supplied list of files into a WiX
//! `DirectoryRef` / `Component` / `ComponentGroup` fragment. Directory and
//! component ids are derived from tree position plus the product's upgrade
//! code and registry key, so they stay identical across builds until the
//! tree shape or those keys change.

pub mod config;
pub mod error;
pub mod harvest;
pub mod ident;
pub mod logging;
pub mod manifest;
pub mod template;
pub mod tooling;
pub mod tree;
pub mod types;

pub use error::HarvestError;
pub use harvest::{HarvestRequest, HarvestSummary};
pub use ident::{derive_id, guid_from_string, FileIdMode, IdKind, StableId};
pub use tree::{build_tree, PathTreeNode};
