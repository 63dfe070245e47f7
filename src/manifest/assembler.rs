//! Manifest assembler: walks the path tree and emits nested
//! `Directory` / `Component` / `File` elements.
//!
//! The walk is post-order per directory: subdirectories are emitted first
//! (lexicographic order), then the directory's own component, if it owns
//! any files. Component records are appended in that same order, which is
//! the order the component group later lists them in.

use crate::ident::{IdKind, StableId, UniqueIds};
use crate::manifest::document::Element;
use crate::tree::PathTreeNode;
use crate::types::{ComponentRecord, RegistryKey};
use serde::Serialize;
use std::path::Path;
use tracing::debug;

/// Result of assembling a tree: the `DirectoryRef` subtree and the minted
/// component records.
#[derive(Debug)]
pub struct Assembly {
    pub directory_ref: Element,
    pub components: Vec<ComponentRecord>,
}

/// Keys shared by every stable id in one manifest.
#[derive(Debug, Clone, Copy)]
pub struct IdKeys<'a> {
    pub upgrade_code: &'a str,
    pub registry_key: &'a RegistryKey,
}

impl IdKeys<'_> {
    fn derive(&self, kind: IdKind, tree_path: &str) -> StableId {
        StableId::derive(self.upgrade_code, self.registry_key.as_str(), kind, tree_path)
    }
}

/// Tree walker that builds directory/component elements.
pub struct ManifestAssembler<'a, 'u> {
    keys: IdKeys<'a>,
    unique_ids: &'u mut dyn UniqueIds,
    components: Vec<ComponentRecord>,
}

impl<'a, 'u> ManifestAssembler<'a, 'u> {
    pub fn new(keys: IdKeys<'a>, unique_ids: &'u mut dyn UniqueIds) -> Self {
        ManifestAssembler {
            keys,
            unique_ids,
            components: Vec::new(),
        }
    }

    /// Assemble the whole tree under a `DirectoryRef` with the given id.
    pub fn assemble(mut self, directory_ref_id: &str, tree: &PathTreeNode) -> Assembly {
        let mut directory_ref = Element::new("DirectoryRef").with_attr("Id", directory_ref_id);
        self.build_directory_elements("", tree, &mut directory_ref, false);
        debug!(
            components = self.components.len(),
            "Assembled directory reference"
        );
        Assembly {
            directory_ref,
            components: self.components,
        }
    }

    /// Emit the children of `node` into `parent`.
    ///
    /// `owns_folder` is false only for the `DirectoryRef` itself, whose
    /// folder is defined elsewhere and must not get create/remove markers.
    fn build_directory_elements(
        &mut self,
        tree_path: &str,
        node: &PathTreeNode,
        parent: &mut Element,
        owns_folder: bool,
    ) {
        let mut component = Element::new("Component");

        for child in node.children() {
            match child.source_path() {
                Some(source) => component.push(self.file_element(source)),
                None => {
                    let child_path = format!("{}/{}", tree_path, child.name());
                    let mut directory = self.directory_element(&child_path, child.name());
                    self.build_directory_elements(&child_path, child, &mut directory, true);
                    parent.push(directory);
                }
            }
        }

        if component.is_empty() {
            return;
        }

        let id = self.keys.derive(IdKind::Component, tree_path);
        let element_id = id.element_id();
        let files = component.children().len();
        component.set_attr("Id", element_id.clone());
        component.set_attr("Guid", id.guid());
        component.set_attr("Shared", "no");
        component.set_attr("DiskId", "1");

        if owns_folder {
            component.push(Element::new("CreateFolder"));
            component.push(
                Element::new("RemoveFolder")
                    .with_attr("Id", self.unique_ids.mint("rem"))
                    .with_attr("On", "uninstall"),
            );
        }
        component.push(self.registry_key_element(&format!("{}Installed", element_id)));

        debug!(tree_path = %tree_path, component = %element_id, files, "Emitted component");
        self.components.push(ComponentRecord { id: element_id });
        parent.push(component);
    }

    fn directory_element(&self, tree_path: &str, name: &str) -> Element {
        let id = self.keys.derive(IdKind::Directory, tree_path);
        Element::new("Directory")
            .with_attr("Id", id.element_id())
            .with_attr("Name", name)
    }

    fn file_element(&mut self, source: &Path) -> Element {
        Element::new("File")
            .with_attr("Id", self.unique_ids.mint("fil"))
            .with_attr("Source", source.to_string_lossy())
    }

    /// Install-state marker: a per-component registry value under the
    /// product's registry key.
    fn registry_key_element(&self, value_name: &str) -> Element {
        Element::new("RegistryKey")
            .with_attr("Root", self.keys.registry_key.root())
            .with_attr("Key", self.keys.registry_key.key())
            .with_attr("Action", "createAndRemoveOnUninstall")
            .with_child(
                Element::new("RegistryValue")
                    .with_attr("Name", value_name)
                    .with_attr("Value", "1")
                    .with_attr("Type", "integer")
                    .with_attr("KeyPath", "yes"),
            )
    }
}

/// A stable id together with the tree position it was derived from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StableIdEntry {
    pub kind: IdKind,
    pub tree_path: String,
    pub id: String,
}

/// List every stable id the assembler would mint for `tree`, without
/// building elements. Directories are listed before their contents;
/// components appear only for directories that own files.
pub fn list_stable_ids(tree: &PathTreeNode, keys: IdKeys<'_>) -> Vec<StableIdEntry> {
    fn visit(node: &PathTreeNode, tree_path: &str, keys: IdKeys<'_>, out: &mut Vec<StableIdEntry>) {
        for directory in node.directories() {
            let child_path = format!("{}/{}", tree_path, directory.name());
            let id = keys.derive(IdKind::Directory, &child_path);
            out.push(StableIdEntry {
                kind: id.kind(),
                id: id.element_id(),
                tree_path: child_path.clone(),
            });
            visit(directory, &child_path, keys, out);
        }
        if node.files().next().is_some() {
            let id = keys.derive(IdKind::Component, tree_path);
            out.push(StableIdEntry {
                kind: id.kind(),
                id: id.element_id(),
                tree_path: tree_path.to_string(),
            });
        }
    }

    let mut entries = Vec::new();
    visit(tree, "", keys, &mut entries);
    entries
}
