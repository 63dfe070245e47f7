//! Harvest pipeline
//!
//! One invocation: validate inputs, build the path tree, assemble the
//! manifest, append the component group, and write the document. Every step
//! fails hard; the output file is only touched once the whole document is
//! ready.

pub mod inputs;

use crate::error::HarvestError;
use crate::ident::{FileIdMode, UniqueIds};
use crate::manifest::{
    component_group, is_xml_char, list_stable_ids, wix_document, write_document, IdKeys,
    ManifestAssembler, ManifestDocument, StableIdEntry,
};
use crate::tree::{build_tree, PathTreeNode};
use crate::types::{ComponentRecord, RegistryKey};
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;

/// All inputs for one manifest compilation.
#[derive(Debug, Clone, Default)]
pub struct HarvestRequest {
    pub component_files: Vec<PathBuf>,
    pub output_file: PathBuf,
    pub base_directory: PathBuf,
    pub directory_ref_id: String,
    pub component_group_id: String,
    pub registry_key: String,
    pub upgrade_code: String,
    pub file_ids: FileIdMode,
}

/// Compiled manifest, ready to serialize.
#[derive(Debug)]
pub struct CompiledManifest {
    pub document: ManifestDocument,
    pub components: Vec<ComponentRecord>,
    pub files: usize,
    pub directories: usize,
}

/// What a harvest run produced.
#[derive(Debug, Clone, Serialize)]
pub struct HarvestSummary {
    pub output_file: PathBuf,
    pub files: usize,
    pub directories: usize,
    pub components: Vec<String>,
    pub bytes: usize,
}

fn require_text(value: &str, field: &'static str) -> Result<(), HarvestError> {
    if value.trim().is_empty() {
        return Err(HarvestError::MissingInput(field));
    }
    if !value.chars().all(is_xml_char) {
        return Err(HarvestError::Precondition(format!(
            "{} {:?} contains characters XML cannot represent",
            field, value
        )));
    }
    Ok(())
}

impl HarvestRequest {
    /// Check the scalar inputs and parse the registry key.
    ///
    /// The output file is checked separately by [`HarvestRequest::run`];
    /// compiling in memory does not need one.
    pub fn validate(&self) -> Result<RegistryKey, HarvestError> {
        if self.component_files.is_empty() {
            return Err(HarvestError::Precondition(
                "component file list is empty".to_string(),
            ));
        }
        if self.base_directory.as_os_str().is_empty() {
            return Err(HarvestError::MissingInput("base_directory"));
        }
        require_text(&self.directory_ref_id, "directory_ref_id")?;
        require_text(&self.component_group_id, "component_group_id")?;
        require_text(&self.upgrade_code, "upgrade_code")?;
        require_text(&self.registry_key, "registry_key")?;
        RegistryKey::parse(&self.registry_key)
    }

    /// Build the path tree for this request.
    pub fn tree(&self) -> Result<PathTreeNode, HarvestError> {
        build_tree(&self.base_directory, &self.component_files)
    }

    /// Compile the manifest in memory with the given unique-id source.
    pub fn compile(&self, unique_ids: &mut dyn UniqueIds) -> Result<CompiledManifest, HarvestError> {
        let registry_key = self.validate()?;
        let tree = self.tree()?;
        let keys = IdKeys {
            upgrade_code: &self.upgrade_code,
            registry_key: &registry_key,
        };

        let assembly = ManifestAssembler::new(keys, unique_ids).assemble(&self.directory_ref_id, &tree);
        let group = component_group(&self.component_group_id, &assembly.components, true)?;

        Ok(CompiledManifest {
            document: wix_document(assembly.directory_ref, group),
            components: assembly.components,
            files: tree.file_count(),
            directories: tree.directory_count(),
        })
    }

    /// Stable ids for this request's tree, without writing anything.
    pub fn stable_ids(&self) -> Result<Vec<StableIdEntry>, HarvestError> {
        let registry_key = self.validate()?;
        let tree = self.tree()?;
        let keys = IdKeys {
            upgrade_code: &self.upgrade_code,
            registry_key: &registry_key,
        };
        Ok(list_stable_ids(&tree, keys))
    }

    /// Compile and write the manifest to `output_file`.
    pub fn run(&self) -> Result<HarvestSummary, HarvestError> {
        if self.output_file.as_os_str().is_empty() {
            return Err(HarvestError::MissingInput("output_file"));
        }
        let mut unique_ids = self.file_ids.source();
        let compiled = self.compile(unique_ids.as_mut())?;
        let bytes = write_document(&compiled.document, &self.output_file)?;

        info!(
            output = %self.output_file.display(),
            files = compiled.files,
            directories = compiled.directories,
            components = compiled.components.len(),
            "Harvest complete"
        );

        Ok(HarvestSummary {
            output_file: self.output_file.clone(),
            files: compiled.files,
            directories: compiled.directories,
            components: compiled.components.into_iter().map(|c| c.id).collect(),
            bytes,
        })
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::ident::SequentialIds;
    use crate::manifest::to_xml_string;

    fn request(files: &[&str]) -> HarvestRequest {
        HarvestRequest {
            component_files: files.iter().map(PathBuf::from).collect(),
            output_file: PathBuf::from("/tmp/unused.wxs"),
            base_directory: PathBuf::from("/pkg"),
            directory_ref_id: "INSTALLDIR".to_string(),
            component_group_id: "ProductFiles".to_string(),
            registry_key: "HKCU\\Software\\Acme\\Tool".to_string(),
            upgrade_code: "{3F2504E0-4F89-11D3-9A0C-0305E82C3301}".to_string(),
            file_ids: FileIdMode::Sequential,
        }
    }

    #[test]
    fn test_compile_full_document() {
        let compiled = request(&["/pkg/a/1.txt"])
            .compile(&mut SequentialIds::default())
            .unwrap();
        let xml = to_xml_string(&compiled.document);
        let cmp = &compiled.components[0].id;
        let guid = &cmp[3..];
        let dir = crate::ident::StableId::derive(
            "{3F2504E0-4F89-11D3-9A0C-0305E82C3301}",
            "HKCU\\Software\\Acme\\Tool",
            crate::ident::IdKind::Directory,
            "/a",
        )
        .element_id();

        let expected = format!(
            concat!(
                "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n",
                "<Wix xmlns=\"http://schemas.microsoft.com/wix/2006/wi\">\n",
                "  <Fragment>\n",
                "    <DirectoryRef Id=\"INSTALLDIR\">\n",
                "      <Directory Id=\"{dir}\" Name=\"a\">\n",
                "        <Component Id=\"{cmp}\" Guid=\"{guid}\" Shared=\"no\" DiskId=\"1\">\n",
                "          <File Id=\"fil00000000000000000000000000000001\" Source=\"/pkg/a/1.txt\" />\n",
                "          <CreateFolder />\n",
                "          <RemoveFolder Id=\"rem00000000000000000000000000000002\" On=\"uninstall\" />\n",
                "          <RegistryKey Root=\"HKCU\" Key=\"Software\\Acme\\Tool\" Action=\"createAndRemoveOnUninstall\">\n",
                "            <RegistryValue Name=\"{cmp}Installed\" Value=\"1\" Type=\"integer\" KeyPath=\"yes\" />\n",
                "          </RegistryKey>\n",
                "        </Component>\n",
                "      </Directory>\n",
                "    </DirectoryRef>\n",
                "  </Fragment>\n",
                "  <Fragment>\n",
                "    <ComponentGroup Id=\"ProductFiles\">\n",
                "      <ComponentRef Id=\"{cmp}\" />\n",
                "    </ComponentGroup>\n",
                "  </Fragment>\n",
                "</Wix>\n",
            ),
            dir = dir,
            cmp = cmp,
            guid = guid,
        );
        assert_eq!(xml, expected);
    }

    #[test]
    fn test_missing_scalar_inputs() {
        let mut req = request(&["/pkg/a.txt"]);
        req.directory_ref_id = String::new();
        assert!(matches!(
            req.validate(),
            Err(HarvestError::MissingInput("directory_ref_id"))
        ));

        let mut req = request(&["/pkg/a.txt"]);
        req.upgrade_code = "  ".to_string();
        assert!(matches!(
            req.validate(),
            Err(HarvestError::MissingInput("upgrade_code"))
        ));
    }

    #[test]
    fn test_control_character_in_scalar_input() {
        let mut req = request(&["/pkg/a.txt"]);
        req.component_group_id = "Files\u{0}".to_string();
        assert!(matches!(req.validate(), Err(HarvestError::Precondition(_))));
    }

    #[test]
    fn test_malformed_registry_key() {
        let mut req = request(&["/pkg/a.txt"]);
        req.registry_key = "HKCU".to_string();
        assert!(matches!(
            req.compile(&mut SequentialIds::default()),
            Err(HarvestError::InvalidRegistryKey(_))
        ));
    }

    #[test]
    fn test_run_requires_output_file() {
        let mut req = request(&["/pkg/a.txt"]);
        req.output_file = PathBuf::new();
        assert!(req.validate().is_ok());
        assert!(matches!(
            req.run(),
            Err(HarvestError::MissingInput("output_file"))
        ));
    }

    #[test]
    fn test_empty_file_list() {
        let req = request(&[]);
        assert!(matches!(req.validate(), Err(HarvestError::Precondition(_))));
    }

    #[test]
    fn test_counts() {
        let compiled = request(&["/pkg/a/1.txt", "/pkg/a/2.txt", "/pkg/b/c/3.txt"])
            .compile(&mut SequentialIds::default())
            .unwrap();
        assert_eq!(compiled.files, 3);
        assert_eq!(compiled.directories, 3);
        assert_eq!(compiled.components.len(), 2);
    }
}
