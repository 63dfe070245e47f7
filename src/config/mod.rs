//! Configuration
//!
//! Layered configuration for harvest runs: defaults, global file, project
//! file, then `WIXTREE__*` environment overlay. CLI flags are applied on top
//! by the tooling layer.

mod facade;
mod merge;
mod paths;
mod sources;

pub use facade::ConfigLoader;
pub use paths::xdg_root as xdg;

use crate::error::HarvestError;
use crate::harvest::HarvestRequest;
use crate::ident::FileIdMode;
use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Project file name looked up in the working directory.
pub const PROJECT_CONFIG_FILE: &str = "wixtree.toml";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WixTreeConfig {
    #[serde(default)]
    pub harvest: HarvestConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Harvest inputs that can be fixed per project instead of per invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HarvestConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_directory: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_file: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directory_ref_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component_group_id: Option<String>,

    /// `root\subkey`, e.g. `HKCU\Software\Acme\Tool`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registry_key: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upgrade_code: Option<String>,

    #[serde(default)]
    pub file_ids: FileIdMode,
}

impl HarvestConfig {
    /// Overlay `other` on top of `self`; set fields in `other` win.
    pub fn overlay(mut self, other: HarvestConfig) -> HarvestConfig {
        if other.base_directory.is_some() {
            self.base_directory = other.base_directory;
        }
        if other.output_file.is_some() {
            self.output_file = other.output_file;
        }
        if other.directory_ref_id.is_some() {
            self.directory_ref_id = other.directory_ref_id;
        }
        if other.component_group_id.is_some() {
            self.component_group_id = other.component_group_id;
        }
        if other.registry_key.is_some() {
            self.registry_key = other.registry_key;
        }
        if other.upgrade_code.is_some() {
            self.upgrade_code = other.upgrade_code;
        }
        if other.file_ids != FileIdMode::default() {
            self.file_ids = other.file_ids;
        }
        self
    }

    /// Turn the merged settings into a request, failing on the first
    /// missing input. The output file may stay empty for commands that
    /// never write one.
    pub fn into_request(self, component_files: Vec<PathBuf>) -> Result<HarvestRequest, HarvestError> {
        Ok(HarvestRequest {
            component_files,
            output_file: self.output_file.unwrap_or_default(),
            base_directory: self
                .base_directory
                .ok_or(HarvestError::MissingInput("base_directory"))?,
            directory_ref_id: self
                .directory_ref_id
                .ok_or(HarvestError::MissingInput("directory_ref_id"))?,
            component_group_id: self
                .component_group_id
                .ok_or(HarvestError::MissingInput("component_group_id"))?,
            registry_key: self
                .registry_key
                .ok_or(HarvestError::MissingInput("registry_key"))?,
            upgrade_code: self
                .upgrade_code
                .ok_or(HarvestError::MissingInput("upgrade_code"))?,
            file_ids: self.file_ids,
        })
    }
}
