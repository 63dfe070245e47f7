//! ConfigLoader facade delegating to merge service.

use super::merge::service::MergeService;
use super::WixTreeConfig;
use crate::error::HarvestError;
use std::path::Path;

/// Configuration loader facade.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from global file, project file, and environment.
    pub fn load(project_root: &Path) -> Result<WixTreeConfig, HarvestError> {
        Ok(MergeService::load(project_root)?)
    }

    /// Load configuration from a specific file.
    pub fn load_from_file(path: &Path) -> Result<WixTreeConfig, HarvestError> {
        if !path.is_file() {
            return Err(HarvestError::Precondition(format!(
                "config file '{}' does not exist",
                path.display()
            )));
        }
        Ok(MergeService::load_from_file(path)?)
    }
}
