//! Core types shared across the manifest compiler.

use crate::error::HarvestError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Raw 128-bit identifier value, in the byte order of a .NET `Guid(byte[])`.
pub type GuidBytes = [u8; 16];

/// Registry location written into every install-detection marker.
///
/// Parsed from `root\subkey`; only the first backslash splits, so the subkey
/// may itself contain backslashes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryKey {
    raw: String,
    root: String,
    key: String,
}

impl RegistryKey {
    pub fn parse(raw: &str) -> Result<Self, HarvestError> {
        match raw.split_once('\\') {
            Some((root, key)) if !root.is_empty() && !key.is_empty() => Ok(RegistryKey {
                raw: raw.to_string(),
                root: root.to_string(),
                key: key.to_string(),
            }),
            _ => Err(HarvestError::InvalidRegistryKey(raw.to_string())),
        }
    }

    /// The key exactly as supplied; this is the form fed into id derivation.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn root(&self) -> &str {
        &self.root
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}

impl fmt::Display for RegistryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// ComponentRecord: one emitted component awaiting a group reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComponentRecord {
    pub id: String,
}
