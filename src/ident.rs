//! Identifier generation.
//!
//! Two kinds of identifiers end up in a manifest. Directory and component
//! ids are *stable*: derived from the tree position plus the upgrade code and
//! registry key, so they survive rebuilds. File and remove-folder ids are
//! *unique*: minted fresh per element, because files are replaced wholesale
//! when their content changes.
//!
//! The 16-byte values are rendered in the byte order of a .NET
//! `Guid(byte[])` so ids match those produced by earlier MSBuild tooling.

use crate::types::GuidBytes;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

/// Derive a 16-byte identifier by folding a SHA-256 digest of `key`.
///
/// Every digest byte at position `i` is XORed into accumulator slot
/// `i % 16`, so all 32 digest bytes influence the result.
pub fn derive_id(key: &str) -> GuidBytes {
    let digest = Sha256::digest(key.as_bytes());
    let mut folded = [0u8; 16];
    for (i, byte) in digest.iter().enumerate() {
        folded[i % folded.len()] ^= byte;
    }
    folded
}

/// Standalone string-to-GUID hash: the first 16 bytes of SHA-256(`s`).
///
/// Not interchangeable with [`derive_id`]; both schemes have consumers that
/// depend on their exact output.
pub fn guid_from_string(s: &str) -> GuidBytes {
    let digest = Sha256::digest(s.as_bytes());
    let mut truncated = [0u8; 16];
    truncated.copy_from_slice(&digest[..16]);
    truncated
}

/// 32 lowercase hex digits, no braces or hyphens.
pub fn format_guid_simple(bytes: &GuidBytes) -> String {
    Uuid::from_bytes_le(*bytes).simple().to_string()
}

/// `{xxxxxxxx-xxxx-xxxx-xxxx-xxxxxxxxxxxx}`
pub fn format_guid_braced(bytes: &GuidBytes) -> String {
    Uuid::from_bytes_le(*bytes).braced().to_string()
}

/// Which structural element a stable id names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IdKind {
    Directory,
    Component,
}

impl IdKind {
    /// Three-character tag; doubles as the kind segment of the derivation key
    /// and as the leading characters of the element id.
    pub fn tag(self) -> &'static str {
        match self {
            IdKind::Directory => "dir",
            IdKind::Component => "cmp",
        }
    }
}

/// A derived directory or component identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StableId {
    kind: IdKind,
    guid: GuidBytes,
}

impl StableId {
    /// Derive the id for `kind` at `tree_path`.
    ///
    /// `tree_path` is empty at the root and `/`-prefixed below it
    /// (`/bin/plugins`). The derivation key is
    /// `{upgrade_code}/{registry_key}/{tag}/{tree_path}`.
    pub fn derive(upgrade_code: &str, registry_key: &str, kind: IdKind, tree_path: &str) -> Self {
        let key = format!("{}/{}/{}/{}", upgrade_code, registry_key, kind.tag(), tree_path);
        // Non-root keys contain `//`: tree_path brings its own leading slash.
        StableId {
            kind,
            guid: derive_id(&key),
        }
    }

    pub fn kind(&self) -> IdKind {
        self.kind
    }

    /// GUID text without tag, as used by a component's `Guid` attribute.
    pub fn guid(&self) -> String {
        format_guid_simple(&self.guid)
    }

    /// Schema identifier: tag followed by the GUID text, so it never starts
    /// with a digit.
    pub fn element_id(&self) -> String {
        format!("{}{}", self.kind.tag(), self.guid())
    }
}

/// Source of per-element unique identifiers.
pub trait UniqueIds {
    /// Mint a fresh id starting with `tag`.
    fn mint(&mut self, tag: &str) -> String;
}

/// Random v4 UUIDs; the default for real builds.
#[derive(Debug, Default)]
pub struct RandomIds;

impl UniqueIds for RandomIds {
    fn mint(&mut self, tag: &str) -> String {
        format!("{}{}", tag, Uuid::new_v4().simple())
    }
}

/// Counter-based ids, unique within one run and identical across runs.
#[derive(Debug, Default)]
pub struct SequentialIds {
    next: u128,
}

impl UniqueIds for SequentialIds {
    fn mint(&mut self, tag: &str) -> String {
        self.next += 1;
        format!("{}{:032x}", tag, self.next)
    }
}

/// How file and remove-folder ids are minted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum FileIdMode {
    #[default]
    Random,
    Sequential,
}

impl FileIdMode {
    pub fn source(self) -> Box<dyn UniqueIds> {
        match self {
            FileIdMode::Random => Box::new(RandomIds),
            FileIdMode::Sequential => Box::new(SequentialIds::default()),
        }
    }
}
