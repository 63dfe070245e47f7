//! Error types for manifest compilation.
//!
//! Every error is fatal for the invocation that raised it; nothing in the
//! pipeline retries or emits a partial manifest.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while compiling a file list into a manifest.
#[derive(Debug, Error)]
pub enum HarvestError {
    /// A required input was not supplied by the CLI, config file, or environment.
    #[error("Missing required input: {0}")]
    MissingInput(&'static str),

    /// An input was supplied but is unusable (empty, non-UTF-8, ...).
    #[error("Invalid input: {0}")]
    Precondition(String),

    #[error("Registry key '{0}' must have the form 'root\\subkey'")]
    InvalidRegistryKey(String),

    #[error("{} is not below {}", path.display(), base.display())]
    Containment { path: PathBuf, base: PathBuf },

    #[error("Structural conflict at '{tree_path}': {reason}")]
    StructuralConflict { tree_path: String, reason: String },

    #[error("Component group '{0}' would contain no components")]
    EmptyComponentGroup(String),

    #[error("I/O error on '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Logging error: {0}")]
    Logging(String),
}

impl HarvestError {
    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        HarvestError::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn conflict(tree_path: &str, reason: impl Into<String>) -> Self {
        HarvestError::StructuralConflict {
            tree_path: tree_path.to_string(),
            reason: reason.into(),
        }
    }
}
