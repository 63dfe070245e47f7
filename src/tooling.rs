//! Tooling & Integration Layer
//!
//! CLI commands and their text/JSON output.

pub mod cli;
pub mod format;

pub use cli::{Cli, CliContext, Commands, InputArgs};
