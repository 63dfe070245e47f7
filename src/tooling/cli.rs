//! CLI Tooling
//!
//! Command-line interface for manifest compilation and the helper tasks that
//! run next to it in installer builds.

use crate::config::{ConfigLoader, HarvestConfig, WixTreeConfig};
use crate::error::HarvestError;
use crate::harvest::inputs::{read_file_list, scan_directory};
use crate::harvest::HarvestRequest;
use crate::ident::{format_guid_braced, guid_from_string, FileIdMode};
use crate::logging::LoggingOverrides;
use crate::template::{apply_template, parse_replacement};
use crate::tooling::format::{format_harvest_summary_text, format_stable_ids_text};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;

/// wixtree - stable WiX component manifests from build file lists
#[derive(Parser)]
#[command(name = "wixtree")]
#[command(about = "Compile build file lists into WiX directory/component manifests with stable ids")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path (overrides wixtree.toml and the global config)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long, global = true)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file, file+stderr, both)
    #[arg(long, global = true)]
    pub log_output: Option<String>,

    /// Log file path (if output includes "file")
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// The `--log-*` flags; set values take precedence over environment and config.
    pub fn logging_overrides(&self) -> LoggingOverrides {
        LoggingOverrides {
            level: self.log_level.clone(),
            format: self.log_format.clone(),
            output: self.log_output.clone(),
            file: self.log_file.clone(),
        }
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Compile the file list into a manifest and write it
    Harvest {
        #[command(flatten)]
        inputs: InputArgs,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Print the stable directory and component ids without writing a manifest
    Ids {
        #[command(flatten)]
        inputs: InputArgs,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Hash a string to a braced GUID (first 16 bytes of SHA-256)
    Guid {
        /// String to hash
        value: String,
    },
    /// Replace literal markers in a template and write the target if it changed
    Template {
        /// Template file
        #[arg(long)]
        template: PathBuf,
        /// Target file
        #[arg(long)]
        target: PathBuf,
        /// Replacement, repeatable
        #[arg(long = "set", value_name = "MARKER=VALUE")]
        replacements: Vec<String>,
    },
}

/// Manifest inputs. Unset flags fall back to the `[harvest]` config table.
#[derive(Args, Debug, Clone, Default)]
pub struct InputArgs {
    /// Component files
    pub files: Vec<PathBuf>,

    /// Text file listing component files, one per line
    #[arg(long)]
    pub file_list: Option<PathBuf>,

    /// Collect every file below the base directory
    #[arg(long)]
    pub scan: bool,

    /// Manifest file to write
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Directory every component file must lie under
    #[arg(long)]
    pub base_dir: Option<PathBuf>,

    /// Id of the enclosing DirectoryRef element
    #[arg(long)]
    pub directory_ref: Option<String>,

    /// Id of the emitted ComponentGroup element
    #[arg(long)]
    pub component_group: Option<String>,

    /// Registry key for install-state markers (root\subkey)
    #[arg(long)]
    pub registry_key: Option<String>,

    /// Product upgrade code
    #[arg(long)]
    pub upgrade_code: Option<String>,

    /// How file ids are minted
    #[arg(long, value_enum)]
    pub file_ids: Option<FileIdMode>,
}

impl InputArgs {
    fn as_overrides(&self) -> HarvestConfig {
        HarvestConfig {
            base_directory: self.base_dir.clone(),
            output_file: self.output.clone(),
            directory_ref_id: self.directory_ref.clone(),
            component_group_id: self.component_group.clone(),
            registry_key: self.registry_key.clone(),
            upgrade_code: self.upgrade_code.clone(),
            file_ids: FileIdMode::default(),
        }
    }
}

/// CLI context: loaded configuration plus command dispatch.
pub struct CliContext {
    config: WixTreeConfig,
}

impl CliContext {
    /// Create a new CLI context
    pub fn new(project_root: PathBuf, config_path: Option<PathBuf>) -> Result<Self, HarvestError> {
        let config = match &config_path {
            Some(path) => ConfigLoader::load_from_file(path)?,
            None => ConfigLoader::load(&project_root)?,
        };
        Ok(CliContext { config })
    }

    /// Create a context from an already-loaded configuration.
    pub fn with_config(config: WixTreeConfig) -> Self {
        CliContext { config }
    }

    pub fn config(&self) -> &WixTreeConfig {
        &self.config
    }

    /// Execute a command and return the text to print.
    pub fn execute(&self, command: &Commands) -> Result<String, HarvestError> {
        match command {
            Commands::Harvest { inputs, format } => {
                check_format(format)?;
                let request = self.request(inputs)?;
                let summary = request.run()?;
                if format == "json" {
                    Ok(serde_json::to_string_pretty(&summary)?)
                } else {
                    Ok(format_harvest_summary_text(&summary))
                }
            }
            Commands::Ids { inputs, format } => {
                check_format(format)?;
                let request = self.request(inputs)?;
                let entries = request.stable_ids()?;
                if format == "json" {
                    Ok(serde_json::to_string_pretty(&entries)?)
                } else {
                    Ok(format_stable_ids_text(&entries))
                }
            }
            Commands::Guid { value } => Ok(format_guid_braced(&guid_from_string(value))),
            Commands::Template {
                template,
                target,
                replacements,
            } => {
                let replacements = replacements
                    .iter()
                    .map(|spec| parse_replacement(spec))
                    .collect::<Result<Vec<_>, _>>()?;
                let written = apply_template(template, target, &replacements)?;
                Ok(if written {
                    format!("Wrote {}", target.display())
                } else {
                    format!("{} is up to date", target.display())
                })
            }
        }
    }

    /// Merge CLI inputs over the config and collect the component files.
    fn request(&self, inputs: &InputArgs) -> Result<HarvestRequest, HarvestError> {
        let mut settings = self.config.harvest.clone().overlay(inputs.as_overrides());
        if let Some(mode) = inputs.file_ids {
            settings.file_ids = mode;
        }

        let mut files = inputs.files.clone();
        if let Some(list) = &inputs.file_list {
            files.extend(read_file_list(list)?);
        }
        if inputs.scan {
            let base = settings
                .base_directory
                .as_ref()
                .ok_or(HarvestError::MissingInput("base_directory"))?;
            files.extend(scan_directory(base, settings.output_file.as_deref())?);
        }
        info!(files = files.len(), "Collected component files");

        settings.into_request(files)
    }
}

fn check_format(format: &str) -> Result<(), HarvestError> {
    match format {
        "text" | "json" => Ok(()),
        other => Err(HarvestError::Precondition(format!(
            "unknown output format '{}' (must be 'text' or 'json')",
            other
        ))),
    }
}
