//! Logging System
//!
//! Structured logging using the `tracing` crate. Build tools capture stderr,
//! so the default is quiet (`warn`) text on stderr; level, format and
//! destination come from CLI flags, `WIXTREE_LOG*` variables, or the
//! `[logging]` config table.

use crate::error::HarvestError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing_subscriber::fmt::time::ChronoUtc;
use tracing_subscriber::fmt::writer::{BoxMakeWriter, MakeWriterExt};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

/// Resolve the log file path with precedence: CLI, WIXTREE_LOG_FILE env, config file, default.
pub fn resolve_log_file_path(
    cli_file: Option<PathBuf>,
    config_file: Option<PathBuf>,
) -> Result<PathBuf, HarvestError> {
    match select_log_file(cli_file, std::env::var("WIXTREE_LOG_FILE").ok(), config_file) {
        Some(path) => Ok(path),
        None => default_log_file_path(),
    }
}

fn select_log_file(
    cli_file: Option<PathBuf>,
    env_file: Option<String>,
    config_file: Option<PathBuf>,
) -> Option<PathBuf> {
    cli_file
        .filter(|p| !p.as_os_str().is_empty())
        .or_else(|| env_file.filter(|p| !p.is_empty()).map(PathBuf::from))
        .or_else(|| config_file.filter(|p| !p.as_os_str().is_empty()))
}

fn default_log_file_path() -> Result<PathBuf, HarvestError> {
    let project_dirs = directories::ProjectDirs::from("", "wixtree", "wixtree").ok_or_else(|| {
        HarvestError::Logging("Could not determine platform directories for log file".to_string())
    })?;
    let dir = project_dirs
        .state_dir()
        .unwrap_or_else(|| project_dirs.cache_dir());
    Ok(dir.join("wixtree.log"))
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Whether logging is enabled (default: true)
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Log level: trace, debug, info, warn, error, off
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format: json, text (default: text)
    #[serde(default = "default_format")]
    pub format: String,

    /// Output destination: stdout, stderr, file, file+stderr, both
    #[serde(default = "default_output")]
    pub output: String,

    /// Log file path when output includes file; None means use runtime default
    #[serde(default)]
    pub file: Option<PathBuf>,

    /// Enable colored output (text format only, stdout/stderr only)
    #[serde(default = "default_true")]
    pub color: bool,

    /// Module-specific log levels
    #[serde(default)]
    pub modules: HashMap<String, String>,
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_format() -> String {
    "text".to_string()
}

fn default_output() -> String {
    "stderr".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            level: default_log_level(),
            format: default_format(),
            output: default_output(),
            file: None,
            color: default_true(),
            modules: HashMap::new(),
        }
    }
}

/// Logging values given explicitly on the command line.
///
/// Unlike [`LoggingConfig`], every field is optional: a set field beats the
/// matching `WIXTREE_LOG*` variable, an unset one defers to it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoggingOverrides {
    pub level: Option<String>,
    pub format: Option<String>,
    pub output: Option<String>,
    pub file: Option<PathBuf>,
}

/// Initialize the global subscriber.
///
/// Priority order (highest to lowest):
/// 1. CLI arguments (`overrides`)
/// 2. Environment variables (WIXTREE_LOG, WIXTREE_LOG_FORMAT, ...)
/// 3. Configuration file
/// 4. Defaults
pub fn init_logging(config: &LoggingConfig, overrides: &LoggingOverrides) -> Result<(), HarvestError> {
    if !config.enabled {
        return Registry::default()
            .with(EnvFilter::new("off"))
            .with(fmt::layer().with_writer(std::io::sink))
            .try_init()
            .map_err(|e| HarvestError::Logging(e.to_string()));
    }

    let filter = build_env_filter(config, overrides)?;
    let format = resolve_format(
        overrides.format.as_deref(),
        std::env::var("WIXTREE_LOG_FORMAT").ok(),
        &config.format,
    )?;
    let output = resolve_output(
        overrides.output.as_deref(),
        std::env::var("WIXTREE_LOG_OUTPUT").ok(),
        &config.output,
    )?;
    let writer = make_writer(&output, overrides.file.clone(), config.file.clone())?;
    let use_color = config.color && !output.file;

    let base_subscriber = Registry::default().with(filter);
    let result = if format == "json" {
        base_subscriber
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_writer(writer),
            )
            .try_init()
    } else {
        base_subscriber
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_ansi(use_color)
                    .with_writer(writer),
            )
            .try_init()
    };
    result.map_err(|e| HarvestError::Logging(e.to_string()))
}

fn open_log_file(path: &Path) -> Result<std::fs::File, HarvestError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            HarvestError::Logging(format!("Failed to create log directory: {}", e))
        })?;
    }
    std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| HarvestError::Logging(format!("Failed to open log file {:?}: {}", path, e)))
}

fn make_writer(
    output: &OutputDestinations,
    cli_file: Option<PathBuf>,
    config_file: Option<PathBuf>,
) -> Result<BoxMakeWriter, HarvestError> {
    if output.file {
        let path = resolve_log_file_path(cli_file, config_file)?;
        let file = open_log_file(&path)?;
        if output.stderr {
            return Ok(BoxMakeWriter::new(
                std::sync::Mutex::new(file).and(std::io::stderr),
            ));
        }
        return Ok(BoxMakeWriter::new(std::sync::Mutex::new(file)));
    }
    Ok(match (output.stdout, output.stderr) {
        (true, true) => BoxMakeWriter::new(std::io::stdout.and(std::io::stderr)),
        (true, false) => BoxMakeWriter::new(std::io::stdout),
        _ => BoxMakeWriter::new(std::io::stderr),
    })
}

/// Where the base filter directive came from.
#[derive(Debug, PartialEq, Eq)]
enum DirectiveSource {
    Cli,
    Env,
    Config,
}

/// Pick the base filter directive: CLI level, then `WIXTREE_LOG`, then config.
fn select_directive(
    cli_level: Option<&str>,
    env_log: Option<String>,
    config_level: &str,
) -> (String, DirectiveSource) {
    if let Some(level) = cli_level {
        return (level.to_string(), DirectiveSource::Cli);
    }
    if let Some(env) = env_log.filter(|v| !v.trim().is_empty()) {
        return (env, DirectiveSource::Env);
    }
    (config_level.to_string(), DirectiveSource::Config)
}

/// Build environment filter from CLI, environment, or config
fn build_env_filter(
    config: &LoggingConfig,
    overrides: &LoggingOverrides,
) -> Result<EnvFilter, HarvestError> {
    let (directive, source) = select_directive(
        overrides.level.as_deref(),
        std::env::var("WIXTREE_LOG").ok(),
        &config.level,
    );

    if directive == "off" {
        return Ok(EnvFilter::new("off"));
    }
    let mut filter = EnvFilter::new(&directive);
    // A full WIXTREE_LOG directive already says everything about modules.
    if source == DirectiveSource::Env {
        return Ok(filter);
    }

    for (module, module_level) in &config.modules {
        let directive = format!("{}={}", module, module_level);
        filter = filter.add_directive(
            directive
                .parse()
                .map_err(|e| HarvestError::Logging(format!("Invalid log directive: {}", e)))?,
        );
    }

    if let Ok(modules_str) = std::env::var("WIXTREE_LOG_MODULES") {
        for module_spec in modules_str.split(',') {
            if let Some((module, level)) = module_spec.split_once('=') {
                let directive = format!("{}={}", module.trim(), level.trim());
                filter = filter.add_directive(directive.parse().map_err(|e| {
                    HarvestError::Logging(format!("Invalid log directive from env: {}", e))
                })?);
            }
        }
    }

    Ok(filter)
}

/// Resolve the output format: CLI, then a valid `WIXTREE_LOG_FORMAT`, then config.
fn resolve_format(
    cli_format: Option<&str>,
    env_format: Option<String>,
    config_format: &str,
) -> Result<String, HarvestError> {
    let chosen = match (cli_format, env_format) {
        (Some(cli), _) => cli.to_string(),
        (None, Some(env)) if env == "json" || env == "text" => env,
        _ => config_format.to_string(),
    };

    match chosen.as_str() {
        "json" | "text" => Ok(chosen),
        other => Err(HarvestError::Logging(format!(
            "Invalid log format: {} (must be 'json' or 'text')",
            other
        ))),
    }
}

/// Output destinations
#[derive(Debug)]
struct OutputDestinations {
    stdout: bool,
    stderr: bool,
    file: bool,
}

/// Resolve output destinations: CLI, then `WIXTREE_LOG_OUTPUT`, then config.
fn resolve_output(
    cli_output: Option<&str>,
    env_output: Option<String>,
    config_output: &str,
) -> Result<OutputDestinations, HarvestError> {
    if let Some(output) = cli_output {
        return parse_output_destinations(output);
    }
    if let Some(output) = env_output {
        return parse_output_destinations(&output);
    }
    parse_output_destinations(config_output)
}

fn parse_output_destinations(output: &str) -> Result<OutputDestinations, HarvestError> {
    let (stdout, stderr, file) = match output {
        "stdout" => (true, false, false),
        "stderr" => (false, true, false),
        "file" => (false, false, true),
        "file+stderr" => (false, true, true),
        "both" => (true, true, false),
        _ => {
            return Err(HarvestError::Logging(format!(
                "Invalid log output: {} (must be 'stdout', 'stderr', 'file', 'file+stderr', or 'both')",
                output
            )))
        }
    };
    Ok(OutputDestinations {
        stdout,
        stderr,
        file,
    })
}
