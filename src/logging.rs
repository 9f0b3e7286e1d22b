//! Logging System
//!
//! Structured logging built on `tracing`. Level, format, and destination come
//! from the config file, `ATTACHPRUNE_LOG*` environment variables, and CLI flags.

use crate::error::ApiError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::fmt::time::ChronoUtc;
use tracing_subscriber::fmt::writer::{BoxMakeWriter, MakeWriterExt};
use tracing::Dispatch;
use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter, Registry};

/// Resolve the log file path with precedence: CLI, ATTACHPRUNE_LOG_FILE env, config file, default.
///
/// Default uses the `ProjectDirs` state directory, optionally namespaced by vault path.
pub fn resolve_log_file_path(
    cli_file: Option<PathBuf>,
    config_file: Option<PathBuf>,
    vault: Option<&Path>,
) -> Result<PathBuf, ApiError> {
    if let Some(p) = cli_file.filter(|p| !p.as_os_str().is_empty()) {
        return Ok(p);
    }
    if let Ok(env_path) = std::env::var("ATTACHPRUNE_LOG_FILE") {
        if !env_path.is_empty() {
            return Ok(PathBuf::from(env_path));
        }
    }
    if let Some(p) = config_file.filter(|p| !p.as_os_str().is_empty()) {
        return Ok(p);
    }
    default_log_file_path(vault)
}

fn default_log_file_path(vault: Option<&Path>) -> Result<PathBuf, ApiError> {
    let project_dirs = directories::ProjectDirs::from("", "attachprune", "attachprune")
        .ok_or_else(|| {
            ApiError::ConfigError(
                "Could not determine platform state directory for log file".to_string(),
            )
        })?;
    let mut dir = project_dirs
        .state_dir()
        .unwrap_or_else(|| project_dirs.data_local_dir())
        .to_path_buf();
    if let Some(vault) = vault {
        let canonical = dunce::canonicalize(vault).map_err(|e| {
            ApiError::ConfigError(format!("Failed to canonicalize vault path: {}", e))
        })?;
        for component in canonical.components() {
            if let Component::Normal(name) = component {
                dir = dir.join(name);
            }
        }
    }
    Ok(dir.join("attachprune.log"))
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

/// Initialize the global subscriber.
///
/// Environment variables (ATTACHPRUNE_LOG, ATTACHPRUNE_LOG_FORMAT, ATTACHPRUNE_LOG_OUTPUT)
/// take priority over `config`; missing config means defaults.
pub fn init_logging(config: Option<&LoggingConfig>) -> Result<(), ApiError> {
    let dispatch = build_dispatch(config)?;
    tracing::dispatcher::set_global_default(dispatch)
        .map_err(|e| ApiError::ConfigError(format!("Failed to initialize logging: {}", e)))
}

/// Run `f` with a subscriber scoped to the current thread.
///
/// Used while the config file is still being loaded, before the global
/// subscriber can be built from it.
pub fn with_bootstrap_logging<T>(
    config: &LoggingConfig,
    f: impl FnOnce() -> Result<T, ApiError>,
) -> Result<T, ApiError> {
    let dispatch = build_dispatch(Some(config))?;
    tracing::dispatcher::with_default(&dispatch, f)
}

fn build_dispatch(config: Option<&LoggingConfig>) -> Result<Dispatch, ApiError> {
    if config.map(|c| !c.enabled).unwrap_or(false) {
        return Ok(Dispatch::new(Registry::default().with(EnvFilter::new("off"))));
    }

    let filter = build_env_filter(config)?;
    let format = determine_format(config)?;
    let output = determine_output(config)?;
    let use_color = config.map(|c| c.color).unwrap_or(true) && !output.file;
    let writer = build_writer(&output, config)?;

    let subscriber = Registry::default().with(filter);
    Ok(if format == "json" {
        Dispatch::new(
            subscriber.with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_writer(writer),
            ),
        )
    } else {
        Dispatch::new(
            subscriber.with(
                fmt::layer()
                    .with_target(true)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_ansi(use_color)
                    .with_writer(writer),
            ),
        )
    })
}

fn build_writer(
    output: &OutputDestinations,
    config: Option<&LoggingConfig>,
) -> Result<BoxMakeWriter, ApiError> {
    if output.file {
        let file = Mutex::new(open_log_file(config.and_then(|c| c.file.clone()))?);
        return Ok(if output.stderr {
            BoxMakeWriter::new(file.and(std::io::stderr))
        } else {
            BoxMakeWriter::new(file)
        });
    }
    Ok(match (output.stdout, output.stderr) {
        (true, true) => BoxMakeWriter::new(std::io::stdout.and(std::io::stderr)),
        (true, false) => BoxMakeWriter::new(std::io::stdout),
        _ => BoxMakeWriter::new(std::io::stderr),
    })
}

fn open_log_file(config_file: Option<PathBuf>) -> Result<std::fs::File, ApiError> {
    let log_file = resolve_log_file_path(None, config_file, None)?;
    if let Some(parent) = log_file.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            ApiError::ConfigError(format!("Failed to create log directory: {}", e))
        })?;
    }
    std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_file)
        .map_err(|e| ApiError::ConfigError(format!("Failed to open log file {:?}: {}", log_file, e)))
}

/// Build environment filter from config or environment variables
fn build_env_filter(config: Option<&LoggingConfig>) -> Result<EnvFilter, ApiError> {
    if let Ok(filter) = EnvFilter::try_from_env("ATTACHPRUNE_LOG") {
        return Ok(filter);
    }

    let level = config.map(|c| c.level.as_str()).unwrap_or("warn");
    if level == "off" {
        return Ok(EnvFilter::new("off"));
    }

    let mut filter = EnvFilter::new(level);
    if let Some(config) = config {
        for (module, module_level) in &config.modules {
            let directive = format!("{}={}", module, module_level);
            filter = filter.add_directive(
                directive
                    .parse()
                    .map_err(|e| ApiError::ConfigError(format!("Invalid log directive: {}", e)))?,
            );
        }
    }
    Ok(filter)
}

/// Determine output format from config or environment
fn determine_format(config: Option<&LoggingConfig>) -> Result<String, ApiError> {
    if let Ok(format) = std::env::var("ATTACHPRUNE_LOG_FORMAT") {
        if format == "json" || format == "text" {
            return Ok(format);
        }
    }

    let format = config.map(|c| c.format.as_str()).unwrap_or("text");
    if format != "json" && format != "text" {
        return Err(ApiError::ConfigError(format!(
            "Invalid log format: {} (must be 'json' or 'text')",
            format
        )));
    }
    Ok(format.to_string())
}

/// Output destinations
#[derive(Debug, PartialEq, Eq)]
struct OutputDestinations {
    stdout: bool,
    stderr: bool,
    file: bool,
}

fn determine_output(config: Option<&LoggingConfig>) -> Result<OutputDestinations, ApiError> {
    if let Ok(output) = std::env::var("ATTACHPRUNE_LOG_OUTPUT") {
        return parse_output_destinations(&output);
    }
    parse_output_destinations(config.map(|c| c.output.as_str()).unwrap_or("stderr"))
}

fn parse_output_destinations(output: &str) -> Result<OutputDestinations, ApiError> {
    let (stdout, stderr, file) = match output {
        "stdout" => (true, false, false),
        "stderr" => (false, true, false),
        "file" => (false, false, true),
        "file+stderr" => (false, true, true),
        "both" => (true, true, false),
        _ => {
            return Err(ApiError::ConfigError(format!(
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
