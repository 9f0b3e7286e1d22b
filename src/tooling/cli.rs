//! CLI Tooling
//!
//! Command-line interface for scanning a vault, cleaning unused attachments,
//! and managing persisted settings.

use crate::classify::{compute_unused_and_relocations, ClassifyOptions};
use crate::config::{AppConfig, ConfigLoader, SettingKey, SettingsStore};
use crate::error::ApiError;
use crate::format::{format_plan_text, format_report_text, format_settings_text, summarize_plan};
use crate::logging::LoggingConfig;
use crate::sweep::{run_sweep, AssumeAnswer, Confirmer, DialoguerConfirmer};
use crate::vault::{DeleteMode, FileLister, FsVault};
use clap::{Parser, Subcommand};
use serde_json::json;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::info;

/// Attachprune CLI - remove attachments no sibling note references
#[derive(Parser)]
#[command(name = "attachprune")]
#[command(about = "Find and remove attachment files that no sibling note references")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Vault root directory
    #[arg(long, default_value = ".")]
    pub vault: PathBuf,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging (debug level)
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file, file+stderr, both)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output includes "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Apply logging flags on top of the configured logging section.
    pub fn logging_config(&self, base: &LoggingConfig) -> LoggingConfig {
        let mut config = base.clone();
        if self.verbose {
            config.level = "debug".to_string();
        }
        if let Some(level) = &self.log_level {
            config.level = level.clone();
        }
        if let Some(format) = &self.log_format {
            config.format = format.clone();
        }
        if let Some(output) = &self.log_output {
            config.output = output.clone();
        }
        if let Some(file) = &self.log_file {
            config.file = Some(file.clone());
        }
        config
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Classify attachments and report unused ones (never modifies the vault)
    Scan {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
        /// Also list attachments that are in use
        #[arg(long)]
        include_used: bool,
    },
    /// Relocate banners and delete unused attachments after confirmation
    Clean {
        /// Skip the confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
        /// Report what would happen without moving or deleting anything
        #[arg(long)]
        dry_run: bool,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Show or change persisted settings
    Settings {
        #[command(subcommand)]
        command: SettingsCommands,
    },
}

#[derive(Subcommand)]
pub enum SettingsCommands {
    /// Show effective settings
    Show {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Persist a setting in the vault config file
    Set {
        /// Setting name (move-banners-to-root)
        key: String,
        /// New value (true or false)
        value: String,
    },
}

/// CLI context for one vault
pub struct CliContext {
    vault: FsVault,
    config: AppConfig,
    config_path: Option<PathBuf>,
}

impl CliContext {
    /// Create a new CLI context: load config, then open the vault.
    pub fn new(vault_root: PathBuf, config_path: Option<PathBuf>) -> Result<Self, ApiError> {
        let config = if let Some(cfg_path) = &config_path {
            ConfigLoader::load_from_file(cfg_path)?
        } else {
            ConfigLoader::load(&vault_root)?
        };
        let vault = FsVault::open(&vault_root, config.sweep.delete_mode)?;
        Ok(Self {
            vault,
            config,
            config_path,
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn vault_root(&self) -> &Path {
        self.vault.root()
    }

    /// Execute a CLI command, prompting on the terminal when confirmation is needed.
    pub async fn execute(&self, command: &Commands) -> Result<String, ApiError> {
        self.execute_with(command, &DialoguerConfirmer).await
    }

    /// Execute a CLI command with a caller-supplied confirmer.
    pub async fn execute_with(
        &self,
        command: &Commands,
        confirmer: &dyn Confirmer,
    ) -> Result<String, ApiError> {
        let started = Instant::now();
        info!(command = command_name(command), vault = %self.vault.root().display(), "Executing command");
        let result = match command {
            Commands::Scan {
                format,
                include_used,
            } => self.handle_scan(format, *include_used).await,
            Commands::Clean {
                yes,
                dry_run,
                format,
            } => {
                if *yes {
                    self.handle_clean(format, *dry_run, &AssumeAnswer(true)).await
                } else {
                    self.handle_clean(format, *dry_run, confirmer).await
                }
            }
            Commands::Settings { command } => match command {
                SettingsCommands::Show { format } => self.handle_settings_show(format),
                SettingsCommands::Set { key, value } => self.handle_settings_set(key, value),
            },
        };
        info!(
            command = command_name(command),
            ok = result.is_ok(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Command finished"
        );
        result
    }

    fn classify_options(&self) -> ClassifyOptions {
        ClassifyOptions::from(&self.config.sweep)
    }

    async fn handle_scan(&self, format: &str, include_used: bool) -> Result<String, ApiError> {
        let json_output = parse_format(format)?;
        let files = self.vault.list_files()?;
        let plan =
            compute_unused_and_relocations(&files, &self.vault, &self.classify_options()).await;
        info!("Scan result: {}", summarize_plan(&plan));
        if json_output {
            serde_json::to_string_pretty(&plan)
                .map_err(|e| ApiError::ConfigError(format!("Failed to serialize plan: {}", e)))
        } else {
            Ok(format_plan_text(&plan, include_used))
        }
    }

    async fn handle_clean(
        &self,
        format: &str,
        dry_run: bool,
        confirmer: &dyn Confirmer,
    ) -> Result<String, ApiError> {
        let json_output = parse_format(format)?;
        let report = run_sweep(&self.vault, confirmer, &self.classify_options(), dry_run).await?;
        info!(
            moved = report.moved_count(),
            deleted = report.deleted_count(),
            failures = report.has_failures(),
            "Sweep finished"
        );
        if json_output {
            serde_json::to_string_pretty(&report)
                .map_err(|e| ApiError::ConfigError(format!("Failed to serialize report: {}", e)))
        } else {
            Ok(format_report_text(&report))
        }
    }

    fn handle_settings_show(&self, format: &str) -> Result<String, ApiError> {
        let json_output = parse_format(format)?;
        let source = SettingsStore::resolve(self.vault.root(), self.config_path.as_deref())
            .path()
            .display()
            .to_string();
        if json_output {
            serde_json::to_string_pretty(&json!({
                "settings": self.config.sweep,
                "source": source,
            }))
            .map_err(|e| ApiError::ConfigError(format!("Failed to serialize settings: {}", e)))
        } else {
            Ok(format_settings_text(&self.config.sweep, &source))
        }
    }

    fn handle_settings_set(&self, key: &str, value: &str) -> Result<String, ApiError> {
        apply_setting(self.vault.root(), self.config_path.as_deref(), key, value)
    }
}

/// Persist one setting into the file the effective config is loaded from.
///
/// Needs no loaded config, so a config file that fails to load can still be
/// repaired from the command line.
pub fn apply_setting(
    vault_root: &Path,
    config_path: Option<&Path>,
    key: &str,
    value: &str,
) -> Result<String, ApiError> {
    let key: SettingKey = key.parse()?;
    let value = SettingsStore::parse_bool(value)?;
    let vault = FsVault::open(vault_root, DeleteMode::default())?;
    let store = SettingsStore::resolve(vault.root(), config_path);
    store.set_bool(key, value)?;
    Ok(format!(
        "Set {} = {} in {}",
        key.as_str(),
        value,
        store.path().display()
    ))
}

fn parse_format(format: &str) -> Result<bool, ApiError> {
    match format {
        "json" => Ok(true),
        "text" => Ok(false),
        _ => Err(ApiError::ConfigError(format!(
            "Invalid format: {} (must be 'text' or 'json')",
            format
        ))),
    }
}

fn command_name(command: &Commands) -> &'static str {
    match command {
        Commands::Scan { .. } => "scan",
        Commands::Clean { .. } => "clean",
        Commands::Settings { command } => match command {
            SettingsCommands::Show { .. } => "settings.show",
            SettingsCommands::Set { .. } => "settings.set",
        },
    }
}
