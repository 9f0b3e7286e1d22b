//! Persisted settings: read-modify-write of the vault config file.

use crate::error::ApiError;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Vault-local config file name. Hidden, so sweeps never list it.
pub const VAULT_CONFIG_FILE: &str = ".attachprune.toml";

/// Settings that can be toggled and persisted from the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingKey {
    MoveBannersToRoot,
}

impl SettingKey {
    /// Table and key inside the config file.
    fn location(self) -> (&'static str, &'static str) {
        match self {
            SettingKey::MoveBannersToRoot => ("sweep", "move_banners_to_root"),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SettingKey::MoveBannersToRoot => "move-banners-to-root",
        }
    }
}

impl FromStr for SettingKey {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "move-banners-to-root" => Ok(SettingKey::MoveBannersToRoot),
            _ => Err(ApiError::ConfigError(format!(
                "Unknown setting: {}. Must be move-banners-to-root",
                s
            ))),
        }
    }
}

/// Writes individual settings into a TOML config file, keeping other keys.
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    /// Store backed by `<vault>/.attachprune.toml`.
    pub fn for_vault(vault_root: &Path) -> Self {
        Self::at(vault_root.join(VAULT_CONFIG_FILE))
    }

    /// Store backed by an explicit config file.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store that the effective config reads from: the explicit file when one
    /// was given, otherwise the vault file.
    pub fn resolve(vault_root: &Path, config_path: Option<&Path>) -> Self {
        match config_path {
            Some(path) => Self::at(path),
            None => Self::for_vault(vault_root),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parse a boolean the way users type it.
    pub fn parse_bool(value: &str) -> Result<bool, ApiError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "true" | "on" | "yes" | "1" => Ok(true),
            "false" | "off" | "no" | "0" => Ok(false),
            other => Err(ApiError::ConfigError(format!(
                "Invalid boolean value: {} (use true or false)",
                other
            ))),
        }
    }

    /// Persist `value` for `key`.
    pub fn set_bool(&self, key: SettingKey, value: bool) -> Result<(), ApiError> {
        let mut document = self.read_table()?;
        let (section, field) = key.location();
        let table = document
            .entry(section.to_string())
            .or_insert(toml::Value::Table(toml::Table::new()));
        let toml::Value::Table(table) = table else {
            return Err(ApiError::ConfigError(format!(
                "[{}] in {} is not a table",
                section,
                self.path.display()
            )));
        };
        table.insert(field.to_string(), toml::Value::Boolean(value));

        let content = toml::to_string_pretty(&document).map_err(|e| {
            ApiError::ConfigError(format!("Failed to serialize settings: {}", e))
        })?;
        std::fs::write(&self.path, content).map_err(|e| {
            ApiError::ConfigError(format!(
                "Failed to write settings to {}: {}",
                self.path.display(),
                e
            ))
        })?;
        tracing::info!(key = key.as_str(), value, path = %self.path.display(), "Saved setting");
        Ok(())
    }

    fn read_table(&self) -> Result<toml::Table, ApiError> {
        if !self.path.exists() {
            return Ok(toml::Table::new());
        }
        let content = std::fs::read_to_string(&self.path).map_err(|e| {
            ApiError::ConfigError(format!(
                "Failed to read settings {}: {}",
                self.path.display(),
                e
            ))
        })?;
        toml::from_str(&content).map_err(|e| {
            ApiError::ConfigError(format!(
                "Failed to parse settings {}: {}",
                self.path.display(),
                e
            ))
        })
    }
}
