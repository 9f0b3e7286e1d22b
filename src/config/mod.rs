//! Configuration
//!
//! Layered configuration (defaults, global file, vault file, environment) and
//! the persisted settings toggle.

mod facade;
mod merge;
mod paths;
mod persist;
mod sources;

pub use facade::ConfigLoader;
pub use paths::xdg_root as xdg;
pub use persist::{SettingKey, SettingsStore, VAULT_CONFIG_FILE};

use crate::classify::ClassifyOptions;
use crate::error::ApiError;
use crate::logging::LoggingConfig;
use crate::types::DEFAULT_NOTE_EXTENSION;
use crate::vault::DeleteMode;
use serde::{Deserialize, Serialize};

/// Prefix of environment overrides, e.g. `ATTACHPRUNE__SWEEP__MOVE_BANNERS_TO_ROOT`.
pub const ENV_PREFIX: &str = "ATTACHPRUNE";

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub sweep: SweepSettings,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Settings for classification and removal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SweepSettings {
    /// Move `banner*` attachments into the root `attachments/` folder.
    #[serde(default)]
    pub move_banners_to_root: bool,

    /// Extension of note documents (default: md)
    #[serde(default = "default_note_extension")]
    pub note_extension: String,

    /// Note reads in flight per attachment (default: 1)
    #[serde(default = "default_read_concurrency")]
    pub read_concurrency: usize,

    #[serde(default)]
    pub delete_mode: DeleteMode,
}

fn default_note_extension() -> String {
    DEFAULT_NOTE_EXTENSION.to_string()
}

fn default_read_concurrency() -> usize {
    1
}

impl Default for SweepSettings {
    fn default() -> Self {
        Self {
            move_banners_to_root: false,
            note_extension: default_note_extension(),
            read_concurrency: default_read_concurrency(),
            delete_mode: DeleteMode::default(),
        }
    }
}

impl SweepSettings {
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.read_concurrency == 0 {
            return Err(ApiError::ConfigError(
                "sweep.read_concurrency must be at least 1".to_string(),
            ));
        }
        let ext = self.note_extension.trim();
        if ext.is_empty() || ext.starts_with('.') || ext.contains('/') {
            return Err(ApiError::ConfigError(format!(
                "Invalid sweep.note_extension: {:?} (expected an extension like \"md\")",
                self.note_extension
            )));
        }
        Ok(())
    }
}

impl From<&SweepSettings> for ClassifyOptions {
    fn from(settings: &SweepSettings) -> Self {
        ClassifyOptions {
            relocate_banners_to_root: settings.move_banners_to_root,
            note_extension: settings.note_extension.trim().to_ascii_lowercase(),
            read_concurrency: settings.read_concurrency,
        }
    }
}
