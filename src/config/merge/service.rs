//! MergeService: orchestrates sources, applies merge policy, deserializes to AppConfig.

use crate::config::sources::{environment, global_file, vault_file};
use crate::config::AppConfig;
use config::ConfigError;
use std::path::Path;

use super::merge_policy;

/// Merge service for config composition.
pub struct MergeService;

impl MergeService {
    /// Load config for a vault from standard sources.
    /// Precedence: defaults (lowest) -> global file -> vault file -> environment (highest).
    pub fn load(vault_root: &Path) -> Result<AppConfig, ConfigError> {
        let builder = merge_policy::builder_with_defaults()?;
        let builder = global_file::add_to_builder(builder)?;
        let builder = vault_file::add_to_builder(builder, vault_root)?;
        let builder = environment::add_to_builder(builder)?;

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// Load config from a specific file with environment overlay.
    pub fn load_from_file(path: &Path) -> Result<AppConfig, ConfigError> {
        use config::{File, FileFormat};

        let path_str = path.to_str().ok_or_else(|| {
            ConfigError::Message(format!("Config path is not valid UTF-8: {:?}", path))
        })?;
        let builder = merge_policy::builder_with_defaults()?;
        let builder = builder.add_source(File::new(path_str, FileFormat::Toml).required(true));
        let builder = environment::add_to_builder(builder)?;

        let config = builder.build()?;
        config.try_deserialize()
    }
}
