//! ConfigLoader facade delegating to merge service.

use super::merge::service::MergeService;
use super::AppConfig;
use crate::error::ApiError;
use std::path::Path;

/// Configuration loader facade.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration for a vault from files and environment.
    pub fn load(vault_root: &Path) -> Result<AppConfig, ApiError> {
        let config = MergeService::load(vault_root)?;
        config.sweep.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file.
    pub fn load_from_file(path: &Path) -> Result<AppConfig, ApiError> {
        let config = MergeService::load_from_file(path)?;
        config.sweep.validate()?;
        Ok(config)
    }
}
