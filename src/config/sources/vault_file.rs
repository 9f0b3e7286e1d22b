//! Vault config file: <vault>/.attachprune.toml (optional).

use crate::config::persist::VAULT_CONFIG_FILE;
use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError, File, FileFormat};
use std::path::Path;

pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
    vault_root: &Path,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let path = vault_root.join(VAULT_CONFIG_FILE);
    let path_str = path.to_str().ok_or_else(|| {
        ConfigError::Message(format!("Vault path is not valid UTF-8: {:?}", vault_root))
    })?;
    Ok(builder.add_source(File::new(path_str, FileFormat::Toml).required(false)))
}
