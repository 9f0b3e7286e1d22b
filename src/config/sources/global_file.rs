//! Global config file: $XDG_CONFIG_HOME/attachprune/config.toml (optional).

use crate::config::xdg;
use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError, File, FileFormat};

pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let Ok(path) = xdg::global_config_path() else {
        tracing::debug!("No config home available; skipping global config file");
        return Ok(builder);
    };
    let Some(path_str) = path.to_str() else {
        return Ok(builder);
    };
    Ok(builder.add_source(File::new(path_str, FileFormat::Toml).required(false)))
}
