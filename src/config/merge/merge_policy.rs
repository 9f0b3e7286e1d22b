//! Built-in defaults seeding every config build.

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError};

/// Builder preloaded with defaults for keys that have no serde default.
pub fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default("sweep.move_banners_to_root", false)?
        .set_default("sweep.note_extension", "md")?
        .set_default("sweep.read_concurrency", 1_i64)?
        .set_default("sweep.delete_mode", "trash")
}
