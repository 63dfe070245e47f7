//! Builder seeded with defaults; later sources override earlier ones.

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError};

pub fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default("harvest.file_ids", "random")?
        .set_default("logging.level", "warn")?
        .set_default("logging.output", "stderr")
}
