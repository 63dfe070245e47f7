//! Environment variable source: WIXTREE__* prefix with __ separator

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;
use config::Environment;

/// Add environment variable overlay to builder.
/// `WIXTREE__HARVEST__UPGRADE_CODE` sets `harvest.upgrade_code`.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let builder = builder.add_source(
        Environment::with_prefix("WIXTREE")
            .prefix_separator("__")
            .separator("__"),
    );
    Ok(builder)
}
