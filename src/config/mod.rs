//! Configuration parsing and types.

pub mod env;
pub mod parser;
pub mod types;
pub mod validate;

use std::path::Path;

use tracing::info;

use crate::common::error::ConfigResult;

pub use parser::load_config;
pub use types::*;

/// Load the config file (defaults if it doesn't exist), apply environment
/// overrides, then validate.
pub fn load_and_validate(path: impl AsRef<Path>) -> ConfigResult<Config> {
    let path = path.as_ref();

    let config = if path.exists() {
        load_config(path)?
    } else {
        info!("No config file at {}, using defaults", path.display());
        Config::default()
    };

    let config = env::apply_env_overrides(config);
    validate::validate_config(&config)?;
    Ok(config)
}
