//! Environment variable overrides for configuration.
//!
//! Supports overriding config values with environment variables:
//! - `BRIDGEKEEPER_TRAVELERS` - Number of travelers
//! - `BRIDGEKEEPER_SEED` - RNG seed for reproducible runs
//! - `BRIDGEKEEPER_CROSSING_MIN` / `BRIDGEKEEPER_CROSSING_MAX` - Crossing time bounds (seconds)
//! - `BRIDGEKEEPER_ARRIVAL_MIN` / `BRIDGEKEEPER_ARRIVAL_MAX` - Arrival delay bounds (seconds)

use std::env;
use std::str::FromStr;

use tracing::warn;

use crate::config::types::Config;

/// Environment variable prefix for all config overrides.
const ENV_PREFIX: &str = "BRIDGEKEEPER";

/// Read and parse `BRIDGEKEEPER_<suffix>`, ignoring values that don't parse.
fn parsed_var<T: FromStr>(suffix: &str) -> Option<T> {
    let name = format!("{}_{}", ENV_PREFIX, suffix);
    let raw = env::var(&name).ok()?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!("Ignoring {}: '{}' is not a valid value", name, raw);
            None
        }
    }
}

/// Apply environment variable overrides to a config.
pub fn apply_env_overrides(mut config: Config) -> Config {
    let sim = &mut config.simulation;

    if let Some(travelers) = parsed_var("TRAVELERS") {
        sim.travelers = travelers;
    }
    if let Some(seed) = parsed_var("SEED") {
        sim.seed = Some(seed);
    }

    if let Some(min) = parsed_var("CROSSING_MIN") {
        sim.crossing_secs.min = min;
    }
    if let Some(max) = parsed_var("CROSSING_MAX") {
        sim.crossing_secs.max = max;
    }
    if let Some(min) = parsed_var("ARRIVAL_MIN") {
        sim.arrival_delay_secs.min = min;
    }
    if let Some(max) = parsed_var("ARRIVAL_MAX") {
        sim.arrival_delay_secs.max = max;
    }

    config
}

/// Get the config file path from environment or use default.
///
/// Checks `BRIDGEKEEPER_CONFIG` environment variable, otherwise returns "bridgekeeper.conf".
pub fn get_config_path() -> String {
    env::var(format!("{}_CONFIG", ENV_PREFIX)).unwrap_or_else(|_| "bridgekeeper.conf".to_string())
}
