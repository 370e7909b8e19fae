//! Configuration validation.
//!
//! Validates configuration values and provides helpful error messages.

use crate::common::error::ConfigError;
use crate::config::types::{Config, SecondsRange};

const MAX_TRAVELERS: usize = 10_000;
const MAX_CROSSING_SECS: u64 = 3600;
const MAX_ARRIVAL_DELAY_SECS: u64 = 3600;

fn check_range(name: &str, range: &SecondsRange, errors: &mut Vec<String>) {
    if range.min > range.max {
        errors.push(format!(
            "{}.min ({}) must not exceed {}.max ({})",
            name, range.min, name, range.max
        ));
    }
}

/// Validate a configuration and return detailed errors.
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    let mut errors = Vec::new();
    let sim = &config.simulation;

    if sim.travelers == 0 {
        errors.push("simulation.travelers must be at least 1".to_string());
    }
    if sim.travelers > MAX_TRAVELERS {
        errors.push(format!(
            "simulation.travelers must be at most {} (got {})",
            MAX_TRAVELERS, sim.travelers
        ));
    }

    check_range("simulation.crossing_secs", &sim.crossing_secs, &mut errors);
    if sim.crossing_secs.max > MAX_CROSSING_SECS {
        errors.push(format!(
            "simulation.crossing_secs.max must be at most {} (got {})",
            MAX_CROSSING_SECS, sim.crossing_secs.max
        ));
    }

    check_range("simulation.arrival_delay_secs", &sim.arrival_delay_secs, &mut errors);
    if sim.arrival_delay_secs.max > MAX_ARRIVAL_DELAY_SECS {
        errors.push(format!(
            "simulation.arrival_delay_secs.max must be at most {} (got {})",
            MAX_ARRIVAL_DELAY_SECS, sim.arrival_delay_secs.max
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError {
            message: errors.join("\n"),
        })
    }
}
