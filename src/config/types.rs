//! Configuration type definitions.

use std::time::Duration;

use rand::Rng;
use serde::Deserialize;

/// Root configuration structure.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub simulation: SimulationConfig,
}

/// Traveler generation settings for a simulation run.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Number of travelers to spawn.
    pub travelers: usize,
    /// Time spent on the bridge, whole seconds, both bounds inclusive.
    pub crossing_secs: SecondsRange,
    /// Delay before each traveler sets off, upper bound exclusive.
    pub arrival_delay_secs: SecondsRange,
    /// Fixed RNG seed for reproducible runs.
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            travelers: 10,
            crossing_secs: SecondsRange { min: 1, max: 3 },
            arrival_delay_secs: SecondsRange { min: 0, max: 3 },
            seed: None,
        }
    }
}

/// A `[min, max]` span of seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct SecondsRange {
    pub min: u64,
    pub max: u64,
}

impl SecondsRange {
    /// Whole seconds in `min..=max`.
    pub fn sample_whole<R: Rng + ?Sized>(&self, rng: &mut R) -> Duration {
        Duration::from_secs(rng.gen_range(self.min..=self.max))
    }

    /// Milliseconds in `min..max`, or exactly `min` when the span is empty.
    pub fn sample_millis<R: Rng + ?Sized>(&self, rng: &mut R) -> Duration {
        let (low, high) = (self.min.saturating_mul(1000), self.max.saturating_mul(1000));
        if low >= high {
            return Duration::from_millis(low);
        }
        Duration::from_millis(rng.gen_range(low..high))
    }
}
