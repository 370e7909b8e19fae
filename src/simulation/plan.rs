//! Random traveler generation.

use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::common::{Direction, TravelerId};
use crate::config::types::SimulationConfig;

/// Everything a traveler task needs to know before it sets off.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TravelerPlan {
    pub id: TravelerId,
    pub direction: Direction,
    /// Pause before this traveler's task is started.
    pub arrival_delay: Duration,
    /// How long the traveler stays on the bridge.
    pub crossing: Duration,
}

/// RNG for a run: seeded when the config asks for reproducibility.
pub fn rng_for(config: &SimulationConfig) -> StdRng {
    match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Draw a plan for every traveler, numbered from 1.
pub fn plan_travelers<R: Rng + ?Sized>(
    config: &SimulationConfig,
    rng: &mut R,
) -> Vec<TravelerPlan> {
    let mut plans = Vec::with_capacity(config.travelers);
    for n in 1..=config.travelers {
        let direction: Direction = rng.gen();
        let arrival_delay = config.arrival_delay_secs.sample_millis(&mut *rng);
        let crossing = config.crossing_secs.sample_whole(&mut *rng);
        plans.push(TravelerPlan {
            id: n as TravelerId,
            direction,
            arrival_delay,
            crossing,
        });
    }
    plans
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded_config(seed: u64) -> SimulationConfig {
        SimulationConfig {
            travelers: 20,
            seed: Some(seed),
            ..SimulationConfig::default()
        }
    }

    #[test]
    fn test_plan_numbers_travelers_from_one() {
        let config = seeded_config(11);
        let plans = plan_travelers(&config, &mut rng_for(&config));

        let ids: Vec<_> = plans.iter().map(|p| p.id).collect();
        assert_eq!(ids, (1..=20).collect::<Vec<TravelerId>>());
    }

    #[test]
    fn test_plan_respects_ranges() {
        let config = seeded_config(12);
        for plan in plan_travelers(&config, &mut rng_for(&config)) {
            assert!(plan.crossing >= Duration::from_secs(1));
            assert!(plan.crossing <= Duration::from_secs(3));
            assert!(plan.arrival_delay < Duration::from_secs(3));
        }
    }

    #[test]
    fn test_same_seed_same_plan() {
        let config = seeded_config(13);
        let first = plan_travelers(&config, &mut rng_for(&config));
        let second = plan_travelers(&config, &mut rng_for(&config));
        assert_eq!(first, second);

        let other = seeded_config(14);
        assert_ne!(first, plan_travelers(&other, &mut rng_for(&other)));
    }
}
