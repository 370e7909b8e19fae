//! Traveler driver: spawns one task per traveler and waits for all of them.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Local};
use futures::future::join_all;
use tracing::{debug, info};

use crate::bridge::{BridgeController, BridgeSnapshot, BridgeStats};
use crate::common::error::SimulationError;
use crate::common::TravelerId;
use crate::config::types::SimulationConfig;
use crate::simulation::plan::{plan_travelers, rng_for};
use crate::simulation::traveler;

/// Outcome of a completed run.
#[derive(Debug, Clone)]
pub struct SimulationReport {
    pub travelers: usize,
    pub started_at: DateTime<Local>,
    /// Same clock as the event stamps.
    pub elapsed: Duration,
    pub stats: BridgeStats,
    /// Controller state once the last traveler departed.
    pub final_state: BridgeSnapshot,
}

pub struct Simulation {
    config: SimulationConfig,
    bridge: Arc<BridgeController>,
}

impl Simulation {
    pub fn new(config: SimulationConfig, bridge: Arc<BridgeController>) -> Self {
        Self { config, bridge }
    }

    /// Run every traveler across the bridge.
    ///
    /// Travelers are started one after another, each after its own arrival
    /// delay, and the run ends once all of them have departed.
    pub async fn run(&self) -> Result<SimulationReport, SimulationError> {
        let started_at = Local::now();

        let plans = plan_travelers(&self.config, &mut rng_for(&self.config));
        info!("Starting bridge simulation with {} travelers...", plans.len());

        let mut ids: Vec<TravelerId> = Vec::with_capacity(plans.len());
        let mut trips = Vec::with_capacity(plans.len());
        for plan in plans {
            tokio::time::sleep(plan.arrival_delay).await;
            debug!(
                "Spawning traveler {} heading {} (crossing {}s)",
                plan.id,
                plan.direction,
                plan.crossing.as_secs()
            );
            ids.push(plan.id);
            trips.push(tokio::spawn(traveler::cross(Arc::clone(&self.bridge), plan)));
        }

        for (traveler, result) in ids.into_iter().zip(join_all(trips).await) {
            if let Err(e) = result {
                return Err(if e.is_panic() {
                    SimulationError::TravelerPanicked { traveler }
                } else {
                    SimulationError::TravelerCancelled { traveler }
                });
            }
        }

        Ok(SimulationReport {
            travelers: self.config.travelers,
            started_at,
            elapsed: self.bridge.elapsed(),
            stats: self.bridge.stats(),
            final_state: self.bridge.snapshot(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bridge::BridgePhase;
    use crate::common::Direction;
    use crate::config::types::SecondsRange;
    use crate::simulation::logger::spawn_event_logger;
    use tokio::sync::mpsc;

    fn config(travelers: usize, seed: u64) -> SimulationConfig {
        SimulationConfig {
            travelers,
            seed: Some(seed),
            ..SimulationConfig::default()
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_every_traveler_crosses() {
        let bridge = Arc::new(BridgeController::new());
        let simulation = Simulation::new(config(12, 5), Arc::clone(&bridge));

        let report = simulation.run().await.unwrap();

        assert_eq!(report.travelers, 12);
        assert_eq!(report.stats.total_crossings(), 12);
        assert!(report.elapsed >= Duration::from_secs(1));

        assert_eq!(report.final_state.phase, BridgePhase::Empty);
        let snap = bridge.snapshot();
        assert_eq!(snap.waiting[Direction::North], 0);
        assert_eq!(snap.waiting[Direction::South], 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_simultaneous_arrivals_force_switches() {
        // Everyone shows up at once and takes a while, so both sides queue.
        let mut cfg = config(30, 21);
        cfg.arrival_delay_secs = SecondsRange { min: 0, max: 0 };
        cfg.crossing_secs = SecondsRange { min: 2, max: 2 };

        let bridge = Arc::new(BridgeController::new());
        let report = Simulation::new(cfg, Arc::clone(&bridge)).run().await.unwrap();

        let stats = report.stats;
        assert_eq!(stats.total_crossings(), 30);
        assert!(stats.crossings[Direction::North] > 0);
        assert!(stats.crossings[Direction::South] > 0);
        assert!(stats.switches >= 1);
        assert!(stats.peak_on_bridge > 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_events_reach_logger() {
        let (tx, rx) = mpsc::unbounded_channel();
        let logger = spawn_event_logger(rx);
        let bridge = Arc::new(BridgeController::with_events(tx));

        let simulation = Simulation::new(config(6, 8), Arc::clone(&bridge));
        simulation.run().await.unwrap();
        drop(simulation);
        drop(bridge);

        // Arrived, Entered and Left at minimum for each traveler.
        assert!(logger.await.unwrap() >= 18);
    }
}
