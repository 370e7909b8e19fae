//! A single traveler's trip across the bridge.

use std::sync::Arc;

use crate::bridge::BridgeController;
use crate::simulation::plan::TravelerPlan;

/// Arrive, hold the permit for the planned crossing time, then depart.
///
/// The controller lock is never held while crossing. The start and end of
/// the crossing are reported by the controller's `Entered` and `Left` events.
pub async fn cross(bridge: Arc<BridgeController>, plan: TravelerPlan) {
    let permit = bridge.arrive(plan.id, plan.direction).await;
    tokio::time::sleep(plan.crossing).await;

    bridge.depart(permit);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bridge::BridgePhase;
    use crate::common::Direction;
    use std::time::Duration;

    #[tokio::test(start_paused = true)]
    async fn test_bridge_held_for_whole_crossing() {
        let bridge = Arc::new(BridgeController::new());
        let plan = TravelerPlan {
            id: 1,
            direction: Direction::South,
            arrival_delay: Duration::ZERO,
            crossing: Duration::from_secs(2),
        };

        let trip = tokio::spawn(cross(Arc::clone(&bridge), plan));

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(bridge.snapshot().phase, BridgePhase::Held(Direction::South));
        assert_eq!(bridge.snapshot().on_bridge, 1);

        trip.await.unwrap();
        assert_eq!(bridge.snapshot().phase, BridgePhase::Empty);
        assert!(bridge.elapsed() >= Duration::from_secs(2));
    }
}
