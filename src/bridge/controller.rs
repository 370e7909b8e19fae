//! Bridge access controller.
//!
//! Grants crossing permits so that any number of travelers can share the
//! bridge in one direction while the other side queues. When the bridge
//! drains, the queued side gets the bridge in one atomic switch and exactly
//! the travelers queued at that moment are released.
//!
//! All counters live in one `BridgeState` behind a `std::sync::Mutex` that is
//! never held across an `.await`. Queued travelers park on their own
//! direction's `DirectionGate` with the lock released. Dropping a parked
//! `arrive` takes the traveler out of the queue again.

use std::future::Future;
use std::pin::Pin;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::task::{Context, Poll};
use std::time::Duration;

use futures::future::BoxFuture;
use futures::{ready, FutureExt};
use tokio::sync::mpsc;
use tokio::time::Instant;
use tracing::{trace, warn};

use crate::bridge::events::{BridgeEvent, EventKind};
use crate::bridge::gate::DirectionGate;
use crate::bridge::state::{BridgeSnapshot, BridgeState, BridgeStats, Departure, Entry, Withdrawal};
use crate::common::{Direction, PerDirection, TravelerId};

/// The right to be on the bridge, handed out by `arrive` and given back to
/// `depart`.
#[derive(Debug)]
#[must_use = "a permit must be returned through BridgeController::depart"]
pub struct Permit {
    traveler: TravelerId,
    direction: Direction,
}

/// Coordinates direction-exclusive access to a single-lane bridge.
///
/// Create one per bridge and share it with `Arc`.
#[derive(Debug)]
pub struct BridgeController {
    state: Mutex<BridgeState>,
    gates: PerDirection<DirectionGate>,
    events: Option<mpsc::UnboundedSender<BridgeEvent>>,
    started: Instant,
}

impl BridgeController {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(BridgeState::new()),
            gates: PerDirection::new(DirectionGate::new(), DirectionGate::new()),
            events: None,
            started: Instant::now(),
        }
    }

    /// Create a controller that reports every decision on `events`.
    pub fn with_events(events: mpsc::UnboundedSender<BridgeEvent>) -> Self {
        Self {
            events: Some(events),
            ..Self::new()
        }
    }

    /// Wait for the bridge to run `direction`'s way and get on it.
    ///
    /// Returns at once if the bridge is empty or already heading the same
    /// way. Otherwise the traveler queues until a drain hands the bridge to
    /// its side. Never fails. If the returned future is dropped while queued,
    /// the traveler is withdrawn and the bridge is not held up on its behalf.
    pub async fn arrive(&self, traveler: TravelerId, direction: Direction) -> Permit {
        {
            let mut state = self.lock_state();
            self.emit(EventKind::Arrived {
                traveler,
                direction,
            });

            match state.try_enter(direction) {
                Entry::MustWait { holder } => {
                    self.emit(EventKind::MustWait {
                        traveler,
                        direction,
                        holder,
                    });
                }
                entry => return self.grant(&state, entry, traveler, direction),
            }
        }

        GateWait {
            bridge: self,
            traveler,
            direction,
            signal: Some(self.gates[direction].wait().boxed()),
        }
        .await;
        trace!("Traveler {} released at the {} gate", traveler, direction);

        let mut state = self.lock_state();
        let entry = state.enter_after_release(direction);
        self.grant(&state, entry, traveler, direction)
    }

    /// Step off the bridge.
    ///
    /// If this empties the bridge and the other side is queued, the bridge
    /// switches and exactly the queued travelers are released. Never blocks.
    pub fn depart(&self, permit: Permit) {
        let Permit {
            traveler,
            direction,
        } = permit;

        let mut state = self.lock_state();
        let departure = state.leave(direction);
        self.emit(EventKind::Left {
            traveler,
            direction,
            on_bridge: state.on_bridge(),
        });

        self.carry_out(departure, direction);
    }

    pub fn snapshot(&self) -> BridgeSnapshot {
        self.lock_state().snapshot()
    }

    pub fn stats(&self) -> BridgeStats {
        self.lock_state().stats()
    }

    /// Time since the controller was created.
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    // Caller holds the state lock.
    fn carry_out(&self, departure: Departure, direction: Direction) {
        match departure {
            Departure::Occupied { remaining } => {
                trace!("{} {} travelers still crossing", remaining, direction);
            }
            Departure::BatchInFlight { pending } => {
                trace!(
                    "Bridge drained with {} released {} travelers still entering",
                    pending,
                    direction
                );
            }
            Departure::Switched { to, released } => {
                self.emit(EventKind::Switched {
                    direction: to,
                    released,
                });
                self.gates[to].release(released);
            }
            Departure::Emptied => self.emit(EventKind::Emptied),
        }
    }

    fn withdraw(&self, traveler: TravelerId, direction: Direction) {
        let mut state = self.lock_state();
        let withdrawal = state.abandon_wait(direction);
        self.emit(EventKind::GaveUp {
            traveler,
            direction,
        });

        if let Withdrawal::Released(departure) = withdrawal {
            if !self.gates[direction].reclaim() {
                warn!(
                    "Traveler {} gave up after release but no {} gate signal was left",
                    traveler, direction
                );
            }
            self.carry_out(departure, direction);
        }
    }

    fn grant(
        &self,
        state: &BridgeState,
        entry: Entry,
        traveler: TravelerId,
        direction: Direction,
    ) -> Permit {
        if entry == Entry::Claimed {
            self.emit(EventKind::Claimed {
                traveler,
                direction,
            });
        }
        self.emit(EventKind::Entered {
            traveler,
            direction,
            on_bridge: state.on_bridge(),
        });
        Permit {
            traveler,
            direction,
        }
    }

    // Poisoning only follows a failed invariant assertion, which already
    // brought its own task down.
    fn lock_state(&self) -> MutexGuard<'_, BridgeState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn emit(&self, kind: EventKind) {
        if let Some(events) = &self.events {
            // Nobody listening is fine.
            let _ = events.send(BridgeEvent {
                elapsed: self.started.elapsed(),
                kind,
            });
        }
    }
}

impl Default for BridgeController {
    fn default() -> Self {
        Self::new()
    }
}

/// A queued traveler parked at its gate.
///
/// The gate wait is owned here so that, on drop, it goes first and hands any
/// signal already assigned to it back to the gate before the withdrawal
/// tries to reclaim one.
struct GateWait<'a> {
    bridge: &'a BridgeController,
    traveler: TravelerId,
    direction: Direction,
    signal: Option<BoxFuture<'a, ()>>,
}

impl Future for GateWait<'_> {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        if let Some(signal) = self.signal.as_mut() {
            ready!(signal.poll_unpin(cx));
            self.signal = None;
        }
        Poll::Ready(())
    }
}

impl Drop for GateWait<'_> {
    fn drop(&mut self) {
        if let Some(signal) = self.signal.take() {
            drop(signal);
            self.bridge.withdraw(self.traveler, self.direction);
        }
    }
}
