//! Bridge state bookkeeping.
//!
//! `BridgeState` holds the counters the controller guards with its lock and
//! makes every admission and drain decision. It knows nothing about locking,
//! waking or events, so each transition can be tested synchronously.
//!
//! The lifecycle is a three-state machine:
//! 1. `Empty` - nobody on the bridge and nobody waiting
//! 2. `Held(d)` - direction `d` owns the bridge (crossing, or a released batch
//!    still on its way in)
//! 3. `Held(opposite(d))` - reached from `Held(d)` only by draining to zero
//!    with travelers queued on the other side

use crate::common::{Direction, PerDirection};

/// Observable phase of the bridge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BridgePhase {
    Empty,
    Held(Direction),
}

/// Point-in-time view of the controller's counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BridgeSnapshot {
    pub phase: BridgePhase,
    pub on_bridge: usize,
    pub waiting: PerDirection<usize>,
}

/// Running totals over the controller's lifetime.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BridgeStats {
    /// Completed crossings per direction.
    pub crossings: PerDirection<u64>,
    /// Times an empty bridge was claimed.
    pub claims: u64,
    /// Direction switches handed to a waiting side.
    pub switches: u64,
    /// Times the bridge drained with nobody waiting.
    pub empties: u64,
    /// Queued travelers that gave up before entering.
    pub withdrawals: u64,
    /// Most travelers on the bridge at once.
    pub peak_on_bridge: usize,
    /// Longest queue seen at each end.
    pub peak_waiting: PerDirection<usize>,
}

impl BridgeStats {
    pub fn total_crossings(&self) -> u64 {
        self.crossings.iter().map(|(_, count)| *count).sum()
    }
}

/// Outcome of a traveler reaching the entrance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entry {
    /// The bridge was empty; this traveler fixed its direction.
    Claimed,
    /// The bridge already ran this traveler's way.
    Joined,
    /// The other side holds the bridge; the traveler is now queued.
    MustWait { holder: Direction },
}

/// What a departure did to the bridge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Departure {
    /// Others of the same direction are still crossing.
    Occupied { remaining: usize },
    /// Drained, but part of the last released batch has not entered yet.
    BatchInFlight { pending: usize },
    /// Drained and handed to the other side; `released` gate signals are owed.
    Switched { to: Direction, released: usize },
    /// Drained with nobody waiting on either side.
    Emptied,
}

/// What a queued traveler giving up did to the bridge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Withdrawal {
    /// Still behind the other side; nothing had been released to it.
    Queued,
    /// Part of a released batch. Its gate signal is owed back, and the
    /// drain decision it completed (if any) must be carried out.
    Released(Departure),
}

#[derive(Debug, Default)]
pub struct BridgeState {
    current: Option<Direction>,
    on_bridge: usize,
    waiting: PerDirection<usize>,
    stats: BridgeStats,
}

impl BridgeState {
    pub fn new() -> Self {
        Self::default()
    }

    /// First look at the bridge by a newly arrived traveler.
    ///
    /// Either admits the traveler or queues it on its side.
    pub fn try_enter(&mut self, direction: Direction) -> Entry {
        let opposite = direction.opposite();
        if self.current == Some(opposite) {
            self.waiting[direction] += 1;
            let queued = self.waiting[direction];
            let peak = &mut self.stats.peak_waiting[direction];
            *peak = (*peak).max(queued);
            return Entry::MustWait { holder: opposite };
        }
        self.admit(direction)
    }

    /// Admission of a traveler released from its gate by a switch.
    pub fn enter_after_release(&mut self, direction: Direction) -> Entry {
        assert!(
            self.waiting[direction] > 0,
            "{} traveler released with no waiters recorded",
            direction
        );
        self.waiting[direction] -= 1;
        self.admit(direction)
    }

    fn admit(&mut self, direction: Direction) -> Entry {
        let entry = match self.current {
            None => {
                self.current = Some(direction);
                self.stats.claims += 1;
                Entry::Claimed
            }
            Some(current) => {
                assert_eq!(
                    current, direction,
                    "{} traveler admitted while bridge runs {}",
                    direction, current
                );
                Entry::Joined
            }
        };

        self.on_bridge += 1;
        self.stats.peak_on_bridge = self.stats.peak_on_bridge.max(self.on_bridge);
        entry
    }

    /// A traveler heading `direction` steps off the bridge.
    ///
    /// When this drains the bridge, the switch decision is made here, in the
    /// same critical section as the decrement.
    pub fn leave(&mut self, direction: Direction) -> Departure {
        assert_eq!(
            self.current,
            Some(direction),
            "{} traveler left a bridge it was not holding",
            direction
        );
        assert!(self.on_bridge > 0, "departure from an empty bridge");

        self.on_bridge -= 1;
        self.stats.crossings[direction] += 1;
        self.settle(direction)
    }

    /// A queued traveler heading `direction` stops waiting before it entered.
    ///
    /// If a switch already released it, its share of the batch is written
    /// off, which may complete the batch and trigger the next drain decision.
    pub fn abandon_wait(&mut self, direction: Direction) -> Withdrawal {
        assert!(
            self.waiting[direction] > 0,
            "{} traveler withdrew with no waiters recorded",
            direction
        );
        self.waiting[direction] -= 1;
        self.stats.withdrawals += 1;

        if self.current != Some(direction) {
            return Withdrawal::Queued;
        }
        Withdrawal::Released(self.settle(direction))
    }

    // Drain decision for a bridge held by `direction`.
    fn settle(&mut self, direction: Direction) -> Departure {
        if self.on_bridge > 0 {
            return Departure::Occupied {
                remaining: self.on_bridge,
            };
        }

        // A released batch keeps the bridge until every member has entered.
        let pending = self.waiting[direction];
        if pending > 0 {
            return Departure::BatchInFlight { pending };
        }

        let opposite = direction.opposite();
        let queued = self.waiting[opposite];
        if queued > 0 {
            self.current = Some(opposite);
            self.stats.switches += 1;
            Departure::Switched {
                to: opposite,
                released: queued,
            }
        } else {
            self.current = None;
            self.stats.empties += 1;
            Departure::Emptied
        }
    }

    pub fn on_bridge(&self) -> usize {
        self.on_bridge
    }

    pub fn snapshot(&self) -> BridgeSnapshot {
        BridgeSnapshot {
            phase: match self.current {
                None => BridgePhase::Empty,
                Some(direction) => BridgePhase::Held(direction),
            },
            on_bridge: self.on_bridge,
            waiting: self.waiting,
        }
    }

    pub fn stats(&self) -> BridgeStats {
        self.stats
    }
}
