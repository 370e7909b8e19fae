//! Per-direction release gate.

use tokio::sync::Semaphore;

/// Counting wait/signal point for travelers held at one end of the bridge.
///
/// Each `release(n)` lets exactly `n` waiters through. A signal issued before
/// its waiter reaches `wait()` is kept and consumed on arrival, so a release
/// can't be lost between the controller dropping its lock and the traveler
/// parking here.
#[derive(Debug)]
pub struct DirectionGate {
    signals: Semaphore,
}

impl DirectionGate {
    pub fn new() -> Self {
        Self {
            signals: Semaphore::new(0),
        }
    }

    /// Park until one release signal is available, then consume it.
    pub async fn wait(&self) {
        match self.signals.acquire().await {
            Ok(signal) => signal.forget(),
            Err(_) => unreachable!("direction gates are never closed"),
        }
    }

    /// Issue `count` release signals.
    pub fn release(&self, count: usize) {
        self.signals.add_permits(count);
    }

    /// Take back one issued signal that no waiter consumed.
    ///
    /// Returns `false` if there was none to take.
    pub fn reclaim(&self) -> bool {
        match self.signals.try_acquire() {
            Ok(signal) => {
                signal.forget();
                true
            }
            Err(_) => false,
        }
    }

    /// Signals issued but not yet consumed.
    #[cfg(test)]
    pub fn unclaimed(&self) -> usize {
        self.signals.available_permits()
    }
}

impl Default for DirectionGate {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::{assert_pending, assert_ready, task};

    #[test]
    fn test_release_wakes_exactly_count() {
        let gate = DirectionGate::new();
        let mut first = task::spawn(gate.wait());
        let mut second = task::spawn(gate.wait());
        let mut third = task::spawn(gate.wait());

        assert_pending!(first.poll());
        assert_pending!(second.poll());
        assert_pending!(third.poll());

        gate.release(2);

        assert!(first.is_woken());
        assert!(second.is_woken());
        assert!(!third.is_woken());
        assert_ready!(first.poll());
        assert_ready!(second.poll());
        assert_pending!(third.poll());
        assert_eq!(gate.unclaimed(), 0);
    }

    #[test]
    fn test_early_signal_is_kept() {
        let gate = DirectionGate::new();
        gate.release(1);
        assert_eq!(gate.unclaimed(), 1);

        let mut late = task::spawn(gate.wait());
        assert_ready!(late.poll());
        assert_eq!(gate.unclaimed(), 0);
    }

    #[test]
    fn test_dropped_waiter_signal_can_be_reclaimed() {
        let gate = DirectionGate::new();
        let mut first = task::spawn(gate.wait());
        let mut second = task::spawn(gate.wait());
        assert_pending!(first.poll());
        assert_pending!(second.poll());

        gate.release(2);
        assert_eq!(gate.unclaimed(), 0);

        // The signal handed to a waiter that goes away returns to the gate.
        drop(first);
        assert_eq!(gate.unclaimed(), 1);
        assert!(gate.reclaim());
        assert_eq!(gate.unclaimed(), 0);
        assert!(!gate.reclaim());

        assert_ready!(second.poll());
    }
}
