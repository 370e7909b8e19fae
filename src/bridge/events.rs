//! Controller events for logging and diagnostics.

use std::fmt;
use std::time::Duration;

use crate::common::{Direction, TravelerId};

/// Something the controller decided, stamped with time since it was created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BridgeEvent {
    pub elapsed: Duration,
    pub kind: EventKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventKind {
    /// Traveler reached the entrance.
    Arrived {
        traveler: TravelerId,
        direction: Direction,
    },
    /// Traveler queued because the other side holds the bridge.
    MustWait {
        traveler: TravelerId,
        direction: Direction,
        holder: Direction,
    },
    /// Traveler found the bridge empty and fixed its direction.
    Claimed {
        traveler: TravelerId,
        direction: Direction,
    },
    /// Queued traveler stopped waiting before it got on.
    GaveUp {
        traveler: TravelerId,
        direction: Direction,
    },
    /// Traveler got its permit and is now counted on the bridge.
    Entered {
        traveler: TravelerId,
        direction: Direction,
        on_bridge: usize,
    },
    /// Traveler stepped off the bridge.
    Left {
        traveler: TravelerId,
        direction: Direction,
        on_bridge: usize,
    },
    /// The bridge drained and was handed to `direction`.
    Switched { direction: Direction, released: usize },
    /// The bridge drained with nobody waiting.
    Emptied,
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Arrived {
                traveler,
                direction,
            } => write!(f, "Traveler {} from {} ARRIVES at bridge", traveler, direction),
            Self::MustWait {
                traveler,
                direction,
                holder,
            } => write!(
                f,
                "Traveler {} from {} must WAIT - bridge is for {} direction",
                traveler, direction, holder
            ),
            Self::Claimed {
                traveler,
                direction,
            } => write!(f, "Bridge direction set to {} by traveler {}", direction, traveler),
            Self::GaveUp {
                traveler,
                direction,
            } => write!(f, "Traveler {} from {} GIVES UP waiting", traveler, direction),
            Self::Entered {
                traveler,
                direction,
                on_bridge,
            } => write!(
                f,
                "Traveler {} from {} ENTERS bridge ({} on bridge)",
                traveler, direction, on_bridge
            ),
            Self::Left {
                traveler,
                direction,
                on_bridge,
            } => write!(
                f,
                "Traveler {} from {} LEAVES bridge ({} still on bridge)",
                traveler, direction, on_bridge
            ),
            Self::Switched {
                direction,
                released,
            } => write!(
                f,
                "Bridge direction changed to {} ({} waiting)",
                direction, released
            ),
            Self::Emptied => write!(f, "Bridge is now EMPTY"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_lines() {
        let wait = EventKind::MustWait {
            traveler: 4,
            direction: Direction::South,
            holder: Direction::North,
        };
        assert_eq!(
            wait.to_string(),
            "Traveler 4 from SOUTH must WAIT - bridge is for NORTH direction"
        );

        let switch = EventKind::Switched {
            direction: Direction::South,
            released: 3,
        };
        assert_eq!(switch.to_string(), "Bridge direction changed to SOUTH (3 waiting)");
        assert_eq!(EventKind::Emptied.to_string(), "Bridge is now EMPTY");

        let gave_up = EventKind::GaveUp {
            traveler: 9,
            direction: Direction::North,
        };
        assert_eq!(gave_up.to_string(), "Traveler 9 from NORTH GIVES UP waiting");
    }
}
