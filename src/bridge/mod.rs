//! Single-lane bridge access control.
//!
//! ## Module Structure
//!
//! - `controller`: `BridgeController` and the `Permit` it hands out
//! - `gate`: per-direction counting release gate
//! - `state`: counters and the Empty/Held state machine
//! - `events`: decisions reported to the event logger

pub mod controller;
pub mod events;
pub mod gate;
pub mod state;

pub use controller::{BridgeController, Permit};
pub use events::{BridgeEvent, EventKind};
pub use state::{BridgePhase, BridgeSnapshot, BridgeStats};
