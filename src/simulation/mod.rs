//! Traveler simulation driving the bridge controller.
//!
//! - `plan`: random directions, arrival delays and crossing times
//! - `traveler`: one traveler's arrive/cross/depart trip
//! - `runner`: spawns the travelers and collects the run report
//! - `logger`: turns controller events into log lines

pub mod logger;
pub mod plan;
pub mod runner;
pub mod traveler;

pub use logger::spawn_event_logger;
pub use runner::{Simulation, SimulationReport};
