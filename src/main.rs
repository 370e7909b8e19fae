//! Bridgekeeper - single-lane bridge crossing simulation.
//!
//! Travelers arrive from both ends of a one-lane bridge. Any number of them
//! may cross together as long as they head the same way; the other side
//! queues until the bridge drains and is then let through as one batch.

mod bridge;
mod common;
mod config;
mod simulation;

use std::sync::Arc;

use anyhow::Result;
use tokio::signal;
use tokio::sync::mpsc;
use tracing::{error, info, warn};

use bridge::{BridgeController, BridgePhase};
use common::Direction;
use config::{env::get_config_path, load_and_validate, SimulationConfig};
use simulation::{spawn_event_logger, Simulation, SimulationReport};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!("Bridgekeeper v{} starting...", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config_path = get_config_path();
    info!("Loading configuration from {}...", config_path);

    let config = load_and_validate(&config_path).map_err(|e| {
        error!("Failed to load configuration: {}", e);
        e
    })?;

    let sim = &config.simulation;
    info!("Configuration loaded successfully");
    info!("  Travelers: {}", sim.travelers);
    info!(
        "  Crossing time: {}-{}s",
        sim.crossing_secs.min, sim.crossing_secs.max
    );
    info!(
        "  Arrival delay: {}-{}s",
        sim.arrival_delay_secs.min, sim.arrival_delay_secs.max
    );
    match sim.seed {
        Some(seed) => info!("  Seed: {}", seed),
        None => info!("  Seed: random"),
    }

    let report = tokio::select! {
        result = run(config.simulation.clone()) => result?,
        _ = shutdown_signal() => {
            warn!("Shutdown signal received - abandoning travelers still at the bridge");
            return Ok(());
        }
    };

    log_summary(&report);
    Ok(())
}

/// Run one simulation with the event logger attached and wait until every
/// event has been logged.
async fn run(config: SimulationConfig) -> common::error::Result<SimulationReport> {
    let (events_tx, events_rx) = mpsc::unbounded_channel();
    let logger = spawn_event_logger(events_rx);

    let bridge = Arc::new(BridgeController::with_events(events_tx));
    let report = Simulation::new(config, bridge).run().await?;

    // The simulation owned the last controller handle, so the channel is closed.
    if let Err(e) = logger.await {
        warn!("Event logger task failed: {}", e);
    }

    Ok(report)
}

fn log_summary(report: &SimulationReport) {
    let stats = &report.stats;

    info!(
        "Simulation complete after {} seconds",
        report.elapsed.as_secs()
    );
    info!(
        "  Started at: {}",
        report.started_at.format("%Y-%m-%d %H:%M:%S")
    );
    info!(
        "  Crossings: {} of {} travelers ({} north, {} south)",
        stats.total_crossings(),
        report.travelers,
        stats.crossings[Direction::North],
        stats.crossings[Direction::South]
    );
    info!(
        "  Claims: {}, switches: {}, empty transitions: {}",
        stats.claims, stats.switches, stats.empties
    );
    if stats.withdrawals > 0 {
        warn!("  Travelers that gave up waiting: {}", stats.withdrawals);
    }
    info!(
        "  Peak on bridge: {}, peak waiting: {} north / {} south",
        stats.peak_on_bridge,
        stats.peak_waiting[Direction::North],
        stats.peak_waiting[Direction::South]
    );
    match report.final_state.phase {
        BridgePhase::Empty => info!("  Final state: bridge empty"),
        BridgePhase::Held(direction) => warn!(
            "  Final state: bridge still held for {} ({} on bridge, {} north / {} south waiting)",
            direction,
            report.final_state.on_bridge,
            report.final_state.waiting[Direction::North],
            report.final_state.waiting[Direction::South]
        ),
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C"),
        _ = terminate => info!("Received SIGTERM"),
    }
}
