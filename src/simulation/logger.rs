//! Renders controller events as timestamped log lines.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::bridge::BridgeEvent;

/// `[mm:ss]` stamp for an offset from the start of the run.
pub fn format_stamp(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    format!("[{:02}:{:02}]", secs / 60, secs % 60)
}

/// Spawn a task that logs every event until all senders are dropped.
///
/// Resolves to the number of events logged.
pub fn spawn_event_logger(
    mut events: mpsc::UnboundedReceiver<BridgeEvent>,
) -> JoinHandle<usize> {
    tokio::spawn(async move {
        let mut logged = 0;
        while let Some(event) = events.recv().await {
            info!("{} {}", format_stamp(event.elapsed), event.kind);
            logged += 1;
        }
        debug!("Event logger stopped after {} events", logged);
        logged
    })
}
