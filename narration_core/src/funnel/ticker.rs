//! Background task that empties the quiet window.

use crossbeam_channel::{bounded, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::{debug, warn};

use super::FunnelGate;
use crate::error::Result;

/// Periodically clears the funnel's quiet window until stopped.
///
/// While the window is empty the ticker polls every `idle` interval. Once
/// something is muted it waits one `refresh` interval and clears everything.
/// The gate is never locked while waiting.
pub struct QuietWindowTicker {
    stop_tx: Option<Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl QuietWindowTicker {
    /// Start the ticker thread.
    pub fn spawn(gate: FunnelGate, refresh: Duration, idle: Duration) -> Result<Self> {
        let (stop_tx, stop_rx) = bounded::<()>(1);
        let handle = thread::Builder::new()
            .name("quiet-window".into())
            .spawn(move || loop {
                let armed = !gate.quiet_window_is_empty();
                let wait = if armed { refresh } else { idle };

                match stop_rx.recv_timeout(wait) {
                    Err(RecvTimeoutError::Timeout) => {
                        if armed {
                            let cleared = gate.clear_quiet_window();
                            debug!(cleared, "quiet window cleared");
                        }
                    }
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => {
                        gate.clear_quiet_window();
                        break;
                    }
                }
            })?;

        Ok(Self {
            stop_tx: Some(stop_tx),
            handle: Some(handle),
        })
    }

    /// Signal the ticker and wait for it to finish.
    pub fn stop(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        if let Some(tx) = self.stop_tx.take() {
            // A full channel means a stop is already pending.
            let _ = tx.try_send(());
        }
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                warn!("quiet-window ticker panicked");
            }
        }
    }
}

impl Drop for QuietWindowTicker {
    fn drop(&mut self) {
        self.shutdown();
    }
}
