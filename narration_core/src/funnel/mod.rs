//! Funnel - rate-limits utterances and records every candidate in history.
//!
//! Each tick:
//! 1. **Stamp**: read the clock once for the whole batch
//! 2. **Filter**: a kind already in the quiet window is suppressed
//! 3. **Record**: every candidate lands in history, suppressed or not
//! 4. **Emit**: surviving texts go to the sink after the lock is released
//!
//! The quiet window is emptied by [`QuietWindowTicker`] on its own schedule.

mod ticker;

pub use ticker::*;

use agent_world::EventKind;
use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::debug;

use crate::clock::Clock;
use crate::history::{Candidate, HistoryIndex};
use crate::sink::OutputSink;

/// State shared by ingestion, the ticker and history readers.
#[derive(Debug, Default)]
struct FunnelState {
    /// Kinds said recently enough to stay quiet about.
    quiet: HashSet<EventKind>,
    history: HistoryIndex,
}

/// The single lock guarding the quiet window and the history index.
#[derive(Debug, Clone)]
pub struct FunnelGate {
    state: Arc<Mutex<FunnelState>>,
}

impl FunnelGate {
    /// Create a gate around an existing history.
    pub fn new(history: HistoryIndex) -> Self {
        Self {
            state: Arc::new(Mutex::new(FunnelState {
                quiet: HashSet::new(),
                history,
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, FunnelState> {
        // Neither path leaves the state half-updated, so a poisoned lock is still usable.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Run a read-only query against history.
    pub fn read<T>(&self, query: impl FnOnce(&HistoryIndex) -> T) -> T {
        query(&self.lock().history)
    }

    /// Whether nothing is muted right now.
    pub fn quiet_window_is_empty(&self) -> bool {
        self.lock().quiet.is_empty()
    }

    /// Whether `kind` is muted right now.
    pub fn is_quiet(&self, kind: EventKind) -> bool {
        self.lock().quiet.contains(&kind)
    }

    /// Forget everything said recently. Returns how many kinds were muted.
    pub fn clear_quiet_window(&self) -> usize {
        let mut state = self.lock();
        let cleared = state.quiet.len();
        state.quiet.clear();
        cleared
    }
}

/// Ingests candidates each tick and forwards the ones worth saying.
pub struct Funnel {
    gate: FunnelGate,
    sink: Arc<dyn OutputSink>,
    clock: Arc<dyn Clock>,
}

impl Funnel {
    /// Create a funnel writing to `sink`, stamped by `clock`.
    pub fn new(gate: FunnelGate, sink: Arc<dyn OutputSink>, clock: Arc<dyn Clock>) -> Self {
        Self { gate, sink, clock }
    }

    /// The gate shared with the ticker and history readers.
    pub fn gate(&self) -> &FunnelGate {
        &self.gate
    }

    /// Ingest one tick of candidates and return the texts that were emitted.
    pub fn ingest(&self, candidates: Vec<Candidate>) -> Vec<String> {
        if candidates.is_empty() {
            return Vec::new();
        }

        let now = self.clock.now();
        let mut emitted = Vec::new();
        {
            let mut state = self.gate.lock();
            let mut newly_quiet = Vec::new();
            for candidate in &candidates {
                if state.quiet.contains(&candidate.kind) || newly_quiet.contains(&candidate.kind) {
                    debug!(kind = ?candidate.kind, text = %candidate.text, "suppressed duplicate");
                    continue;
                }
                newly_quiet.push(candidate.kind);
                emitted.push(candidate.text.clone());
            }

            state.history.append(now, candidates);
            state.quiet.extend(newly_quiet);
        }

        for text in &emitted {
            self.sink.emit(text);
        }
        emitted
    }
}
