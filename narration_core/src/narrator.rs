//! Narrator - wires the pipeline together for a host simulation.
//!
//! The host calls [`Narrator::on_tick`] once per simulation tick and
//! [`Narrator::on_user_text`] whenever the user submits a line. When ticks
//! and user text arrive on different threads, [`Narrator::split`] hands each
//! thread its own half. The halves only meet at the funnel gate.

use agent_world::{ActionRecord, Event, WorldSnapshot};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;
use tracing::{debug, info};

use crate::classifier::EventClassifier;
use crate::clock::Clock;
use crate::config::NarratorConfig;
use crate::error::Result;
use crate::funnel::{Funnel, FunnelGate, QuietWindowTicker};
use crate::history::HistoryIndex;
use crate::justification::JustificationEngine;
use crate::query::{ControllerSwitch, QueryContext, QueryResolver};
use crate::sink::OutputSink;

/// One narrating agent: classifier, funnel, history and query resolver.
///
/// Dropping the narrator stops its quiet-window ticker.
pub struct Narrator {
    ticks: TickNarrator,
    conversation: Conversation,
}

impl Narrator {
    /// Build the pipeline and start the quiet-window ticker.
    pub fn new(
        config: NarratorConfig,
        sink: Arc<dyn OutputSink>,
        controller: Arc<dyn ControllerSwitch>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self> {
        config.validate()?;

        let rng = match config.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let gate = FunnelGate::new(HistoryIndex::with_resolution(
            config.timestamp_resolution_secs,
        ));
        let ticker = QuietWindowTicker::spawn(
            gate.clone(),
            config.refresh_interval(),
            config.idle_interval(),
        )?;
        let resolver = QueryResolver::new(
            gate.clone(),
            JustificationEngine::from_config(&config),
            sink.clone(),
            controller,
        );

        info!(
            refresh_ms = config.refresh_interval_ms,
            seeded = config.rng_seed.is_some(),
            "narrator started"
        );

        Ok(Self {
            ticks: TickNarrator {
                classifier: EventClassifier::from_config(&config),
                rng,
                funnel: Funnel::new(gate, sink, clock),
                ticker,
            },
            conversation: Conversation { resolver },
        })
    }

    /// Narrate one simulation tick. Returns what was said aloud.
    pub fn on_tick(
        &mut self,
        events: &[Event],
        action: &ActionRecord,
        snapshot: Arc<WorldSnapshot>,
    ) -> Vec<String> {
        self.ticks.on_tick(events, action, snapshot)
    }

    /// Answer a line typed by the user. Blank input is ignored.
    pub fn on_user_text(&mut self, text: &str) -> Option<String> {
        self.conversation.on_user_text(text)
    }

    /// Read access to history and the quiet window.
    pub fn history(&self) -> &FunnelGate {
        self.ticks.history()
    }

    /// The last resolved question.
    pub fn context(&self) -> QueryContext {
        self.conversation.context()
    }

    /// Separate the simulation side from the user side so each can live on
    /// its own thread without a lock around the whole narrator.
    pub fn split(self) -> (TickNarrator, Conversation) {
        (self.ticks, self.conversation)
    }

    /// Stop the ticker and wait for it.
    pub fn shutdown(self) {
        self.ticks.shutdown();
    }
}

/// The simulation half: classifies ticks and feeds the funnel.
///
/// Owns the quiet-window ticker, so dropping it ends the session's ticking.
pub struct TickNarrator {
    classifier: EventClassifier,
    rng: StdRng,
    funnel: Funnel,
    ticker: QuietWindowTicker,
}

impl TickNarrator {
    /// Narrate one simulation tick. Returns what was said aloud.
    pub fn on_tick(
        &mut self,
        events: &[Event],
        action: &ActionRecord,
        snapshot: Arc<WorldSnapshot>,
    ) -> Vec<String> {
        let candidates = self
            .classifier
            .classify(events, action, &snapshot, &mut self.rng);
        if !candidates.is_empty() {
            debug!(count = candidates.len(), "classified tick");
        }
        self.funnel.ingest(candidates)
    }

    /// Read access to history and the quiet window.
    pub fn history(&self) -> &FunnelGate {
        self.funnel.gate()
    }

    /// Stop the ticker and wait for it.
    pub fn shutdown(self) {
        self.ticker.stop();
        info!("narrator stopped");
    }
}

/// The user half: answers questions and forwards commands.
pub struct Conversation {
    resolver: QueryResolver,
}

impl Conversation {
    /// Answer a line typed by the user. Blank input is ignored.
    pub fn on_user_text(&mut self, text: &str) -> Option<String> {
        if text.trim().is_empty() {
            return None;
        }
        self.resolver.resolve(text)
    }

    /// The last resolved question.
    pub fn context(&self) -> QueryContext {
        self.resolver.context()
    }
}
