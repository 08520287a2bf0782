//! Query Resolver - answers free-text questions about what the agent did.
//!
//! Conversation flow:
//! 1. **Parse**: normalise the line and match commands, "why did you", or follow-ups
//! 2. **Look up**: query history by kind, optionally anchored at a time
//! 3. **Remember**: a hit becomes the single-slot conversational context
//! 4. **Answer**: the justification, or a scripted fallback

mod parser;

pub use parser::*;

use agent_world::{ControllerToken, EventKind};
use chrono::NaiveTime;
use crossbeam_channel::Sender;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::funnel::FunnelGate;
use crate::history::{HistoryIndex, Lookup};
use crate::justification::JustificationEngine;
use crate::sink::OutputSink;

/// Scripted replies.
pub mod replies {
    pub const WHAT: &str = "Why did I what?";
    pub const NOTHING_YET: &str = "I haven't done anything yet!";
    pub const NOT_FOUND: &str = "Have I done something like that?";
    pub const NO_EVENT_AT_TIME: &str = "I cannot find an event for that time.";
    pub const STOP: &str = "Okie dokie.";
    pub const START: &str = "It's-a-me, Mario!";
    pub const SPEEDRUN: &str = "Let's-a-go!";
}

/// Receives controller-switch requests. The strategies live elsewhere.
pub trait ControllerSwitch: Send + Sync {
    fn switch_to(&self, token: ControllerToken);
}

impl ControllerSwitch for Sender<ControllerToken> {
    fn switch_to(&self, token: ControllerToken) {
        if self.send(token).is_err() {
            warn!(?token, "controller host went away");
        }
    }
}

/// The most recently resolved query. One per conversation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QueryContext {
    pub last_kind: Option<EventKind>,
    pub last_timestamp: Option<NaiveTime>,
}

impl QueryContext {
    /// Kind and timestamp of the last resolved query, when there is one.
    pub fn resolved(&self) -> Option<(EventKind, NaiveTime)> {
        self.last_kind.zip(self.last_timestamp)
    }

    pub fn is_set(&self) -> bool {
        self.resolved().is_some()
    }

    fn remember(&mut self, kind: EventKind, timestamp: NaiveTime) {
        self.last_kind = Some(kind);
        self.last_timestamp = Some(timestamp);
    }
}

#[derive(Debug, Clone, Copy)]
enum Direction {
    Earlier,
    Later,
}

/// Answers user text using history and the justification engine.
pub struct QueryResolver {
    history: FunnelGate,
    justifier: JustificationEngine,
    sink: Arc<dyn OutputSink>,
    controller: Arc<dyn ControllerSwitch>,
    context: QueryContext,
}

impl QueryResolver {
    /// Create a resolver with an empty conversational context.
    pub fn new(
        history: FunnelGate,
        justifier: JustificationEngine,
        sink: Arc<dyn OutputSink>,
        controller: Arc<dyn ControllerSwitch>,
    ) -> Self {
        Self {
            history,
            justifier,
            sink,
            controller,
            context: QueryContext::default(),
        }
    }

    pub fn context(&self) -> QueryContext {
        self.context
    }

    /// Handle one line of user text. Returns the reply, which has also been
    /// sent to the sink.
    pub fn resolve(&mut self, text: &str) -> Option<String> {
        let reply = match parse(text) {
            Query::Command(command) => self.command(command),
            Query::Why { kind: None, .. } => Some(replies::WHAT.to_string()),
            Query::Why {
                kind: Some(kind),
                at,
            } => Some(self.why(kind, at.as_deref())),
            Query::Earlier => self.follow_up(Direction::Earlier),
            Query::Later => self.follow_up(Direction::Later),
            Query::Timestamp(time) => {
                debug!(%time, "bare timestamp has no meaning yet");
                None
            }
            Query::Unrecognized => None,
        };

        if let Some(reply) = &reply {
            self.sink.emit(reply);
        }
        reply
    }

    fn command(&self, command: Command) -> Option<String> {
        let token = match command {
            Command::Switch(token) => token,
            Command::Reserved => return None,
        };

        info!(?token, "switching controller");
        self.controller.switch_to(token);
        match token {
            ControllerToken::Idle => Some(replies::STOP.to_string()),
            ControllerToken::Autonomous => Some(replies::START.to_string()),
            ControllerToken::Speedrun => Some(replies::SPEEDRUN.to_string()),
            ControllerToken::Human => None,
        }
    }

    fn why(&mut self, kind: EventKind, at: Option<&str>) -> String {
        let lookup = match at {
            None => self.history.read(|h| h.most_recent_matching(kind)),
            Some(raw) => match parse_timestamp(raw) {
                Ok(time) => self.history.read(|h| h.matching_at_or_after(kind, time)),
                Err(err) => {
                    warn!(%err, "could not read time in question");
                    return replies::NO_EVENT_AT_TIME.to_string();
                }
            },
        };

        match lookup {
            Lookup::Found(message) => {
                self.context.remember(message.kind(), message.timestamp());
                self.justifier.explain(&message)
            }
            Lookup::Empty => replies::NOTHING_YET.to_string(),
            Lookup::NotFound if at.is_some() => replies::NO_EVENT_AT_TIME.to_string(),
            Lookup::NotFound => replies::NOT_FOUND.to_string(),
        }
    }

    fn follow_up(&mut self, direction: Direction) -> Option<String> {
        let (kind, reference) = self.context.resolved()?;
        let lookup = self.history.read(|h: &HistoryIndex| match direction {
            Direction::Earlier => h.matching_before(kind, reference),
            Direction::Later => h.matching_after(kind, reference),
        });

        Some(match lookup {
            Lookup::Found(message) => {
                self.context.remember(message.kind(), message.timestamp());
                self.justifier.explain(&message)
            }
            Lookup::Empty => replies::NOTHING_YET.to_string(),
            Lookup::NotFound => match direction {
                Direction::Earlier => format!("I don't recall {} earlier.", kind.gerund()),
                Direction::Later => format!("I don't recall {} later.", kind.gerund()),
            },
        })
    }
}
