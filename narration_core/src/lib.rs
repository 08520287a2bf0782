//! # Narration Core
//!
//! Gives a game-playing agent a voice. Each tick the agent's events, inputs
//! and surroundings become short utterances; everything it says is kept in a
//! time-indexed history so the user can later ask why it did something.
//!
//! ## Core Components
//!
//! - **classifier**: Maps one tick of events to candidate messages
//! - **funnel**: Suppresses repeats inside a quiet window and records history
//! - **history**: Time-bucketed store of logged messages
//! - **query**: Parses user text and answers "why did you ..." questions
//! - **justification**: Explains a past action from the grid recorded with it
//! - **narrator**: Wires the pieces together for a host simulation
//!
//! ## Design Philosophy
//!
//! - **Host-Driven**: The narrator reacts to ticks and user text, it never drives the game loop
//! - **Recorded**: Every candidate reaches history, even when it was not said aloud
//! - **Deterministic When Seeded**: Phrase selection follows a configurable seed

pub mod classifier;
pub mod clock;
pub mod config;
pub mod error;
pub mod funnel;
pub mod history;
pub mod justification;
pub mod narrator;
pub mod phrases;
pub mod query;
pub mod scan;
pub mod sink;

pub use classifier::EventClassifier;
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{NarratorConfig, ScanWindow};
pub use error::{NarrationError, Result};
pub use funnel::{Funnel, FunnelGate, QuietWindowTicker};
pub use history::*;
pub use justification::JustificationEngine;
pub use narrator::{Conversation, Narrator, TickNarrator};
pub use query::{ControllerSwitch, Query, QueryContext, QueryResolver};
pub use scan::{Hazard, HazardScan};
pub use sink::{ChannelSink, MemorySink, OutputSink, SpeakerSink};
