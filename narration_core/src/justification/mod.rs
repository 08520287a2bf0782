//! Justification Engine - explains a past action from the grid recorded with it.
//!
//! The explanation is a heuristic: it names whatever hazards sat in front of
//! the agent when the message was logged. It is deterministic for a given
//! snapshot, not necessarily the real reason.

use agent_world::EventKind;

use crate::clock::format_timestamp;
use crate::config::{NarratorConfig, ScanWindow};
use crate::history::LoggedMessage;
use crate::scan::HazardScan;

/// Produces "why" answers for logged messages.
#[derive(Debug, Clone)]
pub struct JustificationEngine {
    window: ScanWindow,
    min_gap_width: usize,
}

impl JustificationEngine {
    /// Create an engine scanning `window` for reasons.
    pub fn new(window: ScanWindow, min_gap_width: usize) -> Self {
        Self {
            window,
            min_gap_width,
        }
    }

    /// Create an engine from the justification settings.
    pub fn from_config(config: &NarratorConfig) -> Self {
        Self::new(config.justification_window, config.min_gap_width)
    }

    /// Explain a logged message. The answer always carries its timestamp.
    pub fn explain(&self, message: &LoggedMessage) -> String {
        let at = format_timestamp(message.timestamp());
        match message.kind() {
            EventKind::Jump => {
                let reasons = self.reasons(message);
                if reasons.is_empty() {
                    format!("I jumped at {}, but I can't remember anything in my way.", at)
                } else {
                    format!(
                        "I jumped at {}. Probably because there was {} in my way.",
                        at,
                        join_names(&reasons)
                    )
                }
            }
            other => format!("I {} at {}. I'm not sure why.", other.past_tense(), at),
        }
    }

    /// Hazard names ahead of the agent, deduplicated, hole first.
    pub fn reasons(&self, message: &LoggedMessage) -> Vec<String> {
        let scan = HazardScan::new(message.snapshot(), self.window, self.min_gap_width);
        let mut names: Vec<String> = Vec::new();
        for hazard in scan.hazards() {
            let name = hazard.name();
            if !names.contains(&name) {
                names.push(name);
            }
        }
        names
    }
}

/// "a", "a and b", "a, b and c".
fn join_names(names: &[String]) -> String {
    match names {
        [] => String::new(),
        [only] => only.clone(),
        [init @ .., last] => format!("{} and {}", init.join(", "), last),
    }
}
