//! Hazard detection over a snapshot window.
//!
//! Shared by the classifier (to warn about danger) and the justification
//! engine (to explain a past action). Each caller brings its own window.

use agent_world::{Species, WorldSnapshot};
use std::ops::RangeInclusive;

use crate::config::ScanWindow;

/// Something in the agent's way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hazard {
    Hole,
    Enemy { species: Species, winged: bool },
}

impl Hazard {
    /// Noun phrase with article, e.g. "a hole" or "a Goomba".
    pub fn name(&self) -> String {
        match self {
            Hazard::Hole => "a hole".to_string(),
            Hazard::Enemy { species, .. } => species.with_article(),
        }
    }
}

/// Scans one window of a snapshot.
pub struct HazardScan<'a> {
    snapshot: &'a WorldSnapshot,
    window: ScanWindow,
    min_gap_width: usize,
}

impl<'a> HazardScan<'a> {
    /// Create a scan of `window` around the agent.
    pub fn new(snapshot: &'a WorldSnapshot, window: ScanWindow, min_gap_width: usize) -> Self {
        Self {
            snapshot,
            window,
            min_gap_width: min_gap_width.max(1),
        }
    }

    fn columns(&self) -> RangeInclusive<usize> {
        let (ax, _) = self.snapshot.agent_position();
        let last = self.snapshot.width() - 1;
        ax.saturating_sub(self.window.behind)..=(ax + self.window.ahead).min(last)
    }

    fn rows(&self) -> RangeInclusive<usize> {
        let (_, ay) = self.snapshot.agent_position();
        let last = self.snapshot.height() - 1;
        ay.saturating_sub(self.window.above)..=(ay + self.window.below).min(last)
    }

    /// Whether the window contains a run of bottomless columns at least
    /// `min_gap_width` wide.
    pub fn has_gap(&self) -> bool {
        let (_, ay) = self.snapshot.agent_position();
        if ay + 1 >= self.snapshot.height() {
            // Nothing below the agent is visible.
            return false;
        }

        let mut run = 0;
        for column in self.columns() {
            if self.snapshot.is_bottomless(column) {
                run += 1;
                if run >= self.min_gap_width {
                    return true;
                }
            } else {
                run = 0;
            }
        }
        false
    }

    /// Enemies in the window, left to right then top to bottom.
    pub fn enemies(&self) -> Vec<(Species, bool)> {
        let mut found = Vec::new();
        for column in self.columns() {
            for row in self.rows() {
                if let Some(enemy) = self.snapshot.get(column, row).and_then(|c| c.enemy()) {
                    found.push(enemy);
                }
            }
        }
        found
    }

    /// Every hazard in the window: the hole first, then enemies in scan order.
    pub fn hazards(&self) -> Vec<Hazard> {
        let mut hazards = Vec::new();
        if self.has_gap() {
            hazards.push(Hazard::Hole);
        }
        hazards.extend(
            self.enemies()
                .into_iter()
                .map(|(species, winged)| Hazard::Enemy { species, winged }),
        );
        hazards
    }
}
