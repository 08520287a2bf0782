//! Narrator configuration.

use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

use crate::error::{NarrationError, Result};

/// A rectangle around the agent, measured in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct ScanWindow {
    /// Columns behind the agent.
    pub behind: usize,
    /// Columns ahead of the agent.
    pub ahead: usize,
    /// Rows above the agent.
    pub above: usize,
    /// Rows below the agent.
    pub below: usize,
}

impl ScanWindow {
    /// Create a window from its four extents.
    pub fn new(behind: usize, ahead: usize, above: usize, below: usize) -> Self {
        Self {
            behind,
            ahead,
            above,
            below,
        }
    }
}

/// Configuration for the narrator.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NarratorConfig {
    /// How long a kind of utterance stays muted after it was said.
    pub refresh_interval_ms: u64,

    /// How often the quiet-window ticker looks for something to clear.
    pub idle_interval_ms: u64,

    /// Width of one history bucket.
    pub timestamp_resolution_secs: u32,

    /// Fixes phrase selection when set.
    pub rng_seed: Option<u64>,

    /// Where the classifier looks for danger worth a warning.
    pub caution_window: ScanWindow,

    /// Where a justification looks for the reason behind an action.
    pub justification_window: ScanWindow,

    /// Narrowest run of bottomless columns that counts as a hole.
    pub min_gap_width: usize,
}

impl Default for NarratorConfig {
    fn default() -> Self {
        Self {
            refresh_interval_ms: 2000,
            idle_interval_ms: 50,
            timestamp_resolution_secs: 1,
            rng_seed: None,
            caution_window: ScanWindow::new(2, 4, 2, 1),
            justification_window: ScanWindow::new(0, 3, 1, 1),
            min_gap_width: 2,
        }
    }
}

impl NarratorConfig {
    /// Parse a TOML document; missing keys keep their defaults.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    /// Reject zero intervals, zero resolution and zero gap width.
    pub fn validate(&self) -> Result<()> {
        if self.refresh_interval_ms == 0 {
            return Err(NarrationError::InvalidConfig(
                "refresh_interval_ms must be positive".into(),
            ));
        }
        if self.idle_interval_ms == 0 {
            return Err(NarrationError::InvalidConfig(
                "idle_interval_ms must be positive".into(),
            ));
        }
        if self.timestamp_resolution_secs == 0 {
            return Err(NarrationError::InvalidConfig(
                "timestamp_resolution_secs must be positive".into(),
            ));
        }
        if self.min_gap_width == 0 {
            return Err(NarrationError::InvalidConfig(
                "min_gap_width must be positive".into(),
            ));
        }
        Ok(())
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_millis(self.refresh_interval_ms)
    }

    pub fn idle_interval(&self) -> Duration {
        Duration::from_millis(self.idle_interval_ms)
    }
}
