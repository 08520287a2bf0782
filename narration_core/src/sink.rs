//! Where the agent's utterances go.

use crossbeam_channel::Sender;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::warn;

/// The only capability the narrator needs from the display: say a line.
pub trait OutputSink: Send + Sync {
    fn emit(&self, text: &str);
}

impl<S: OutputSink + ?Sized> OutputSink for Arc<S> {
    fn emit(&self, text: &str) {
        (**self).emit(text)
    }
}

/// Prefixes every line with a speaker name, e.g. "Mario: Wahoo".
pub struct SpeakerSink<S> {
    speaker: String,
    inner: S,
}

impl<S: OutputSink> SpeakerSink<S> {
    /// Create a sink that prefixes lines with `speaker`.
    pub fn new(speaker: impl Into<String>, inner: S) -> Self {
        Self {
            speaker: speaker.into(),
            inner,
        }
    }
}

impl<S: OutputSink> OutputSink for SpeakerSink<S> {
    fn emit(&self, text: &str) {
        self.inner.emit(&format!("{}: {}", self.speaker, text));
    }
}

/// Forwards lines to another thread, typically the UI.
pub struct ChannelSink {
    tx: Sender<String>,
}

impl ChannelSink {
    /// Create a sink sending each line down `tx`.
    pub fn new(tx: Sender<String>) -> Self {
        Self { tx }
    }
}

impl OutputSink for ChannelSink {
    fn emit(&self, text: &str) {
        if self.tx.send(text.to_string()).is_err() {
            warn!("display went away, dropping utterance: {}", text);
        }
    }
}

/// Keeps every line in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    lines: Mutex<Vec<String>>,
}

impl MemorySink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every line emitted so far.
    pub fn lines(&self) -> Vec<String> {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Remove and return everything said so far.
    pub fn take(&self) -> Vec<String> {
        std::mem::take(&mut *self.lines.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

impl OutputSink for MemorySink {
    fn emit(&self, text: &str) {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(text.to_string());
    }
}
