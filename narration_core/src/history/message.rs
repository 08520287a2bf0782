//! Messages produced by the classifier and recorded in history.

use agent_world::{EventKind, WorldSnapshot};
use chrono::NaiveTime;
use std::sync::Arc;
use uuid::Uuid;

/// Unique identifier for logged messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MessageId(pub Uuid);

impl MessageId {
    /// Create a new random message ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for MessageId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for MessageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A classifier output that has not been through the funnel yet.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub kind: EventKind,
    pub text: String,
    /// The grid at the tick the candidate was raised.
    pub snapshot: Arc<WorldSnapshot>,
}

impl Candidate {
    /// Create a candidate for `kind` raised against `snapshot`.
    pub fn new(kind: EventKind, text: impl Into<String>, snapshot: Arc<WorldSnapshot>) -> Self {
        Self {
            kind,
            text: text.into(),
            snapshot,
        }
    }

    /// Stamp the candidate, turning it into a history entry.
    pub fn into_logged(self, timestamp: NaiveTime) -> LoggedMessage {
        LoggedMessage {
            id: MessageId::new(),
            kind: self.kind,
            text: self.text,
            snapshot: self.snapshot,
            timestamp,
        }
    }
}

/// An entry in the history index. Immutable once created.
#[derive(Debug, Clone)]
pub struct LoggedMessage {
    id: MessageId,
    kind: EventKind,
    text: String,
    snapshot: Arc<WorldSnapshot>,
    timestamp: NaiveTime,
}

impl LoggedMessage {
    pub fn id(&self) -> MessageId {
        self.id
    }

    pub fn kind(&self) -> EventKind {
        self.kind
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// The grid recorded with the message.
    pub fn snapshot(&self) -> &WorldSnapshot {
        &self.snapshot
    }

    /// Start of the bucket the message was ingested into.
    pub fn timestamp(&self) -> NaiveTime {
        self.timestamp
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_logged_keeps_content() {
        let snapshot = Arc::new(WorldSnapshot::empty(4, 4).unwrap());
        let candidate = Candidate::new(EventKind::Jump, "Hop!", snapshot.clone());
        let at = NaiveTime::from_hms_opt(9, 30, 0).unwrap();

        let logged = candidate.into_logged(at);
        assert_eq!(logged.kind(), EventKind::Jump);
        assert_eq!(logged.text(), "Hop!");
        assert_eq!(logged.timestamp(), at);
        assert_eq!(logged.snapshot(), snapshot.as_ref());
    }

    #[test]
    fn test_ids_are_unique() {
        let snapshot = Arc::new(WorldSnapshot::empty(1, 1).unwrap());
        let at = NaiveTime::MIN;
        let a = Candidate::new(EventKind::Jump, "Hop!", snapshot.clone()).into_logged(at);
        let b = Candidate::new(EventKind::Jump, "Hop!", snapshot).into_logged(at);
        assert_ne!(a.id(), b.id());
    }
}
