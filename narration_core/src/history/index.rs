//! History index - the append-only record of everything the agent did.

use agent_world::EventKind;
use chrono::NaiveTime;
use std::collections::BTreeMap;
use std::ops::Bound;

use super::{Candidate, LoggedMessage};
use crate::clock::bucket_start;

/// Result of a history query.
#[derive(Debug, Clone)]
pub enum Lookup {
    /// Nothing has been recorded at all.
    Empty,
    /// History exists but holds no matching message.
    NotFound,
    Found(LoggedMessage),
}

impl Lookup {
    /// The message, when there was a match.
    pub fn found(self) -> Option<LoggedMessage> {
        match self {
            Lookup::Found(message) => Some(message),
            _ => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Lookup::Found(_))
    }
}

/// Timestamp-ordered buckets of logged messages.
///
/// Messages that arrive within the same bucket keep their ingestion order.
/// Entries are never removed or changed.
#[derive(Debug, Clone)]
pub struct HistoryIndex {
    buckets: BTreeMap<NaiveTime, Vec<LoggedMessage>>,
    resolution_secs: u32,
    len: usize,
}

impl Default for HistoryIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl HistoryIndex {
    /// Create an empty index with one-second buckets.
    pub fn new() -> Self {
        Self::with_resolution(1)
    }

    /// Create an empty index with buckets `resolution_secs` wide.
    pub fn with_resolution(resolution_secs: u32) -> Self {
        Self {
            buckets: BTreeMap::new(),
            resolution_secs: resolution_secs.max(1),
            len: 0,
        }
    }

    /// Record candidates observed at `now`.
    ///
    /// No bucket is created when there is nothing to record.
    pub fn append(&mut self, now: NaiveTime, candidates: Vec<Candidate>) {
        if candidates.is_empty() {
            return;
        }

        let key = self.bucket_of(now);
        let bucket = self.buckets.entry(key).or_default();
        for candidate in candidates {
            bucket.push(candidate.into_logged(key));
            self.len += 1;
        }
    }

    /// The bucket a time falls into.
    pub fn bucket_of(&self, time: NaiveTime) -> NaiveTime {
        bucket_start(time, self.resolution_secs)
    }

    /// Most recent message of a kind.
    pub fn most_recent_matching(&self, kind: EventKind) -> Lookup {
        self.search(self.buckets.iter().rev(), kind)
    }

    /// First message of a kind in the bucket holding `time`, or else in the
    /// nearest bucket after it.
    pub fn matching_at_or_after(&self, kind: EventKind, time: NaiveTime) -> Lookup {
        let from = self.bucket_of(time);
        self.search(self.buckets.range(from..), kind)
    }

    /// Latest message of a kind strictly before `reference`.
    pub fn matching_before(&self, kind: EventKind, reference: NaiveTime) -> Lookup {
        self.search(self.buckets.range(..reference).rev(), kind)
    }

    /// Earliest message of a kind strictly after `reference`.
    pub fn matching_after(&self, kind: EventKind, reference: NaiveTime) -> Lookup {
        self.search(
            self.buckets
                .range((Bound::Excluded(reference), Bound::Unbounded)),
            kind,
        )
    }

    fn search<'a, I>(&'a self, buckets: I, kind: EventKind) -> Lookup
    where
        I: Iterator<Item = (&'a NaiveTime, &'a Vec<LoggedMessage>)>,
    {
        if self.is_empty() {
            return Lookup::Empty;
        }
        buckets
            .flat_map(|(_, messages)| messages.iter())
            .find(|message| message.kind() == kind)
            .cloned()
            .map(Lookup::Found)
            .unwrap_or(Lookup::NotFound)
    }

    /// Messages recorded in one bucket.
    pub fn bucket(&self, key: NaiveTime) -> &[LoggedMessage] {
        self.buckets.get(&key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Every message, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &LoggedMessage> {
        self.buckets.values().flatten()
    }

    /// Number of logged messages.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }
}
