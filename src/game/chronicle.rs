//! Bounded, most-recent-first log of what happened to the kingdom.

use std::collections::VecDeque;

use serde::Serialize;

use crate::game::Event;

/// One chronicle line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LogEntry {
    /// Turn on which the event was written.
    pub turn: u32,
    /// What happened.
    pub event: Event,
}

/// Fixed-capacity event log. The newest entry is first; pushing beyond the
/// capacity evicts the oldest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chronicle {
    entries: VecDeque<LogEntry>,
    capacity: usize,
}

impl Chronicle {
    /// Create an empty chronicle. A zero capacity is raised to one.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Create a chronicle holding only the welcome message.
    #[must_use]
    pub fn with_welcome(capacity: usize, turn: u32) -> Self {
        let mut chronicle = Self::new(capacity);
        chronicle.push(turn, Event::Welcome);
        chronicle
    }

    /// Record an event as the newest entry.
    pub fn push(&mut self, turn: u32, event: Event) {
        self.entries.push_front(LogEntry { turn, event });
        self.entries.truncate(self.capacity);
    }

    /// Record events in the order they happened.
    pub fn extend(&mut self, turn: u32, events: impl IntoIterator<Item = Event>) {
        for event in events {
            self.push(turn, event);
        }
    }

    /// Entries, newest first.
    pub fn iter(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter()
    }

    /// Most recent entry.
    #[must_use]
    pub fn latest(&self) -> Option<&LogEntry> {
        self.entries.front()
    }

    /// Number of entries held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum number of entries kept.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Messages as display strings, newest first.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.event.to_string()).collect()
    }
}
