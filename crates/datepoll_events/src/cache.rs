//! Event cache keyed by event id.
//!
//! Entries are replaced whole on every successful fetch; nothing is merged.
//! Two overlapping fetches of the same event both write back and the one that
//! completes last wins, even if it read older data.

use datepoll_common::models::Event;
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};
use tracing::debug;

#[derive(Debug, Default)]
pub struct EventCache {
    entries: RwLock<HashMap<String, Event>>,
}

impl EventCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `event`, replacing any entry with the same id.
    pub fn upsert(&self, event: Event) {
        debug!("Caching event {}", event.id);
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.insert(event.id.clone(), event);
    }

    /// Cached copy of an event. Never fetches.
    pub fn get(&self, event_id: &str) -> Option<Event> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries.get(event_id).cloned()
    }

    pub fn remove(&self, event_id: &str) -> Option<Event> {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.remove(event_id)
    }

    pub fn len(&self) -> usize {
        self.entries.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

/// Holds the message of the most recent transient failure.
///
/// Cleared when an operation starts, set when it fails.
#[derive(Debug, Default)]
pub struct LastError {
    slot: RwLock<Option<String>>,
}

impl LastError {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, message: impl Into<String>) {
        *self.slot.write().unwrap_or_else(PoisonError::into_inner) = Some(message.into());
    }

    pub fn clear(&self) {
        *self.slot.write().unwrap_or_else(PoisonError::into_inner) = None;
    }

    pub fn get(&self) -> Option<String> {
        self.slot.read().unwrap_or_else(PoisonError::into_inner).clone()
    }
}
