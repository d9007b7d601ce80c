//! # Intent Tracker
//!
//! Records what the next text message from a given user means: compose a
//! vent, or compose a comment for a specific parent. In-memory only; a
//! restart loses in-flight intents and the user re-initiates. That is
//! documented behavior, not something to paper over with persistence.

use dashmap::DashMap;
use vb_core::models::Intent;

/// Keyed by transport user id. DashMap gives per-key atomicity, which is
/// all we need: a single user's messages arrive serially, but different
/// users hit the map concurrently.
#[derive(Debug, Default)]
pub struct IntentTracker {
    intents: DashMap<String, Intent>,
}

impl IntentTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the intent for a user's next text message. A prior
    /// unconsumed intent is silently overwritten.
    pub fn set(&self, user_id: &str, intent: Intent) {
        self.intents.insert(user_id.to_string(), intent);
    }

    /// Atomically read-and-clear the user's intent. The intent is
    /// consumed the moment the next message is processed, regardless of
    /// whether what follows succeeds.
    pub fn take(&self, user_id: &str) -> Option<Intent> {
        self.intents.remove(user_id).map(|(_, intent)| intent)
    }
}
