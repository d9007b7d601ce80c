//! # Domain Models
//!
//! These structs represent the core entities of Ventboard.
//! We use UUID v7 for time-ordered, globally unique identification.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identity of a submitter as seen by the chat transport.
///
/// The `user_id` is the transport's stable identifier; handle and display
/// name are whatever the transport happened to supply and are only used
/// for the admin review card, never shown in the channel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Author {
    pub user_id: String,
    pub username: Option<String>,
    pub display_name: Option<String>,
}

impl Author {
    /// Admin-facing label, e.g. `Alice (@alice)` or `no_username`.
    pub fn label(&self) -> String {
        let name = self.display_name.as_deref().unwrap_or("Anonymous");
        match &self.username {
            Some(handle) => format!("{} (@{})", name, handle),
            None => format!("{} (no_username)", name),
        }
    }
}

/// Lifecycle state of a submitted vent.
///
/// A single tagged enum rather than independent `approved`/`rejected`
/// flags: `Approved` and `Rejected` are terminal, there is no transition
/// back to `Pending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VentState {
    Pending,
    Approved,
    Rejected,
}

/// Opaque reference to a message the transport delivered, used to edit
/// the published artifact's buttons later.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageRef(pub String);

/// A user-submitted anonymous text item subject to moderation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vent {
    pub id: Uuid,
    pub author: Author,
    pub text: String,
    pub state: VentState,
    /// The sequential public identifier. `Some` iff `state == Approved`;
    /// assigned exactly once, strictly increasing across all approvals.
    pub public_number: Option<i64>,
    /// `Some` iff the vent has been published to the broadcast channel.
    pub channel_message: Option<MessageRef>,
    /// Live comment counter shown on the published artifact.
    /// Meaningful once published; starts at 0 on approval.
    pub comment_count: i64,
    pub created_at: DateTime<Utc>,
}

impl Vent {
    /// A fresh pending vent, never persisted yet.
    pub fn new_pending(author: Author, text: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7(),
            author,
            text: text.into(),
            state: VentState::Pending,
            public_number: None,
            channel_message: None,
            comment_count: 0,
            created_at: Utc::now(),
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.state != VentState::Pending
    }
}

/// A threaded anonymous reply attached to a specific vent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: Uuid,
    /// Must reference a vent that existed at comment-creation time.
    /// There is no transactional join; the application enforces this.
    pub vent_id: Uuid,
    pub author: Author,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

impl Comment {
    pub fn new(vent_id: Uuid, author: Author, text: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7(),
            vent_id,
            author,
            text: text.into(),
            created_at: Utc::now(),
        }
    }
}

/// What the next text message from a given user means.
///
/// Transient, per user, never persisted: a restart drops all in-flight
/// intents and the user re-initiates. At most one intent per user; a new
/// one silently overwrites the old.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    ComposeVent,
    ComposeComment(Uuid),
}

/// An admin's verdict on a pending vent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Approve,
    Reject,
}

/// Result of applying a [`Decision`].
///
/// `AlreadyDecided` is the idempotent acknowledgment for a re-pressed
/// decision button: not an error, and guaranteed to have changed nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecisionOutcome {
    Approved { public_number: i64 },
    Rejected,
    AlreadyDecided,
}

/// An inline action attached to a delivered message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    pub label: String,
    pub action: ButtonAction,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ButtonAction {
    /// Round-trips back as a callback payload (e.g. `approve_<id>`).
    Callback(String),
    /// Deep-link style URL into the bot.
    Url(String),
}

impl Button {
    pub fn callback(label: impl Into<String>, payload: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            action: ButtonAction::Callback(payload.into()),
        }
    }

    pub fn url(label: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            action: ButtonAction::Url(url.into()),
        }
    }

    /// The callback payload, if this button round-trips one.
    pub fn callback_payload(&self) -> Option<&str> {
        match &self.action {
            ButtonAction::Callback(payload) => Some(payload),
            ButtonAction::Url(_) => None,
        }
    }
}
