//! # Core Traits (Ports)
//!
//! Any plugin must implement these traits to be used by the binary.

use crate::error::Result;
use crate::models::{Button, Comment, MessageRef, Vent};
use async_trait::async_trait;
use uuid::Uuid;

/// Data persistence contract for vents.
///
/// State transitions are guarded at the storage layer: `mark_approved`
/// and `mark_rejected` only fire when the row is still `Pending` and
/// report whether they did. That makes "re-pressed button" races safe
/// without a lock in the service layer.
#[async_trait]
pub trait VentRepo: Send + Sync {
    async fn create_vent(&self, vent: &Vent) -> Result<()>;
    async fn get_vent(&self, id: Uuid) -> Result<Option<Vent>>;
    /// Pending vents, newest first.
    async fn list_pending(&self) -> Result<Vec<Vent>>;

    /// Transition Pending -> Approved, recording the public number.
    /// Returns `false` when the vent was already terminal.
    async fn mark_approved(&self, id: Uuid, public_number: i64) -> Result<bool>;
    /// Transition Pending -> Rejected. Returns `false` when already terminal.
    async fn mark_rejected(&self, id: Uuid) -> Result<bool>;

    /// Attach the broadcast message reference after a successful publish.
    async fn record_publication(&self, id: Uuid, message: &MessageRef) -> Result<()>;
    /// Atomically increment the comment counter, returning the new count.
    async fn bump_comment_count(&self, id: Uuid) -> Result<i64>;
}

/// Data persistence contract for comments.
#[async_trait]
pub trait CommentRepo: Send + Sync {
    async fn create_comment(&self, comment: &Comment) -> Result<()>;
    /// All comments on a vent, oldest first. A fresh query each call.
    async fn list_for_vent(&self, vent_id: Uuid) -> Result<Vec<Comment>>;
}

/// Durable sequence counter contract.
#[async_trait]
pub trait SequenceStore: Send + Sync {
    /// Increment-and-fetch for the named counter, creating it at `start`
    /// if absent. MUST be linearizable: two concurrent calls never see
    /// the same value. Implementations use a single atomic storage
    /// operation, never a read followed by a write.
    async fn allocate_next(&self, key: &str, start: i64) -> Result<i64>;
}

/// Chat-transport contract. The real messenger integration lives behind
/// this boundary; everything in-core treats delivery as best-effort.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Deliver a text message, optionally with inline buttons.
    /// `recipient` is a user id or a broadcast channel id.
    async fn send_message(
        &self,
        recipient: &str,
        text: &str,
        buttons: &[Button],
    ) -> Result<MessageRef>;

    /// Replace the inline buttons on an already-delivered message.
    async fn edit_message_buttons(&self, message: &MessageRef, buttons: &[Button]) -> Result<()>;
}
