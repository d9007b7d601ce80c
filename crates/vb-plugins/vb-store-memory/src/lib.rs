//! # vb-store-memory
//!
//! DashMap-backed implementation of the store ports. Nothing survives a
//! restart; it exists for tests and local runs. The concurrency
//! guarantees still hold: state transitions and the sequence counter go
//! through per-key entry locks, so two tasks never observe the same
//! counter value or both win the same Pending transition.

use async_trait::async_trait;
use dashmap::DashMap;
use uuid::Uuid;
use vb_core::error::Result;
use vb_core::models::{Comment, MessageRef, Vent, VentState};
use vb_core::traits::{CommentRepo, SequenceStore, VentRepo};

#[derive(Debug, Default)]
pub struct MemoryStore {
    vents: DashMap<Uuid, Vent>,
    comments: DashMap<Uuid, Comment>,
    counters: DashMap<String, i64>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl VentRepo for MemoryStore {
    async fn create_vent(&self, vent: &Vent) -> Result<()> {
        self.vents.insert(vent.id, vent.clone());
        Ok(())
    }

    async fn get_vent(&self, id: Uuid) -> Result<Option<Vent>> {
        Ok(self.vents.get(&id).map(|v| v.value().clone()))
    }

    async fn list_pending(&self) -> Result<Vec<Vent>> {
        let mut pending: Vec<Vent> = self
            .vents
            .iter()
            .filter(|v| v.state == VentState::Pending)
            .map(|v| v.value().clone())
            .collect();
        pending.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(pending)
    }

    async fn mark_approved(&self, id: Uuid, public_number: i64) -> Result<bool> {
        // get_mut holds the shard lock, making check-and-set atomic.
        match self.vents.get_mut(&id) {
            Some(mut vent) if vent.state == VentState::Pending => {
                vent.state = VentState::Approved;
                vent.public_number = Some(public_number);
                vent.comment_count = 0;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn mark_rejected(&self, id: Uuid) -> Result<bool> {
        match self.vents.get_mut(&id) {
            Some(mut vent) if vent.state == VentState::Pending => {
                vent.state = VentState::Rejected;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn record_publication(&self, id: Uuid, message: &MessageRef) -> Result<()> {
        if let Some(mut vent) = self.vents.get_mut(&id) {
            vent.channel_message = Some(message.clone());
        }
        Ok(())
    }

    async fn bump_comment_count(&self, id: Uuid) -> Result<i64> {
        match self.vents.get_mut(&id) {
            Some(mut vent) => {
                vent.comment_count += 1;
                Ok(vent.comment_count)
            }
            None => Ok(0),
        }
    }
}

#[async_trait]
impl CommentRepo for MemoryStore {
    async fn create_comment(&self, comment: &Comment) -> Result<()> {
        self.comments.insert(comment.id, comment.clone());
        Ok(())
    }

    async fn list_for_vent(&self, vent_id: Uuid) -> Result<Vec<Comment>> {
        let mut comments: Vec<Comment> = self
            .comments
            .iter()
            .filter(|c| c.vent_id == vent_id)
            .map(|c| c.value().clone())
            .collect();
        // UUID v7 ids are time-ordered, which breaks created_at ties.
        comments.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(comments)
    }
}

#[async_trait]
impl SequenceStore for MemoryStore {
    async fn allocate_next(&self, key: &str, start: i64) -> Result<i64> {
        // The entry guard is held across read and increment.
        let mut next = self.counters.entry(key.to_string()).or_insert(start);
        let value = *next;
        *next += 1;
        Ok(value)
    }
}
