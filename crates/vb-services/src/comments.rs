//! # Comment Threading
//!
//! Anonymous replies attached to a published vent. Persisting the comment
//! and bumping the parent's counter are the durable part; refreshing the
//! `💬 Comments (N)` button on the channel message is a best-effort
//! display update; the stored count is the source of truth.

use crate::markup;
use std::sync::Arc;
use tracing::warn;
use uuid::Uuid;
use vb_core::error::{AppError, Result};
use vb_core::models::{Author, Button, Comment, Vent};
use vb_core::traits::{CommentRepo, Transport, VentRepo};

pub struct CommentService {
    vents: Arc<dyn VentRepo>,
    comments: Arc<dyn CommentRepo>,
    transport: Arc<dyn Transport>,
    deep_link_base: String,
}

impl CommentService {
    pub fn new(
        vents: Arc<dyn VentRepo>,
        comments: Arc<dyn CommentRepo>,
        transport: Arc<dyn Transport>,
        deep_link_base: impl Into<String>,
    ) -> Self {
        Self {
            vents,
            comments,
            transport,
            deep_link_base: deep_link_base.into(),
        }
    }

    /// Attach a comment to an existing vent and bump its live counter.
    pub async fn add_comment(
        &self,
        vent_id: Uuid,
        author: Author,
        text: &str,
    ) -> Result<Comment> {
        let text = text.trim();
        if text.is_empty() {
            return Err(AppError::Validation("comment text must not be empty".into()));
        }

        let vent = self
            .vents
            .get_vent(vent_id)
            .await?
            .ok_or_else(|| AppError::vent_not_found(vent_id))?;

        let comment = Comment::new(vent_id, author, text);
        self.comments.create_comment(&comment).await?;
        let count = self.vents.bump_comment_count(vent_id).await?;

        if let Some(message) = &vent.channel_message {
            let button = markup::comments_button(&self.deep_link_base, vent_id, count);
            if let Err(err) = self.transport.edit_message_buttons(message, &[button]).await {
                warn!(vent_id = %vent_id, %err, "could not refresh the channel comment counter");
            }
        }

        Ok(comment)
    }

    /// All comments on a vent, oldest first. A fresh query each call; no
    /// pagination cursor.
    pub async fn list_comments(&self, vent_id: Uuid) -> Result<Vec<Comment>> {
        self.comments.list_for_vent(vent_id).await
    }

    /// The deep-link entry point: the vent's text plus browse/add buttons.
    pub async fn comment_menu(&self, vent_id: Uuid) -> Result<(Vent, Vec<Button>)> {
        let vent = self
            .vents
            .get_vent(vent_id)
            .await?
            .ok_or_else(|| AppError::vent_not_found(vent_id))?;

        let buttons = vec![
            Button::callback("📖 Browse Comments", format!("browse_{vent_id}")),
            Button::callback("✍️ Add Comment", format!("addcomment_{vent_id}")),
        ];
        Ok((vent, buttons))
    }
}
