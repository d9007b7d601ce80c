//! # Inbound Router
//!
//! Transport-agnostic dispatch for the two kinds of inbound events a chat
//! surface produces: free text (interpreted through the intent tracker)
//! and callback payloads from inline buttons (`approve_<id>`,
//! `reject_<id>`, `browse_<id>`, `addcomment_<id>`). Replies are returned
//! as strings for the transport layer to deliver.

use crate::comments::CommentService;
use crate::intent::IntentTracker;
use crate::moderation::ModerationService;
use std::sync::Arc;
use uuid::Uuid;
use vb_core::error::{AppError, Result};
use vb_core::models::{Author, Button, Decision, DecisionOutcome, Intent};

pub struct Router {
    intents: Arc<IntentTracker>,
    moderation: Arc<ModerationService>,
    comments: Arc<CommentService>,
}

/// A reply to hand back to the transport: text, optionally with buttons.
#[derive(Debug, Clone)]
pub struct Reply {
    pub text: String,
    pub buttons: Vec<Button>,
}

impl Reply {
    fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            buttons: Vec::new(),
        }
    }
}

impl Router {
    pub fn new(
        intents: Arc<IntentTracker>,
        moderation: Arc<ModerationService>,
        comments: Arc<CommentService>,
    ) -> Self {
        Self {
            intents,
            moderation,
            comments,
        }
    }

    /// `/start`, optionally with a deep-link payload (`comments_<id>`).
    pub async fn handle_start(&self, _actor: &Author, payload: Option<&str>) -> Result<Vec<Reply>> {
        let mut replies = vec![Reply::text(
            "👋 Welcome to Ventboard!\nUse /vent to send your anonymous vent.",
        )];

        if let Some(payload) = payload {
            if let Some(raw_id) = payload.strip_prefix("comments_") {
                let vent_id = parse_vent_id(raw_id)?;
                replies.push(self.comment_menu(vent_id).await?);
            }
        }
        Ok(replies)
    }

    /// `/vent` or the "Vent Now" keyboard button.
    pub fn begin_vent(&self, user_id: &str) -> Reply {
        self.intents.set(user_id, Intent::ComposeVent);
        Reply::text("📝 Type your vent and send; it will go through review before being posted.")
    }

    /// Free text, interpreted through the user's pending intent. The
    /// intent is consumed up front, whether or not what follows succeeds.
    pub async fn handle_text(&self, author: &Author, text: &str) -> Result<Reply> {
        match self.intents.take(&author.user_id) {
            Some(Intent::ComposeVent) => {
                self.moderation.submit(author.clone(), text).await?;
                Ok(Reply::text("✅ Vent received! Sent to admin for review."))
            }
            Some(Intent::ComposeComment(vent_id)) => {
                self.comments.add_comment(vent_id, author.clone(), text).await?;
                Ok(Reply::text("✅ Your comment has been added!"))
            }
            None => Ok(Reply::text("❌ Unknown message. Use /vent to start.")),
        }
    }

    /// Inline-button callback payloads.
    pub async fn handle_callback(&self, actor: &Author, data: &str) -> Result<Reply> {
        if let Some(raw_id) = data.strip_prefix("approve_") {
            let vent_id = parse_vent_id(raw_id)?;
            let outcome = self
                .moderation
                .decide(vent_id, &actor.user_id, Decision::Approve)
                .await?;
            return Ok(match outcome {
                DecisionOutcome::Approved { public_number } => {
                    Reply::text(format!("✅ Approved & posted (#{public_number})"))
                }
                _ => Reply::text("Already handled."),
            });
        }

        if let Some(raw_id) = data.strip_prefix("reject_") {
            let vent_id = parse_vent_id(raw_id)?;
            let outcome = self
                .moderation
                .decide(vent_id, &actor.user_id, Decision::Reject)
                .await?;
            return Ok(match outcome {
                DecisionOutcome::Rejected => Reply::text("❌ Vent rejected."),
                _ => Reply::text("Already handled."),
            });
        }

        if let Some(raw_id) = data.strip_prefix("browse_") {
            let vent_id = parse_vent_id(raw_id)?;
            let comments = self.comments.list_comments(vent_id).await?;
            if comments.is_empty() {
                return Ok(Reply::text("No comments yet."));
            }
            let rendered: Vec<String> = comments
                .iter()
                .map(|c| format!("💬 {}\n\n👤 Anonymous", c.text))
                .collect();
            return Ok(Reply::text(rendered.join("\n\n")));
        }

        if let Some(raw_id) = data.strip_prefix("addcomment_") {
            let vent_id = parse_vent_id(raw_id)?;
            self.intents
                .set(&actor.user_id, Intent::ComposeComment(vent_id));
            return Ok(Reply::text("✍️ Send your comment now."));
        }

        Ok(Reply::text("Unknown action."))
    }

    /// `/pending`: the admin's review queue, one card per vent.
    pub async fn pending_review(&self, actor: &Author) -> Result<Vec<Reply>> {
        let pending = self.moderation.list_pending(&actor.user_id).await?;
        if pending.is_empty() {
            return Ok(vec![Reply::text("No pending vents.")]);
        }
        Ok(pending
            .into_iter()
            .map(|vent| Reply {
                text: format!(
                    "ID: {}\nFrom: {}\n\n{}",
                    vent.id,
                    vent.author.label(),
                    vent.text
                ),
                buttons: crate::markup::decision_buttons(vent.id).to_vec(),
            })
            .collect())
    }

    async fn comment_menu(&self, vent_id: Uuid) -> Result<Reply> {
        let (vent, buttons) = self.comments.comment_menu(vent_id).await?;
        let number = vent
            .public_number
            .map(|n| n.to_string())
            .unwrap_or_else(|| "—".into());
        Ok(Reply {
            text: format!("Vent #{}\n\n{}", number, vent.text),
            buttons,
        })
    }
}

/// Callback payloads embed the vent id as text; anything unparseable is
/// treated the same as an id that no longer resolves.
fn parse_vent_id(raw: &str) -> Result<Uuid> {
    Uuid::parse_str(raw.trim()).map_err(|_| AppError::vent_not_found(raw.trim()))
}
