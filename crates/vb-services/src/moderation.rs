//! # Moderation Service
//!
//! The submission lifecycle state machine: a raw message becomes a
//! Pending vent, an admin decision moves it to a terminal state, and an
//! approval assigns the next public number and publishes to the channel.
//!
//! Ordering on approval is load-bearing: the number is allocated and the
//! state durably committed before anything else happens. The channel
//! publish and the submitter notification are best-effort follow-ups,
//! so a crash between allocation and publish leaves a gap in public
//! numbers, never a duplicate.

use crate::markup;
use crate::notify::Notifier;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;
use vb_core::error::{AppError, Result};
use vb_core::models::{Author, Decision, DecisionOutcome, Vent};
use vb_core::traits::{SequenceStore, Transport, VentRepo};

/// Durable counter key for the public vent number.
pub const VENT_NUMBER_KEY: &str = "next_vent_number";

/// Static wiring the service needs from the environment.
#[derive(Debug, Clone)]
pub struct ModerationConfig {
    /// The single admin allowed to decide on submissions.
    pub admin_id: String,
    /// Broadcast channel approved vents are published to.
    pub channel_id: String,
    /// First public number ever assigned (counter created lazily).
    pub start_number: i64,
    /// Base URL for the comments deep link on published vents.
    pub deep_link_base: String,
}

pub struct ModerationService {
    vents: Arc<dyn VentRepo>,
    sequence: Arc<dyn SequenceStore>,
    transport: Arc<dyn Transport>,
    notifier: Notifier,
    config: ModerationConfig,
}

impl ModerationService {
    pub fn new(
        vents: Arc<dyn VentRepo>,
        sequence: Arc<dyn SequenceStore>,
        transport: Arc<dyn Transport>,
        config: ModerationConfig,
    ) -> Self {
        let notifier = Notifier::new(transport.clone());
        Self {
            vents,
            sequence,
            transport,
            notifier,
            config,
        }
    }

    /// Accept a new submission: persist it Pending and put a review card
    /// with approve/reject buttons in front of the admin. The card is
    /// best-effort; the persisted vent is always reachable via
    /// [`list_pending`](Self::list_pending).
    pub async fn submit(&self, author: Author, text: &str) -> Result<Vent> {
        let text = text.trim();
        if text.is_empty() {
            return Err(AppError::Validation("vent text must not be empty".into()));
        }

        let vent = Vent::new_pending(author, text);
        self.vents.create_vent(&vent).await?;
        info!(vent_id = %vent.id, "vent received, queued for review");

        let card = format!(
            "🆕 New vent submission\n\nFrom: {}\nID: {}\n\n{}",
            vent.author.label(),
            vent.id,
            vent.text
        );
        self.notifier
            .notify_with_buttons(&self.config.admin_id, &card, &markup::decision_buttons(vent.id))
            .await;

        Ok(vent)
    }

    /// Apply an admin decision to a pending vent.
    ///
    /// Re-pressing a decision button on an already-terminal vent returns
    /// [`DecisionOutcome::AlreadyDecided`]: no state change, no second
    /// publish, no second notification.
    pub async fn decide(
        &self,
        vent_id: Uuid,
        actor_id: &str,
        decision: Decision,
    ) -> Result<DecisionOutcome> {
        if actor_id != self.config.admin_id {
            return Err(AppError::Unauthorized(
                "only the configured admin can review submissions".into(),
            ));
        }

        let vent = self
            .vents
            .get_vent(vent_id)
            .await?
            .ok_or_else(|| AppError::vent_not_found(vent_id))?;

        if vent.is_terminal() {
            return Ok(DecisionOutcome::AlreadyDecided);
        }

        match decision {
            Decision::Reject => self.reject(vent).await,
            Decision::Approve => self.approve(vent).await,
        }
    }

    async fn reject(&self, vent: Vent) -> Result<DecisionOutcome> {
        if !self.vents.mark_rejected(vent.id).await? {
            return Ok(DecisionOutcome::AlreadyDecided);
        }
        info!(vent_id = %vent.id, "vent rejected");

        self.notifier
            .notify(
                &vent.author.user_id,
                "❌ Your vent has been reviewed but was not approved for posting.",
            )
            .await;
        Ok(DecisionOutcome::Rejected)
    }

    async fn approve(&self, vent: Vent) -> Result<DecisionOutcome> {
        let number = self
            .sequence
            .allocate_next(VENT_NUMBER_KEY, self.config.start_number)
            .await?;

        // The guarded update is the commit point. Losing it means a
        // concurrent decision got there first; the allocated number is
        // abandoned, leaving a gap rather than risking a duplicate.
        if !self.vents.mark_approved(vent.id, number).await? {
            warn!(vent_id = %vent.id, number, "approval lost the transition race, number abandoned");
            return Ok(DecisionOutcome::AlreadyDecided);
        }
        info!(vent_id = %vent.id, number, "vent approved");

        self.publish(&vent, number).await;

        self.notifier
            .notify(
                &vent.author.user_id,
                &format!(
                    "✅ Your vent has been approved and posted as Vent #{number}.\nThank you for sharing!"
                ),
            )
            .await;

        Ok(DecisionOutcome::Approved {
            public_number: number,
        })
    }

    /// Best-effort channel publish. The approval already committed;
    /// failures here are logged and leave a gap in the channel, not in
    /// the numbering.
    async fn publish(&self, vent: &Vent, number: i64) {
        let text = format!("Vent #{}\n\n{}", number, vent.text);
        let button = markup::comments_button(&self.config.deep_link_base, vent.id, 0);

        match self
            .transport
            .send_message(&self.config.channel_id, &text, &[button])
            .await
        {
            Ok(message) => {
                if let Err(err) = self.vents.record_publication(vent.id, &message).await {
                    warn!(vent_id = %vent.id, %err, "published but failed to record the channel message ref");
                }
            }
            Err(err) => {
                warn!(vent_id = %vent.id, %err, "channel publish failed; approval stands");
            }
        }
    }

    /// Admin-only view of the review queue, newest first.
    pub async fn list_pending(&self, actor_id: &str) -> Result<Vec<Vent>> {
        if actor_id != self.config.admin_id {
            return Err(AppError::Unauthorized(
                "only the configured admin can list pending submissions".into(),
            ));
        }
        self.vents.list_pending().await
    }
}
