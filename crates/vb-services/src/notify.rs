//! # Notification Dispatcher
//!
//! Best-effort delivery to submitters and the admin. A blocked user or a
//! transport hiccup must never abort or reverse the state transition that
//! triggered the notification, so every failure here is logged and
//! swallowed.

use std::sync::Arc;
use tracing::warn;
use vb_core::models::Button;
use vb_core::traits::Transport;

#[derive(Clone)]
pub struct Notifier {
    transport: Arc<dyn Transport>,
}

impl Notifier {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Fire-and-forget text delivery.
    pub async fn notify(&self, user_id: &str, text: &str) {
        if let Err(err) = self.transport.send_message(user_id, text, &[]).await {
            warn!(user_id, %err, "notification delivery failed");
        }
    }

    /// Fire-and-forget delivery with inline buttons (admin review cards).
    pub async fn notify_with_buttons(&self, user_id: &str, text: &str, buttons: &[Button]) {
        if let Err(err) = self.transport.send_message(user_id, text, buttons).await {
            warn!(user_id, %err, "notification delivery failed");
        }
    }
}
