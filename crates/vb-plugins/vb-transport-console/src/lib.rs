//! # vb-transport-console
//!
//! Transport stand-in that writes deliveries to the log instead of a
//! messenger. Used for local runs and demos; the real chat integration
//! implements the same `Transport` port out of tree.

use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::info;
use vb_core::error::Result;
use vb_core::models::{Button, ButtonAction, MessageRef};
use vb_core::traits::Transport;

#[derive(Debug, Default)]
pub struct ConsoleTransport {
    next_ref: AtomicU64,
}

impl ConsoleTransport {
    pub fn new() -> Self {
        Self::default()
    }
}

fn render_buttons(buttons: &[Button]) -> String {
    buttons
        .iter()
        .map(|b| match &b.action {
            ButtonAction::Callback(payload) => format!("[{} -> {}]", b.label, payload),
            ButtonAction::Url(url) => format!("[{} -> {}]", b.label, url),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[async_trait]
impl Transport for ConsoleTransport {
    async fn send_message(
        &self,
        recipient: &str,
        text: &str,
        buttons: &[Button],
    ) -> Result<MessageRef> {
        let n = self.next_ref.fetch_add(1, Ordering::SeqCst);
        let message = MessageRef(format!("console-{n}"));
        info!(
            recipient,
            message_ref = %message.0,
            buttons = %render_buttons(buttons),
            "\n{text}"
        );
        Ok(message)
    }

    async fn edit_message_buttons(&self, message: &MessageRef, buttons: &[Button]) -> Result<()> {
        info!(
            message_ref = %message.0,
            buttons = %render_buttons(buttons),
            "buttons updated"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn message_refs_are_distinct() {
        let transport = ConsoleTransport::new();
        let a = transport.send_message("u1", "hello", &[]).await.unwrap();
        let b = transport.send_message("u2", "world", &[]).await.unwrap();
        assert_ne!(a, b);
    }
}
