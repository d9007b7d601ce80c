//! Hand-rolled transport doubles for service tests.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Mutex;
use vb_core::error::{AppError, Result};
use vb_core::models::{Author, Button, MessageRef};
use vb_core::traits::Transport;

pub fn test_author(user_id: &str) -> Author {
    Author {
        user_id: user_id.to_string(),
        username: Some(user_id.to_string()),
        display_name: Some(user_id.to_string()),
    }
}

#[derive(Debug, Clone)]
pub struct SentMessage {
    pub recipient: String,
    pub text: String,
    pub buttons: Vec<Button>,
}

/// Records every delivery; can be flipped to fail everything, to prove
/// that committed state never depends on the transport.
#[derive(Default)]
pub struct RecordingTransport {
    sent: Mutex<Vec<SentMessage>>,
    edits: Mutex<Vec<(MessageRef, Vec<Button>)>>,
    next_ref: AtomicU64,
    failing: AtomicBool,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_all(&self) {
        self.failing.store(true, Ordering::SeqCst);
    }

    pub fn sent(&self) -> Vec<SentMessage> {
        self.sent.lock().unwrap().clone()
    }

    pub fn edits(&self) -> Vec<(MessageRef, Vec<Button>)> {
        self.edits.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn send_message(
        &self,
        recipient: &str,
        text: &str,
        buttons: &[Button],
    ) -> Result<MessageRef> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(AppError::Transport("test transport is down".into()));
        }
        self.sent.lock().unwrap().push(SentMessage {
            recipient: recipient.to_string(),
            text: text.to_string(),
            buttons: buttons.to_vec(),
        });
        let n = self.next_ref.fetch_add(1, Ordering::SeqCst);
        Ok(MessageRef(format!("msg-{n}")))
    }

    async fn edit_message_buttons(&self, message: &MessageRef, buttons: &[Button]) -> Result<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(AppError::Transport("test transport is down".into()));
        }
        self.edits
            .lock()
            .unwrap()
            .push((message.clone(), buttons.to_vec()));
        Ok(())
    }
}
