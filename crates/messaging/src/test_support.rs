//! In-memory senders for tests of code that dispatches push messages.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::{MessageId, MessagingError, PushMessage, PushSender};

/// Captures every message instead of sending it.
#[derive(Clone, Default)]
pub struct RecordingSender {
    sent: Arc<Mutex<Vec<PushMessage>>>,
}

impl RecordingSender {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn sent(&self) -> Vec<PushMessage> {
        self.sent.lock().await.clone()
    }
}

#[async_trait]
impl PushSender for RecordingSender {
    async fn send(&self, message: &PushMessage) -> Result<MessageId, MessagingError> {
        let mut sent = self.sent.lock().await;
        sent.push(message.clone());
        Ok(MessageId(format!("projects/test/messages/{}", sent.len())))
    }
}

/// Rejects every message as the provider would on an outage.
#[derive(Clone, Default)]
pub struct FailingSender;

#[async_trait]
impl PushSender for FailingSender {
    async fn send(&self, _message: &PushMessage) -> Result<MessageId, MessagingError> {
        Err(MessagingError::Provider {
            status: 503,
            body: "unavailable".to_string(),
        })
    }
}
