use async_trait::async_trait;
use tracing::info;

use crate::{MessageId, MessagingError, PushMessage};

/// Dispatches one message to one device.
#[async_trait]
pub trait PushSender: Send + Sync {
    async fn send(&self, message: &PushMessage) -> Result<MessageId, MessagingError>;
}

/// Dry-run sender that records outgoing messages in the log only.
#[derive(Debug, Clone, Default)]
pub struct LoggingSender;

#[async_trait]
impl PushSender for LoggingSender {
    async fn send(&self, message: &PushMessage) -> Result<MessageId, MessagingError> {
        let title = message.notification.as_ref().map(|n| n.title.as_str());
        info!(
            token = %masked_token(&message.token),
            ?title,
            data = ?message.data,
            "push provider not configured, message logged only"
        );
        Ok(MessageId("dry-run".to_string()))
    }
}

/// Device tokens address a single installation; only the tail is logged.
fn masked_token(token: &str) -> String {
    const VISIBLE: usize = 4;

    let count = token.chars().count();
    if count <= VISIBLE * 2 {
        return "****".to_string();
    }

    let tail: String = token.chars().skip(count - VISIBLE).collect();
    format!("****{tail}")
}
