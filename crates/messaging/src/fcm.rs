use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use attendance_config::MessagingConfig;

use crate::{MessageId, MessagingError, PushMessage, PushSender};

/// Client for the FCM HTTP v1 `messages:send` endpoint.
#[derive(Clone)]
pub struct FcmClient {
    client: Client,
    endpoint: String,
    access_token: String,
}

#[derive(Serialize)]
struct SendRequest<'a> {
    message: &'a PushMessage,
}

#[derive(Deserialize)]
struct SendResponse {
    name: String,
}

impl FcmClient {
    pub fn new(config: &MessagingConfig) -> Result<Self, MessagingError> {
        let project_id = config
            .project_id
            .as_deref()
            .filter(|value| !value.is_empty())
            .ok_or(MessagingError::NotConfigured("missing project id"))?;
        let access_token = config
            .access_token
            .clone()
            .filter(|value| !value.is_empty())
            .ok_or(MessagingError::NotConfigured("missing access token"))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .build()?;

        let endpoint = format!(
            "{}/v1/projects/{}/messages:send",
            config.base_url.trim_end_matches('/'),
            project_id
        );

        Ok(Self {
            client,
            endpoint,
            access_token,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl PushSender for FcmClient {
    async fn send(&self, message: &PushMessage) -> Result<MessageId, MessagingError> {
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.access_token)
            .json(&SendRequest { message })
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            warn!(status = status.as_u16(), "push provider rejected message");
            return Err(MessagingError::Provider {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: SendResponse = serde_json::from_str(&body)?;
        debug!(message_id = %parsed.name, "push message accepted");
        Ok(MessageId(parsed.name))
    }
}
