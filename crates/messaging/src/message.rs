use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A single-recipient, token-addressed push message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PushMessage {
    pub token: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification: Option<PushNotification>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub data: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PushNotification {
    pub title: String,
    pub body: String,
}

impl PushMessage {
    pub fn to_token(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            notification: None,
            data: BTreeMap::new(),
        }
    }

    pub fn with_notification(mut self, title: impl Into<String>, body: impl Into<String>) -> Self {
        self.notification = Some(PushNotification {
            title: title.into(),
            body: body.into(),
        });
        self
    }

    pub fn with_data(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }
}

/// Provider-assigned identifier of a sent message.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageId(pub String);

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn serializes_to_fcm_message_shape() {
        let message = PushMessage::to_token("tok1")
            .with_notification("Title", "Body")
            .with_data("type", "absence")
            .with_data("sessionId", "");

        let value = serde_json::to_value(&message).unwrap();
        assert_eq!(
            value,
            json!({
                "token": "tok1",
                "notification": { "title": "Title", "body": "Body" },
                "data": { "sessionId": "", "type": "absence" }
            })
        );
    }

    #[test]
    fn omits_empty_sections() {
        let value = serde_json::to_value(PushMessage::to_token("tok1")).unwrap();
        assert_eq!(value, json!({ "token": "tok1" }));
    }
}
