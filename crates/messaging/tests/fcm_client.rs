//! FCM client behaviour against a mocked provider.

use attendance_config::MessagingConfig;
use attendance_messaging::{FcmClient, MessagingError, PushMessage, PushSender};
use httpmock::prelude::*;
use serde_json::json;

fn config_for(server: &MockServer) -> MessagingConfig {
    MessagingConfig {
        base_url: server.base_url(),
        project_id: Some("school-app".to_string()),
        access_token: Some("test-token".to_string()),
        request_timeout_seconds: 5,
    }
}

fn absence_message() -> PushMessage {
    PushMessage::to_token("tok1")
        .with_notification("Absence détectée", "Vous avez été marqué absent à une séance.")
        .with_data("type", "absence")
        .with_data("sessionId", "sess1")
}

#[test]
fn new_requires_project_id_and_access_token() {
    let missing_project = MessagingConfig {
        access_token: Some("token".to_string()),
        ..MessagingConfig::default()
    };
    assert!(matches!(
        FcmClient::new(&missing_project),
        Err(MessagingError::NotConfigured(_))
    ));

    let missing_token = MessagingConfig {
        project_id: Some("school-app".to_string()),
        ..MessagingConfig::default()
    };
    assert!(matches!(
        FcmClient::new(&missing_token),
        Err(MessagingError::NotConfigured(_))
    ));
}

#[test]
fn endpoint_targets_project_send_route() {
    let config = MessagingConfig {
        base_url: "https://fcm.example.test/".to_string(),
        project_id: Some("school-app".to_string()),
        access_token: Some("token".to_string()),
        request_timeout_seconds: 5,
    };

    let client = FcmClient::new(&config).expect("client builds");
    assert_eq!(
        client.endpoint(),
        "https://fcm.example.test/v1/projects/school-app/messages:send"
    );
}

#[tokio::test]
async fn send_posts_wrapped_message_with_bearer_token() {
    let server = MockServer::start_async().await;

    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/v1/projects/school-app/messages:send")
                .header("authorization", "Bearer test-token")
                .json_body(json!({
                    "message": {
                        "token": "tok1",
                        "notification": {
                            "title": "Absence détectée",
                            "body": "Vous avez été marqué absent à une séance."
                        },
                        "data": { "type": "absence", "sessionId": "sess1" }
                    }
                }));
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(json!({ "name": "projects/school-app/messages/0:1234" }));
        })
        .await;

    let client = FcmClient::new(&config_for(&server)).expect("client builds");
    let id = client.send(&absence_message()).await.expect("send succeeds");

    mock.assert_async().await;
    assert_eq!(id.0, "projects/school-app/messages/0:1234");
}

#[tokio::test]
async fn send_surfaces_provider_rejection() {
    let server = MockServer::start_async().await;

    let _mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/v1/projects/school-app/messages:send");
            then.status(404).body(r#"{"error":{"status":"NOT_FOUND"}}"#);
        })
        .await;

    let client = FcmClient::new(&config_for(&server)).expect("client builds");
    let error = client
        .send(&absence_message())
        .await
        .expect_err("rejection should surface");

    match error {
        MessagingError::Provider { status, body } => {
            assert_eq!(status, 404);
            assert!(body.contains("NOT_FOUND"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn send_rejects_unparseable_success_body() {
    let server = MockServer::start_async().await;

    let _mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/v1/projects/school-app/messages:send");
            then.status(200).body("not json");
        })
        .await;

    let client = FcmClient::new(&config_for(&server)).expect("client builds");
    let error = client
        .send(&absence_message())
        .await
        .expect_err("malformed body should fail");

    assert!(matches!(error, MessagingError::InvalidResponse(_)));
}
