//! One-time session code verification.

use attendance_database::SessionRepository;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use super::error::ServiceError;
use crate::util::{as_document, non_empty_str};

pub const MISSING_ARGUMENTS: &str = "Missing sessionId or code";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifySessionCodeRequest {
    pub session_id: String,
    pub code: String,
}

impl VerifySessionCodeRequest {
    /// Pull `sessionId` and `code` out of a callable payload.
    ///
    /// Both must be non-empty strings.
    pub fn from_data(data: Option<&Value>) -> Result<Self, ServiceError> {
        let document = as_document(data);
        let field = |key: &str| document.and_then(|doc| non_empty_str(doc, key));

        match (field("sessionId"), field("code")) {
            (Some(session_id), Some(code)) => Ok(Self {
                session_id: session_id.to_string(),
                code: code.to_string(),
            }),
            _ => Err(ServiceError::invalid_argument(MISSING_ARGUMENTS)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VerifySessionCodeResponse {
    pub ok: bool,
}

/// An unknown session is a failed verification, not an error.
pub async fn verify_session_code(
    sessions: &SessionRepository,
    request: &VerifySessionCodeRequest,
) -> Result<VerifySessionCodeResponse, ServiceError> {
    let Some(session) = sessions.find_by_id(&request.session_id).await? else {
        debug!(session_id = %request.session_id, "session not found");
        return Ok(VerifySessionCodeResponse { ok: false });
    };

    Ok(VerifySessionCodeResponse {
        ok: session.code_matches(&request.code),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_utils::create_test_db;
    use serde_json::json;

    fn request(session_id: &str, code: &str) -> VerifySessionCodeRequest {
        VerifySessionCodeRequest {
            session_id: session_id.to_string(),
            code: code.to_string(),
        }
    }

    #[test]
    fn from_data_requires_both_fields() {
        let cases = [
            None,
            Some(json!({})),
            Some(json!({ "sessionId": "S1" })),
            Some(json!({ "code": "4821" })),
            Some(json!({ "sessionId": "", "code": "4821" })),
            Some(json!({ "sessionId": "S1", "code": "" })),
            Some(json!({ "sessionId": 1, "code": "4821" })),
            Some(json!({ "sessionId": "S1", "code": null })),
            Some(json!("S1")),
        ];

        for data in cases {
            let error = VerifySessionCodeRequest::from_data(data.as_ref()).unwrap_err();
            assert!(
                matches!(&error, ServiceError::InvalidArgument(msg) if msg == MISSING_ARGUMENTS),
                "unexpected result for {data:?}: {error:?}"
            );
        }
    }

    #[test]
    fn from_data_keeps_values_untrimmed() {
        let data = json!({ "sessionId": "S1", "code": " 4821 " });
        let parsed = VerifySessionCodeRequest::from_data(Some(&data)).unwrap();
        assert_eq!(parsed, request("S1", " 4821 "));
    }

    #[tokio::test]
    async fn verify_matches_exact_code_only() {
        let (pool, _temp_dir) = create_test_db().await;
        let sessions = SessionRepository::new(pool);
        sessions.upsert("S1", Some("4821")).await.unwrap();

        let matched = verify_session_code(&sessions, &request("S1", "4821")).await.unwrap();
        let wrong = verify_session_code(&sessions, &request("S1", "0000")).await.unwrap();
        let padded = verify_session_code(&sessions, &request("S1", "4821 ")).await.unwrap();

        assert!(matched.ok);
        assert!(!wrong.ok);
        assert!(!padded.ok);
    }

    #[tokio::test]
    async fn verify_is_case_sensitive() {
        let (pool, _temp_dir) = create_test_db().await;
        let sessions = SessionRepository::new(pool);
        sessions.upsert("S1", Some("AbCd")).await.unwrap();

        let lower = verify_session_code(&sessions, &request("S1", "abcd")).await.unwrap();
        assert!(!lower.ok);
    }

    #[tokio::test]
    async fn verify_unknown_session_is_not_a_match() {
        let (pool, _temp_dir) = create_test_db().await;
        let sessions = SessionRepository::new(pool);
        sessions.upsert("S1", Some("4821")).await.unwrap();

        let result = verify_session_code(&sessions, &request("S2", "4821")).await.unwrap();
        assert!(!result.ok);
    }

    #[tokio::test]
    async fn verify_session_without_code_never_matches() {
        let (pool, _temp_dir) = create_test_db().await;
        let sessions = SessionRepository::new(pool);
        sessions.upsert("S3", None).await.unwrap();

        let result = verify_session_code(&sessions, &request("S3", "anything")).await.unwrap();
        assert!(!result.ok);
    }

    #[tokio::test]
    async fn verify_propagates_storage_failures() {
        let (pool, _temp_dir) = create_test_db().await;
        let sessions = SessionRepository::new(pool.clone());
        pool.close().await;

        let error = verify_session_code(&sessions, &request("S1", "4821"))
            .await
            .unwrap_err();
        assert!(matches!(error, ServiceError::Database(_)));
    }
}
