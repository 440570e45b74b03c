//! Wire envelope for callable endpoints.
//!
//! Requests arrive as `{"data": ...}`. Successful calls answer
//! `{"result": ...}`; failures answer `{"error": {"status", "message"}}` with
//! a matching HTTP status.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::error;

use crate::services::ServiceError;

#[derive(Debug, Deserialize)]
pub struct CallableRequest {
    #[serde(default)]
    pub data: Option<Value>,
}

impl CallableRequest {
    /// Parse a raw request body. Malformed JSON is an invalid argument.
    pub fn parse(body: &[u8]) -> Result<Self, CallableError> {
        serde_json::from_slice(body).map_err(|_| CallableError::invalid_argument("Bad Request"))
    }
}

#[derive(Debug, Serialize)]
pub struct CallableResponse<T> {
    pub result: T,
}

impl<T: Serialize> IntoResponse for CallableResponse<T> {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CallableCode {
    InvalidArgument,
    Internal,
}

impl CallableCode {
    pub fn http_status(self) -> StatusCode {
        match self {
            CallableCode::InvalidArgument => StatusCode::BAD_REQUEST,
            CallableCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CallableError {
    pub status: CallableCode,
    pub message: String,
}

#[derive(Serialize)]
struct CallableErrorBody<'a> {
    error: &'a CallableError,
}

impl CallableError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self {
            status: CallableCode::InvalidArgument,
            message: message.into(),
        }
    }

    pub fn internal() -> Self {
        Self {
            status: CallableCode::Internal,
            message: "INTERNAL".to_string(),
        }
    }
}

impl IntoResponse for CallableError {
    fn into_response(self) -> Response {
        let status = self.status.http_status();
        (status, Json(CallableErrorBody { error: &self })).into_response()
    }
}

impl From<ServiceError> for CallableError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::InvalidArgument(message) => Self::invalid_argument(message),
            other => {
                error!(error = %other, "callable failed");
                Self::internal()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_missing_data() {
        let request = CallableRequest::parse(b"{}").unwrap();
        assert!(request.data.is_none());
    }

    #[test]
    fn parse_rejects_non_json_body() {
        let error = CallableRequest::parse(b"sessionId=S1").unwrap_err();
        assert_eq!(error.status, CallableCode::InvalidArgument);
    }

    #[test]
    fn codes_map_to_http_statuses() {
        assert_eq!(
            CallableCode::InvalidArgument.http_status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            CallableCode::Internal.http_status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn code_serializes_in_screaming_case() {
        let value = serde_json::to_value(CallableError::invalid_argument("x")).unwrap();
        assert_eq!(value["status"], "INVALID_ARGUMENT");
    }
}
