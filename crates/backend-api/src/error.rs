use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::error;

use crate::services::ServiceError;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Error returned by plain (non-callable) routes.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn internal_server_error(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorResponse {
            error: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Database(db_err) => {
                error!(error = %db_err, "database error");
                Self::internal_server_error("Database operation failed")
            }
            ServiceError::Messaging(push_err) => {
                error!(error = %push_err, "push provider error");
                Self::internal_server_error("Push notification dispatch failed")
            }
            ServiceError::InvalidArgument(message) => {
                error!(%message, "trigger rejected event");
                Self::internal_server_error("Event handling failed")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use attendance_database::DatabaseError;
    use attendance_messaging::MessagingError;

    #[test]
    fn every_service_error_maps_to_a_retryable_status() {
        let errors = [
            ServiceError::invalid_argument("bad event"),
            ServiceError::Database(DatabaseError::QueryError("closed".to_string())),
            ServiceError::Messaging(MessagingError::Provider {
                status: 503,
                body: "unavailable".to_string(),
            }),
        ];

        for err in errors {
            let api_error = ApiError::from(err);
            assert_eq!(api_error.status, StatusCode::INTERNAL_SERVER_ERROR);
        }
    }

    #[test]
    fn renders_with_its_status() {
        let response = ApiError::internal_server_error("Database operation failed").into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
