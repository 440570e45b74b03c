mod callable;
mod error;
mod state;
mod util;

pub mod jobs;
pub mod routes;
pub mod services;

pub use callable::{CallableCode, CallableError, CallableRequest, CallableResponse};
pub use error::{ApiError, ErrorResponse};
pub use state::AppState;

use axum::{
    http::header::CONTENT_TYPE,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(routes::health::health_check))
        .route(
            "/callable/verifySessionCode",
            post(routes::callable::verify_session_code),
        )
        .route(
            "/triggers/attendances/:attendance_id/created",
            post(routes::triggers::attendance_created),
        )
        .with_state(state)
        .layer(cors_layer())
}

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([axum::http::Method::GET, axum::http::Method::POST])
        .allow_headers([CONTENT_TYPE])
}
