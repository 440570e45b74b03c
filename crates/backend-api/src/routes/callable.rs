use axum::body::Bytes;
use axum::extract::State;

use crate::callable::{CallableError, CallableRequest, CallableResponse};
use crate::services::session_code::{
    verify_session_code as verify, VerifySessionCodeRequest, VerifySessionCodeResponse,
};
use crate::AppState;

// POST /callable/verifySessionCode
pub async fn verify_session_code(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<CallableResponse<VerifySessionCodeResponse>, CallableError> {
    let request = CallableRequest::parse(&body)?;
    let request = VerifySessionCodeRequest::from_data(request.data.as_ref())?;

    let result = verify(state.sessions(), &request).await?;
    Ok(CallableResponse { result })
}
