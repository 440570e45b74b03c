use thiserror::Error;

#[derive(Debug, Error)]
pub enum MessagingError {
    #[error("push provider is not configured: {0}")]
    NotConfigured(&'static str),
    #[error("push provider request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("push provider rejected message with status {status}: {body}")]
    Provider { status: u16, body: String },
    #[error("invalid push provider response: {0}")]
    InvalidResponse(#[from] serde_json::Error),
}
