use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LadleError {
    #[error("Database error: {0}")]
    Database(#[from] libsql::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Vision error: {0}")]
    Vision(String),

    #[error("Vision unavailable: {0}")]
    VisionUnavailable(String),

    #[error("Vision authentication error: {0}")]
    VisionAuth(String),

    #[error("Vision rate limit exceeded, retry after {retry_after:?} seconds")]
    VisionRateLimit { retry_after: Option<u64> },

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl IntoResponse for LadleError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            LadleError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            LadleError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            LadleError::Conflict(msg) => (StatusCode::CONFLICT, msg.clone()),
            LadleError::Auth(msg) => (StatusCode::UNAUTHORIZED, msg.clone()),
            LadleError::Json(e) => (StatusCode::BAD_REQUEST, e.to_string()),
            LadleError::VisionUnavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg.clone()),
            LadleError::VisionAuth(msg) => (StatusCode::BAD_GATEWAY, msg.clone()),
            LadleError::VisionRateLimit { .. } => {
                (StatusCode::TOO_MANY_REQUESTS, self.to_string())
            }
            LadleError::Vision(msg) => (StatusCode::BAD_GATEWAY, msg.clone()),
            LadleError::Http(e) => (StatusCode::BAD_GATEWAY, e.to_string()),
            LadleError::Database(e) => {
                tracing::error!(error = %e, "Database error surfaced to client");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            LadleError::Io(e) => {
                tracing::error!(error = %e, "IO error surfaced to client");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            LadleError::Internal(msg) => {
                tracing::error!(error = %msg, "Internal error surfaced to client");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": message,
            "code": status.as_u16()
        }));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, LadleError>;
