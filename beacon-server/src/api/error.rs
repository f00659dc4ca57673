//! API Error Handling
//!
//! Unified error types and conversion for API responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::source::SourceError;

/// API error type
#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    /// The fact store could not be read
    ServiceUnavailable(SourceError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::ServiceUnavailable(err) => {
                tracing::error!("Fact source error: {}", err);
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "Dashboard data temporarily unavailable".to_string(),
                )
            }
        };

        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}

impl From<SourceError> for ApiError {
    fn from(err: SourceError) -> Self {
        ApiError::ServiceUnavailable(err)
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
