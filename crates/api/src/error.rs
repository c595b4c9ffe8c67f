//! API error types with HTTP response mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use domain::DomainError;
use thiserror::Error;

/// API-level error type that maps to plain-text HTTP responses.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed or incomplete request.
    #[error("{0}")]
    BadRequest(String),

    #[error("sale order not found")]
    NotFound,

    #[error("access denied")]
    Forbidden,

    /// Domain failure: validation maps to 400, anything else to 500.
    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            err @ ApiError::NotFound => (StatusCode::NOT_FOUND, err.to_string()),
            err @ ApiError::Forbidden => (StatusCode::FORBIDDEN, err.to_string()),
            ApiError::Domain(DomainError::Validation(err)) => {
                (StatusCode::BAD_REQUEST, err.to_string())
            }
            ApiError::Domain(err) => {
                tracing::error!(error = %err, "internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal error".to_string(),
                )
            }
        };

        (status, message).into_response()
    }
}
