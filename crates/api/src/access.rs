//! Request access checks.

use axum::extract::Request;
use axum::http::Method;
use axum::middleware::Next;
use axum::response::Response;

use crate::error::ApiError;

/// Placeholder policy: sale orders cannot be deleted by anyone.
pub async fn check(request: Request, next: Next) -> Result<Response, ApiError> {
    if request.method() == Method::DELETE {
        tracing::warn!(uri = %request.uri(), "access denied");
        return Err(ApiError::Forbidden);
    }

    Ok(next.run(request).await)
}
