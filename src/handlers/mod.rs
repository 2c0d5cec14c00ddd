//! HTTP handlers for the books resource.

pub mod books;
pub use books::*;

use crate::error::AppError;
use axum::http::StatusCode;

/// Unmatched routes still answer with the JSON error envelope.
pub async fn fallback() -> AppError {
    AppError::NotFound(
        StatusCode::NOT_FOUND
            .canonical_reason()
            .unwrap_or("Not Found")
            .to_string(),
    )
}

/// Known path, unsupported verb.
pub async fn method_not_allowed() -> AppError {
    let status = StatusCode::METHOD_NOT_ALLOWED;
    AppError::Rejected {
        status,
        message: status.canonical_reason().unwrap_or("Method Not Allowed").to_string(),
    }
}
