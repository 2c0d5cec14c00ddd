//! Typed errors and HTTP mapping.

use crate::store::StoreError;
use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {key}: '{value}'")]
    Invalid { key: &'static str, value: String },
    #[error("schema {name} failed to compile: {reason}")]
    Schema { name: &'static str, reason: String },
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("validation failed with {} error(s)", .0.len())]
    Validation(Vec<String>),
    #[error("{0}")]
    BadRequest(String),
    /// Body or query the framework could not extract; keeps the framework's status.
    #[error("{message}")]
    Rejected { status: StatusCode, message: String },
    #[error("{0}")]
    NotFound(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Rejected {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::Rejected {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::Rejected {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

/// Message carried by an error envelope: a single string or one string per violation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ErrorMessage {
    Single(String),
    Multi(Vec<String>),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ErrorEnvelope {
    pub message: ErrorMessage,
    pub status: u16,
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub error: ErrorEnvelope,
}

impl ErrorEnvelope {
    pub fn new(status: StatusCode, message: ErrorMessage) -> Self {
        ErrorEnvelope {
            message,
            status: status.as_u16(),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl IntoResponse for ErrorEnvelope {
    fn into_response(self) -> Response {
        (self.status_code(), Json(ErrorBody { error: self })).into_response()
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Rejected { status, .. } => *status,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Store(StoreError::NotFound(_)) => StatusCode::NOT_FOUND,
            AppError::Store(StoreError::Duplicate(_)) => StatusCode::CONFLICT,
            AppError::Store(StoreError::Db(_)) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The envelope sent to the caller. Server-side failures never expose their cause.
    pub fn envelope(self) -> ErrorEnvelope {
        let status = self.status();
        let message = match self {
            AppError::Validation(messages) => ErrorMessage::Multi(messages),
            other if status.is_server_error() => {
                tracing::error!(error = %other, status = status.as_u16(), "request failed");
                ErrorMessage::Single(internal_message())
            }
            other => ErrorMessage::Single(other.to_string()),
        };
        ErrorEnvelope::new(status, message)
    }
}

pub(crate) fn internal_message() -> String {
    StatusCode::INTERNAL_SERVER_ERROR
        .canonical_reason()
        .unwrap_or("Internal Server Error")
        .to_string()
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.envelope().into_response()
    }
}
