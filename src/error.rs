/*
 * Responsibility
 * - App-wide error type (AppError)
 * - IntoResponse: status code + generic reason phrase only
 * - Internal detail (provider status, transport cause, ...) stays in the logs, never in the body
 */
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::services::auth::ValidationError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("unauthorized")]
    Unauthorized,
    #[error("not found")]
    NotFound,
    #[error("internal server error")]
    Internal,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        (status, status.canonical_reason().unwrap_or_default()).into_response()
    }
}

impl From<ValidationError> for AppError {
    fn from(e: ValidationError) -> Self {
        match e {
            ValidationError::Unauthorized => AppError::Unauthorized,
            // Upstream failures are never the caller's fault
            ValidationError::Provider { .. }
            | ValidationError::Transport(_)
            | ValidationError::MalformedResponse(_) => AppError::Internal,
        }
    }
}
