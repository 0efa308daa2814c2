//! HTTP error handling and status-code mapping.
//!
//! Service failures arrive as tagged [`ServiceError`] values and are mapped
//! to status codes through an explicit table; no message text is inspected
//! anywhere. Conflicts answer 400 rather than 409, a contract pinned by the
//! API's consumers.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::services::ServiceError;

use super::dto::ApiResponse;

/// Application error type for HTTP handlers.
#[derive(Debug)]
pub enum AppError {
    /// Resource not found
    NotFound(String),
    /// Invalid request (validation error)
    Validation(String),
    /// Uniqueness conflict
    Conflict(String),
    /// Internal server error
    Internal(String),
}

impl AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Conflict(_) => StatusCode::BAD_REQUEST,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(self) -> String {
        match self {
            AppError::NotFound(msg)
            | AppError::Validation(msg)
            | AppError::Conflict(msg)
            | AppError::Internal(msg) => msg,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ApiResponse::<()>::error(self.message());
        (status, Json(body)).into_response()
    }
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::NotFound(msg) => AppError::NotFound(msg),
            ServiceError::Validation(msg) => AppError::Validation(msg),
            ServiceError::Conflict(msg) => AppError::Conflict(msg),
            // Persistence failures pass through with their message intact.
            ServiceError::Repository(e) => AppError::Internal(e.to_string()),
        }
    }
}
