//! Response types for the HTTP API.
//!
//! Every endpoint answers with the same envelope:
//! `{success, data?, error?, message?}`; absent fields are omitted from the
//! serialized body. The `data` payloads are the read projections from
//! [`crate::models::projections`].

use serde::{Deserialize, Serialize};

pub use crate::models::{EmployeeDetail, EmployeeListItem, EmployeePublic};

/// Uniform response envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    /// Successful response carrying a payload.
    pub fn data(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            message: None,
        }
    }

    /// Successful response carrying a confirmation message instead of a
    /// payload.
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: None,
            error: None,
            message: Some(message.into()),
        }
    }

    /// Failure response carrying an error message.
    pub fn error(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
            message: None,
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,
    /// Version of the API
    pub version: String,
    /// Database connection status
    pub database: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_omits_absent_fields() {
        let ok = serde_json::to_value(ApiResponse::data(1)).unwrap();
        assert_eq!(ok["success"], true);
        assert_eq!(ok["data"], 1);
        assert!(ok.get("error").is_none());
        assert!(ok.get("message").is_none());

        let err = serde_json::to_value(ApiResponse::<()>::error("boom")).unwrap();
        assert_eq!(err["success"], false);
        assert_eq!(err["error"], "boom");
        assert!(err.get("data").is_none());
    }
}
