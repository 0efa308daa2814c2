//! Error taxonomy for the service layer.
//!
//! A closed set of tagged conditions; the HTTP layer maps each tag to a
//! status code explicitly instead of inspecting message text.

use crate::db::repository::RepositoryError;

/// Result type for service operations.
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Business-rule failure raised by the service layer.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// The requested record does not exist.
    #[error("{0}")]
    NotFound(String),

    /// The input failed validation, or the update payload was empty, or a
    /// required parameter was missing.
    #[error("{0}")]
    Validation(String),

    /// A uniqueness business rule was violated.
    #[error("{0}")]
    Conflict(String),

    /// Persistence-layer failure propagated unchanged.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_pass_through_display() {
        assert_eq!(
            ServiceError::NotFound("Employee not found".into()).to_string(),
            "Employee not found"
        );
        assert_eq!(
            ServiceError::Validation("Name is required".into()).to_string(),
            "Name is required"
        );
    }
}
