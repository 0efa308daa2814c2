//! Repository trait definition for employee persistence.
//!
//! The trait abstracts the storage backend so the service layer can run
//! unchanged against PostgreSQL in production and the in-memory store in
//! tests. Implementations enforce no business rules; they surface storage
//! outcomes (including unique-constraint violations) as
//! [`RepositoryError`] values and leave interpretation to the caller.

pub mod error;

pub use error::{ErrorContext, RepositoryError, RepositoryResult};

use async_trait::async_trait;

use crate::models::{Employee, EmployeeChanges, EmployeeId, NewEmployee};

/// Repository for employee CRUD operations.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to work with async Rust.
#[async_trait]
pub trait EmployeeRepository: Send + Sync {
    /// Check if the storage backend is reachable.
    async fn health_check(&self) -> RepositoryResult<bool>;

    /// All employees, newest first (creation time descending).
    async fn find_all(&self) -> RepositoryResult<Vec<Employee>>;

    /// Single employee by primary key, or `None` if absent.
    async fn find_by_id(&self, id: EmployeeId) -> RepositoryResult<Option<Employee>>;

    /// Insert a new row. Assumes the caller already validated the payload;
    /// a duplicate email surfaces as [`RepositoryError::Conflict`].
    async fn create(&self, new_employee: NewEmployee) -> RepositoryResult<Employee>;

    /// Apply the fields present on `changes` to the row with the given id,
    /// refreshing `updated_at`. Fails with [`RepositoryError::NotFound`]
    /// when no row exists.
    async fn update(
        &self,
        id: EmployeeId,
        changes: EmployeeChanges,
    ) -> RepositoryResult<Employee>;

    /// Remove the row by id. Fails with [`RepositoryError::NotFound`] when
    /// no row exists.
    async fn delete(&self, id: EmployeeId) -> RepositoryResult<()>;

    /// Single employee by exact match on the stored (lowercased) email.
    async fn find_by_email(&self, email: &str) -> RepositoryResult<Option<Employee>>;

    /// All employees with an exact department match, newest first.
    async fn find_by_department(&self, department: &str) -> RepositoryResult<Vec<Employee>>;
}
