//! Employee business rules.
//!
//! Each function orchestrates repository calls and raises the named
//! conditions from [`ServiceError`] as it discovers them. Uniqueness is
//! pre-checked here; the check and the subsequent write are two separate
//! round trips, so the repository's Conflict (from the unique index) is
//! re-mapped to the same business error when a concurrent writer wins the
//! race.

use serde_json::Value;
use tracing::{debug, info};

use crate::db::repository::{EmployeeRepository, RepositoryError};
use crate::dto::{CreateEmployeeRequest, UpdateEmployeeRequest, ValidatedRequest};
use crate::models::{Employee, EmployeeId};

use super::error::{ServiceError, ServiceResult};

const EMPLOYEE_NOT_FOUND: &str = "Employee not found";
const EMAIL_CONFLICT: &str = "Employee with this email already exists";

/// All employees, newest first.
pub async fn get_all_employees<R>(repo: &R) -> ServiceResult<Vec<Employee>>
where
    R: EmployeeRepository + ?Sized,
{
    Ok(repo.find_all().await?)
}

/// Single employee by id.
pub async fn get_employee_by_id<R>(repo: &R, id: EmployeeId) -> ServiceResult<Employee>
where
    R: EmployeeRepository + ?Sized,
{
    repo.find_by_id(id)
        .await?
        .ok_or_else(|| ServiceError::NotFound(EMPLOYEE_NOT_FOUND.to_string()))
}

/// Validate and persist a new employee record.
pub async fn create_employee<R>(repo: &R, input: &Value) -> ServiceResult<Employee>
where
    R: EmployeeRepository + ?Sized,
{
    let request = CreateEmployeeRequest::from_value(input);
    let new_employee = request
        .into_validated()
        .map_err(|outcome| ServiceError::Validation(outcome.joined()))?;

    if repo.find_by_email(&new_employee.email).await?.is_some() {
        return Err(ServiceError::Conflict(EMAIL_CONFLICT.to_string()));
    }

    let employee = repo
        .create(new_employee)
        .await
        .map_err(map_email_conflict)?;
    info!(id = employee.id.value(), "employee created");
    Ok(employee)
}

/// Apply a partial update to an existing employee record.
pub async fn update_employee<R>(
    repo: &R,
    id: EmployeeId,
    input: &Value,
) -> ServiceResult<Employee>
where
    R: EmployeeRepository + ?Sized,
{
    let current = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| ServiceError::NotFound(EMPLOYEE_NOT_FOUND.to_string()))?;

    let request = UpdateEmployeeRequest::from_value(input);
    let outcome = request.validate();
    if !outcome.is_valid() {
        return Err(ServiceError::Validation(outcome.joined()));
    }
    if request.is_empty() {
        return Err(ServiceError::Validation("No fields to update".to_string()));
    }

    let changes = request
        .into_validated()
        .map_err(|outcome| ServiceError::Validation(outcome.joined()))?;

    // Only a changed email needs the uniqueness check; keeping the current
    // address is always allowed.
    if let Some(new_email) = changes.email.as_deref() {
        if new_email != current.email {
            if let Some(existing) = repo.find_by_email(new_email).await? {
                if existing.id != id {
                    return Err(ServiceError::Conflict(EMAIL_CONFLICT.to_string()));
                }
            }
        }
    }

    let employee = repo
        .update(id, changes)
        .await
        .map_err(map_email_conflict)?;
    info!(id = employee.id.value(), "employee updated");
    Ok(employee)
}

/// Remove an employee record.
pub async fn delete_employee<R>(repo: &R, id: EmployeeId) -> ServiceResult<()>
where
    R: EmployeeRepository + ?Sized,
{
    repo.find_by_id(id)
        .await?
        .ok_or_else(|| ServiceError::NotFound(EMPLOYEE_NOT_FOUND.to_string()))?;
    repo.delete(id).await?;
    info!(id = id.value(), "employee deleted");
    Ok(())
}

/// All employees in the given department.
pub async fn get_employees_by_department<R>(
    repo: &R,
    department: &str,
) -> ServiceResult<Vec<Employee>>
where
    R: EmployeeRepository + ?Sized,
{
    if department.trim().is_empty() {
        return Err(ServiceError::Validation("Department is required".to_string()));
    }
    debug!(department, "listing employees by department");
    Ok(repo.find_by_department(department).await?)
}

/// A repository Conflict means the unique email index fired after the
/// pre-check passed (concurrent writer); translate it to the same business
/// error the pre-check raises.
fn map_email_conflict(err: RepositoryError) -> ServiceError {
    match err {
        RepositoryError::Conflict { .. } => ServiceError::Conflict(EMAIL_CONFLICT.to_string()),
        other => ServiceError::Repository(other),
    }
}
