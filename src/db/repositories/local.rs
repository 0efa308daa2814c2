//! In-memory local repository implementation.
//!
//! Suitable for unit testing and local development: all records live in a
//! `HashMap` behind an `RwLock`, giving fast, deterministic, and isolated
//! execution. The unique-email constraint of the production schema is
//! mirrored here so conflict behavior can be exercised without a database.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use chrono::Utc;

use crate::db::repository::{
    EmployeeRepository, ErrorContext, RepositoryError, RepositoryResult,
};
use crate::models::{Employee, EmployeeChanges, EmployeeId, NewEmployee};

/// In-memory local repository.
#[derive(Clone)]
pub struct LocalRepository {
    data: Arc<RwLock<LocalData>>,
}

struct LocalData {
    employees: HashMap<EmployeeId, Employee>,
    next_id: i32,
    is_healthy: bool,
}

impl Default for LocalData {
    fn default() -> Self {
        Self {
            employees: HashMap::new(),
            next_id: 1,
            is_healthy: true,
        }
    }
}

impl LocalRepository {
    /// Create a new empty local repository.
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(LocalData::default())),
        }
    }

    /// Set the health status for testing connection failures.
    pub fn set_healthy(&self, healthy: bool) {
        let mut data = self.data.write().unwrap();
        data.is_healthy = healthy;
    }

    /// Clear all data from the repository.
    pub fn clear(&self) {
        let mut data = self.data.write().unwrap();
        *data = LocalData {
            is_healthy: data.is_healthy,
            ..Default::default()
        };
    }

    /// Number of records currently stored.
    pub fn employee_count(&self) -> usize {
        self.data.read().unwrap().employees.len()
    }

    fn check_health(&self) -> RepositoryResult<()> {
        let data = self.data.read().unwrap();
        if !data.is_healthy {
            return Err(RepositoryError::connection("Database is not healthy"));
        }
        Ok(())
    }
}

impl Default for LocalRepository {
    fn default() -> Self {
        Self::new()
    }
}

/// Newest first: creation time descending, id descending as tie-break for
/// records created within the same instant.
fn sort_newest_first(employees: &mut [Employee]) {
    employees.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| b.id.cmp(&a.id))
    });
}

#[async_trait]
impl EmployeeRepository for LocalRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        let data = self.data.read().unwrap();
        Ok(data.is_healthy)
    }

    async fn find_all(&self) -> RepositoryResult<Vec<Employee>> {
        self.check_health()?;
        let data = self.data.read().unwrap();
        let mut employees: Vec<Employee> = data.employees.values().cloned().collect();
        sort_newest_first(&mut employees);
        Ok(employees)
    }

    async fn find_by_id(&self, id: EmployeeId) -> RepositoryResult<Option<Employee>> {
        self.check_health()?;
        let data = self.data.read().unwrap();
        Ok(data.employees.get(&id).cloned())
    }

    async fn create(&self, new_employee: NewEmployee) -> RepositoryResult<Employee> {
        self.check_health()?;
        let mut data = self.data.write().unwrap();

        if data
            .employees
            .values()
            .any(|e| e.email == new_employee.email)
        {
            return Err(RepositoryError::Conflict {
                message: format!("duplicate email: {}", new_employee.email),
                context: ErrorContext::new("create"),
            });
        }

        let id = EmployeeId::new(data.next_id);
        data.next_id += 1;
        let now = Utc::now();
        let employee = Employee {
            id,
            name: new_employee.name,
            email: new_employee.email,
            position: new_employee.position,
            department: new_employee.department,
            salary: new_employee.salary,
            hire_date: new_employee.hire_date,
            created_at: now,
            updated_at: now,
        };
        data.employees.insert(id, employee.clone());
        Ok(employee)
    }

    async fn update(
        &self,
        id: EmployeeId,
        changes: EmployeeChanges,
    ) -> RepositoryResult<Employee> {
        self.check_health()?;
        let mut data = self.data.write().unwrap();

        if let Some(new_email) = changes.email.as_deref() {
            let taken = data
                .employees
                .values()
                .any(|e| e.id != id && e.email == new_email);
            if taken {
                return Err(RepositoryError::Conflict {
                    message: format!("duplicate email: {}", new_email),
                    context: ErrorContext::new("update").with_entity_id(id),
                });
            }
        }

        let employee = data.employees.get_mut(&id).ok_or_else(|| {
            RepositoryError::not_found_with_context(
                format!("Employee {} not found", id),
                ErrorContext::new("update").with_entity_id(id),
            )
        })?;

        if let Some(name) = changes.name {
            employee.name = name;
        }
        if let Some(email) = changes.email {
            employee.email = email;
        }
        if let Some(position) = changes.position {
            employee.position = position;
        }
        if let Some(department) = changes.department {
            employee.department = department;
        }
        if let Some(salary) = changes.salary {
            employee.salary = salary;
        }
        if let Some(hire_date) = changes.hire_date {
            employee.hire_date = hire_date;
        }
        employee.updated_at = Utc::now();

        Ok(employee.clone())
    }

    async fn delete(&self, id: EmployeeId) -> RepositoryResult<()> {
        self.check_health()?;
        let mut data = self.data.write().unwrap();
        data.employees.remove(&id).ok_or_else(|| {
            RepositoryError::not_found_with_context(
                format!("Employee {} not found", id),
                ErrorContext::new("delete").with_entity_id(id),
            )
        })?;
        Ok(())
    }

    async fn find_by_email(&self, email: &str) -> RepositoryResult<Option<Employee>> {
        self.check_health()?;
        let data = self.data.read().unwrap();
        Ok(data
            .employees
            .values()
            .find(|e| e.email == email)
            .cloned())
    }

    async fn find_by_department(&self, department: &str) -> RepositoryResult<Vec<Employee>> {
        self.check_health()?;
        let data = self.data.read().unwrap();
        let mut employees: Vec<Employee> = data
            .employees
            .values()
            .filter(|e| e.department == department)
            .cloned()
            .collect();
        sort_newest_first(&mut employees);
        Ok(employees)
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use bigdecimal::BigDecimal;
    use chrono::TimeZone;

    use super::*;

    fn new_employee(email: &str, department: &str) -> NewEmployee {
        NewEmployee {
            name: "Test Person".to_string(),
            email: email.to_string(),
            position: "Engineer".to_string(),
            department: department.to_string(),
            salary: BigDecimal::from_str("50000.00").unwrap(),
            hire_date: Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap(),
        }
    }

    #[tokio::test]
    async fn create_assigns_incrementing_ids() {
        let repo = LocalRepository::new();
        let a = repo.create(new_employee("a@ex.com", "Eng")).await.unwrap();
        let b = repo.create(new_employee("b@ex.com", "Eng")).await.unwrap();
        assert_eq!(a.id.value(), 1);
        assert_eq!(b.id.value(), 2);
        assert_eq!(repo.employee_count(), 2);
    }

    #[tokio::test]
    async fn duplicate_email_is_a_conflict() {
        let repo = LocalRepository::new();
        repo.create(new_employee("a@ex.com", "Eng")).await.unwrap();
        let err = repo
            .create(new_employee("a@ex.com", "Sales"))
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::Conflict { .. }));
        assert_eq!(repo.employee_count(), 1);
    }

    #[tokio::test]
    async fn update_applies_only_present_fields() {
        let repo = LocalRepository::new();
        let created = repo.create(new_employee("a@ex.com", "Eng")).await.unwrap();

        let changes = EmployeeChanges {
            position: Some("Lead".to_string()),
            ..Default::default()
        };
        let updated = repo.update(created.id, changes).await.unwrap();
        assert_eq!(updated.position, "Lead");
        assert_eq!(updated.name, created.name);
        assert_eq!(updated.email, created.email);
        assert!(updated.updated_at >= created.updated_at);
    }

    #[tokio::test]
    async fn update_missing_row_is_not_found() {
        let repo = LocalRepository::new();
        let err = repo
            .update(EmployeeId::new(99), EmployeeChanges::default())
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound { .. }));
    }

    #[tokio::test]
    async fn delete_removes_the_row() {
        let repo = LocalRepository::new();
        let created = repo.create(new_employee("a@ex.com", "Eng")).await.unwrap();
        repo.delete(created.id).await.unwrap();
        assert!(repo.find_by_id(created.id).await.unwrap().is_none());
        assert!(matches!(
            repo.delete(created.id).await.unwrap_err(),
            RepositoryError::NotFound { .. }
        ));
    }

    #[tokio::test]
    async fn department_filter_is_exact() {
        let repo = LocalRepository::new();
        repo.create(new_employee("a@ex.com", "Eng")).await.unwrap();
        repo.create(new_employee("b@ex.com", "Sales")).await.unwrap();
        repo.create(new_employee("c@ex.com", "Eng")).await.unwrap();

        let eng = repo.find_by_department("Eng").await.unwrap();
        assert_eq!(eng.len(), 2);
        assert!(repo.find_by_department("eng").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn listing_is_newest_first() {
        let repo = LocalRepository::new();
        repo.create(new_employee("a@ex.com", "Eng")).await.unwrap();
        repo.create(new_employee("b@ex.com", "Eng")).await.unwrap();
        repo.create(new_employee("c@ex.com", "Eng")).await.unwrap();

        let all = repo.find_all().await.unwrap();
        let ids: Vec<i32> = all.iter().map(|e| e.id.value()).collect();
        assert_eq!(ids, vec![3, 2, 1]);
    }

    #[tokio::test]
    async fn unhealthy_repository_fails_operations() {
        let repo = LocalRepository::new();
        repo.set_healthy(false);
        assert!(!repo.health_check().await.unwrap());
        assert!(matches!(
            repo.find_all().await.unwrap_err(),
            RepositoryError::Connection { .. }
        ));
    }
}
