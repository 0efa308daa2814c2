use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

use super::schema::employees;
use crate::models::{Employee, EmployeeChanges, EmployeeId, NewEmployee};

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = employees)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct EmployeeRow {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub position: String,
    pub department: String,
    pub salary: BigDecimal,
    pub hire_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<EmployeeRow> for Employee {
    fn from(row: EmployeeRow) -> Self {
        Self {
            id: EmployeeId::new(row.id),
            name: row.name,
            email: row.email,
            position: row.position,
            department: row.department,
            salary: row.salary,
            hire_date: row.hire_date,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = employees)]
pub struct NewEmployeeRow {
    pub name: String,
    pub email: String,
    pub position: String,
    pub department: String,
    pub salary: BigDecimal,
    pub hire_date: DateTime<Utc>,
}

impl From<NewEmployee> for NewEmployeeRow {
    fn from(new_employee: NewEmployee) -> Self {
        Self {
            name: new_employee.name,
            email: new_employee.email,
            position: new_employee.position,
            department: new_employee.department,
            salary: new_employee.salary,
            hire_date: new_employee.hire_date,
        }
    }
}

/// Changeset for partial updates. `None` fields are skipped by Diesel;
/// `updated_at` is always set.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = employees)]
pub struct EmployeeChangesRow {
    pub name: Option<String>,
    pub email: Option<String>,
    pub position: Option<String>,
    pub department: Option<String>,
    pub salary: Option<BigDecimal>,
    pub hire_date: Option<DateTime<Utc>>,
    pub updated_at: DateTime<Utc>,
}

impl EmployeeChangesRow {
    pub fn from_changes(changes: EmployeeChanges) -> Self {
        Self {
            name: changes.name,
            email: changes.email,
            position: changes.position,
            department: changes.department,
            salary: changes.salary,
            hire_date: changes.hire_date,
            updated_at: Utc::now(),
        }
    }
}
