//! Read projections of the [`Employee`] entity.
//!
//! Projections are derived on the way out of the API and never stored. The
//! salary is rendered as its exact decimal string at scale 2 rather than a
//! floating approximation.

use bigdecimal::{BigDecimal, RoundingMode};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Employee;

/// Render a salary as an exact decimal string with two fractional digits.
pub fn format_salary(salary: &BigDecimal) -> String {
    salary.with_scale_round(2, RoundingMode::HalfUp).to_string()
}

/// Full-detail projection: every externally visible field, including id and
/// timestamps. Returned by the single-record endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeDetail {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub position: String,
    pub department: String,
    pub salary: String,
    pub hire_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl EmployeeDetail {
    pub fn from_entity(employee: &Employee) -> Self {
        Self {
            id: employee.id.value(),
            name: employee.name.clone(),
            email: employee.email.clone(),
            position: employee.position.clone(),
            department: employee.department.clone(),
            salary: format_salary(&employee.salary),
            hire_date: employee.hire_date,
            created_at: employee.created_at,
            updated_at: employee.updated_at,
        }
    }

    pub fn from_entities(employees: &[Employee]) -> Vec<Self> {
        employees.iter().map(Self::from_entity).collect()
    }
}

/// Public projection: no id or other internal identifiers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeePublic {
    pub name: String,
    pub email: String,
    pub position: String,
    pub department: String,
    pub salary: String,
    pub hire_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl EmployeePublic {
    pub fn from_entity(employee: &Employee) -> Self {
        Self {
            name: employee.name.clone(),
            email: employee.email.clone(),
            position: employee.position.clone(),
            department: employee.department.clone(),
            salary: format_salary(&employee.salary),
            hire_date: employee.hire_date,
            created_at: employee.created_at,
            updated_at: employee.updated_at,
        }
    }

    pub fn from_entities(employees: &[Employee]) -> Vec<Self> {
        employees.iter().map(Self::from_entity).collect()
    }
}

/// Minimal listing projection: excludes salary and timestamps.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeListItem {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub position: String,
    pub department: String,
}

impl EmployeeListItem {
    pub fn from_entity(employee: &Employee) -> Self {
        Self {
            id: employee.id.value(),
            name: employee.name.clone(),
            email: employee.email.clone(),
            position: employee.position.clone(),
            department: employee.department.clone(),
        }
    }

    pub fn from_entities(employees: &[Employee]) -> Vec<Self> {
        employees.iter().map(Self::from_entity).collect()
    }
}
