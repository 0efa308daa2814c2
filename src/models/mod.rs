//! Domain model for employee records.
//!
//! The [`Employee`] entity mirrors the persisted row. The write payloads
//! ([`NewEmployee`], [`EmployeeChanges`]) are produced by the validated
//! request DTOs and consumed by the repository layer; the read projections
//! live in [`projections`].

use std::fmt;

use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub mod projections;

pub use projections::{EmployeeDetail, EmployeeListItem, EmployeePublic};

/// Identifier of a persisted employee record.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct EmployeeId(pub i32);

impl EmployeeId {
    pub fn new(id: i32) -> Self {
        Self(id)
    }

    pub fn value(&self) -> i32 {
        self.0
    }
}

impl fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A persisted employee record.
///
/// Invariants maintained by the service and storage layers:
/// - `email` is stored trimmed and lowercased, unique across live rows
/// - `salary` is strictly positive, scale 2
/// - `updated_at` is refreshed on every mutation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Employee {
    pub id: EmployeeId,
    pub name: String,
    pub email: String,
    pub position: String,
    pub department: String,
    pub salary: BigDecimal,
    pub hire_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insert payload for a new employee.
///
/// Produced by a fully validated creation request; the repository inserts it
/// verbatim and the database assigns id and timestamps.
#[derive(Debug, Clone)]
pub struct NewEmployee {
    pub name: String,
    pub email: String,
    pub position: String,
    pub department: String,
    pub salary: BigDecimal,
    pub hire_date: DateTime<Utc>,
}

/// Partial-update payload.
///
/// `None` means "leave the stored value untouched"; only fields that were
/// explicitly present in the update request carry `Some`.
#[derive(Debug, Clone, Default)]
pub struct EmployeeChanges {
    pub name: Option<String>,
    pub email: Option<String>,
    pub position: Option<String>,
    pub department: Option<String>,
    pub salary: Option<BigDecimal>,
    pub hire_date: Option<DateTime<Utc>>,
}

impl EmployeeChanges {
    /// True when no field is set at all.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.position.is_none()
            && self.department.is_none()
            && self.salary.is_none()
            && self.hire_date.is_none()
    }
}
