//! Business-rule orchestration layer.
//!
//! Service functions are repository-agnostic: they work with any
//! implementation of [`EmployeeRepository`](crate::db::EmployeeRepository)
//! and contain the rules that must hold regardless of storage backend
//! (email uniqueness, existence checks, request validation).

pub mod employees;
pub mod error;

pub use employees::{
    create_employee, delete_employee, get_all_employees, get_employee_by_id,
    get_employees_by_department, update_employee,
};
pub use error::{ServiceError, ServiceResult};
