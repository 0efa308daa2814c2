//! Employee creation request.

use bigdecimal::{BigDecimal, RoundingMode, Zero};
use serde_json::Value;

use crate::models::NewEmployee;

use super::{
    date_field, email_format_ok, numeric_field, string_field, DateField, NumericField,
    ValidatedRequest, ValidationOutcome,
};

/// Creation payload, sanitized on construction from arbitrary JSON input.
///
/// Every field is required; validation reports each missing or malformed
/// field with its own message, in a fixed field order.
#[derive(Debug, Clone)]
pub struct CreateEmployeeRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub position: Option<String>,
    pub department: Option<String>,
    pub salary: Option<NumericField>,
    pub hire_date: Option<DateField>,
}

impl CreateEmployeeRequest {
    pub fn from_value(input: &Value) -> Self {
        Self {
            name: string_field(input, "name"),
            email: string_field(input, "email").map(|s| s.to_lowercase()),
            position: string_field(input, "position"),
            department: string_field(input, "department"),
            salary: numeric_field(input, "salary"),
            hire_date: date_field(input, "hireDate"),
        }
    }

    /// Validate and convert into an insert payload. The salary is normalized
    /// to scale 2 on the way out so every backend stores the same value.
    pub fn into_validated(self) -> Result<NewEmployee, ValidationOutcome> {
        let outcome = self.validate();
        if !outcome.is_valid() {
            return Err(outcome);
        }
        match (
            self.name,
            self.email,
            self.position,
            self.department,
            self.salary,
            self.hire_date,
        ) {
            (
                Some(name),
                Some(email),
                Some(position),
                Some(department),
                Some(NumericField::Valid(salary)),
                Some(DateField::Valid(hire_date)),
            ) => Ok(NewEmployee {
                name,
                email,
                position,
                department,
                salary: salary.with_scale_round(2, RoundingMode::HalfUp),
                hire_date,
            }),
            _ => Err(outcome),
        }
    }
}

impl ValidatedRequest for CreateEmployeeRequest {
    fn validate(&self) -> ValidationOutcome {
        let mut outcome = ValidationOutcome::new();

        match self.name.as_deref() {
            Some(name) if !name.is_empty() => {}
            _ => outcome.push("Name is required"),
        }

        match self.email.as_deref() {
            Some(email) if !email.is_empty() => {
                if !email_format_ok(email) {
                    outcome.push("Invalid email format");
                }
            }
            _ => outcome.push("Email is required"),
        }

        match self.position.as_deref() {
            Some(position) if !position.is_empty() => {}
            _ => outcome.push("Position is required"),
        }

        match self.department.as_deref() {
            Some(department) if !department.is_empty() => {}
            _ => outcome.push("Department is required"),
        }

        match &self.salary {
            None => outcome.push("Salary is required"),
            Some(NumericField::Valid(salary)) if *salary > BigDecimal::zero() => {}
            Some(_) => outcome.push("Salary must be a positive number"),
        }

        match &self.hire_date {
            None => outcome.push("Hire date is required"),
            Some(DateField::Valid(_)) => {}
            Some(DateField::Invalid) => outcome.push("Invalid hire date format"),
        }

        outcome
    }
}
