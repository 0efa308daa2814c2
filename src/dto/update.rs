//! Employee update request.

use bigdecimal::{BigDecimal, RoundingMode, Zero};
use serde_json::Value;

use crate::models::EmployeeChanges;

use super::{
    date_field, email_format_ok, numeric_field, string_field, DateField, NumericField,
    ValidatedRequest, ValidationOutcome,
};

/// Partial-update payload.
///
/// Sanitization matches the creation request but applies only to fields
/// explicitly present in the input; absent fields stay `None`, which is
/// distinct from a field supplied as an empty string.
#[derive(Debug, Clone)]
pub struct UpdateEmployeeRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub position: Option<String>,
    pub department: Option<String>,
    pub salary: Option<NumericField>,
    pub hire_date: Option<DateField>,
}

impl UpdateEmployeeRequest {
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

    /// True when the input carried none of the recognized fields.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.position.is_none()
            && self.department.is_none()
            && self.salary.is_none()
            && self.hire_date.is_none()
    }

    /// Validate and convert into an update payload containing only the
    /// fields that were present.
    pub fn into_validated(self) -> Result<EmployeeChanges, ValidationOutcome> {
        let outcome = self.validate();
        if !outcome.is_valid() {
            return Err(outcome);
        }
        Ok(EmployeeChanges {
            name: self.name,
            email: self.email,
            position: self.position,
            department: self.department,
            salary: self.salary.and_then(|field| match field {
                NumericField::Valid(salary) => {
                    Some(salary.with_scale_round(2, RoundingMode::HalfUp))
                }
                NumericField::Invalid => None,
            }),
            hire_date: self.hire_date.and_then(|field| match field {
                DateField::Valid(date) => Some(date),
                DateField::Invalid => None,
            }),
        })
    }
}

impl ValidatedRequest for UpdateEmployeeRequest {
    /// Checks only fields that are present; absence is never an error here.
    fn validate(&self) -> ValidationOutcome {
        let mut outcome = ValidationOutcome::new();

        if let Some(email) = self.email.as_deref() {
            if !email.is_empty() && !email_format_ok(email) {
                outcome.push("Invalid email format");
            }
        }

        match &self.salary {
            None => {}
            Some(NumericField::Valid(salary)) if *salary > BigDecimal::zero() => {}
            Some(_) => outcome.push("Salary must be a positive number"),
        }

        if let Some(DateField::Invalid) = self.hire_date {
            outcome.push("Invalid hire date format");
        }

        outcome
    }
}
