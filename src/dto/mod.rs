//! Request DTOs with sanitization and field-level validation.
//!
//! DTOs are constructed from arbitrary untyped JSON input and sanitize on
//! construction: text fields are trimmed, the email is additionally
//! lowercased, and salary/hire-date values are coerced from the
//! representations clients actually send (numeric strings, date-only
//! strings). A value that is present but unusable is kept as an `Invalid`
//! marker so that [`ValidatedRequest::validate`] can report it instead of
//! the constructor failing.

use bigdecimal::BigDecimal;
use chrono::{DateTime, NaiveDate, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

mod create;
mod update;

pub use create::CreateEmployeeRequest;
pub use update::UpdateEmployeeRequest;

/// Outcome of validating a request DTO: the ordered list of human-readable
/// violations. Valid iff the list is empty.
#[derive(Debug, Clone, Default)]
pub struct ValidationOutcome {
    errors: Vec<String>,
}

impl ValidationOutcome {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// The violations joined with `", "`, the form embedded in error
    /// responses.
    pub fn joined(&self) -> String {
        self.errors.join(", ")
    }
}

/// Shared contract of the request DTOs.
pub trait ValidatedRequest {
    /// Collect every applicable violation, preserving field order. Never
    /// short-circuits on the first failure.
    fn validate(&self) -> ValidationOutcome;
}

static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

pub(crate) fn email_format_ok(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

/// A client-supplied numeric value. `Invalid` records that the field was
/// present but not coercible to a number.
#[derive(Debug, Clone, PartialEq)]
pub enum NumericField {
    Valid(BigDecimal),
    Invalid,
}

/// A client-supplied date value. `Invalid` records that the field was
/// present but unparseable.
#[derive(Debug, Clone, PartialEq)]
pub enum DateField {
    Valid(DateTime<Utc>),
    Invalid,
}

/// Extract a text field, trimmed. Non-string values (including null) count
/// as absent.
pub(crate) fn string_field(input: &Value, key: &str) -> Option<String> {
    input
        .get(key)
        .and_then(Value::as_str)
        .map(|s| s.trim().to_string())
}

/// Extract a numeric field, accepting JSON numbers and numeric text.
pub(crate) fn numeric_field(input: &Value, key: &str) -> Option<NumericField> {
    match input.get(key) {
        None | Some(Value::Null) => None,
        // serde_json renders numbers exactly (integers) or via shortest
        // round-trip (floats), so parsing the rendering loses nothing.
        Some(Value::Number(n)) => Some(
            n.to_string()
                .parse::<BigDecimal>()
                .map(NumericField::Valid)
                .unwrap_or(NumericField::Invalid),
        ),
        Some(Value::String(s)) => Some(
            s.trim()
                .parse::<BigDecimal>()
                .map(NumericField::Valid)
                .unwrap_or(NumericField::Invalid),
        ),
        Some(_) => Some(NumericField::Invalid),
    }
}

/// Extract a date field, accepting RFC 3339 datetimes, `YYYY-MM-DD` dates,
/// and integer epoch milliseconds.
pub(crate) fn date_field(input: &Value, key: &str) -> Option<DateField> {
    match input.get(key) {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(parse_date(s.trim())),
        Some(Value::Number(n)) => Some(
            n.as_i64()
                .and_then(DateTime::<Utc>::from_timestamp_millis)
                .map(DateField::Valid)
                .unwrap_or(DateField::Invalid),
        ),
        Some(_) => Some(DateField::Invalid),
    }
}

fn parse_date(raw: &str) -> DateField {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return DateField::Valid(dt.with_timezone(&Utc));
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
            return DateField::Valid(midnight.and_utc());
        }
    }
    DateField::Invalid
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn email_pattern_accepts_plain_addresses() {
        assert!(email_format_ok("john@example.com"));
        assert!(email_format_ok("a.b+c@sub.domain.org"));
    }

    #[test]
    fn email_pattern_rejects_malformed_addresses() {
        assert!(!email_format_ok("no-at-sign"));
        assert!(!email_format_ok("two@@example.com"));
        assert!(!email_format_ok("no-dot@example"));
        assert!(!email_format_ok("spaces in@example.com"));
    }

    #[test]
    fn numeric_field_coerces_numeric_text() {
        let input = json!({"salary": "75000.50"});
        assert_eq!(
            numeric_field(&input, "salary"),
            Some(NumericField::Valid("75000.50".parse().unwrap()))
        );
    }

    #[test]
    fn numeric_field_marks_unparseable_values() {
        assert_eq!(
            numeric_field(&json!({"salary": "lots"}), "salary"),
            Some(NumericField::Invalid)
        );
        assert_eq!(
            numeric_field(&json!({"salary": true}), "salary"),
            Some(NumericField::Invalid)
        );
        assert_eq!(numeric_field(&json!({}), "salary"), None);
        assert_eq!(numeric_field(&json!({ "salary": null }), "salary"), None);
    }

    #[test]
    fn date_field_accepts_date_only_strings() {
        let parsed = date_field(&json!({"hireDate": "2024-01-15"}), "hireDate");
        match parsed {
            Some(DateField::Valid(dt)) => assert_eq!(dt.to_rfc3339(), "2024-01-15T00:00:00+00:00"),
            other => panic!("expected valid date, got {:?}", other),
        }
    }

    #[test]
    fn date_field_marks_garbage_without_failing() {
        assert_eq!(
            date_field(&json!({"hireDate": "not-a-date"}), "hireDate"),
            Some(DateField::Invalid)
        );
        assert_eq!(date_field(&json!({}), "hireDate"), None);
    }
}
