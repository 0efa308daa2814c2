//! Service-layer integration tests against the in-memory repository.

use serde_json::{json, Value};
use staffdir::db::repositories::LocalRepository;
use staffdir::db::repository::EmployeeRepository;
use staffdir::models::EmployeeId;
use staffdir::services::{self, ServiceError};

fn john_doe() -> Value {
    json!({
        "name": "John Doe",
        "email": " John@Ex.com ",
        "position": "Engineer",
        "department": "Eng",
        "salary": 75000,
        "hireDate": "2024-01-15"
    })
}

fn payload(name: &str, email: &str, department: &str) -> Value {
    json!({
        "name": name,
        "email": email,
        "position": "Engineer",
        "department": department,
        "salary": 50000,
        "hireDate": "2024-01-15"
    })
}

#[tokio::test]
async fn create_normalizes_email_and_salary() {
    let repo = LocalRepository::new();
    let employee = services::create_employee(&repo, &john_doe()).await.unwrap();

    assert_eq!(employee.email, "john@ex.com");
    assert_eq!(employee.salary.to_string(), "75000.00");
    assert!(employee.id.value() > 0);

    // The stored row matches what the service returned.
    let stored = repo.find_by_email("john@ex.com").await.unwrap().unwrap();
    assert_eq!(stored.id, employee.id);
}

#[tokio::test]
async fn create_rejects_invalid_payload_with_joined_errors() {
    let repo = LocalRepository::new();
    let err = services::create_employee(&repo, &json!({}))
        .await
        .unwrap_err();

    match err {
        ServiceError::Validation(msg) => assert_eq!(
            msg,
            "Name is required, Email is required, Position is required, \
             Department is required, Salary is required, Hire date is required"
        ),
        other => panic!("expected validation error, got {:?}", other),
    }
    assert_eq!(repo.employee_count(), 0);
}

#[tokio::test]
async fn duplicate_email_conflicts_case_insensitively() {
    let repo = LocalRepository::new();
    services::create_employee(&repo, &payload("A", "dup@ex.com", "Eng"))
        .await
        .unwrap();

    // Same address in different case normalizes to the same stored email.
    let err = services::create_employee(&repo, &payload("B", "  DUP@EX.COM ", "Sales"))
        .await
        .unwrap_err();
    match err {
        ServiceError::Conflict(msg) => {
            assert_eq!(msg, "Employee with this email already exists")
        }
        other => panic!("expected conflict, got {:?}", other),
    }
    assert_eq!(repo.employee_count(), 1);
}

#[tokio::test]
async fn get_by_id_reports_missing_employee() {
    let repo = LocalRepository::new();
    let err = services::get_employee_by_id(&repo, EmployeeId::new(123))
        .await
        .unwrap_err();
    match err {
        ServiceError::NotFound(msg) => assert_eq!(msg, "Employee not found"),
        other => panic!("expected not found, got {:?}", other),
    }
}

#[tokio::test]
async fn empty_update_is_rejected_without_touching_the_row() {
    let repo = LocalRepository::new();
    let created = services::create_employee(&repo, &john_doe()).await.unwrap();

    let err = services::update_employee(&repo, created.id, &json!({}))
        .await
        .unwrap_err();
    match err {
        ServiceError::Validation(msg) => assert_eq!(msg, "No fields to update"),
        other => panic!("expected validation error, got {:?}", other),
    }

    // The persistence update never ran: updated_at is untouched.
    let stored = repo.find_by_id(created.id).await.unwrap().unwrap();
    assert_eq!(stored.updated_at, created.updated_at);
}

#[tokio::test]
async fn unrecognized_update_fields_count_as_empty() {
    let repo = LocalRepository::new();
    let created = services::create_employee(&repo, &john_doe()).await.unwrap();

    let err = services::update_employee(&repo, created.id, &json!({"badge": "blue"}))
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Validation(msg) if msg == "No fields to update"));
}

#[tokio::test]
async fn update_applies_partial_changes() {
    let repo = LocalRepository::new();
    let created = services::create_employee(&repo, &john_doe()).await.unwrap();

    let updated = services::update_employee(
        &repo,
        created.id,
        &json!({"position": "Staff Engineer", "salary": "91000.505"}),
    )
    .await
    .unwrap();

    assert_eq!(updated.position, "Staff Engineer");
    assert_eq!(updated.salary.to_string(), "91000.51");
    assert_eq!(updated.name, created.name);
    assert_eq!(updated.email, created.email);
}

#[tokio::test]
async fn update_to_taken_email_conflicts() {
    let repo = LocalRepository::new();
    services::create_employee(&repo, &payload("A", "a@ex.com", "Eng"))
        .await
        .unwrap();
    let b = services::create_employee(&repo, &payload("B", "b@ex.com", "Eng"))
        .await
        .unwrap();

    let err = services::update_employee(&repo, b.id, &json!({"email": "A@Ex.com"}))
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Conflict(_)));
}

#[tokio::test]
async fn update_to_own_email_succeeds() {
    let repo = LocalRepository::new();
    let created = services::create_employee(&repo, &payload("A", "a@ex.com", "Eng"))
        .await
        .unwrap();

    let updated = services::update_employee(
        &repo,
        created.id,
        &json!({"email": " A@EX.COM ", "position": "Lead"}),
    )
    .await
    .unwrap();
    assert_eq!(updated.email, "a@ex.com");
    assert_eq!(updated.position, "Lead");
}

#[tokio::test]
async fn update_missing_employee_is_not_found() {
    let repo = LocalRepository::new();
    let err = services::update_employee(&repo, EmployeeId::new(7), &json!({"name": "X"}))
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)));
}

#[tokio::test]
async fn update_validation_errors_are_reported_before_emptiness() {
    let repo = LocalRepository::new();
    let created = services::create_employee(&repo, &john_doe()).await.unwrap();

    let err = services::update_employee(&repo, created.id, &json!({"salary": -1}))
        .await
        .unwrap_err();
    assert!(
        matches!(err, ServiceError::Validation(msg) if msg == "Salary must be a positive number")
    );
}

#[tokio::test]
async fn delete_removes_the_row_and_then_reports_not_found() {
    let repo = LocalRepository::new();
    let created = services::create_employee(&repo, &john_doe()).await.unwrap();

    services::delete_employee(&repo, created.id).await.unwrap();
    assert!(repo.find_by_id(created.id).await.unwrap().is_none());

    let err = services::delete_employee(&repo, created.id)
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)));
}

#[tokio::test]
async fn department_listing_requires_a_department() {
    let repo = LocalRepository::new();
    let err = services::get_employees_by_department(&repo, "   ")
        .await
        .unwrap_err();
    match err {
        ServiceError::Validation(msg) => assert_eq!(msg, "Department is required"),
        other => panic!("expected validation error, got {:?}", other),
    }
}

#[tokio::test]
async fn department_listing_filters_exactly() {
    let repo = LocalRepository::new();
    services::create_employee(&repo, &payload("A", "a@ex.com", "Eng"))
        .await
        .unwrap();
    services::create_employee(&repo, &payload("B", "b@ex.com", "Sales"))
        .await
        .unwrap();

    let eng = services::get_employees_by_department(&repo, "Eng")
        .await
        .unwrap();
    assert_eq!(eng.len(), 1);
    assert_eq!(eng[0].email, "a@ex.com");
}

#[tokio::test]
async fn list_returns_everything_newest_first() {
    let repo = LocalRepository::new();
    let a = services::create_employee(&repo, &payload("A", "a@ex.com", "Eng"))
        .await
        .unwrap();
    let b = services::create_employee(&repo, &payload("B", "b@ex.com", "Eng"))
        .await
        .unwrap();

    let all = services::get_all_employees(&repo).await.unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].id, b.id);
    assert_eq!(all[1].id, a.id);
}

#[tokio::test]
async fn repository_failures_propagate_unchanged() {
    let repo = LocalRepository::new();
    repo.set_healthy(false);
    let err = services::get_all_employees(&repo).await.unwrap_err();
    assert!(matches!(err, ServiceError::Repository(_)));
}
