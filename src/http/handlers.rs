//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint: it pulls parameters from
//! the request path/body, delegates to the service layer, and shapes the
//! result through the projection appropriate to the endpoint.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::Value;

use crate::db::repository::EmployeeRepository;
use crate::models::{EmployeeDetail, EmployeeId, EmployeeListItem};
use crate::services;

use super::dto::{ApiResponse, HealthResponse};
use super::error::AppError;
use super::state::AppState;

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<ApiResponse<T>>, AppError>;

/// GET /health
///
/// Health check endpoint to verify the service is running and the database
/// is accessible.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let database = match state.repository.health_check().await {
        Ok(true) => "connected".to_string(),
        Ok(false) => "disconnected".to_string(),
        Err(e) => format!("error: {}", e),
    };

    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database,
    })
}

/// GET /employees
///
/// List all employees in the minimal listing projection.
pub async fn list_employees(
    State(state): State<AppState>,
) -> HandlerResult<Vec<EmployeeListItem>> {
    let employees = services::get_all_employees(state.repository.as_ref()).await?;
    Ok(Json(ApiResponse::data(EmployeeListItem::from_entities(
        &employees,
    ))))
}

/// GET /employees/{id}
pub async fn get_employee(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> HandlerResult<EmployeeDetail> {
    let employee =
        services::get_employee_by_id(state.repository.as_ref(), EmployeeId::new(id)).await?;
    Ok(Json(ApiResponse::data(EmployeeDetail::from_entity(
        &employee,
    ))))
}

/// POST /employees
///
/// The body is an arbitrary JSON object; sanitization and validation happen
/// in the request DTO.
pub async fn create_employee(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<ApiResponse<EmployeeDetail>>), AppError> {
    let employee = services::create_employee(state.repository.as_ref(), &body).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::data(EmployeeDetail::from_entity(&employee))),
    ))
}

/// PUT /employees/{id}
pub async fn update_employee(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(body): Json<Value>,
) -> HandlerResult<EmployeeDetail> {
    let employee =
        services::update_employee(state.repository.as_ref(), EmployeeId::new(id), &body).await?;
    Ok(Json(ApiResponse::data(EmployeeDetail::from_entity(
        &employee,
    ))))
}

/// DELETE /employees/{id}
pub async fn delete_employee(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> HandlerResult<()> {
    services::delete_employee(state.repository.as_ref(), EmployeeId::new(id)).await?;
    Ok(Json(ApiResponse::message("Employee deleted successfully")))
}

/// GET /employees/department/{department}
pub async fn employees_by_department(
    State(state): State<AppState>,
    Path(department): Path<String>,
) -> HandlerResult<Vec<EmployeeListItem>> {
    let employees =
        services::get_employees_by_department(state.repository.as_ref(), &department).await?;
    Ok(Json(ApiResponse::data(EmployeeListItem::from_entities(
        &employees,
    ))))
}

/// GET /employees/department and /employees/department/
///
/// The department segment is missing entirely; answer the same validation
/// error the service raises for a blank department.
pub async fn missing_department() -> AppError {
    AppError::Validation("Department is required".to_string())
}
