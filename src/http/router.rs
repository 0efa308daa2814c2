//! Router configuration for the HTTP API.
//!
//! This module sets up all routes, middleware (CORS, compression, tracing),
//! and creates the axum router ready for serving.

use axum::{
    routing::get,
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers;
use super::state::AppState;

/// Create the main application router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration - permissive for development, should be restricted in production
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handlers::health_check))
        .route(
            "/employees",
            get(handlers::list_employees).post(handlers::create_employee),
        )
        // Static segments win over the {id} capture, so the department
        // routes must not be shadowed by /employees/{id}.
        .route(
            "/employees/department",
            get(handlers::missing_department),
        )
        .route(
            "/employees/department/",
            get(handlers::missing_department),
        )
        .route(
            "/employees/department/{department}",
            get(handlers::employees_by_department),
        )
        .route(
            "/employees/{id}",
            get(handlers::get_employee)
                .put(handlers::update_employee)
                .delete(handlers::delete_employee),
        )
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

#[cfg(all(test, feature = "local-repo"))]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::db::repositories::LocalRepository;
    use crate::db::repository::EmployeeRepository;

    #[test]
    fn router_creation() {
        let repo = Arc::new(LocalRepository::new()) as Arc<dyn EmployeeRepository>;
        let state = AppState::new(repo);
        let _router = create_router(state);
        // If we got here, router was created successfully
    }
}
