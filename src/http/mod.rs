//! Axum-based HTTP server for the employee directory API.
//!
//! This module translates between HTTP and the service layer:
//!
//! - [`router`]: routes and middleware
//! - [`handlers`]: one handler per endpoint
//! - [`dto`]: the response envelope and health payload
//! - [`error`]: tagged error → status-code mapping
//! - [`state`]: shared application state (the injected repository)

pub mod dto;
pub mod error;
pub mod handlers;
pub mod router;
pub mod state;

pub use dto::{ApiResponse, HealthResponse};
pub use error::AppError;
pub use router::create_router;
pub use state::AppState;
