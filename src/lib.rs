//! # Staffdir Backend
//!
//! Employee directory REST backend.
//!
//! This crate provides a layered HTTP service for managing employee records:
//! request DTOs are sanitized and validated at the boundary, a service layer
//! enforces the business rules (email uniqueness, existence checks), and a
//! repository abstraction persists records to PostgreSQL or an in-memory
//! store. The REST API is exposed via Axum.
//!
//! ## Architecture
//!
//! The crate is organized into several logical modules:
//!
//! - [`models`]: Domain entity, identifiers, and the read projections
//!   returned by the API
//! - [`dto`]: Request DTOs with sanitization and field-level validation
//! - [`db`]: Repository trait, PostgreSQL and in-memory implementations,
//!   and the repository factory
//! - [`services`]: Business-rule orchestration over the repository
//! - [`http`]: Axum-based HTTP server, handlers, and error mapping
//!
//! ## Backends
//!
//! Two storage backends are available behind feature flags:
//!
//! - `postgres-repo`: PostgreSQL with Diesel ORM and embedded migrations
//! - `local-repo`: in-memory store for unit testing and local development

pub mod db;
pub mod dto;
pub mod models;

pub mod services;

#[cfg(feature = "http-server")]
pub mod http;
