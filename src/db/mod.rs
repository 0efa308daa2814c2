//! Persistence module for employee records.
//!
//! Abstractions follow the Repository pattern so storage backends can be
//! swapped:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  HTTP Layer (handlers)                                  │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Service Layer (services::employees) - Business Rules   │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  EmployeeRepository trait - Abstract Interface          │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//!     ┌───────────────┴────────────────┐
//!     │                                │
//! ┌───▼──────────────┐     ┌───────────▼─────────────┐
//! │ Postgres (Diesel)│     │ Local (in-memory)       │
//! └──────────────────┘     └─────────────────────────┘
//! ```
//!
//! The repository layer enforces no business rules; uniqueness and
//! existence checks live in the service layer, with the database's unique
//! index as the final arbiter under concurrent writes.

#[cfg(not(any(feature = "postgres-repo", feature = "local-repo")))]
compile_error!("Enable at least one repository backend feature.");

pub mod factory;
pub mod repo_config;
pub mod repositories;
pub mod repository;

pub use factory::{RepositoryFactory, RepositoryType};
pub use repo_config::RepositoryConfig;
#[cfg(feature = "local-repo")]
pub use repositories::LocalRepository;
#[cfg(feature = "postgres-repo")]
pub use repositories::{PostgresConfig, PostgresRepository};
pub use repository::{EmployeeRepository, ErrorContext, RepositoryError, RepositoryResult};
