//! Postgres repository implementation using Diesel.
//!
//! ## Features
//!
//! - Connection pooling with r2d2
//! - Automatic migration execution on startup
//!
//! ## Configuration
//!
//! Environment variables:
//! - `DATABASE_URL` or `PG_DATABASE_URL`: Connection string (required)
//! - `PG_POOL_MAX`: Maximum pool size (default: 10)
//! - `PG_POOL_MIN`: Minimum pool size (default: 1)
//! - `PG_CONN_TIMEOUT_SEC`: Connection timeout in seconds (default: 30)
//! - `PG_IDLE_TIMEOUT_SEC`: Idle connection timeout in seconds (default: 600)

use std::time::Duration;

use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::sql_query;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use tokio::task;

use crate::db::repository::{
    EmployeeRepository, ErrorContext, RepositoryError, RepositoryResult,
};
use crate::models::{Employee, EmployeeChanges, EmployeeId, NewEmployee};

mod models;
mod schema;

use models::{EmployeeChangesRow, EmployeeRow, NewEmployeeRow};
use schema::employees;

type PgPool = Pool<ConnectionManager<PgConnection>>;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("src/db/repositories/postgres/migrations");

/// Configuration for connecting to Postgres.
#[derive(Debug, Clone)]
pub struct PostgresConfig {
    /// Database connection URL
    pub database_url: String,
    /// Maximum number of connections in the pool
    pub max_pool_size: u32,
    /// Minimum number of connections in the pool
    pub min_pool_size: u32,
    /// Connection timeout in seconds
    pub connection_timeout_sec: u64,
    /// Idle connection timeout in seconds
    pub idle_timeout_sec: u64,
}

impl Default for PostgresConfig {
    fn default() -> Self {
        Self {
            database_url: String::new(),
            max_pool_size: 10,
            min_pool_size: 1,
            connection_timeout_sec: 30,
            idle_timeout_sec: 600,
        }
    }
}

impl PostgresConfig {
    /// Create configuration from environment variables.
    pub fn from_env() -> Result<Self, String> {
        let database_url = std::env::var("DATABASE_URL")
            .or_else(|_| std::env::var("PG_DATABASE_URL"))
            .map_err(|_| "DATABASE_URL or PG_DATABASE_URL must be set".to_string())?;

        let max_pool_size = std::env::var("PG_POOL_MAX")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(10);

        let min_pool_size = std::env::var("PG_POOL_MIN")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(1);

        let connection_timeout_sec = std::env::var("PG_CONN_TIMEOUT_SEC")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(30);

        let idle_timeout_sec = std::env::var("PG_IDLE_TIMEOUT_SEC")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(600);

        Ok(Self {
            database_url,
            max_pool_size,
            min_pool_size,
            connection_timeout_sec,
            idle_timeout_sec,
        })
    }

    /// Create a new configuration with a database URL.
    pub fn with_url(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            ..Default::default()
        }
    }
}

/// Diesel-backed repository for Postgres.
#[derive(Clone)]
pub struct PostgresRepository {
    pool: PgPool,
}

impl PostgresRepository {
    /// Create a new repository and run pending migrations.
    pub fn new(config: PostgresConfig) -> RepositoryResult<Self> {
        let manager = ConnectionManager::<PgConnection>::new(&config.database_url);

        let pool = Pool::builder()
            .max_size(config.max_pool_size)
            .min_idle(Some(config.min_pool_size))
            .connection_timeout(Duration::from_secs(config.connection_timeout_sec))
            .idle_timeout(Some(Duration::from_secs(config.idle_timeout_sec)))
            .test_on_check_out(true)
            .build(manager)
            .map_err(|e| RepositoryError::Connection {
                message: e.to_string(),
                context: ErrorContext::new("create_pool")
                    .with_details(format!("max_size={}", config.max_pool_size)),
            })?;

        {
            let mut conn = pool.get().map_err(|e| RepositoryError::Connection {
                message: e.to_string(),
                context: ErrorContext::new("get_connection_for_migrations"),
            })?;
            Self::run_migrations(&mut conn)?;
        }

        Ok(Self { pool })
    }

    /// Run pending database migrations.
    fn run_migrations(conn: &mut PgConnection) -> RepositoryResult<()> {
        conn.run_pending_migrations(MIGRATIONS).map_err(|e| {
            RepositoryError::internal_with_context(
                format!("Migration failed: {}", e),
                ErrorContext::new("run_migrations"),
            )
        })?;
        Ok(())
    }

    /// Run a Diesel operation on a pooled connection without blocking the
    /// async executor. No retry: transient failures surface to the caller.
    async fn with_conn<T, F>(&self, f: F) -> RepositoryResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut PgConnection) -> RepositoryResult<T> + Send + 'static,
    {
        let pool = self.pool.clone();
        task::spawn_blocking(move || {
            let mut conn = pool.get().map_err(RepositoryError::from)?;
            f(&mut conn)
        })
        .await
        .map_err(|e| {
            RepositoryError::internal_with_context(
                format!("Task join error: {}", e),
                ErrorContext::new("spawn_blocking"),
            )
        })?
    }
}

#[async_trait]
impl EmployeeRepository for PostgresRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        self.with_conn(|conn| {
            sql_query("SELECT 1")
                .execute(conn)
                .map(|_| true)
                .map_err(RepositoryError::from)
        })
        .await
    }

    async fn find_all(&self) -> RepositoryResult<Vec<Employee>> {
        self.with_conn(|conn| {
            let rows = employees::table
                .order(employees::created_at.desc())
                .then_order_by(employees::id.desc())
                .select(EmployeeRow::as_select())
                .load::<EmployeeRow>(conn)
                .map_err(|e| RepositoryError::from(e).with_operation("find_all"))?;
            Ok(rows.into_iter().map(Employee::from).collect())
        })
        .await
    }

    async fn find_by_id(&self, id: EmployeeId) -> RepositoryResult<Option<Employee>> {
        self.with_conn(move |conn| {
            let row = employees::table
                .find(id.value())
                .select(EmployeeRow::as_select())
                .first::<EmployeeRow>(conn)
                .optional()
                .map_err(|e| RepositoryError::from(e).with_operation("find_by_id"))?;
            Ok(row.map(Employee::from))
        })
        .await
    }

    async fn create(&self, new_employee: NewEmployee) -> RepositoryResult<Employee> {
        self.with_conn(move |conn| {
            let row: EmployeeRow = diesel::insert_into(employees::table)
                .values(NewEmployeeRow::from(new_employee))
                .returning(EmployeeRow::as_returning())
                .get_result(conn)
                .map_err(|e| RepositoryError::from(e).with_operation("create"))?;
            Ok(Employee::from(row))
        })
        .await
    }

    async fn update(
        &self,
        id: EmployeeId,
        changes: EmployeeChanges,
    ) -> RepositoryResult<Employee> {
        self.with_conn(move |conn| {
            let row: EmployeeRow = diesel::update(employees::table.find(id.value()))
                .set(EmployeeChangesRow::from_changes(changes))
                .returning(EmployeeRow::as_returning())
                .get_result(conn)
                .map_err(|e| RepositoryError::from(e).with_operation("update"))?;
            Ok(Employee::from(row))
        })
        .await
    }

    async fn delete(&self, id: EmployeeId) -> RepositoryResult<()> {
        self.with_conn(move |conn| {
            let deleted = diesel::delete(employees::table.find(id.value()))
                .execute(conn)
                .map_err(|e| RepositoryError::from(e).with_operation("delete"))?;
            if deleted == 0 {
                return Err(RepositoryError::not_found_with_context(
                    format!("Employee {} not found", id),
                    ErrorContext::new("delete").with_entity_id(id),
                ));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_email(&self, email: &str) -> RepositoryResult<Option<Employee>> {
        let email = email.to_string();
        self.with_conn(move |conn| {
            let row = employees::table
                .filter(employees::email.eq(&email))
                .select(EmployeeRow::as_select())
                .first::<EmployeeRow>(conn)
                .optional()
                .map_err(|e| RepositoryError::from(e).with_operation("find_by_email"))?;
            Ok(row.map(Employee::from))
        })
        .await
    }

    async fn find_by_department(&self, department: &str) -> RepositoryResult<Vec<Employee>> {
        let department = department.to_string();
        self.with_conn(move |conn| {
            let rows = employees::table
                .filter(employees::department.eq(&department))
                .order(employees::created_at.desc())
                .then_order_by(employees::id.desc())
                .select(EmployeeRow::as_select())
                .load::<EmployeeRow>(conn)
                .map_err(|e| RepositoryError::from(e).with_operation("find_by_department"))?;
            Ok(rows.into_iter().map(Employee::from).collect())
        })
        .await
    }
}
