//! Repository factory for dependency injection.
//!
//! The factory creates repository instances based on runtime configuration
//! (environment variables or a TOML file). The resulting trait object is
//! constructed once at process start and handed to the HTTP layer by
//! reference; the repositories hold no per-request state.

use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use super::repo_config::RepositoryConfig;
#[cfg(feature = "local-repo")]
use super::repositories::LocalRepository;
#[cfg(feature = "postgres-repo")]
use super::repositories::{PostgresConfig, PostgresRepository};
use super::repository::{EmployeeRepository, RepositoryError, RepositoryResult};

/// Repository type configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepositoryType {
    /// Postgres + Diesel implementation
    Postgres,
    /// In-memory local repository
    Local,
}

impl FromStr for RepositoryType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "postgres" | "pg" => Ok(Self::Postgres),
            "local" => Ok(Self::Local),
            _ => Err(format!("Unknown repository type: {}", s)),
        }
    }
}

impl RepositoryType {
    /// Get repository type from environment.
    ///
    /// Reads `REPOSITORY_TYPE`; defaults to Postgres if a database URL is
    /// present, otherwise Local.
    pub fn from_env() -> Self {
        if let Ok(val) = std::env::var("REPOSITORY_TYPE") {
            return val.parse().unwrap_or(Self::Local);
        }

        if std::env::var("DATABASE_URL").is_ok() || std::env::var("PG_DATABASE_URL").is_ok() {
            Self::Postgres
        } else {
            Self::Local
        }
    }
}

/// Repository factory for creating repository instances.
pub struct RepositoryFactory;

impl RepositoryFactory {
    /// Create an in-memory local repository.
    #[cfg(feature = "local-repo")]
    pub fn create_local() -> Arc<dyn EmployeeRepository> {
        Arc::new(LocalRepository::new())
    }

    /// Create a Postgres repository.
    #[cfg(feature = "postgres-repo")]
    pub async fn create_postgres(
        config: &PostgresConfig,
    ) -> RepositoryResult<Arc<PostgresRepository>> {
        let repo = PostgresRepository::new(config.clone())?;
        Ok(Arc::new(repo))
    }

    /// Create a repository from environment configuration.
    pub async fn from_env() -> RepositoryResult<Arc<dyn EmployeeRepository>> {
        match RepositoryType::from_env() {
            RepositoryType::Postgres => {
                #[cfg(feature = "postgres-repo")]
                {
                    let config =
                        PostgresConfig::from_env().map_err(RepositoryError::configuration)?;
                    let pg = Self::create_postgres(&config).await?;
                    Ok(pg as Arc<dyn EmployeeRepository>)
                }
                #[cfg(not(feature = "postgres-repo"))]
                {
                    Err(RepositoryError::configuration(
                        "Postgres repository feature not enabled",
                    ))
                }
            }
            RepositoryType::Local => {
                #[cfg(feature = "local-repo")]
                {
                    Ok(Self::create_local())
                }
                #[cfg(not(feature = "local-repo"))]
                {
                    Err(RepositoryError::configuration(
                        "Local repository feature not enabled",
                    ))
                }
            }
        }
    }

    /// Create a repository from a TOML configuration file.
    pub async fn from_config_file<P: AsRef<Path>>(
        config_path: P,
    ) -> RepositoryResult<Arc<dyn EmployeeRepository>> {
        let config = RepositoryConfig::from_file(config_path)?;
        Self::from_repository_config(&config).await
    }

    async fn from_repository_config(
        config: &RepositoryConfig,
    ) -> RepositoryResult<Arc<dyn EmployeeRepository>> {
        let repo_type = config.repository.kind.parse::<RepositoryType>().map_err(|e| {
            RepositoryError::configuration(format!("Invalid repository type: {}", e))
        })?;

        match repo_type {
            RepositoryType::Postgres => {
                #[cfg(feature = "postgres-repo")]
                {
                    let section = config.postgres.as_ref().ok_or_else(|| {
                        RepositoryError::configuration(
                            "Postgres repository requires a [postgres] section",
                        )
                    })?;
                    let pg = Self::create_postgres(&section.to_postgres_config()).await?;
                    Ok(pg as Arc<dyn EmployeeRepository>)
                }
                #[cfg(not(feature = "postgres-repo"))]
                {
                    Err(RepositoryError::configuration(
                        "Postgres repository feature not enabled",
                    ))
                }
            }
            RepositoryType::Local => {
                #[cfg(feature = "local-repo")]
                {
                    Ok(Self::create_local())
                }
                #[cfg(not(feature = "local-repo"))]
                {
                    Err(RepositoryError::configuration(
                        "Local repository feature not enabled",
                    ))
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repository_type_from_str() {
        assert_eq!(
            RepositoryType::from_str("local").unwrap(),
            RepositoryType::Local
        );
        assert_eq!(
            RepositoryType::from_str("postgres").unwrap(),
            RepositoryType::Postgres
        );
        assert_eq!(
            RepositoryType::from_str("Pg").unwrap(),
            RepositoryType::Postgres
        );
        assert!(RepositoryType::from_str("invalid").is_err());
    }

    #[cfg(feature = "local-repo")]
    #[tokio::test]
    async fn create_local_repository_is_healthy() {
        let repo = RepositoryFactory::create_local();
        assert!(repo.health_check().await.unwrap());
    }
}
