//! Database access layer with domain-specific DAOs
//!
//! This module provides direct database access without abstraction layers.
//! Writes go through [`SubmissionsDao`]; aggregate reads through [`StatisticsDao`].

use crate::database::config::DatabaseConfig;
use crate::health::{HealthCheckResult, HealthChecker};
use async_trait::async_trait;
use sea_orm::{ConnectOptions, ConnectionTrait, DatabaseConnection};
use thiserror::Error;
use tracing::info;

pub mod config;
pub mod dao;
pub mod entities;
pub mod migration;

pub use dao::{
    AgeAggregate, FoodShare, HobbyRatingSums, NewSubmission, StatisticsDao, StoredSubmission,
    SubmissionsDao,
};

/// Database error types
#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("Database error: {0}")]
    Database(String),
    #[error("Record not found")]
    NotFound,
    #[error("Migration error: {0}")]
    Migration(String),
}

pub type DatabaseResult<T> = Result<T, DatabaseError>;

/// Database manager trait for dependency injection and testing
#[async_trait]
pub trait DatabaseManager: Send + Sync {
    /// Run database migrations
    async fn migrate(&self) -> DatabaseResult<()>;

    /// Health check for database connection
    async fn health_check(&self) -> DatabaseResult<()>;

    /// Get submissions DAO
    fn submissions(&self) -> SubmissionsDao;

    /// Get statistics DAO
    fn statistics(&self) -> StatisticsDao;

    /// Get direct database connection (for migrations and admin operations)
    fn connection(&self) -> &DatabaseConnection;

    /// Close the connection pool
    async fn close(&self) -> DatabaseResult<()>;
}

/// Database connection manager owning the connection pool
pub struct DatabaseManagerImpl {
    pub connection: DatabaseConnection,
}

impl DatabaseManagerImpl {
    /// Create database manager from configuration
    pub async fn new_from_config(config: &DatabaseConfig) -> Result<Self, DatabaseError> {
        let mut options = ConnectOptions::new(config.url.clone());
        options
            .max_connections(config.max_connections)
            .sqlx_logging(false);

        let connection = sea_orm::Database::connect(options)
            .await
            .map_err(|e| DatabaseError::Database(e.to_string()))?;

        info!(backend = ?connection.get_database_backend(), "Connected to database");

        Ok(Self { connection })
    }
}

#[async_trait]
impl DatabaseManager for DatabaseManagerImpl {
    /// Run database migrations
    async fn migrate(&self) -> DatabaseResult<()> {
        use crate::database::migration::Migrator;
        use sea_orm_migration::MigratorTrait;

        info!("Running database migrations");

        Migrator::up(&self.connection, None)
            .await
            .map_err(|e| DatabaseError::Migration(format!("Failed to run migrations: {}", e)))?;

        info!("Successfully completed all migrations");
        Ok(())
    }

    /// Health check for database connection
    async fn health_check(&self) -> DatabaseResult<()> {
        self.connection
            .ping()
            .await
            .map_err(|e| DatabaseError::Database(format!("db error: {}", e)))
    }

    fn submissions(&self) -> SubmissionsDao {
        SubmissionsDao::new(self.connection.clone())
    }

    fn statistics(&self) -> StatisticsDao {
        StatisticsDao::new(self.connection.clone())
    }

    fn connection(&self) -> &DatabaseConnection {
        &self.connection
    }

    async fn close(&self) -> DatabaseResult<()> {
        // Clones share one pool, so closing a clone closes it for everyone
        self.connection
            .clone()
            .close()
            .await
            .map_err(|e| DatabaseError::Database(format!("Failed to close pool: {}", e)))
    }
}

#[async_trait]
impl HealthChecker for DatabaseManagerImpl {
    fn name(&self) -> &str {
        "database"
    }

    async fn check(&self) -> HealthCheckResult {
        match self.health_check().await {
            Ok(_) => HealthCheckResult::healthy_with_details(serde_json::json!({
                "status": "healthy",
                "connection": "ok"
            })),
            Err(err) => HealthCheckResult::unhealthy_with_details(
                "DB health check failed".to_string(),
                serde_json::json!({
                    "status": "unhealthy",
                    "error": err.to_string()
                }),
            ),
        }
    }
}
