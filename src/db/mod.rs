//! Database module providing connection management, migrations, and queries.

pub mod benchmark_results;

use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;
use secrecy::ExposeSecret;
use tracing::info;

use crate::config::{Config, DatabaseSettings};
use crate::error::{StoreError, StoreResult};
use crate::migration::Migrator;

/// Pooled database connection shared by the store.
///
/// Cloning is cheap; all clones share the same pool.
#[derive(Clone, Debug)]
pub struct DbPool {
    conn: DatabaseConnection,
}

impl DbPool {
    /// Create a new database pool from configuration.
    pub async fn new(config: &Config) -> StoreResult<Self> {
        Self::connect(&config.database).await
    }

    /// Connect with explicit settings.
    pub async fn connect(settings: &DatabaseSettings) -> StoreResult<Self> {
        let mut options = ConnectOptions::new(settings.url.expose_secret().to_string());
        options
            .max_connections(settings.max_connections)
            .min_connections(settings.min_connections)
            .connect_timeout(settings.connect_timeout())
            .acquire_timeout(settings.acquire_timeout())
            .sqlx_logging(false);

        let conn = Database::connect(options).await.map_err(|e| {
            StoreError::StorageUnavailable(format!("Failed to connect to database: {}", e))
        })?;

        info!(
            backend = ?conn.get_database_backend(),
            max_connections = settings.max_connections,
            "Database connection established"
        );

        Ok(Self { conn })
    }

    /// Get access to the connection for executing queries.
    pub fn connection(&self) -> &DatabaseConnection {
        &self.conn
    }

    /// Apply all pending migrations (table and grant).
    pub async fn run_migrations(&self) -> StoreResult<()> {
        Migrator::up(&self.conn, None).await?;
        info!("Database migrations complete");
        Ok(())
    }

    /// Check the engine can accept statements.
    pub async fn ping(&self) -> StoreResult<()> {
        self.conn
            .ping()
            .await
            .map_err(|e| StoreError::StorageUnavailable(format!("Database ping failed: {}", e)))
    }

    /// Close the pool, waiting for connections to be released.
    pub async fn close(self) -> StoreResult<()> {
        self.conn.close().await?;
        Ok(())
    }
}
