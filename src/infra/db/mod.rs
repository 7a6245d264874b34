//! Database connection pool and schema bootstrap.

use sea_orm::{
    ConnectOptions, ConnectionTrait, Database as SeaDatabase, DatabaseConnection, DbErr, Statement,
};

use crate::config::DatabaseSettings;
use crate::errors::AppResult;

pub mod registry;

pub use registry::SchemaRegistry;

/// Process-wide connection pool.
///
/// Constructed once at startup and handed to everything that needs it.
#[derive(Clone)]
pub struct Database {
    connection: DatabaseConnection,
}

impl Database {
    /// Open the connection pool.
    ///
    /// Unreachable hosts surface as `AppError::ServiceUnavailable` once
    /// `connect_timeout` elapses.
    pub async fn connect(settings: &DatabaseSettings) -> AppResult<Self> {
        let connection = SeaDatabase::connect(connect_options(settings)).await?;
        tracing::info!(
            max_connections = settings.max_connections,
            backend = ?connection.get_database_backend(),
            "Database pool ready"
        );
        Ok(Self { connection })
    }

    /// Get a reference to the database connection.
    pub fn connection(&self) -> &DatabaseConnection {
        &self.connection
    }

    /// Get a clone of the database connection.
    pub fn get_connection(&self) -> DatabaseConnection {
        self.connection.clone()
    }

    /// Check database connectivity by executing a simple query.
    pub async fn ping(&self) -> Result<(), DbErr> {
        self.connection
            .execute(Statement::from_string(
                self.connection.get_database_backend(),
                "SELECT 1".to_string(),
            ))
            .await?;
        Ok(())
    }

    /// Close every pooled connection.
    pub async fn close(self) -> AppResult<()> {
        self.connection.close().await?;
        tracing::info!("Database pool closed");
        Ok(())
    }
}

fn connect_options(settings: &DatabaseSettings) -> ConnectOptions {
    let mut options = ConnectOptions::new(settings.url().to_owned());
    options
        .max_connections(settings.max_connections)
        .min_connections(settings.min_connections)
        .connect_timeout(settings.connect_timeout)
        .acquire_timeout(settings.acquire_timeout)
        .idle_timeout(settings.idle_timeout)
        .connect_lazy(settings.connect_lazy)
        .sqlx_logging(settings.sqlx_logging);
    options
}
