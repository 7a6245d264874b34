//! Shared helpers for integration tests.
//!
//! Each test gets its own SQLite file so tests can run in parallel and
//! several pooled connections see the same data.

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use seqlab_api::api::{create_router, AppState};
use seqlab_api::config::DatabaseSettings;
use seqlab_api::infra::{Database, SchemaRegistry, SessionFactory};

/// Temporary database, removed when dropped.
pub struct TestDb {
    pub path: PathBuf,
    pub settings: DatabaseSettings,
}

impl TestDb {
    pub fn new() -> Self {
        Self::with_pool(4, Duration::from_secs(5))
    }

    pub fn with_pool(max_connections: u32, acquire_timeout: Duration) -> Self {
        let path = std::env::temp_dir().join(format!("seqlab-test-{}.db", uuid::Uuid::new_v4()));
        let mut settings = DatabaseSettings::new(format!("sqlite://{}?mode=rwc", path.display()));
        settings.max_connections = max_connections;
        settings.min_connections = 0;
        settings.acquire_timeout = acquire_timeout;
        Self { path, settings }
    }

    /// Connect and create every table
    pub async fn connect(&self) -> Database {
        let db = Database::connect(&self.settings).await.unwrap();
        SchemaRegistry::with_default_models()
            .initialize(&db)
            .await
            .unwrap();
        db
    }

    /// Connected database with a session factory
    pub async fn sessions(&self) -> (Database, SessionFactory) {
        let db = self.connect().await;
        let factory = SessionFactory::new(&db);
        (db, factory)
    }

    /// Router over a fresh schema, plus its factory for inspecting counters
    pub async fn router(&self) -> (axum::Router, SessionFactory) {
        let (db, factory) = self.sessions().await;
        let state = AppState::new(Arc::new(db), factory.clone());
        (create_router(state), factory)
    }
}

impl Drop for TestDb {
    fn drop(&mut self) {
        for suffix in ["", "-journal", "-wal", "-shm"] {
            let _ = std::fs::remove_file(format!("{}{}", self.path.display(), suffix));
        }
    }
}
