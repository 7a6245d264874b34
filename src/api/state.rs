//! Application state - Dependency injection container.

use std::sync::Arc;

use axum::extract::FromRef;

use crate::infra::{Database, SessionFactory};
use crate::services::Services;

/// Application state shared by every handler.
#[derive(Clone)]
pub struct AppState {
    /// Connection pool, used directly only for health checks
    pub database: Arc<Database>,
    /// Per-request session source
    pub sessions: SessionFactory,
    /// Business services
    pub services: Services,
}

impl AppState {
    /// State with the default service implementations.
    pub fn new(database: Arc<Database>, sessions: SessionFactory) -> Self {
        Self::with_services(database, sessions, Services::default())
    }

    /// State with manually injected services.
    pub fn with_services(
        database: Arc<Database>,
        sessions: SessionFactory,
        services: Services,
    ) -> Self {
        Self {
            database,
            sessions,
            services,
        }
    }
}

impl FromRef<AppState> for SessionFactory {
    fn from_ref(state: &AppState) -> Self {
        state.sessions.clone()
    }
}
