//! Infrastructure layer - External systems integration
//!
//! This module handles all external system concerns:
//! - Connection pool and schema bootstrap
//! - Request-scoped sessions over the pool
//! - Repositories bound to a session
//! - Database readiness probing

pub mod db;
pub mod health;
pub mod repositories;
pub mod session;

pub use db::{Database, SchemaRegistry};
pub use health::{ConnectProbe, HealthProbe, StartupGate};
pub use repositories::{
    InstrumentRepository, RoomRepository, UsageRecordRepository, UserRepository,
};
pub use session::{Session, SessionFactory, SessionStats, SessionStatsSnapshot};

#[cfg(any(test, feature = "test-utils"))]
pub use health::MockHealthProbe;
