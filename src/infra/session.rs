//! Request-scoped database sessions.
//!
//! A [`Session`] is one transaction on one pooled connection. It is
//! released exactly once: by [`Session::commit`], by [`Session::rollback`],
//! or, when neither runs (handler error, early return, panic, cancelled
//! future), by dropping it. Dropping rolls the transaction back and hands
//! the connection back to the pool.
//!
//! ```rust,ignore
//! let session = factory.acquire().await?;
//! let user = session.users().create(openid, None).await?;
//! session.commit().await?;
//! ```

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use futures::future::BoxFuture;
use sea_orm::{DatabaseConnection, DatabaseTransaction, IsolationLevel, TransactionTrait};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::repositories::{
    InstrumentRepository, RoomRepository, UsageRecordRepository, UserRepository,
};
use super::Database;
use crate::errors::{AppError, AppResult};

/// Hands out sessions bound to the shared pool.
#[derive(Clone)]
pub struct SessionFactory {
    connection: DatabaseConnection,
    isolation_level: Option<IsolationLevel>,
    stats: Arc<SessionStats>,
}

impl SessionFactory {
    pub fn new(database: &Database) -> Self {
        Self {
            connection: database.get_connection(),
            isolation_level: None,
            stats: Arc::new(SessionStats::default()),
        }
    }

    /// Begin every session with this isolation level.
    pub fn with_isolation_level(mut self, level: Option<IsolationLevel>) -> Self {
        self.isolation_level = level;
        self
    }

    /// Open a session.
    ///
    /// Fails with `AppError::ServiceUnavailable` when the pool is exhausted
    /// past its acquire timeout or the database cannot be reached. No retry.
    pub async fn acquire(&self) -> AppResult<Session> {
        let txn = self
            .connection
            .begin_with_config(self.isolation_level, None)
            .await
            .map_err(|e| {
                let err = AppError::from(e);
                tracing::warn!("Failed to open database session: {}", err);
                err
            })?;

        let id = self.stats.opened.fetch_add(1, Ordering::Relaxed) + 1;
        tracing::debug!(session = id, "Database session opened");

        Ok(Session {
            txn,
            guard: ReleaseGuard {
                id,
                stats: self.stats.clone(),
                released: false,
            },
        })
    }

    /// Run `f` inside a session: commit on `Ok`, roll back on `Err`.
    pub async fn scope<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'s> FnOnce(&'s Session) -> BoxFuture<'s, AppResult<T>> + Send,
        T: Send,
    {
        let session = self.acquire().await?;
        let outcome = f(&session).await;

        match outcome {
            Ok(value) => {
                session.commit().await?;
                Ok(value)
            }
            Err(e) => {
                if let Err(rollback_err) = session.rollback().await {
                    tracing::error!("Session rollback failed: {}", rollback_err);
                }
                Err(e)
            }
        }
    }

    /// Lifecycle counters since the factory was created.
    pub fn stats(&self) -> SessionStatsSnapshot {
        self.stats.snapshot()
    }
}

/// One unit of work on one pooled connection.
pub struct Session {
    txn: DatabaseTransaction,
    guard: ReleaseGuard,
}

impl Session {
    /// Sequence number of this session within its factory
    pub fn id(&self) -> u64 {
        self.guard.id
    }

    /// The underlying transaction, for queries not covered by a repository.
    pub fn connection(&self) -> &DatabaseTransaction {
        &self.txn
    }

    pub fn users(&self) -> UserRepository<'_> {
        UserRepository::new(&self.txn)
    }

    pub fn instruments(&self) -> InstrumentRepository<'_> {
        InstrumentRepository::new(&self.txn)
    }

    pub fn rooms(&self) -> RoomRepository<'_> {
        RoomRepository::new(&self.txn)
    }

    pub fn usage_records(&self) -> UsageRecordRepository<'_> {
        UsageRecordRepository::new(&self.txn)
    }

    /// Commit and return the connection to the pool.
    ///
    /// A failed commit leaves the transaction rolled back.
    pub async fn commit(self) -> AppResult<()> {
        let Session { txn, mut guard } = self;
        match txn.commit().await {
            Ok(()) => {
                guard.release(Release::Committed);
                Ok(())
            }
            Err(e) => {
                guard.release(Release::RolledBack);
                Err(AppError::from(e))
            }
        }
    }

    /// Roll back and return the connection to the pool.
    pub async fn rollback(self) -> AppResult<()> {
        let Session { txn, mut guard } = self;
        let result = txn.rollback().await;
        guard.release(Release::RolledBack);
        result.map_err(AppError::from)
    }
}

enum Release {
    Committed,
    RolledBack,
}

/// Records the release of a session exactly once.
///
/// The transaction itself rolls back when dropped; this guard only keeps
/// the books and logs.
struct ReleaseGuard {
    id: u64,
    stats: Arc<SessionStats>,
    released: bool,
}

impl ReleaseGuard {
    fn release(&mut self, how: Release) {
        self.released = true;
        match how {
            Release::Committed => {
                self.stats.committed.fetch_add(1, Ordering::Relaxed);
                tracing::debug!(session = self.id, "Database session committed");
            }
            Release::RolledBack => {
                self.stats.rolled_back.fetch_add(1, Ordering::Relaxed);
                tracing::debug!(session = self.id, "Database session rolled back");
            }
        }
        self.stats.closed.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(session = self.id, "Database session closed");
    }
}

impl Drop for ReleaseGuard {
    fn drop(&mut self) {
        if self.released {
            return;
        }
        self.stats.rolled_back.fetch_add(1, Ordering::Relaxed);
        self.stats.closed.fetch_add(1, Ordering::Relaxed);
        tracing::warn!(
            session = self.id,
            "Database session dropped without commit, rolling back"
        );
    }
}

/// Lifecycle counters shared by every session of one factory.
#[derive(Debug, Default)]
pub struct SessionStats {
    opened: AtomicU64,
    committed: AtomicU64,
    rolled_back: AtomicU64,
    closed: AtomicU64,
}

impl SessionStats {
    fn snapshot(&self) -> SessionStatsSnapshot {
        let closed = self.closed.load(Ordering::Relaxed);
        let committed = self.committed.load(Ordering::Relaxed);
        let rolled_back = self.rolled_back.load(Ordering::Relaxed);
        let opened = self.opened.load(Ordering::Relaxed);

        SessionStatsSnapshot {
            opened,
            committed,
            rolled_back,
            closed,
            active: opened.saturating_sub(closed),
        }
    }
}

/// Point-in-time view of [`SessionStats`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SessionStatsSnapshot {
    pub opened: u64,
    pub committed: u64,
    pub rolled_back: u64,
    pub closed: u64,
    /// Sessions currently holding a connection
    pub active: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guard_release_counts_once() {
        let stats = Arc::new(SessionStats::default());
        stats.opened.fetch_add(1, Ordering::Relaxed);
        {
            let mut guard = ReleaseGuard {
                id: 1,
                stats: stats.clone(),
                released: false,
            };
            guard.release(Release::Committed);
        }

        let snapshot = stats.snapshot();
        assert_eq!(snapshot.committed, 1);
        assert_eq!(snapshot.rolled_back, 0);
        assert_eq!(snapshot.closed, 1);
        assert_eq!(snapshot.active, 0);
    }

    #[test]
    fn test_dropped_guard_counts_as_rollback() {
        let stats = Arc::new(SessionStats::default());
        stats.opened.fetch_add(1, Ordering::Relaxed);
        drop(ReleaseGuard {
            id: 1,
            stats: stats.clone(),
            released: false,
        });

        let snapshot = stats.snapshot();
        assert_eq!(snapshot.rolled_back, 1);
        assert_eq!(snapshot.closed, 1);
        assert_eq!(snapshot.active, 0);
    }
}
