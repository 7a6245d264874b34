//! Database liveness probing and the startup gate.
//!
//! The gate polls a [`HealthProbe`] at a fixed interval and only lets
//! startup continue once a probe passes. When more probes fail than the
//! retry budget allows, the database is declared down and startup aborts.

use std::time::Duration;

use async_trait::async_trait;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

use super::Database;
use crate::config::{DatabaseSettings, StartupSettings};
use crate::errors::{AppError, AppResult};

/// One lightweight liveness check.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait HealthProbe: Send + Sync {
    async fn probe(&self) -> AppResult<()>;
}

/// Opens a throwaway single-connection pool and runs `SELECT 1`.
pub struct ConnectProbe {
    settings: DatabaseSettings,
}

impl ConnectProbe {
    pub fn new(settings: &DatabaseSettings) -> Self {
        let mut settings = settings.clone();
        settings.max_connections = 1;
        settings.min_connections = 0;
        settings.connect_lazy = false;
        settings.sqlx_logging = false;
        Self { settings }
    }
}

#[async_trait]
impl HealthProbe for ConnectProbe {
    async fn probe(&self) -> AppResult<()> {
        let db = Database::connect(&self.settings).await?;
        let result = db.ping().await.map_err(AppError::from);
        if let Err(e) = db.close().await {
            tracing::debug!("Closing probe connection failed: {}", e);
        }
        result
    }
}

/// Blocks startup until the database answers.
#[derive(Debug, Clone)]
pub struct StartupGate {
    interval: Duration,
    retries: u32,
}

impl StartupGate {
    /// `retries` is the number of failed probes tolerated.
    pub fn new(interval: Duration, retries: u32) -> Self {
        Self { interval, retries }
    }

    pub fn from_settings(settings: &StartupSettings) -> Self {
        Self::new(settings.probe_interval, settings.probe_retries)
    }

    /// Poll until a probe passes. Returns the number of probes issued.
    ///
    /// With `retries = 10`, ten failures followed by a success pass on the
    /// eleventh probe; an eleventh failure gives up.
    pub async fn wait(&self, probe: &dyn HealthProbe) -> AppResult<u32> {
        let mut attempt: u32 = 0;
        loop {
            attempt += 1;
            match probe.probe().await {
                Ok(()) => {
                    tracing::info!(attempt, "Database is ready");
                    return Ok(attempt);
                }
                Err(e) if attempt > self.retries => {
                    tracing::error!(attempt, "Database still unavailable, giving up: {}", e);
                    return Err(AppError::unavailable(format!(
                        "database not ready after {} probes",
                        attempt
                    )));
                }
                Err(e) => {
                    tracing::warn!(
                        attempt,
                        retries = self.retries,
                        "Database not ready yet: {}",
                        e
                    );
                    tokio::time::sleep(self.interval).await;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    fn failing_then_ok(failures: u32, calls: Arc<AtomicU32>) -> MockHealthProbe {
        let mut probe = MockHealthProbe::new();
        probe.expect_probe().returning(move || {
            let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
            if n <= failures {
                Err(AppError::unavailable("connection refused"))
            } else {
                Ok(())
            }
        });
        probe
    }

    #[tokio::test]
    async fn test_ready_on_first_probe() {
        let mut probe = MockHealthProbe::new();
        probe.expect_probe().times(1).returning(|| Ok(()));

        let gate = StartupGate::new(Duration::from_millis(1), 10);
        assert_eq!(gate.wait(&probe).await.unwrap(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_ten_failures_then_success_passes_on_eleventh() {
        let calls = Arc::new(AtomicU32::new(0));
        let probe = failing_then_ok(10, calls.clone());

        let gate = StartupGate::new(Duration::from_secs(2), 10);
        let attempts = gate.wait(&probe).await.unwrap();

        assert_eq!(attempts, 11);
        assert_eq!(calls.load(Ordering::SeqCst), 11);
    }

    #[tokio::test(start_paused = true)]
    async fn test_gives_up_after_retry_budget() {
        let calls = Arc::new(AtomicU32::new(0));
        let probe = failing_then_ok(u32::MAX, calls.clone());

        let gate = StartupGate::new(Duration::from_secs(2), 10);
        let result = gate.wait(&probe).await;

        assert!(matches!(result, Err(AppError::ServiceUnavailable(_))));
        assert_eq!(calls.load(Ordering::SeqCst), 11);
    }

    #[tokio::test(start_paused = true)]
    async fn test_nothing_proceeds_before_gate_opens() {
        let calls = Arc::new(AtomicU32::new(0));
        let probe = failing_then_ok(10, calls.clone());
        let gate = StartupGate::new(Duration::from_secs(2), 10);

        let started = Arc::new(AtomicU32::new(0));
        let observed = started.clone();
        let probes_seen = calls.clone();

        let serving = async {
            gate.wait(&probe).await?;
            // Record how many probes had run when serving would begin
            observed.store(probes_seen.load(Ordering::SeqCst), Ordering::SeqCst);
            Ok::<_, AppError>(())
        };
        serving.await.unwrap();

        assert_eq!(started.load(Ordering::SeqCst), 11);
    }
}
