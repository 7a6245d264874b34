//! Probe command - a single liveness check for container health checks.

use crate::config::Config;
use crate::errors::AppResult;
use crate::infra::{ConnectProbe, HealthProbe};

/// Execute the probe command
pub async fn execute(config: Config) -> AppResult<()> {
    ConnectProbe::new(&config.database).probe().await?;
    tracing::info!("Database is reachable");
    Ok(())
}
