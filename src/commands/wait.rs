//! Wait-for-db command - blocks until the database answers.

use std::time::Duration;

use crate::cli::args::WaitArgs;
use crate::config::Config;
use crate::errors::AppResult;
use crate::infra::{ConnectProbe, StartupGate};

/// Execute the wait-for-db command
pub async fn execute(args: WaitArgs, config: Config) -> AppResult<()> {
    let interval = args
        .interval
        .map(Duration::from_secs)
        .unwrap_or(config.startup.probe_interval);
    let retries = args.retries.unwrap_or(config.startup.probe_retries);

    let probe = ConnectProbe::new(&config.database);
    let attempts = StartupGate::new(interval, retries).wait(&probe).await?;

    tracing::info!("Database answered after {} probe(s)", attempts);
    Ok(())
}
