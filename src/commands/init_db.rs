//! Init-db command - creates missing tables.

use crate::config::Config;
use crate::errors::AppResult;
use crate::infra::{Database, SchemaRegistry};

/// Execute the init-db command
pub async fn execute(config: Config) -> AppResult<()> {
    let db = Database::connect(&config.database).await?;
    let registry = SchemaRegistry::with_default_models();

    let result = registry.initialize(&db).await;
    db.close().await?;
    result?;

    tracing::info!("Tables ready: {}", registry.table_names().join(", "));
    Ok(())
}
