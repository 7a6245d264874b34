//! Schema registry - the single metadata graph every table is created from.
//!
//! Entities are registered explicitly (no global base) and created in
//! registration order, so parents must be registered before the tables
//! holding foreign keys to them.

use sea_orm::sea_query::TableCreateStatement;
use sea_orm::{ConnectionTrait, EntityName, EntityTrait, Schema};

use super::Database;
use crate::errors::{AppError, AppResult};
use crate::infra::repositories::entities::{
    InstrumentEntity, InstrumentUsageRecordEntity, RoomEntity, RoomUsageRecordEntity, UserEntity,
};

type TableBuilder = Box<dyn Fn(&Schema) -> TableCreateStatement + Send + Sync>;

struct RegisteredTable {
    name: String,
    build: TableBuilder,
}

/// Ordered set of entities whose tables make up the schema.
#[derive(Default)]
pub struct SchemaRegistry {
    tables: Vec<RegisteredTable>,
}

impl SchemaRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every table this application owns.
    pub fn with_default_models() -> Self {
        let mut registry = Self::new();
        registry
            .register(UserEntity)
            .register(RoomEntity)
            .register(InstrumentEntity)
            .register(InstrumentUsageRecordEntity)
            .register(RoomUsageRecordEntity);
        registry
    }

    /// Add an entity. A table that is already registered is left as is.
    pub fn register<E>(&mut self, entity: E) -> &mut Self
    where
        E: EntityTrait + EntityName + Send + Sync + 'static,
    {
        let name = entity.table_name().to_owned();
        if self.contains(&name) {
            tracing::debug!(table = %name, "Table already registered");
            return self;
        }

        self.tables.push(RegisteredTable {
            name,
            build: Box::new(move |schema| schema.create_table_from_entity(entity)),
        });
        self
    }

    /// Whether a table with this name is registered.
    pub fn contains(&self, table: &str) -> bool {
        self.tables.iter().any(|t| t.name == table)
    }

    /// Registered table names in creation order.
    pub fn table_names(&self) -> Vec<&str> {
        self.tables.iter().map(|t| t.name.as_str()).collect()
    }

    /// Create every registered table that does not exist yet.
    ///
    /// Idempotent: running it against an initialized database is a no-op.
    pub async fn initialize(&self, db: &Database) -> AppResult<()> {
        let connection = db.connection();
        let backend = connection.get_database_backend();
        let schema = Schema::new(backend);

        for table in &self.tables {
            let mut statement = (table.build)(&schema);
            statement.if_not_exists();

            connection
                .execute(backend.build(&statement))
                .await
                .map_err(|source| AppError::SchemaInit {
                    table: table.name.clone(),
                    source,
                })?;

            tracing::debug!(table = %table.name, "Table ensured");
        }

        tracing::info!(tables = self.tables.len(), "Database schema initialized");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_models_in_dependency_order() {
        let registry = SchemaRegistry::with_default_models();
        assert_eq!(
            registry.table_names(),
            vec![
                "users",
                "rooms",
                "instruments",
                "instrument_usage_records",
                "room_usage_records"
            ]
        );
    }

    #[test]
    fn test_duplicate_registration_ignored() {
        let mut registry = SchemaRegistry::new();
        registry.register(UserEntity).register(UserEntity);
        assert_eq!(registry.table_names(), vec!["users"]);
        assert!(registry.contains("users"));
        assert!(!registry.contains("rooms"));
    }
}
