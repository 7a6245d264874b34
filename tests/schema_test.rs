//! Integration tests for schema initialization.

mod common;

use sea_orm::{ConnectionTrait, DbBackend, Statement};
use seqlab_api::infra::{Database, SchemaRegistry};

use common::TestDb;

async fn table_names(db: &Database) -> Vec<String> {
    let rows = db
        .connection()
        .query_all(Statement::from_string(
            DbBackend::Sqlite,
            "SELECT name FROM sqlite_master WHERE type = 'table' \
             AND name NOT LIKE 'sqlite_%' ORDER BY name",
        ))
        .await
        .unwrap();

    rows.iter()
        .map(|row| row.try_get::<String>("", "name").unwrap())
        .collect()
}

#[tokio::test]
async fn test_initialize_creates_every_table() {
    let test_db = TestDb::new();
    let db = test_db.connect().await;

    assert_eq!(
        table_names(&db).await,
        vec![
            "instrument_usage_records",
            "instruments",
            "room_usage_records",
            "rooms",
            "users",
        ]
    );
}

#[tokio::test]
async fn test_initialize_twice_is_noop() {
    let test_db = TestDb::new();
    let db = test_db.connect().await;

    let registry = SchemaRegistry::with_default_models();
    registry.initialize(&db).await.unwrap();
    registry.initialize(&db).await.unwrap();

    assert_eq!(table_names(&db).await.len(), 5);
}

#[tokio::test]
async fn test_initialize_keeps_existing_rows() {
    let test_db = TestDb::new();
    let (db, factory) = test_db.sessions().await;

    let session = factory.acquire().await.unwrap();
    session.users().create("survivor".to_string(), None).await.unwrap();
    session.commit().await.unwrap();

    SchemaRegistry::with_default_models()
        .initialize(&db)
        .await
        .unwrap();

    let session = factory.acquire().await.unwrap();
    assert_eq!(session.users().count().await.unwrap(), 1);
    session.commit().await.unwrap();
}

#[tokio::test]
async fn test_empty_registry_creates_nothing() {
    let test_db = TestDb::new();
    let db = Database::connect(&test_db.settings).await.unwrap();

    SchemaRegistry::new().initialize(&db).await.unwrap();

    assert!(table_names(&db).await.is_empty());
}
