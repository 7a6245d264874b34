//! Integration tests for the business rules, run inside real sessions.

mod common;

use serde_json::json;
use seqlab_api::domain::{
    CreateInstrument, CreateRoom, CreateUser, InstrumentFilter, NewInstrumentUsageRecord,
    NewRoomUsageRecord, UpdateInstrument,
};
use seqlab_api::errors::AppError;
use seqlab_api::services::{
    InstrumentManager, InstrumentService, RoomManager, RoomService, UsageRecordManager,
    UsageRecordService, UserManager, UserService,
};
use seqlab_api::types::PaginationParams;

use common::TestDb;

fn instrument(code: &str, serial: &str) -> CreateInstrument {
    CreateInstrument {
        code: code.to_string(),
        name: "Gene sequencer".to_string(),
        brand: "MGI".to_string(),
        specifications_and_model: "DNBSEQ-G99".to_string(),
        serial_number: serial.to_string(),
        manufacturer: "MGI Tech".to_string(),
        room_id: None,
        owner_id: None,
        usage_type: Some("sequencing".to_string()),
        remark: None,
    }
}

fn register(openid: &str) -> CreateUser {
    CreateUser {
        openid: openid.to_string(),
        real_name: None,
    }
}

// =============================================================================
// Users
// =============================================================================

#[tokio::test]
async fn test_register_rejects_duplicate_openid() {
    let test_db = TestDb::new();
    let (_db, factory) = test_db.sessions().await;
    let users = UserManager::new();

    let session = factory.acquire().await.unwrap();
    users.register(&session, register("dup")).await.unwrap();
    session.commit().await.unwrap();

    let session = factory.acquire().await.unwrap();
    let err = users.register(&session, register(" dup ")).await.unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
}

#[tokio::test]
async fn test_find_or_create_is_stable() {
    let test_db = TestDb::new();
    let (_db, factory) = test_db.sessions().await;
    let users = UserManager::new();

    let session = factory.acquire().await.unwrap();
    let (first, created) = users.find_or_create(&session, "wx-123").await.unwrap();
    assert!(created);
    let (second, created) = users.find_or_create(&session, "wx-123").await.unwrap();
    assert!(!created);
    assert_eq!(first.id, second.id);
    session.commit().await.unwrap();
}

#[tokio::test]
async fn test_update_real_name_of_missing_user() {
    let test_db = TestDb::new();
    let (_db, factory) = test_db.sessions().await;
    let users = UserManager::new();

    let session = factory.acquire().await.unwrap();
    let err = users
        .update_real_name(&session, 404, "Niu Bo")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound));
}

#[tokio::test]
async fn test_deleting_user_releases_instruments() {
    let test_db = TestDb::new();
    let (_db, factory) = test_db.sessions().await;
    let users = UserManager::new();
    let instruments = InstrumentManager::new();

    let session = factory.acquire().await.unwrap();
    let owner = users.register(&session, register("owner")).await.unwrap();
    let mut input = instrument("SEQ-001", "SN0001");
    input.owner_id = Some(owner.id);
    let created = instruments.create(&session, input).await.unwrap();
    assert_eq!(
        users.owned_instruments(&session, owner.id).await.unwrap().len(),
        1
    );
    session.commit().await.unwrap();

    let session = factory.acquire().await.unwrap();
    users.delete_user(&session, owner.id).await.unwrap();
    let orphan = instruments.get(&session, created.id).await.unwrap();
    assert_eq!(orphan.owner_id, None);
    session.commit().await.unwrap();
}

// =============================================================================
// Instruments
// =============================================================================

#[tokio::test]
async fn test_instrument_code_is_unique() {
    let test_db = TestDb::new();
    let (_db, factory) = test_db.sessions().await;
    let instruments = InstrumentManager::new();

    let session = factory.acquire().await.unwrap();
    instruments
        .create(&session, instrument("SEQ-001", "SN0001"))
        .await
        .unwrap();
    let err = instruments
        .create(&session, instrument("SEQ-001", "SN0002"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
}

#[tokio::test]
async fn test_duplicate_serial_hits_unique_constraint() {
    let test_db = TestDb::new();
    let (_db, factory) = test_db.sessions().await;
    let instruments = InstrumentManager::new();

    let first = factory
        .scope(|s| {
            Box::pin(async move {
                InstrumentManager::new()
                    .create(s, instrument("SEQ-001", "SN0001"))
                    .await
            })
        })
        .await
        .unwrap();
    assert_eq!(first.serial_number, "SN0001");

    let session = factory.acquire().await.unwrap();
    let err = instruments
        .create(&session, instrument("SEQ-002", "SN0001"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
}

#[tokio::test]
async fn test_room_holds_one_instrument() {
    let test_db = TestDb::new();
    let (_db, factory) = test_db.sessions().await;
    let instruments = InstrumentManager::new();
    let rooms = RoomManager::new();

    let session = factory.acquire().await.unwrap();
    let room = rooms
        .create(
            &session,
            CreateRoom {
                room_info: Some("PCR room".to_string()),
            },
        )
        .await
        .unwrap();

    let mut first = instrument("SEQ-001", "SN0001");
    first.room_id = Some(room.id);
    let placed = instruments.create(&session, first).await.unwrap();

    let mut second = instrument("SEQ-002", "SN0002");
    second.room_id = Some(room.id);
    let err = instruments.create(&session, second).await.unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));

    // Moving an instrument into the room it already occupies is fine
    let same_room = UpdateInstrument {
        room_id: Some(room.id),
        remark: Some("calibrated".to_string()),
        ..Default::default()
    };
    let updated = instruments
        .update(&session, placed.id, same_room)
        .await
        .unwrap();
    assert_eq!(updated.remark.as_deref(), Some("calibrated"));
}

#[tokio::test]
async fn test_unknown_references_are_validation_errors() {
    let test_db = TestDb::new();
    let (_db, factory) = test_db.sessions().await;
    let instruments = InstrumentManager::new();

    let session = factory.acquire().await.unwrap();
    let mut input = instrument("SEQ-001", "SN0001");
    input.owner_id = Some(99);
    let err = instruments.create(&session, input).await.unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    let mut input = instrument("SEQ-001", "SN0001");
    input.room_id = Some(99);
    let err = instruments.create(&session, input).await.unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn test_owner_assignment_and_filter() {
    let test_db = TestDb::new();
    let (_db, factory) = test_db.sessions().await;
    let users = UserManager::new();
    let instruments = InstrumentManager::new();

    let session = factory.acquire().await.unwrap();
    let owner = users.register(&session, register("owner")).await.unwrap();
    let a = instruments
        .create(&session, instrument("SEQ-001", "SN0001"))
        .await
        .unwrap();
    instruments
        .create(&session, instrument("SEQ-002", "SN0002"))
        .await
        .unwrap();

    let assigned = instruments
        .assign_owner(&session, a.id, owner.id)
        .await
        .unwrap();
    assert_eq!(assigned.owner_id, Some(owner.id));

    let page = PaginationParams::default();
    let owned = instruments
        .list(
            &session,
            &InstrumentFilter {
                owner_id: Some(owner.id),
            },
            &page,
        )
        .await
        .unwrap();
    assert_eq!(owned.meta.total, 1);
    assert_eq!(owned.data[0].code, "SEQ-001");

    let all = instruments
        .list(&session, &InstrumentFilter::default(), &page)
        .await
        .unwrap();
    assert_eq!(all.meta.total, 2);

    let cleared = instruments.clear_owner(&session, a.id).await.unwrap();
    assert_eq!(cleared.owner_id, None);

    let err = instruments.assign_owner(&session, 404, owner.id).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound));
}

#[tokio::test]
async fn test_empty_update_is_rejected() {
    let test_db = TestDb::new();
    let (_db, factory) = test_db.sessions().await;
    let instruments = InstrumentManager::new();

    let session = factory.acquire().await.unwrap();
    let err = instruments
        .update(&session, 1, UpdateInstrument::default())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

// =============================================================================
// Usage records
// =============================================================================

#[tokio::test]
async fn test_instrument_record_requires_known_code() {
    let test_db = TestDb::new();
    let (_db, factory) = test_db.sessions().await;
    let records = UsageRecordManager::new();

    let session = factory.acquire().await.unwrap();
    let input = NewInstrumentUsageRecord {
        instrument_code: "SEQ-404".to_string(),
        instrument: "sequencing".to_string(),
        instrument_status: "normal".to_string(),
        operator_name: "Niu Bo".to_string(),
        details: json!({}),
    };
    let err = records
        .submit_instrument_record(&session, input)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn test_records_listed_newest_first() {
    let test_db = TestDb::new();
    let (_db, factory) = test_db.sessions().await;
    let records = UsageRecordManager::new();

    let session = factory.acquire().await.unwrap();
    InstrumentManager::new()
        .create(&session, instrument("SEQ-001", "SN0001"))
        .await
        .unwrap();

    for status in ["normal", "maintenance"] {
        records
            .submit_instrument_record(
                &session,
                NewInstrumentUsageRecord {
                    instrument_code: "SEQ-001".to_string(),
                    instrument: "sequencing".to_string(),
                    instrument_status: status.to_string(),
                    operator_name: "Niu Bo".to_string(),
                    details: json!({ "run": status }),
                },
            )
            .await
            .unwrap();
    }

    let page = records
        .list_instrument_records(&session, &PaginationParams::default())
        .await
        .unwrap();
    assert_eq!(page.meta.total, 2);
    assert_eq!(page.data[0].instrument_status, "maintenance");
    assert_eq!(page.data[0].details, json!({ "run": "maintenance" }));
}

#[tokio::test]
async fn test_room_record_requires_room_and_operator() {
    let test_db = TestDb::new();
    let (_db, factory) = test_db.sessions().await;
    let records = UsageRecordManager::new();

    let session = factory.acquire().await.unwrap();
    let operator = UserManager::new()
        .register(&session, register("operator"))
        .await
        .unwrap();
    let room = RoomManager::new()
        .create(&session, CreateRoom::default())
        .await
        .unwrap();

    let record = |room_id, operator_id| NewRoomUsageRecord {
        room_id,
        operator_id,
        room_status: "enter".to_string(),
        operation_type: "daily".to_string(),
        details: json!({}),
    };

    let err = records
        .submit_room_record(&session, record(room.id + 1, operator.id))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    let err = records
        .submit_room_record(&session, record(room.id, operator.id + 1))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    let stored = records
        .submit_room_record(&session, record(room.id, operator.id))
        .await
        .unwrap();
    assert_eq!(stored.room_status, "enter");
}
