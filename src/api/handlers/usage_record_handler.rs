//! Usage record handlers.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::domain::{
    InstrumentUsageRecord, NewInstrumentUsageRecord, NewRoomUsageRecord, RoomUsageRecord,
};
use crate::errors::AppResult;
use crate::infra::Session;
use crate::types::{Paginated, PaginationParams};

pub fn usage_record_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/instruments",
            get(list_instrument_records).post(submit_instrument_record),
        )
        .route("/rooms", get(list_room_records).post(submit_room_record))
}

/// Submit an instrument usage record
#[utoipa::path(
    post,
    path = "/api/v1/usage-records/instruments",
    tag = "Usage records",
    request_body = NewInstrumentUsageRecord,
    responses(
        (status = 201, description = "Record stored", body = InstrumentUsageRecord),
        (status = 400, description = "Invalid input or unknown instrument")
    )
)]
pub async fn submit_instrument_record(
    State(state): State<AppState>,
    session: Session,
    ValidatedJson(payload): ValidatedJson<NewInstrumentUsageRecord>,
) -> AppResult<(StatusCode, Json<InstrumentUsageRecord>)> {
    let record = state
        .services
        .usage_records()
        .submit_instrument_record(&session, payload)
        .await?;
    session.commit().await?;

    Ok((StatusCode::CREATED, Json(record)))
}

/// List instrument usage records, newest first
#[utoipa::path(
    get,
    path = "/api/v1/usage-records/instruments",
    tag = "Usage records",
    params(PaginationParams),
    responses(
        (status = 200, description = "Page of records", body = crate::types::PaginatedInstrumentUsageRecords)
    )
)]
pub async fn list_instrument_records(
    State(state): State<AppState>,
    session: Session,
    Query(page): Query<PaginationParams>,
) -> AppResult<Json<Paginated<InstrumentUsageRecord>>> {
    let records = state
        .services
        .usage_records()
        .list_instrument_records(&session, &page)
        .await?;
    session.commit().await?;

    Ok(Json(records))
}

/// Submit a room usage record
#[utoipa::path(
    post,
    path = "/api/v1/usage-records/rooms",
    tag = "Usage records",
    request_body = NewRoomUsageRecord,
    responses(
        (status = 201, description = "Record stored", body = RoomUsageRecord),
        (status = 400, description = "Invalid input, unknown room or operator")
    )
)]
pub async fn submit_room_record(
    State(state): State<AppState>,
    session: Session,
    ValidatedJson(payload): ValidatedJson<NewRoomUsageRecord>,
) -> AppResult<(StatusCode, Json<RoomUsageRecord>)> {
    let record = state
        .services
        .usage_records()
        .submit_room_record(&session, payload)
        .await?;
    session.commit().await?;

    Ok((StatusCode::CREATED, Json(record)))
}

/// List room usage records, newest first
#[utoipa::path(
    get,
    path = "/api/v1/usage-records/rooms",
    tag = "Usage records",
    params(PaginationParams),
    responses(
        (status = 200, description = "Page of records", body = crate::types::PaginatedRoomUsageRecords)
    )
)]
pub async fn list_room_records(
    State(state): State<AppState>,
    session: Session,
    Query(page): Query<PaginationParams>,
) -> AppResult<Json<Paginated<RoomUsageRecord>>> {
    let records = state
        .services
        .usage_records()
        .list_room_records(&session, &page)
        .await?;
    session.commit().await?;

    Ok(Json(records))
}
