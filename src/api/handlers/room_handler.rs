//! Room handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::domain::{CreateRoom, Room};
use crate::errors::AppResult;
use crate::infra::Session;
use crate::types::{Paginated, PaginationParams};

pub fn room_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_rooms).post(create_room))
        .route("/:id", get(get_room))
}

/// Create a room
#[utoipa::path(
    post,
    path = "/api/v1/rooms",
    tag = "Rooms",
    request_body = CreateRoom,
    responses((status = 201, description = "Room created", body = Room))
)]
pub async fn create_room(
    State(state): State<AppState>,
    session: Session,
    ValidatedJson(payload): ValidatedJson<CreateRoom>,
) -> AppResult<(StatusCode, Json<Room>)> {
    let room = state.services.rooms().create(&session, payload).await?;
    session.commit().await?;

    Ok((StatusCode::CREATED, Json(room)))
}

/// List rooms
#[utoipa::path(
    get,
    path = "/api/v1/rooms",
    tag = "Rooms",
    params(PaginationParams),
    responses((status = 200, description = "Page of rooms", body = crate::types::PaginatedRooms))
)]
pub async fn list_rooms(
    State(state): State<AppState>,
    session: Session,
    Query(page): Query<PaginationParams>,
) -> AppResult<Json<Paginated<Room>>> {
    let rooms = state.services.rooms().list(&session, &page).await?;
    session.commit().await?;

    Ok(Json(rooms))
}

/// Get room by ID
#[utoipa::path(
    get,
    path = "/api/v1/rooms/{id}",
    tag = "Rooms",
    params(("id" = i32, Path, description = "Room ID")),
    responses(
        (status = 200, description = "Room found", body = Room),
        (status = 404, description = "Room not found")
    )
)]
pub async fn get_room(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> AppResult<Json<Room>> {
    let room = state.services.rooms().get(&session, id).await?;
    session.commit().await?;

    Ok(Json(room))
}
