//! Instrument handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::{get, put},
    Router,
};

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::domain::{AssignOwner, CreateInstrument, Instrument, InstrumentFilter, UpdateInstrument};
use crate::errors::AppResult;
use crate::infra::Session;
use crate::types::{NoContent, Paginated, PaginationParams};

/// Create instrument routes
pub fn instrument_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_instruments).post(create_instrument))
        .route(
            "/:id",
            get(get_instrument)
                .patch(update_instrument)
                .delete(delete_instrument),
        )
        .route("/:id/owner", put(assign_owner).delete(clear_owner))
}

/// Register an instrument
#[utoipa::path(
    post,
    path = "/api/v1/instruments",
    tag = "Instruments",
    request_body = CreateInstrument,
    responses(
        (status = 201, description = "Instrument created", body = Instrument),
        (status = 400, description = "Invalid input or unknown owner/room"),
        (status = 409, description = "Code, serial number or room already taken")
    )
)]
pub async fn create_instrument(
    State(state): State<AppState>,
    session: Session,
    ValidatedJson(payload): ValidatedJson<CreateInstrument>,
) -> AppResult<(StatusCode, Json<Instrument>)> {
    let instrument = state.services.instruments().create(&session, payload).await?;
    session.commit().await?;

    Ok((StatusCode::CREATED, Json(instrument)))
}

/// List instruments, optionally by owner
#[utoipa::path(
    get,
    path = "/api/v1/instruments",
    tag = "Instruments",
    params(
        PaginationParams,
        ("owner_id" = Option<i32>, Query, description = "Only instruments owned by this user")
    ),
    responses(
        (status = 200, description = "Page of instruments", body = crate::types::PaginatedInstruments)
    )
)]
pub async fn list_instruments(
    State(state): State<AppState>,
    session: Session,
    Query(filter): Query<InstrumentFilter>,
    Query(page): Query<PaginationParams>,
) -> AppResult<Json<Paginated<Instrument>>> {
    let instruments = state
        .services
        .instruments()
        .list(&session, &filter, &page)
        .await?;
    session.commit().await?;

    Ok(Json(instruments))
}

/// Get instrument by ID
#[utoipa::path(
    get,
    path = "/api/v1/instruments/{id}",
    tag = "Instruments",
    params(("id" = i32, Path, description = "Instrument ID")),
    responses(
        (status = 200, description = "Instrument found", body = Instrument),
        (status = 404, description = "Instrument not found")
    )
)]
pub async fn get_instrument(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> AppResult<Json<Instrument>> {
    let instrument = state.services.instruments().get(&session, id).await?;
    session.commit().await?;

    Ok(Json(instrument))
}

/// Update instrument details
#[utoipa::path(
    patch,
    path = "/api/v1/instruments/{id}",
    tag = "Instruments",
    params(("id" = i32, Path, description = "Instrument ID")),
    request_body = UpdateInstrument,
    responses(
        (status = 200, description = "Instrument updated", body = Instrument),
        (status = 400, description = "Nothing to update or unknown room"),
        (status = 404, description = "Instrument not found"),
        (status = 409, description = "Room already taken")
    )
)]
pub async fn update_instrument(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<UpdateInstrument>,
) -> AppResult<Json<Instrument>> {
    let instrument = state
        .services
        .instruments()
        .update(&session, id, payload)
        .await?;
    session.commit().await?;

    Ok(Json(instrument))
}

/// Delete an instrument
#[utoipa::path(
    delete,
    path = "/api/v1/instruments/{id}",
    tag = "Instruments",
    params(("id" = i32, Path, description = "Instrument ID")),
    responses(
        (status = 204, description = "Instrument deleted"),
        (status = 404, description = "Instrument not found")
    )
)]
pub async fn delete_instrument(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> AppResult<NoContent> {
    state.services.instruments().delete(&session, id).await?;
    session.commit().await?;

    Ok(NoContent)
}

/// Assign an owner
#[utoipa::path(
    put,
    path = "/api/v1/instruments/{id}/owner",
    tag = "Instruments",
    params(("id" = i32, Path, description = "Instrument ID")),
    request_body = AssignOwner,
    responses(
        (status = 200, description = "Owner assigned", body = Instrument),
        (status = 400, description = "Unknown user"),
        (status = 404, description = "Instrument not found")
    )
)]
pub async fn assign_owner(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<AssignOwner>,
) -> AppResult<Json<Instrument>> {
    let instrument = state
        .services
        .instruments()
        .assign_owner(&session, id, payload.user_id)
        .await?;
    session.commit().await?;

    Ok(Json(instrument))
}

/// Remove the owner
#[utoipa::path(
    delete,
    path = "/api/v1/instruments/{id}/owner",
    tag = "Instruments",
    params(("id" = i32, Path, description = "Instrument ID")),
    responses(
        (status = 200, description = "Owner cleared", body = Instrument),
        (status = 404, description = "Instrument not found")
    )
)]
pub async fn clear_owner(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> AppResult<Json<Instrument>> {
    let instrument = state.services.instruments().clear_owner(&session, id).await?;
    session.commit().await?;

    Ok(Json(instrument))
}
