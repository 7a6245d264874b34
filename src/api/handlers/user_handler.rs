//! User handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::domain::{CreateUser, Instrument, OpenIdLogin, UpdateUserName, UserResponse};
use crate::errors::AppResult;
use crate::infra::Session;
use crate::types::{NoContent, Paginated, PaginationParams};

/// Result of a find-or-create login
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    pub user: UserResponse,
    /// True when this login created the user
    pub created: bool,
}

/// Create user routes
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_user).get(list_users))
        .route("/login", post(login))
        .route("/openid/:openid", get(get_user_by_openid))
        .route("/:id", get(get_user).patch(update_user).delete(delete_user))
        .route("/:id/instruments", get(list_user_instruments))
}

/// Register a new user
#[utoipa::path(
    post,
    path = "/api/v1/users",
    tag = "Users",
    request_body = CreateUser,
    responses(
        (status = 201, description = "User registered", body = UserResponse),
        (status = 400, description = "Invalid input"),
        (status = 409, description = "openid already registered"),
        (status = 503, description = "Database unavailable")
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    session: Session,
    ValidatedJson(payload): ValidatedJson<CreateUser>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    let user = state.services.users().register(&session, payload).await?;
    session.commit().await?;

    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

/// Find a user by openid, creating it on first login
#[utoipa::path(
    post,
    path = "/api/v1/users/login",
    tag = "Users",
    request_body = OpenIdLogin,
    responses(
        (status = 200, description = "Existing user", body = LoginResponse),
        (status = 201, description = "User created", body = LoginResponse),
        (status = 400, description = "Invalid input")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    ValidatedJson(payload): ValidatedJson<OpenIdLogin>,
) -> AppResult<(StatusCode, Json<LoginResponse>)> {
    let (user, created) = state
        .services
        .users()
        .find_or_create(&session, &payload.openid)
        .await?;
    session.commit().await?;

    let status = if created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((
        status,
        Json(LoginResponse {
            user: UserResponse::from(user),
            created,
        }),
    ))
}

/// List users
#[utoipa::path(
    get,
    path = "/api/v1/users",
    tag = "Users",
    params(PaginationParams),
    responses(
        (status = 200, description = "Page of users", body = crate::types::PaginatedUsers)
    )
)]
pub async fn list_users(
    State(state): State<AppState>,
    session: Session,
    Query(page): Query<PaginationParams>,
) -> AppResult<Json<Paginated<UserResponse>>> {
    let users = state.services.users().list_users(&session, &page).await?;
    session.commit().await?;

    Ok(Json(users.map(UserResponse::from)))
}

/// Get user by ID
#[utoipa::path(
    get,
    path = "/api/v1/users/{id}",
    tag = "Users",
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "User found", body = UserResponse),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> AppResult<Json<UserResponse>> {
    let user = state.services.users().get_user(&session, id).await?;
    session.commit().await?;

    Ok(Json(UserResponse::from(user)))
}

/// Get user by openid
#[utoipa::path(
    get,
    path = "/api/v1/users/openid/{openid}",
    tag = "Users",
    params(("openid" = String, Path, description = "External identity")),
    responses(
        (status = 200, description = "User found", body = UserResponse),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user_by_openid(
    State(state): State<AppState>,
    session: Session,
    Path(openid): Path<String>,
) -> AppResult<Json<UserResponse>> {
    let user = state
        .services
        .users()
        .get_user_by_openid(&session, &openid)
        .await?;
    session.commit().await?;

    Ok(Json(UserResponse::from(user)))
}

/// Update the user's real name
#[utoipa::path(
    patch,
    path = "/api/v1/users/{id}",
    tag = "Users",
    params(("id" = i32, Path, description = "User ID")),
    request_body = UpdateUserName,
    responses(
        (status = 200, description = "User updated", body = UserResponse),
        (status = 400, description = "Invalid name"),
        (status = 404, description = "User not found")
    )
)]
pub async fn update_user(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<UpdateUserName>,
) -> AppResult<Json<UserResponse>> {
    let user = state
        .services
        .users()
        .update_real_name(&session, id, &payload.real_name)
        .await?;
    session.commit().await?;

    Ok(Json(UserResponse::from(user)))
}

/// Delete a user
#[utoipa::path(
    delete,
    path = "/api/v1/users/{id}",
    tag = "Users",
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 204, description = "User deleted"),
        (status = 404, description = "User not found")
    )
)]
pub async fn delete_user(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> AppResult<NoContent> {
    state.services.users().delete_user(&session, id).await?;
    session.commit().await?;

    Ok(NoContent)
}

/// List instruments owned by a user
#[utoipa::path(
    get,
    path = "/api/v1/users/{id}/instruments",
    tag = "Users",
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "Owned instruments", body = [Instrument]),
        (status = 404, description = "User not found")
    )
)]
pub async fn list_user_instruments(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> AppResult<Json<Vec<Instrument>>> {
    let instruments = state
        .services
        .users()
        .owned_instruments(&session, id)
        .await?;
    session.commit().await?;

    Ok(Json(instruments))
}
