//! Application route configuration.

use axum::{extract::State, http::StatusCode, response::Json, routing::get, Router};
use serde::{Deserialize, Serialize};
use tower_http::trace::TraceLayer;
use utoipa::{OpenApi, ToSchema};
use utoipa_swagger_ui::SwaggerUi;

use super::handlers::{instrument_routes, room_routes, usage_record_routes, user_routes};
use super::openapi::ApiDoc;
use super::AppState;
use crate::config::API_PREFIX;
use crate::infra::SessionStatsSnapshot;
use crate::types::MessageResponse;

/// Create the application router with all routes configured
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        // OpenAPI Swagger UI documentation
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .nest(&format!("{}/users", API_PREFIX), user_routes())
        .nest(&format!("{}/instruments", API_PREFIX), instrument_routes())
        .nest(&format!("{}/rooms", API_PREFIX), room_routes())
        .nest(&format!("{}/usage-records", API_PREFIX), usage_record_routes())
        // Global middleware
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Root endpoint
#[utoipa::path(
    get,
    path = "/",
    tag = "Health",
    responses((status = 200, description = "Welcome message", body = MessageResponse))
)]
pub async fn root() -> Json<MessageResponse> {
    Json(MessageResponse::new("Welcome!"))
}

/// Reported in `/health` instead of the driver error
pub const DATABASE_UNREACHABLE: &str = "database unreachable";

/// Health check response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    #[schema(example = "healthy")]
    pub status: String,
    pub database: ServiceStatus,
    pub sessions: SessionStatsSnapshot,
}

/// Individual dependency status
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ServiceStatus {
    #[schema(example = "healthy")]
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Health check endpoint with database connectivity and session counters
#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Database reachable", body = HealthResponse),
        (status = 503, description = "Database unreachable", body = HealthResponse)
    )
)]
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let database = match state.database.ping().await {
        Ok(_) => ServiceStatus {
            status: "healthy".to_string(),
            error: None,
        },
        Err(e) => {
            // Driver errors can carry host and credentials; keep them in the log
            tracing::warn!("Health check failed: {}", e);
            ServiceStatus {
                status: "unhealthy".to_string(),
                error: Some(DATABASE_UNREACHABLE.to_string()),
            }
        }
    };

    let healthy = database.error.is_none();
    let response = HealthResponse {
        status: if healthy { "healthy" } else { "degraded" }.to_string(),
        database,
        sessions: state.sessions.stats(),
    };

    let status_code = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status_code, Json(response))
}
