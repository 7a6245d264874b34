//! Lab room domain entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Lab room that hosts instruments
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Room {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "PCR room")]
    pub room_info: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Room creation data transfer object
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct CreateRoom {
    #[validate(length(max = 255, message = "room_info must be at most 255 characters"))]
    #[schema(example = "PCR room", max_length = 255)]
    pub room_info: Option<String>,
}
