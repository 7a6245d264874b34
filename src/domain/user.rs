//! User domain entity and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::validation::not_blank;

/// User domain entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i32,
    pub openid: String,
    pub real_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Check if the user has filled in a real name
    pub fn has_real_name(&self) -> bool {
        self.real_name.as_deref().is_some_and(|n| !n.is_empty())
    }
}

/// User creation data transfer object
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateUser {
    /// External identity from the login provider
    #[validate(
        length(max = 255, message = "openid must be at most 255 characters"),
        custom(function = "not_blank", message = "openid must not be blank")
    )]
    #[schema(example = "o6_bmjrPTlm6_2sgVt7hMZOPfL2M", max_length = 255)]
    pub openid: String,
    /// Optional real name
    #[validate(
        length(max = 100, message = "real_name must be at most 100 characters"),
        custom(function = "not_blank", message = "real_name must not be blank")
    )]
    #[schema(example = "Niu Bo", max_length = 100)]
    pub real_name: Option<String>,
}

/// Find-or-create request keyed by external identity
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct OpenIdLogin {
    #[validate(
        length(max = 255, message = "openid must be at most 255 characters"),
        custom(function = "not_blank", message = "openid must not be blank")
    )]
    #[schema(example = "o6_bmjrPTlm6_2sgVt7hMZOPfL2M", max_length = 255)]
    pub openid: String,
}

/// Real name update data transfer object
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateUserName {
    #[validate(
        length(max = 100, message = "real_name must be at most 100 characters"),
        custom(function = "not_blank", message = "real_name must not be blank")
    )]
    #[schema(example = "Niu Bo", max_length = 100)]
    pub real_name: String,
}

/// User response (safe to return to client)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "o6_bmjrPTlm6_2sgVt7hMZOPfL2M")]
    pub openid: String,
    #[schema(example = "Niu Bo")]
    pub real_name: Option<String>,
    /// Account creation timestamp
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            openid: user.openid,
            real_name: user.real_name,
            created_at: user.created_at,
        }
    }
}
