//! User service - registration, lookup and profile updates.

use async_trait::async_trait;

use crate::domain::{CreateUser, Instrument, User};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::Session;
use crate::types::{Paginated, PaginationParams};

/// User service trait for dependency injection.
///
/// Every operation runs inside the caller's session; committing is the
/// caller's job.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Create a user; the openid must not be taken
    async fn register(&self, session: &Session, input: CreateUser) -> AppResult<User>;

    /// Find the user with this openid, creating it on first sight.
    /// The flag is true when the user was created.
    async fn find_or_create(&self, session: &Session, openid: &str) -> AppResult<(User, bool)>;

    async fn get_user(&self, session: &Session, id: i32) -> AppResult<User>;

    async fn get_user_by_openid(&self, session: &Session, openid: &str) -> AppResult<User>;

    async fn list_users(
        &self,
        session: &Session,
        page: &PaginationParams,
    ) -> AppResult<Paginated<User>>;

    async fn update_real_name(&self, session: &Session, id: i32, real_name: &str)
        -> AppResult<User>;

    /// Hard delete; owned instruments lose their owner
    async fn delete_user(&self, session: &Session, id: i32) -> AppResult<()>;

    /// Instruments owned by an existing user
    async fn owned_instruments(&self, session: &Session, id: i32) -> AppResult<Vec<Instrument>>;
}

/// Concrete implementation of UserService.
#[derive(Debug, Default, Clone, Copy)]
pub struct UserManager;

impl UserManager {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl UserService for UserManager {
    async fn register(&self, session: &Session, input: CreateUser) -> AppResult<User> {
        let openid = input.openid.trim().to_string();
        let real_name = input.real_name.map(|name| name.trim().to_string());

        let users = session.users();
        if users.find_by_openid(&openid).await?.is_some() {
            return Err(AppError::conflict("User"));
        }

        let user = users.create(openid, real_name).await?;
        tracing::info!(user_id = user.id, "User registered");
        Ok(user)
    }

    async fn find_or_create(&self, session: &Session, openid: &str) -> AppResult<(User, bool)> {
        let openid = openid.trim().to_string();
        let users = session.users();

        if let Some(user) = users.find_by_openid(&openid).await? {
            return Ok((user, false));
        }

        let user = users.create(openid, None).await?;
        tracing::info!(user_id = user.id, "User created on first login");
        Ok((user, true))
    }

    async fn get_user(&self, session: &Session, id: i32) -> AppResult<User> {
        session.users().find_by_id(id).await?.ok_or_not_found()
    }

    async fn get_user_by_openid(&self, session: &Session, openid: &str) -> AppResult<User> {
        session
            .users()
            .find_by_openid(openid.trim())
            .await?
            .ok_or_not_found()
    }

    async fn list_users(
        &self,
        session: &Session,
        page: &PaginationParams,
    ) -> AppResult<Paginated<User>> {
        let (users, total) = session.users().list(page).await?;
        Ok(Paginated::from_params(users, page, total))
    }

    async fn update_real_name(
        &self,
        session: &Session,
        id: i32,
        real_name: &str,
    ) -> AppResult<User> {
        session
            .users()
            .update_real_name(id, real_name.trim().to_string())
            .await
    }

    async fn delete_user(&self, session: &Session, id: i32) -> AppResult<()> {
        if session.users().delete(id).await? {
            tracing::info!(user_id = id, "User deleted");
            Ok(())
        } else {
            Err(AppError::NotFound)
        }
    }

    async fn owned_instruments(&self, session: &Session, id: i32) -> AppResult<Vec<Instrument>> {
        session.users().find_by_id(id).await?.ok_or_not_found()?;
        session.instruments().list_by_owner(id).await
    }
}
