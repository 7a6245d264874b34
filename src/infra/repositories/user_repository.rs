//! Session-bound user repository.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseTransaction, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};

use super::entities::user::{self, ActiveModel, Entity as UserEntity};
use crate::domain::User;
use crate::errors::{AppError, AppResult};
use crate::types::PaginationParams;

/// User data access within one session.
pub struct UserRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> UserRepository<'a> {
    pub(crate) fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }

    /// Find user by ID
    pub async fn find_by_id(&self, id: i32) -> AppResult<Option<User>> {
        let result = UserEntity::find_by_id(id).one(self.txn).await?;
        Ok(result.map(User::from))
    }

    /// Find user by external identity
    pub async fn find_by_openid(&self, openid: &str) -> AppResult<Option<User>> {
        let result = UserEntity::find()
            .filter(user::Column::Openid.eq(openid))
            .one(self.txn)
            .await?;
        Ok(result.map(User::from))
    }

    /// Insert a new user
    pub async fn create(&self, openid: String, real_name: Option<String>) -> AppResult<User> {
        let now = Utc::now();
        let active_model = ActiveModel {
            openid: Set(openid),
            real_name: Set(real_name),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let model = active_model.insert(self.txn).await?;
        Ok(User::from(model))
    }

    /// Set the user's real name
    pub async fn update_real_name(&self, id: i32, real_name: String) -> AppResult<User> {
        let user = UserEntity::find_by_id(id)
            .one(self.txn)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: ActiveModel = user.into();
        active.real_name = Set(Some(real_name));
        active.updated_at = Set(Utc::now());

        let model = active.update(self.txn).await?;
        Ok(User::from(model))
    }

    /// Permanently delete a user. Returns whether a row was removed.
    pub async fn delete(&self, id: i32) -> AppResult<bool> {
        let result = UserEntity::delete_by_id(id).exec(self.txn).await?;
        Ok(result.rows_affected > 0)
    }

    /// Page of users ordered by ID, plus the total count
    pub async fn list(&self, page: &PaginationParams) -> AppResult<(Vec<User>, u64)> {
        let total = UserEntity::find().count(self.txn).await?;
        let models = UserEntity::find()
            .order_by_asc(user::Column::Id)
            .offset(page.offset())
            .limit(page.limit())
            .all(self.txn)
            .await?;

        Ok((models.into_iter().map(User::from).collect(), total))
    }

    /// Count all users
    pub async fn count(&self) -> AppResult<u64> {
        Ok(UserEntity::find().count(self.txn).await?)
    }
}
