//! Session-bound room repository.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, DatabaseTransaction, EntityTrait, PaginatorTrait, QueryOrder, QuerySelect,
    Set,
};

use super::entities::room::{self, ActiveModel, Entity as RoomEntity};
use crate::domain::Room;
use crate::errors::AppResult;
use crate::types::PaginationParams;

pub struct RoomRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> RoomRepository<'a> {
    pub(crate) fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }

    pub async fn find_by_id(&self, id: i32) -> AppResult<Option<Room>> {
        let result = RoomEntity::find_by_id(id).one(self.txn).await?;
        Ok(result.map(Room::from))
    }

    pub async fn create(&self, room_info: Option<String>) -> AppResult<Room> {
        let now = Utc::now();
        let active_model = ActiveModel {
            room_info: Set(room_info),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let model = active_model.insert(self.txn).await?;
        Ok(Room::from(model))
    }

    pub async fn list(&self, page: &PaginationParams) -> AppResult<(Vec<Room>, u64)> {
        let total = RoomEntity::find().count(self.txn).await?;
        let models = RoomEntity::find()
            .order_by_asc(room::Column::Id)
            .offset(page.offset())
            .limit(page.limit())
            .all(self.txn)
            .await?;

        Ok((models.into_iter().map(Room::from).collect(), total))
    }
}
