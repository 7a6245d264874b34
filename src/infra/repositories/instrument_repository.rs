//! Session-bound instrument repository.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseTransaction, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};

use super::entities::instrument::{self, ActiveModel, Entity as InstrumentEntity};
use crate::domain::{CreateInstrument, Instrument, UpdateInstrument};
use crate::errors::{AppError, AppResult};
use crate::types::PaginationParams;

/// Instrument data access within one session.
pub struct InstrumentRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> InstrumentRepository<'a> {
    pub(crate) fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }

    pub async fn find_by_id(&self, id: i32) -> AppResult<Option<Instrument>> {
        let result = InstrumentEntity::find_by_id(id).one(self.txn).await?;
        Ok(result.map(Instrument::from))
    }

    /// Find instrument by inventory code
    pub async fn find_by_code(&self, code: &str) -> AppResult<Option<Instrument>> {
        let result = InstrumentEntity::find()
            .filter(instrument::Column::Code.eq(code))
            .one(self.txn)
            .await?;
        Ok(result.map(Instrument::from))
    }

    /// Instrument currently placed in a room
    pub async fn find_by_room(&self, room_id: i32) -> AppResult<Option<Instrument>> {
        let result = InstrumentEntity::find()
            .filter(instrument::Column::RoomId.eq(room_id))
            .one(self.txn)
            .await?;
        Ok(result.map(Instrument::from))
    }

    pub async fn create(&self, input: CreateInstrument) -> AppResult<Instrument> {
        let now = Utc::now();
        let active_model = ActiveModel {
            code: Set(input.code),
            name: Set(input.name),
            brand: Set(input.brand),
            specifications_and_model: Set(input.specifications_and_model),
            serial_number: Set(input.serial_number),
            manufacturer: Set(input.manufacturer),
            room_id: Set(input.room_id),
            owner_id: Set(input.owner_id),
            usage_type: Set(input.usage_type),
            remark: Set(input.remark),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let model = active_model.insert(self.txn).await?;
        Ok(Instrument::from(model))
    }

    /// Apply a partial update
    pub async fn update(&self, id: i32, changes: UpdateInstrument) -> AppResult<Instrument> {
        let current = InstrumentEntity::find_by_id(id)
            .one(self.txn)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: ActiveModel = current.into();
        if let Some(name) = changes.name {
            active.name = Set(name);
        }
        if let Some(brand) = changes.brand {
            active.brand = Set(brand);
        }
        if let Some(spec) = changes.specifications_and_model {
            active.specifications_and_model = Set(spec);
        }
        if let Some(manufacturer) = changes.manufacturer {
            active.manufacturer = Set(manufacturer);
        }
        if let Some(room_id) = changes.room_id {
            active.room_id = Set(Some(room_id));
        }
        if let Some(usage_type) = changes.usage_type {
            active.usage_type = Set(Some(usage_type));
        }
        if let Some(remark) = changes.remark {
            active.remark = Set(Some(remark));
        }
        active.updated_at = Set(Utc::now());

        let model = active.update(self.txn).await?;
        Ok(Instrument::from(model))
    }

    /// Set or clear the owning user
    pub async fn set_owner(&self, id: i32, owner_id: Option<i32>) -> AppResult<Instrument> {
        let current = InstrumentEntity::find_by_id(id)
            .one(self.txn)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: ActiveModel = current.into();
        active.owner_id = Set(owner_id);
        active.updated_at = Set(Utc::now());

        let model = active.update(self.txn).await?;
        Ok(Instrument::from(model))
    }

    pub async fn delete(&self, id: i32) -> AppResult<bool> {
        let result = InstrumentEntity::delete_by_id(id).exec(self.txn).await?;
        Ok(result.rows_affected > 0)
    }

    /// Page of instruments, optionally restricted to one owner
    pub async fn list(
        &self,
        owner_id: Option<i32>,
        page: &PaginationParams,
    ) -> AppResult<(Vec<Instrument>, u64)> {
        let mut query = InstrumentEntity::find();
        if let Some(owner_id) = owner_id {
            query = query.filter(instrument::Column::OwnerId.eq(owner_id));
        }

        let total = query.clone().count(self.txn).await?;
        let models = query
            .order_by_asc(instrument::Column::Id)
            .offset(page.offset())
            .limit(page.limit())
            .all(self.txn)
            .await?;

        Ok((models.into_iter().map(Instrument::from).collect(), total))
    }

    /// All instruments owned by a user
    pub async fn list_by_owner(&self, owner_id: i32) -> AppResult<Vec<Instrument>> {
        let models = InstrumentEntity::find()
            .filter(instrument::Column::OwnerId.eq(owner_id))
            .order_by_asc(instrument::Column::Id)
            .all(self.txn)
            .await?;

        Ok(models.into_iter().map(Instrument::from).collect())
    }
}
