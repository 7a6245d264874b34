//! Session-bound repository for instrument and room usage records.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, DatabaseTransaction, EntityTrait, PaginatorTrait, QueryOrder, QuerySelect,
    Set,
};

use super::entities::{instrument_usage_record, room_usage_record};
use crate::domain::{
    InstrumentUsageRecord, NewInstrumentUsageRecord, NewRoomUsageRecord, RoomUsageRecord,
};
use crate::errors::AppResult;
use crate::types::PaginationParams;

pub struct UsageRecordRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> UsageRecordRepository<'a> {
    pub(crate) fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }

    pub async fn create_instrument_record(
        &self,
        input: NewInstrumentUsageRecord,
    ) -> AppResult<InstrumentUsageRecord> {
        let now = Utc::now();
        let active_model = instrument_usage_record::ActiveModel {
            instrument_code: Set(input.instrument_code),
            instrument: Set(input.instrument),
            instrument_status: Set(input.instrument_status),
            operator_name: Set(input.operator_name),
            details: Set(input.details),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let model = active_model.insert(self.txn).await?;
        Ok(InstrumentUsageRecord::from(model))
    }

    /// Newest first
    pub async fn list_instrument_records(
        &self,
        page: &PaginationParams,
    ) -> AppResult<(Vec<InstrumentUsageRecord>, u64)> {
        use instrument_usage_record::{Column, Entity};

        let total = Entity::find().count(self.txn).await?;
        let models = Entity::find()
            .order_by_desc(Column::Id)
            .offset(page.offset())
            .limit(page.limit())
            .all(self.txn)
            .await?;

        Ok((
            models.into_iter().map(InstrumentUsageRecord::from).collect(),
            total,
        ))
    }

    pub async fn create_room_record(
        &self,
        input: NewRoomUsageRecord,
    ) -> AppResult<RoomUsageRecord> {
        let now = Utc::now();
        let active_model = room_usage_record::ActiveModel {
            room_id: Set(input.room_id),
            operator_id: Set(input.operator_id),
            room_status: Set(input.room_status),
            operation_type: Set(input.operation_type),
            details: Set(input.details),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let model = active_model.insert(self.txn).await?;
        Ok(RoomUsageRecord::from(model))
    }

    /// Newest first
    pub async fn list_room_records(
        &self,
        page: &PaginationParams,
    ) -> AppResult<(Vec<RoomUsageRecord>, u64)> {
        use room_usage_record::{Column, Entity};

        let total = Entity::find().count(self.txn).await?;
        let models = Entity::find()
            .order_by_desc(Column::Id)
            .offset(page.offset())
            .limit(page.limit())
            .all(self.txn)
            .await?;

        Ok((models.into_iter().map(RoomUsageRecord::from).collect(), total))
    }
}
