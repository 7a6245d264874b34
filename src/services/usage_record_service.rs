//! Usage record service - who used which instrument or room, and when.

use async_trait::async_trait;

use crate::domain::{
    InstrumentUsageRecord, NewInstrumentUsageRecord, NewRoomUsageRecord, RoomUsageRecord,
};
use crate::errors::{AppError, AppResult};
use crate::infra::Session;
use crate::types::{Paginated, PaginationParams};

#[async_trait]
pub trait UsageRecordService: Send + Sync {
    /// Store an instrument usage record for a known instrument code
    async fn submit_instrument_record(
        &self,
        session: &Session,
        input: NewInstrumentUsageRecord,
    ) -> AppResult<InstrumentUsageRecord>;

    async fn list_instrument_records(
        &self,
        session: &Session,
        page: &PaginationParams,
    ) -> AppResult<Paginated<InstrumentUsageRecord>>;

    /// Store a room usage record for a known room and operator
    async fn submit_room_record(
        &self,
        session: &Session,
        input: NewRoomUsageRecord,
    ) -> AppResult<RoomUsageRecord>;

    async fn list_room_records(
        &self,
        session: &Session,
        page: &PaginationParams,
    ) -> AppResult<Paginated<RoomUsageRecord>>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct UsageRecordManager;

impl UsageRecordManager {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl UsageRecordService for UsageRecordManager {
    async fn submit_instrument_record(
        &self,
        session: &Session,
        input: NewInstrumentUsageRecord,
    ) -> AppResult<InstrumentUsageRecord> {
        if session
            .instruments()
            .find_by_code(&input.instrument_code)
            .await?
            .is_none()
        {
            return Err(AppError::validation(format!(
                "Instrument {} does not exist",
                input.instrument_code
            )));
        }

        session.usage_records().create_instrument_record(input).await
    }

    async fn list_instrument_records(
        &self,
        session: &Session,
        page: &PaginationParams,
    ) -> AppResult<Paginated<InstrumentUsageRecord>> {
        let (records, total) = session.usage_records().list_instrument_records(page).await?;
        Ok(Paginated::from_params(records, page, total))
    }

    async fn submit_room_record(
        &self,
        session: &Session,
        input: NewRoomUsageRecord,
    ) -> AppResult<RoomUsageRecord> {
        if session.rooms().find_by_id(input.room_id).await?.is_none() {
            return Err(AppError::validation(format!(
                "Room {} does not exist",
                input.room_id
            )));
        }
        if session.users().find_by_id(input.operator_id).await?.is_none() {
            return Err(AppError::validation(format!(
                "User {} does not exist",
                input.operator_id
            )));
        }

        session.usage_records().create_room_record(input).await
    }

    async fn list_room_records(
        &self,
        session: &Session,
        page: &PaginationParams,
    ) -> AppResult<Paginated<RoomUsageRecord>> {
        let (records, total) = session.usage_records().list_room_records(page).await?;
        Ok(Paginated::from_params(records, page, total))
    }
}
