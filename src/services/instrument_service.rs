//! Instrument service - inventory of sequencing instruments.

use async_trait::async_trait;

use crate::domain::{CreateInstrument, Instrument, InstrumentFilter, UpdateInstrument};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::Session;
use crate::types::{Paginated, PaginationParams};

#[async_trait]
pub trait InstrumentService: Send + Sync {
    async fn create(&self, session: &Session, input: CreateInstrument) -> AppResult<Instrument>;

    async fn get(&self, session: &Session, id: i32) -> AppResult<Instrument>;

    async fn list(
        &self,
        session: &Session,
        filter: &InstrumentFilter,
        page: &PaginationParams,
    ) -> AppResult<Paginated<Instrument>>;

    async fn update(
        &self,
        session: &Session,
        id: i32,
        changes: UpdateInstrument,
    ) -> AppResult<Instrument>;

    async fn assign_owner(&self, session: &Session, id: i32, user_id: i32)
        -> AppResult<Instrument>;

    async fn clear_owner(&self, session: &Session, id: i32) -> AppResult<Instrument>;

    async fn delete(&self, session: &Session, id: i32) -> AppResult<()>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct InstrumentManager;

impl InstrumentManager {
    pub fn new() -> Self {
        Self
    }

    async fn ensure_user(session: &Session, user_id: i32) -> AppResult<()> {
        match session.users().find_by_id(user_id).await? {
            Some(_) => Ok(()),
            None => Err(AppError::validation(format!("User {} does not exist", user_id))),
        }
    }

    /// The room must exist and hold no instrument other than `current`.
    async fn ensure_room_free(
        session: &Session,
        room_id: i32,
        current: Option<i32>,
    ) -> AppResult<()> {
        if session.rooms().find_by_id(room_id).await?.is_none() {
            return Err(AppError::validation(format!("Room {} does not exist", room_id)));
        }
        match session.instruments().find_by_room(room_id).await? {
            Some(other) if Some(other.id) != current => {
                Err(AppError::conflict(format!("Instrument in room {}", room_id)))
            }
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl InstrumentService for InstrumentManager {
    async fn create(&self, session: &Session, input: CreateInstrument) -> AppResult<Instrument> {
        if session.instruments().find_by_code(&input.code).await?.is_some() {
            return Err(AppError::conflict(format!("Instrument {}", input.code)));
        }
        if let Some(owner_id) = input.owner_id {
            Self::ensure_user(session, owner_id).await?;
        }
        if let Some(room_id) = input.room_id {
            Self::ensure_room_free(session, room_id, None).await?;
        }

        let instrument = session.instruments().create(input).await?;
        tracing::info!(instrument_id = instrument.id, code = %instrument.code, "Instrument created");
        Ok(instrument)
    }

    async fn get(&self, session: &Session, id: i32) -> AppResult<Instrument> {
        session.instruments().find_by_id(id).await?.ok_or_not_found()
    }

    async fn list(
        &self,
        session: &Session,
        filter: &InstrumentFilter,
        page: &PaginationParams,
    ) -> AppResult<Paginated<Instrument>> {
        let (instruments, total) = session.instruments().list(filter.owner_id, page).await?;
        Ok(Paginated::from_params(instruments, page, total))
    }

    async fn update(
        &self,
        session: &Session,
        id: i32,
        changes: UpdateInstrument,
    ) -> AppResult<Instrument> {
        if changes.is_empty() {
            return Err(AppError::validation("No fields to update"));
        }
        if let Some(room_id) = changes.room_id {
            Self::ensure_room_free(session, room_id, Some(id)).await?;
        }
        session.instruments().update(id, changes).await
    }

    async fn assign_owner(
        &self,
        session: &Session,
        id: i32,
        user_id: i32,
    ) -> AppResult<Instrument> {
        Self::ensure_user(session, user_id).await?;
        session.instruments().set_owner(id, Some(user_id)).await
    }

    async fn clear_owner(&self, session: &Session, id: i32) -> AppResult<Instrument> {
        session.instruments().set_owner(id, None).await
    }

    async fn delete(&self, session: &Session, id: i32) -> AppResult<()> {
        if session.instruments().delete(id).await? {
            tracing::info!(instrument_id = id, "Instrument deleted");
            Ok(())
        } else {
            Err(AppError::NotFound)
        }
    }
}
