//! Room service.

use async_trait::async_trait;

use crate::domain::{CreateRoom, Room};
use crate::errors::{AppResult, OptionExt};
use crate::infra::Session;
use crate::types::{Paginated, PaginationParams};

#[async_trait]
pub trait RoomService: Send + Sync {
    async fn create(&self, session: &Session, input: CreateRoom) -> AppResult<Room>;

    async fn get(&self, session: &Session, id: i32) -> AppResult<Room>;

    async fn list(&self, session: &Session, page: &PaginationParams) -> AppResult<Paginated<Room>>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct RoomManager;

impl RoomManager {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl RoomService for RoomManager {
    async fn create(&self, session: &Session, input: CreateRoom) -> AppResult<Room> {
        let room_info = input
            .room_info
            .map(|info| info.trim().to_string())
            .filter(|info| !info.is_empty());
        session.rooms().create(room_info).await
    }

    async fn get(&self, session: &Session, id: i32) -> AppResult<Room> {
        session.rooms().find_by_id(id).await?.ok_or_not_found()
    }

    async fn list(&self, session: &Session, page: &PaginationParams) -> AppResult<Paginated<Room>> {
        let (rooms, total) = session.rooms().list(page).await?;
        Ok(Paginated::from_params(rooms, page, total))
    }
}
