//! Service container - one place to reach every application service.

use std::sync::Arc;

use super::{
    InstrumentManager, InstrumentService, RoomManager, RoomService, UsageRecordManager,
    UsageRecordService, UserManager, UserService,
};

/// Shared handles to every service.
#[derive(Clone)]
pub struct Services {
    users: Arc<dyn UserService>,
    instruments: Arc<dyn InstrumentService>,
    rooms: Arc<dyn RoomService>,
    usage_records: Arc<dyn UsageRecordService>,
}

impl Services {
    /// Create a container from explicit implementations
    pub fn new(
        users: Arc<dyn UserService>,
        instruments: Arc<dyn InstrumentService>,
        rooms: Arc<dyn RoomService>,
        usage_records: Arc<dyn UsageRecordService>,
    ) -> Self {
        Self {
            users,
            instruments,
            rooms,
            usage_records,
        }
    }

    pub fn users(&self) -> Arc<dyn UserService> {
        self.users.clone()
    }

    pub fn instruments(&self) -> Arc<dyn InstrumentService> {
        self.instruments.clone()
    }

    pub fn rooms(&self) -> Arc<dyn RoomService> {
        self.rooms.clone()
    }

    pub fn usage_records(&self) -> Arc<dyn UsageRecordService> {
        self.usage_records.clone()
    }
}

impl Default for Services {
    fn default() -> Self {
        Self::new(
            Arc::new(UserManager::new()),
            Arc::new(InstrumentManager::new()),
            Arc::new(RoomManager::new()),
            Arc::new(UsageRecordManager::new()),
        )
    }
}
