//! Shared types used across handlers.

mod pagination;
mod response;

pub use pagination::{
    Paginated, PaginatedInstrumentUsageRecords, PaginatedInstruments, PaginatedRoomUsageRecords,
    PaginatedRooms, PaginatedUsers, PaginationMeta, PaginationParams,
};
pub use response::{MessageResponse, NoContent};
