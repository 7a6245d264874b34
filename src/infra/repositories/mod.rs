//! Repository layer - Data access abstraction
//!
//! Repositories borrow the transaction of a `Session`, so every
//! statement they issue belongs to that session's unit of work.

pub mod entities;
mod instrument_repository;
mod room_repository;
mod usage_record_repository;
mod user_repository;

pub use instrument_repository::InstrumentRepository;
pub use room_repository::RoomRepository;
pub use usage_record_repository::UsageRecordRepository;
pub use user_repository::UserRepository;
