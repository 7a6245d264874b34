//! Domain layer - Core business entities and logic
//!
//! This module contains the core domain models that represent
//! business concepts independent of infrastructure concerns.

pub mod instrument;
pub mod room;
pub mod usage_record;
pub mod user;
pub mod validation;

pub use instrument::{AssignOwner, CreateInstrument, Instrument, InstrumentFilter, UpdateInstrument};
pub use room::{CreateRoom, Room};
pub use usage_record::{
    InstrumentUsageRecord, NewInstrumentUsageRecord, NewRoomUsageRecord, RoomUsageRecord,
};
pub use user::{CreateUser, OpenIdLogin, UpdateUserName, User, UserResponse};
