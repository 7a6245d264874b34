//! SeaORM entity definitions
//!
//! These are database-specific entities separate from domain models.
//! Every entity here is registered with the schema registry in
//! foreign-key order (see `SchemaRegistry::with_default_models`).

pub mod instrument;
pub mod instrument_usage_record;
pub mod room;
pub mod room_usage_record;
pub mod user;

// Re-exports for public API convenience
pub use instrument::{Entity as InstrumentEntity, Model as InstrumentModel};
pub use instrument_usage_record::{
    Entity as InstrumentUsageRecordEntity, Model as InstrumentUsageRecordModel,
};
pub use room::{Entity as RoomEntity, Model as RoomModel};
pub use room_usage_record::{Entity as RoomUsageRecordEntity, Model as RoomUsageRecordModel};
pub use user::{Entity as UserEntity, Model as UserModel};
