//! Application services layer - Use cases and business logic.
//!
//! Services hold the business rules. They never open sessions themselves:
//! the caller passes the request's session in and decides whether to
//! commit. Request bodies reach them already checked by `ValidatedJson`.

pub mod container;
mod instrument_service;
mod room_service;
mod usage_record_service;
mod user_service;

pub use container::Services;
pub use instrument_service::{InstrumentManager, InstrumentService};
pub use room_service::{RoomManager, RoomService};
pub use usage_record_service::{UsageRecordManager, UsageRecordService};
pub use user_service::{UserManager, UserService};
