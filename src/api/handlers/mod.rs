//! HTTP request handlers.

pub mod instrument_handler;
pub mod room_handler;
pub mod usage_record_handler;
pub mod user_handler;

pub use instrument_handler::instrument_routes;
pub use room_handler::room_routes;
pub use usage_record_handler::usage_record_routes;
pub use user_handler::user_routes;
