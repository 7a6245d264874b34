//! Commands module - CLI command implementations.
//!
//! Each command is implemented in its own module for separation of concerns.

pub mod init_db;
pub mod probe;
pub mod serve;
pub mod wait;
