//! CLI module - Command-line interface for the application.
//!
//! Provides commands for:
//! - `serve` - Wait for the database, initialize the schema, start the HTTP server
//! - `init-db` - Create missing tables
//! - `wait-for-db` - Block until the database answers
//! - `probe` - One liveness check, for container health checks

pub mod args;

pub use args::{Cli, Commands};
