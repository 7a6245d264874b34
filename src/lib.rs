//! Seqlab API - backend for a sequencing lab
//!
//! Users, sequencing instruments, lab rooms and usage records, served over
//! HTTP with Axum and stored through SeaORM.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: Core business entities and DTOs
//! - **services**: Business rules, run inside a caller-provided session
//! - **infra**: Connection pool, schema registry, sessions, repositories, probes
//! - **api**: HTTP handlers, extractors, and routes
//! - **types**: Shared types (pagination, responses)
//! - **errors**: Centralized error handling
//!
//! # Request lifecycle
//!
//! Every handler receives its own [`infra::Session`]. The handler commits
//! it on success; any other exit (error, panic, dropped connection) rolls
//! it back and returns the connection to the pool.
//!
//! # CLI Usage
//!
//! ```bash
//! # Wait for the database, create tables, serve on :8000
//! cargo run -- serve
//!
//! # Create missing tables only
//! cargo run -- init-db
//!
//! # Container health check
//! cargo run -- probe
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;
pub mod types;

// Re-export commonly used types at crate root
pub use api::AppState;
pub use config::Config;
pub use domain::{Instrument, User};
pub use errors::{AppError, AppResult};
pub use infra::{Database, SchemaRegistry, Session, SessionFactory};
