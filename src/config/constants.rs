//! Application-wide constants
//!
//! Centralized location for magic values to improve maintainability.

// =============================================================================
// Pagination
// =============================================================================

/// Default number of items per page
pub const DEFAULT_PAGE_SIZE: u64 = 20;

/// Maximum allowed items per page to prevent excessive queries
pub const MAX_PAGE_SIZE: u64 = 100;

/// Default starting page number (1-indexed)
pub const DEFAULT_PAGE_NUMBER: u64 = 1;

// =============================================================================
// Server Configuration
// =============================================================================

/// Default server host address
pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";

/// Default server port
pub const DEFAULT_SERVER_PORT: u16 = 8000;

/// Prefix under which all versioned routes are mounted
pub const API_PREFIX: &str = "/api/v1";

// =============================================================================
// Database Pool
// =============================================================================

/// Upper bound of pooled connections
pub const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;

/// Connections kept open while idle
pub const DEFAULT_DB_MIN_CONNECTIONS: u32 = 1;

/// Seconds allowed for establishing a physical connection
pub const DEFAULT_DB_CONNECT_TIMEOUT_SECS: u64 = 5;

/// Seconds a session waits for a free pooled connection
pub const DEFAULT_DB_ACQUIRE_TIMEOUT_SECS: u64 = 5;

/// Seconds before an idle pooled connection is closed
pub const DEFAULT_DB_IDLE_TIMEOUT_SECS: u64 = 600;

/// Hint sent in `Retry-After` when the database is unavailable
pub const RETRY_AFTER_SECS: u64 = 5;

// =============================================================================
// Startup Gate
// =============================================================================

/// Seconds between two database liveness probes
pub const DEFAULT_DB_WAIT_INTERVAL_SECS: u64 = 2;

/// Failed probes tolerated before the database is declared down
pub const DEFAULT_DB_WAIT_RETRIES: u32 = 10;

// =============================================================================
// Users
// =============================================================================

/// Longest accepted real name
pub const MAX_REAL_NAME_LENGTH: usize = 100;
