//! Application settings loaded from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use sea_orm::IsolationLevel;

use super::constants::{
    DEFAULT_DB_ACQUIRE_TIMEOUT_SECS, DEFAULT_DB_CONNECT_TIMEOUT_SECS,
    DEFAULT_DB_IDLE_TIMEOUT_SECS, DEFAULT_DB_MAX_CONNECTIONS, DEFAULT_DB_MIN_CONNECTIONS,
    DEFAULT_DB_WAIT_INTERVAL_SECS, DEFAULT_DB_WAIT_RETRIES, DEFAULT_SERVER_HOST,
    DEFAULT_SERVER_PORT,
};
use crate::errors::{AppError, AppResult};

/// Application configuration
#[derive(Clone)]
pub struct Config {
    pub database: DatabaseSettings,
    pub startup: StartupSettings,
    pub server_host: String,
    pub server_port: u16,
}

/// Connection pool and session settings
#[derive(Clone)]
pub struct DatabaseSettings {
    url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout: Duration,
    pub acquire_timeout: Duration,
    pub idle_timeout: Duration,
    /// Open physical connections on first use instead of at pool creation
    pub connect_lazy: bool,
    /// Log every SQL statement
    pub sqlx_logging: bool,
    /// Isolation level requested when a session begins
    pub isolation_level: Option<IsolationLevel>,
}

/// Database readiness polling used before serving traffic
#[derive(Debug, Clone)]
pub struct StartupSettings {
    pub probe_interval: Duration,
    pub probe_retries: u32,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("database", &self.database)
            .field("startup", &self.startup)
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .finish()
    }
}

impl std::fmt::Debug for DatabaseSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseSettings")
            .field("url", &"[REDACTED]")
            .field("max_connections", &self.max_connections)
            .field("min_connections", &self.min_connections)
            .field("connect_timeout", &self.connect_timeout)
            .field("acquire_timeout", &self.acquire_timeout)
            .field("idle_timeout", &self.idle_timeout)
            .field("connect_lazy", &self.connect_lazy)
            .field("sqlx_logging", &self.sqlx_logging)
            .field("isolation_level", &self.isolation_level)
            .finish()
    }
}

impl Config {
    /// Load configuration from the process environment (and `.env` if present).
    ///
    /// `DATABASE_URL` is required; everything else has a default.
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let url = lookup("DATABASE_URL")
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| AppError::Configuration("DATABASE_URL must be set".to_string()))?;

        let isolation_level = lookup("DB_ISOLATION_LEVEL")
            .map(|v| parse_isolation_level(&v))
            .transpose()?;

        let database = DatabaseSettings {
            url,
            max_connections: parse_or(&lookup, "DB_MAX_CONNECTIONS", DEFAULT_DB_MAX_CONNECTIONS)?,
            min_connections: parse_or(&lookup, "DB_MIN_CONNECTIONS", DEFAULT_DB_MIN_CONNECTIONS)?,
            connect_timeout: secs_or(&lookup, "DB_CONNECT_TIMEOUT_SECS", DEFAULT_DB_CONNECT_TIMEOUT_SECS)?,
            acquire_timeout: secs_or(&lookup, "DB_ACQUIRE_TIMEOUT_SECS", DEFAULT_DB_ACQUIRE_TIMEOUT_SECS)?,
            idle_timeout: secs_or(&lookup, "DB_IDLE_TIMEOUT_SECS", DEFAULT_DB_IDLE_TIMEOUT_SECS)?,
            connect_lazy: parse_or(&lookup, "DB_CONNECT_LAZY", false)?,
            sqlx_logging: parse_or(&lookup, "DB_SQL_LOGGING", false)?,
            isolation_level,
        };

        if database.min_connections > database.max_connections {
            return Err(AppError::Configuration(
                "DB_MIN_CONNECTIONS cannot exceed DB_MAX_CONNECTIONS".to_string(),
            ));
        }

        let startup = StartupSettings {
            probe_interval: secs_or(&lookup, "DB_WAIT_INTERVAL_SECS", DEFAULT_DB_WAIT_INTERVAL_SECS)?,
            probe_retries: parse_or(&lookup, "DB_WAIT_RETRIES", DEFAULT_DB_WAIT_RETRIES)?,
        };

        Ok(Self {
            database,
            startup,
            server_host: lookup("SERVER_HOST").unwrap_or_else(|| DEFAULT_SERVER_HOST.to_string()),
            server_port: parse_or(&lookup, "SERVER_PORT", DEFAULT_SERVER_PORT)?,
        })
    }

    /// Get the full server address.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

impl DatabaseSettings {
    /// Settings with default pool sizing for the given connection string.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: DEFAULT_DB_MAX_CONNECTIONS,
            min_connections: DEFAULT_DB_MIN_CONNECTIONS,
            connect_timeout: Duration::from_secs(DEFAULT_DB_CONNECT_TIMEOUT_SECS),
            acquire_timeout: Duration::from_secs(DEFAULT_DB_ACQUIRE_TIMEOUT_SECS),
            idle_timeout: Duration::from_secs(DEFAULT_DB_IDLE_TIMEOUT_SECS),
            connect_lazy: false,
            sqlx_logging: false,
            isolation_level: None,
        }
    }

    /// Connection string, e.g. `mysql://user:password@db/seqlab`.
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Default for StartupSettings {
    fn default() -> Self {
        Self {
            probe_interval: Duration::from_secs(DEFAULT_DB_WAIT_INTERVAL_SECS),
            probe_retries: DEFAULT_DB_WAIT_RETRIES,
        }
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> AppResult<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| AppError::Configuration(format!("{} has an invalid value: {}", key, raw))),
        None => Ok(default),
    }
}

fn secs_or<F>(lookup: &F, key: &str, default: u64) -> AppResult<Duration>
where
    F: Fn(&str) -> Option<String>,
{
    parse_or(lookup, key, default).map(Duration::from_secs)
}

fn parse_isolation_level(raw: &str) -> AppResult<IsolationLevel> {
    match raw.trim().to_ascii_lowercase().replace(['-', ' '], "_").as_str() {
        "read_uncommitted" => Ok(IsolationLevel::ReadUncommitted),
        "read_committed" => Ok(IsolationLevel::ReadCommitted),
        "repeatable_read" => Ok(IsolationLevel::RepeatableRead),
        "serializable" => Ok(IsolationLevel::Serializable),
        other => Err(AppError::Configuration(format!(
            "DB_ISOLATION_LEVEL has an invalid value: {}",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_missing_database_url_is_rejected() {
        let result = Config::from_lookup(lookup_from(&[]));
        assert!(matches!(result, Err(AppError::Configuration(_))));
    }

    #[test]
    fn test_blank_database_url_is_rejected() {
        let result = Config::from_lookup(lookup_from(&[("DATABASE_URL", "  ")]));
        assert!(matches!(result, Err(AppError::Configuration(_))));
    }

    #[test]
    fn test_defaults_applied() {
        let config =
            Config::from_lookup(lookup_from(&[("DATABASE_URL", "mysql://u:p@db/seqlab")])).unwrap();

        assert_eq!(config.database.url(), "mysql://u:p@db/seqlab");
        assert_eq!(config.server_port, DEFAULT_SERVER_PORT);
        assert_eq!(config.server_addr(), "0.0.0.0:8000");
        assert_eq!(config.database.max_connections, DEFAULT_DB_MAX_CONNECTIONS);
        assert_eq!(config.startup.probe_retries, DEFAULT_DB_WAIT_RETRIES);
        assert!(config.database.isolation_level.is_none());
        assert!(!config.database.sqlx_logging);
    }

    #[test]
    fn test_overrides_parsed() {
        let config = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "sqlite://seqlab.db?mode=rwc"),
            ("SERVER_PORT", "9000"),
            ("DB_MAX_CONNECTIONS", "3"),
            ("DB_ACQUIRE_TIMEOUT_SECS", "1"),
            ("DB_SQL_LOGGING", "true"),
            ("DB_ISOLATION_LEVEL", "Read-Committed"),
            ("DB_WAIT_RETRIES", "4"),
        ]))
        .unwrap();

        assert_eq!(config.server_port, 9000);
        assert_eq!(config.database.max_connections, 3);
        assert_eq!(config.database.acquire_timeout, Duration::from_secs(1));
        assert!(config.database.sqlx_logging);
        assert_eq!(
            config.database.isolation_level,
            Some(IsolationLevel::ReadCommitted)
        );
        assert_eq!(config.startup.probe_retries, 4);
    }

    #[test]
    fn test_invalid_number_is_rejected() {
        let result = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "mysql://u:p@db/seqlab"),
            ("SERVER_PORT", "eighty"),
        ]));
        assert!(matches!(result, Err(AppError::Configuration(_))));
    }

    #[test]
    fn test_min_above_max_is_rejected() {
        let result = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "mysql://u:p@db/seqlab"),
            ("DB_MIN_CONNECTIONS", "8"),
            ("DB_MAX_CONNECTIONS", "2"),
        ]));
        assert!(matches!(result, Err(AppError::Configuration(_))));
    }

    #[test]
    fn test_debug_redacts_url() {
        let config =
            Config::from_lookup(lookup_from(&[("DATABASE_URL", "mysql://root:hunter2@db/x")]))
                .unwrap();
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("[REDACTED]"));
    }
}
