//! Runtime configuration from environment variables (optionally seeded from `.env`).
//!
//! | Variable             | Default                       |
//! |----------------------|-------------------------------|
//! | `DATABASE_URL`       | `postgres://localhost/movies` |
//! | `BIND_ADDR`          | `0.0.0.0:3000`                |
//! | `DEBUG`              | `false`                       |
//! | `DB_MAX_CONNECTIONS` | `5`                           |
//! | `BODY_LIMIT_BYTES`   | `1048576`                     |
//! | `STORE`              | `postgres`                    |

use crate::error::ConfigError;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::str::FromStr;
use tracing_subscriber::EnvFilter;

const DEFAULT_DATABASE_URL: &str = "postgres://localhost/movies";
const DEFAULT_BIND_ADDR: SocketAddr = SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), 3000);
const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_BODY_LIMIT: usize = 1024 * 1024;

/// Which repository implementation backs the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    Postgres,
    Memory,
}

impl FromStr for StoreKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(StoreKind::Postgres),
            "memory" => Ok(StoreKind::Memory),
            other => Err(ConfigError::UnknownStore(other.to_string())),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    /// Raises the default log level to `debug`.
    pub debug: bool,
    pub max_connections: u32,
    pub body_limit: usize,
    pub store: StoreKind,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unset keys take their defaults, malformed ones are errors.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let store = match lookup("STORE") {
            Some(v) => v.parse()?,
            None => StoreKind::Postgres,
        };
        Ok(AppConfig {
            database_url: lookup("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.into()),
            bind_addr: parse_or("BIND_ADDR", &lookup, DEFAULT_BIND_ADDR)?,
            debug: parse_flag("DEBUG", &lookup)?,
            max_connections: parse_or("DB_MAX_CONNECTIONS", &lookup, DEFAULT_MAX_CONNECTIONS)?,
            body_limit: parse_or("BODY_LIMIT_BYTES", &lookup, DEFAULT_BODY_LIMIT)?,
            store,
        })
    }

    /// `RUST_LOG` wins when set; otherwise this crate logs at `info`, or `debug` in debug mode.
    pub fn log_filter(&self) -> EnvFilter {
        let level = if self.debug { "debug" } else { "info" };
        EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("movie_catalog={level},movie_server={level},tower_http={level}"))
        })
    }
}

fn parse_or<T: FromStr>(
    key: &'static str,
    lookup: &impl Fn(&str) -> Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(key) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value }),
        None => Ok(default),
    }
}

fn parse_flag(key: &'static str, lookup: &impl Fn(&str) -> Option<String>) -> Result<bool, ConfigError> {
    match lookup(key) {
        None => Ok(false),
        Some(value) => match value.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" | "" => Ok(false),
            _ => Err(ConfigError::Invalid { key, value }),
        },
    }
}
