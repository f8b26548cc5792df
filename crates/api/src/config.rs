//! Service configuration.
//!
//! Loaded from environment variables. The database URL is redacted in Debug
//! output.

use std::collections::HashMap;
use std::env;
use std::fmt;

use axum::http::HeaderName;
use thiserror::Error;

use netapi_observability::ObservabilityConfig;

use crate::identity::{IdentityConfig, MissingRequestIdPolicy};

pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8080";

/// Default limit for buffering a request body into the start-of-request log.
pub const DEFAULT_MAX_LOGGED_BODY_BYTES: usize = 64 * 1024;

pub const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;

#[derive(Clone)]
pub struct Config {
    /// Server bind address (default: "0.0.0.0:8080").
    pub bind_address: String,

    /// PostgreSQL connection URL. Unset selects the in-memory stores.
    pub database_url: Option<String>,

    pub db_max_connections: u32,

    /// Request-id header and missing-header policy.
    pub identity: IdentityConfig,

    /// Bodies larger than this are not buffered for logging.
    pub max_logged_body_bytes: usize,

    pub observability: ObservabilityConfig,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("bind_address", &self.bind_address)
            .field(
                "database_url",
                &self.database_url.as_ref().map(|_| "[REDACTED]"),
            )
            .field("db_max_connections", &self.db_max_connections)
            .field("identity", &self.identity)
            .field("max_logged_body_bytes", &self.max_logged_body_bytes)
            .field("observability", &self.observability)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            database_url: None,
            db_max_connections: DEFAULT_DB_MAX_CONNECTIONS,
            identity: IdentityConfig::default(),
            max_logged_body_bytes: DEFAULT_MAX_LOGGED_BODY_BYTES,
            observability: ObservabilityConfig::default(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid request id header name: {0}")]
    InvalidHeaderName(String),

    #[error("Invalid missing request id policy: {0}")]
    InvalidPolicy(String),

    #[error("Invalid numeric value: {0}")]
    InvalidNumber(String),

    #[error("Invalid boolean value: {0}")]
    InvalidBool(String),
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(&env::vars().collect())
    }

    /// Load configuration from a HashMap (for testing).
    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let bind_address = vars
            .get("BIND_ADDRESS")
            .cloned()
            .unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string());

        let database_url = vars
            .get("DATABASE_URL")
            .filter(|v| !v.trim().is_empty())
            .cloned();

        let db_max_connections =
            parse_positive(vars, "DB_MAX_CONNECTIONS", DEFAULT_DB_MAX_CONNECTIONS)?;

        let request_id_header = match vars.get("REQUEST_ID_HEADER").map(|v| v.trim()) {
            Some(name) if !name.is_empty() => {
                Some(HeaderName::from_bytes(name.to_lowercase().as_bytes()).map_err(|e| {
                    ConfigError::InvalidHeaderName(format!(
                        "REQUEST_ID_HEADER must be a valid header name, got '{}': {}",
                        name, e
                    ))
                })?)
            }
            _ => None,
        };

        let missing_request_id = match vars.get("MISSING_REQUEST_ID") {
            Some(value) => value.parse::<MissingRequestIdPolicy>().map_err(|e| {
                ConfigError::InvalidPolicy(format!("MISSING_REQUEST_ID: {}", e))
            })?,
            None => MissingRequestIdPolicy::default(),
        };

        let max_logged_body_bytes = parse_positive(
            vars,
            "MAX_LOGGED_BODY_BYTES",
            DEFAULT_MAX_LOGGED_BODY_BYTES,
        )?;

        let log_level = vars
            .get("LOG_LEVEL")
            .cloned()
            .unwrap_or_else(|| "info".to_string());

        let json_logs = match vars.get("LOG_JSON").map(|v| v.trim().to_lowercase()) {
            Some(v) => match v.as_str() {
                "1" | "true" | "yes" => true,
                "0" | "false" | "no" => false,
                other => {
                    return Err(ConfigError::InvalidBool(format!(
                        "LOG_JSON must be true or false, got '{}'",
                        other
                    )));
                }
            },
            None => true,
        };

        Ok(Config {
            bind_address,
            database_url,
            db_max_connections,
            identity: IdentityConfig {
                request_id_header,
                missing_request_id,
            },
            max_logged_body_bytes,
            observability: ObservabilityConfig {
                log_level,
                json_logs,
            },
        })
    }
}

fn parse_positive<T>(
    vars: &HashMap<String, String>,
    key: &str,
    default: T,
) -> Result<T, ConfigError>
where
    T: core::str::FromStr + PartialEq + Default,
    T::Err: fmt::Display,
{
    let Some(value_str) = vars.get(key) else {
        return Ok(default);
    };

    let value: T = value_str.trim().parse().map_err(|e| {
        ConfigError::InvalidNumber(format!(
            "{} must be a valid positive integer, got '{}': {}",
            key, value_str, e
        ))
    })?;

    if value == T::default() {
        return Err(ConfigError::InvalidNumber(format!(
            "{} must be greater than 0",
            key
        )));
    }

    Ok(value)
}
