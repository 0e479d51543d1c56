//! Configuration module for the class roster backend.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

use axum::http::HeaderValue;

use crate::errors::AppError;

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to SQLite database file
    pub db_path: PathBuf,
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Human-readable or JSON log lines
    pub log_format: LogFormat,
    /// Single browser origin allowed by CORS; any origin when unset
    pub cors_origin: Option<HeaderValue>,
    /// Seed the default classes at startup
    pub seed_defaults: bool,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let db_path = env::var("ROSTER_DB_PATH")
            .unwrap_or_else(|_| "./data/roster.sqlite".to_string())
            .into();

        let bind_addr = env::var("ROSTER_BIND_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:3000".to_string())
            .parse()
            .map_err(|e| AppError::Config(format!("Invalid ROSTER_BIND_ADDR: {}", e)))?;

        let log_level = env::var("ROSTER_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let log_format = match env::var("ROSTER_LOG_FORMAT").as_deref() {
            Ok("json") => LogFormat::Json,
            Ok("pretty") | Err(_) => LogFormat::Pretty,
            Ok(other) => {
                return Err(AppError::Config(format!(
                    "Invalid ROSTER_LOG_FORMAT: {} (expected pretty or json)",
                    other
                )))
            }
        };

        let cors_origin = match env::var("ROSTER_CORS_ORIGIN") {
            Ok(origin) => Some(HeaderValue::from_str(&origin).map_err(|e| {
                AppError::Config(format!("Invalid ROSTER_CORS_ORIGIN: {}", e))
            })?),
            Err(_) => None,
        };

        let seed_defaults = match env::var("ROSTER_SEED_DEFAULTS") {
            Ok(value) => parse_bool(&value).ok_or_else(|| {
                AppError::Config(format!("Invalid ROSTER_SEED_DEFAULTS: {}", value))
            })?,
            Err(_) => true,
        };

        Ok(Self {
            db_path,
            bind_addr,
            log_level,
            log_format,
            cors_origin,
            seed_defaults,
        })
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
