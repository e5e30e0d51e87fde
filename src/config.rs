//! Application configuration loaded from environment variables.
//!
//! Fail-fast loading: required variables must be present and valid or the
//! binary exits with a clear error before serving anything.

use std::env;
use thiserror::Error;

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("invalid value for {name}: {value}")]
    Invalid { name: &'static str, value: String },
}

/// Connection settings for the document platform.
#[derive(Debug, Clone)]
pub struct PlatformConfig {
    /// Base URL of the platform's HTTP API.
    pub base_url: String,

    /// API key for the platform token scheme.
    pub api_key: String,

    /// API secret for the platform token scheme.
    pub api_secret: String,

    /// TCP connect timeout in seconds.
    pub connect_timeout_secs: u64,

    /// Per-request read timeout in seconds.
    pub read_timeout_secs: u64,
}

/// Gateway configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Bind host (default `0.0.0.0`).
    pub host: String,

    /// Bind port (default 8080).
    pub port: u16,

    /// `RUST_LOG`-style log filter (default `info`).
    pub log_filter: String,

    /// Document platform connection settings.
    pub platform: PlatformConfig,
}

impl Config {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            host: optional("GATEWAY_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parsed("GATEWAY_PORT", 8080)?,
            log_filter: optional("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            platform: PlatformConfig {
                base_url: required("PLATFORM_BASE_URL")?,
                api_key: required("PLATFORM_API_KEY")?,
                api_secret: required("PLATFORM_API_SECRET")?,
                connect_timeout_secs: parsed("PLATFORM_CONNECT_TIMEOUT_SECS", 5)?,
                read_timeout_secs: parsed("PLATFORM_READ_TIMEOUT_SECS", 30)?,
            },
        })
    }
}

fn optional(name: &'static str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn required(name: &'static str) -> Result<String, ConfigError> {
    optional(name).ok_or(ConfigError::Missing(name))
}

fn parsed<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match optional(name) {
        None => Ok(default),
        Some(value) => value
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_required_variable_is_named() {
        let err = ConfigError::Missing("PLATFORM_BASE_URL");
        assert_eq!(
            err.to_string(),
            "missing required environment variable: PLATFORM_BASE_URL"
        );
    }

    #[test]
    fn test_invalid_value_is_reported() {
        let err = ConfigError::Invalid {
            name: "GATEWAY_PORT",
            value: "not-a-port".to_string(),
        };
        assert_eq!(err.to_string(), "invalid value for GATEWAY_PORT: not-a-port");
    }
}
