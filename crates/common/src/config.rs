use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::error::ConfigError;

const DEFAULT_BASE_URL: &str = "https://api.coingecko.com/api/v3";

/// Process configuration, read from the environment (after `dotenvy`).
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub base_url: String,
    pub cache_ttl: Duration,
    pub fetch_timeout: Duration,
    pub refresh_interval: Duration,
    /// Invalidate the quote cache before every board regeneration.
    pub force_refresh: bool,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            cache_ttl: Duration::from_secs(30),
            fetch_timeout: Duration::from_secs(10),
            refresh_interval: Duration::from_secs(30),
            force_refresh: false,
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Ok(Self {
            base_url: lookup("COINGECKO_BASE_URL").unwrap_or(defaults.base_url),
            cache_ttl: Duration::from_secs(parse_or(&lookup, "CACHE_TTL_SECS", 30)?),
            fetch_timeout: Duration::from_secs(parse_or(&lookup, "FETCH_TIMEOUT_SECS", 10)?),
            refresh_interval: Duration::from_secs(parse_or(&lookup, "REFRESH_INTERVAL_SECS", 30)?),
            force_refresh: parse_or(&lookup, "FORCE_REFRESH", false)?,
            log_level: lookup("LOG_LEVEL").unwrap_or(defaults.log_level),
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse::<T>().map_err(|_| ConfigError::Invalid {
            key: key.to_string(),
            value: raw,
        }),
        None => Ok(default),
    }
}
