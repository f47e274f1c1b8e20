use chrono::{Datelike, Utc};
use std::{env, net::SocketAddr};

use crate::github::CacheConfig;

pub const DEFAULT_GRAPHQL_URL: &str = "https://api.github.com/graphql";

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("Invalid value for {name}: {value}")]
    InvalidValue { name: &'static str, value: String },
}

/// Process-wide settings, read from the environment once at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub github_token: Option<String>,
    pub graphql_url: String,
    /// Year served when a request does not ask for one.
    pub default_year: i32,
    pub bind_addr: SocketAddr,
    /// Below this many remaining GitHub requests, new fetches are refused
    /// until the rate limit window resets.
    pub rate_limit_min_remaining: u32,
    pub sentry_dsn: Option<String>,
    pub cache: CacheConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            github_token: None,
            graphql_url: DEFAULT_GRAPHQL_URL.to_string(),
            default_year: Utc::now().year(),
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            rate_limit_min_remaining: 10,
            sentry_dsn: None,
            cache: CacheConfig::default(),
        }
    }
}

/// Reads a non-empty environment variable.
fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn parse_var<T: std::str::FromStr>(name: &'static str) -> Result<Option<T>, ConfigError> {
    match non_empty_var(name) {
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue { name, value }),
        None => Ok(None),
    }
}

impl AppConfig {
    /// Load the configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let github_token = non_empty_var("GITHUB_TOKEN");
        if github_token.is_none() {
            tracing::warn!("GITHUB_TOKEN is not set, GitHub requests will be rejected");
        }

        Ok(Self {
            github_token,
            graphql_url: non_empty_var("GITHUB_GRAPHQL_URL").unwrap_or(defaults.graphql_url),
            default_year: parse_var("WRAPPED_YEAR")?.unwrap_or(defaults.default_year),
            bind_addr: parse_var("BIND_ADDR")?.unwrap_or(defaults.bind_addr),
            rate_limit_min_remaining: parse_var("RATE_LIMIT_MIN_REMAINING")?
                .unwrap_or(defaults.rate_limit_min_remaining),
            sentry_dsn: non_empty_var("SENTRY_DSN"),
            cache: CacheConfig::from_env(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.graphql_url, DEFAULT_GRAPHQL_URL);
        assert_eq!(config.bind_addr.to_string(), "0.0.0.0:3000");
        assert_eq!(config.default_year, Utc::now().year());
        assert!(config.github_token.is_none());
    }
}
