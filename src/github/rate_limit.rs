use reqwest::header::HeaderMap;

use crate::github::types::GitHubApiError;

/// Last rate limit state reported by GitHub through `x-ratelimit-*` headers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RateLimitSnapshot {
    pub limit: Option<u32>,
    pub remaining: Option<u32>,
    pub used: Option<u32>,
    /// Unix timestamp (seconds) when the window resets.
    pub reset: Option<u64>,
}

fn header_value<T: std::str::FromStr>(headers: &HeaderMap, name: &str) -> Option<T> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse().ok())
}

impl RateLimitSnapshot {
    /// Reads the rate limit headers of a GitHub response.
    ///
    /// Returns `None` when the response carries no rate limit information.
    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        let snapshot = Self {
            limit: header_value(headers, "x-ratelimit-limit"),
            remaining: header_value(headers, "x-ratelimit-remaining"),
            used: header_value(headers, "x-ratelimit-used"),
            reset: header_value(headers, "x-ratelimit-reset"),
        };
        (snapshot != Self::default()).then_some(snapshot)
    }

    pub fn is_exhausted(&self) -> bool {
        self.remaining == Some(0)
    }

    /// Refuses new calls while fewer than `min_remaining` requests are left
    /// and the window has not reset yet.
    pub fn guard(&self, min_remaining: u32, now_secs: u64) -> Result<(), GitHubApiError> {
        match (self.remaining, self.reset) {
            (Some(remaining), Some(reset)) if remaining < min_remaining && reset > now_secs => {
                Err(GitHubApiError::RateLimitProtection(remaining, reset))
            }
            _ => Ok(()),
        }
    }
}
