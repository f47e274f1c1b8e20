use moka::future::Cache;
use std::{env, time::Duration};

use crate::github::types::GitHubApiError;
use crate::wrapped::RawProfile;

/// Cache configuration settings
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Maximum cache capacity in MB
    pub max_capacity_mb: u64,
    /// TTL for raw profiles fetched from GitHub
    pub raw_profile_ttl: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_capacity_mb: 32,
            raw_profile_ttl: Duration::from_secs(900), // 15 minutes
        }
    }
}

impl CacheConfig {
    /// Load cache configuration from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let max_capacity_mb = env::var("CACHE_MAX_CAPACITY_MB")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.max_capacity_mb);

        let raw_profile_ttl = env::var("CACHE_RAW_PROFILE_TTL_SECONDS")
            .ok()
            .and_then(|v| v.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(defaults.raw_profile_ttl);

        Self {
            max_capacity_mb,
            raw_profile_ttl,
        }
    }
}

/// Cache key for a user's fetched year.
///
/// Logins are case-insensitive on GitHub, so the key is lowercased.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub struct CacheKey {
    pub username: String,
    pub year: i32,
}

impl CacheKey {
    pub fn raw_profile(username: &str, year: i32) -> Self {
        Self {
            username: username.to_ascii_lowercase(),
            year,
        }
    }
}

/// Rough in-memory size of a raw profile, used as its cache weight.
fn estimate_weight(profile: &RawProfile) -> u32 {
    use crate::wrapped::{CommitTimestamp, ContributionDay, RepositorySummary};
    use std::mem::size_of;

    let counters = profile.counters.login.len() + profile.counters.avatar_url.len();
    let days = profile
        .calendar
        .as_ref()
        .map_or(0, |c| c.days.len() * size_of::<ContributionDay>());
    let repos = profile.repositories.as_ref().map_or(0, |repos| {
        repos
            .iter()
            .map(|repo| {
                size_of::<RepositorySummary>()
                    + repo.name.len()
                    + repo.description.as_ref().map_or(0, |d| d.len())
            })
            .sum()
    });
    let timestamps = profile
        .commit_timestamps
        .as_ref()
        .map_or(0, |t| t.len() * size_of::<CommitTimestamp>());

    (size_of::<RawProfile>() + counters + days + repos + timestamps)
        .try_into()
        .unwrap_or(u32::MAX)
}

/// Cache of raw GitHub data.
///
/// Only fetched records are cached; wrapped profiles are derived from them on
/// every request.
pub struct GitHubCache {
    profiles: Cache<CacheKey, RawProfile>,
}

impl GitHubCache {
    /// Create a new cache instance with the given configuration
    pub fn new(config: &CacheConfig) -> Self {
        tracing::info!(
            "Initializing GitHub cache with capacity: {}MB, raw profile TTL: {}s",
            config.max_capacity_mb,
            config.raw_profile_ttl.as_secs()
        );

        let profiles = Cache::builder()
            .weigher(|_key: &CacheKey, value: &RawProfile| estimate_weight(value))
            .max_capacity(config.max_capacity_mb * 1024 * 1024)
            .time_to_live(config.raw_profile_ttl)
            .build();

        Self { profiles }
    }

    /// Get or insert a user's raw year with the configured TTL
    pub async fn get_or_insert_raw_profile<F, Fut>(
        &self,
        username: &str,
        year: i32,
        fetch_fn: F,
    ) -> Result<RawProfile, GitHubApiError>
    where
        F: FnOnce() -> Fut,
        Fut: std::future::Future<Output = Result<RawProfile, GitHubApiError>>,
    {
        let key = CacheKey::raw_profile(username, year);

        if let Some(profile) = self.profiles.get(&key).await {
            tracing::debug!("Cache hit for raw profile: {} ({})", username, year);
            return Ok(profile);
        }

        tracing::debug!("Cache miss for raw profile: {} ({}), fetching...", username, year);
        let profile = fetch_fn().await?;

        // Insert into cache (TTL is handled by the cache configuration)
        self.profiles.insert(key, profile.clone()).await;

        Ok(profile)
    }

    /// Get current cache statistics for monitoring
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entry_count: self.profiles.entry_count(),
            weighted_size: self.profiles.weighted_size(),
        }
    }
}

/// Cache statistics for monitoring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    /// Number of cached raw profiles
    pub entry_count: u64,
    /// Weighted size of the cache in bytes
    pub weighted_size: u64,
}
