pub mod api;
pub mod cache;
pub mod rate_limit;
pub mod types;

pub use api::GitHubApi;
pub use cache::{CacheConfig, GitHubCache};
pub use rate_limit::RateLimitSnapshot;
pub use types::GitHubApiError;
