use reqwest::Client;
use serde_json::json;
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::config::AppConfig;
use crate::github::rate_limit::RateLimitSnapshot;
use crate::github::types::*;
use crate::wrapped::RawProfile;

/// The first year GitHub has contribution data for.
pub const FIRST_GITHUB_YEAR: i32 = 2008;

/// GitHub GraphQL client context.
///
/// Built once per process from [AppConfig] and shared by reference; it keeps
/// the last rate limit snapshot GitHub reported.
pub struct GitHubApi {
    client: Client,
    token: Option<String>,
    graphql_url: String,
    min_remaining: u32,
    rate_limit: Mutex<RateLimitSnapshot>,
}

impl GitHubApi {
    /// Create a new GitHub API client
    pub fn new(config: &AppConfig) -> Self {
        Self {
            client: Client::new(),
            token: config.github_token.clone(),
            graphql_url: config.graphql_url.clone(),
            min_remaining: config.rate_limit_min_remaining,
            rate_limit: Mutex::new(RateLimitSnapshot::default()),
        }
    }

    /// Last rate limit state reported by GitHub.
    pub fn rate_limit(&self) -> RateLimitSnapshot {
        self.rate_limit
            .lock()
            .map(|snapshot| *snapshot)
            .unwrap_or_default()
    }

    fn record_rate_limit(&self, snapshot: RateLimitSnapshot) {
        if let Ok(mut current) = self.rate_limit.lock() {
            *current = snapshot;
        }
    }

    /// Validate username format
    pub fn validate_username(username: &str) -> Result<(), GitHubApiError> {
        if username.trim().is_empty() {
            return Err(GitHubApiError::InvalidUsername(
                "Username cannot be empty".to_string(),
            ));
        }
        if username.contains(' ') {
            return Err(GitHubApiError::InvalidUsername(
                "Username cannot contain spaces".to_string(),
            ));
        }
        if username.len() > 39 {
            return Err(GitHubApiError::InvalidUsername(
                "Username too long".to_string(),
            ));
        }

        // Basic GitHub username validation
        let valid_chars = username
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-');
        if !valid_chars {
            return Err(GitHubApiError::InvalidUsername(
                "Username contains invalid characters".to_string(),
            ));
        }

        if username.starts_with('-') || username.ends_with('-') {
            return Err(GitHubApiError::InvalidUsername(
                "Username cannot start or end with hyphen".to_string(),
            ));
        }

        Ok(())
    }

    /// Checks that `year` has contribution data that can exist by `current_year`.
    pub fn validate_year(year: i32, current_year: i32) -> Result<(), GitHubApiError> {
        if (FIRST_GITHUB_YEAR..=current_year).contains(&year) {
            Ok(())
        } else {
            Err(GitHubApiError::InvalidYear(year))
        }
    }

    /// The contribution window for a calendar year, as GraphQL `DateTime` strings.
    pub fn year_window(year: i32) -> (String, String) {
        (
            format!("{year}-01-01T00:00:00Z"),
            format!("{year}-12-31T23:59:59Z"),
        )
    }

    /// Get the GraphQL query for fetching one user's year
    fn get_wrapped_query() -> &'static str {
        r#"
        query GetWrappedYear($login: String!, $from: DateTime!, $to: DateTime!) {
            user(login: $login) {
                login
                avatarUrl
                createdAt
                followers {
                    totalCount
                }
                publicRepositories: repositories(privacy: PUBLIC, ownerAffiliations: OWNER) {
                    totalCount
                }
                starredRepositories {
                    totalCount
                }
                repositoriesContributedTo(first: 1, contributionTypes: [COMMIT, PULL_REQUEST, ISSUE]) {
                    totalCount
                }
                contributionsCollection(from: $from, to: $to) {
                    totalPullRequestContributions
                    totalIssueContributions
                    totalPullRequestReviewContributions
                    contributionCalendar {
                        totalContributions
                        weeks {
                            contributionDays {
                                contributionCount
                                date
                            }
                        }
                    }
                    commitContributionsByRepository(maxRepositories: 100) {
                        contributions(first: 100) {
                            nodes {
                                occurredAt
                            }
                        }
                    }
                }
                repositories(first: 100, ownerAffiliations: OWNER, orderBy: {field: PUSHED_AT, direction: DESC}) {
                    nodes {
                        name
                        description
                        stargazers {
                            totalCount
                        }
                        languages(first: 1, orderBy: {field: SIZE, direction: DESC}) {
                            nodes {
                                name
                                color
                            }
                        }
                    }
                }
            }
        }
        "#
    }

    /// Execute a GraphQL query
    async fn execute_query<T>(
        &self,
        query: &str,
        variables: serde_json::Value,
    ) -> Result<GraphQLResponse<T>, GitHubApiError>
    where
        T: serde::de::DeserializeOwned,
    {
        let token = self.token.as_ref().ok_or(GitHubApiError::MissingToken)?;

        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        self.rate_limit().guard(self.min_remaining, now)?;

        let payload = json!({
            "query": query,
            "variables": variables
        });

        let response = self
            .client
            .post(&self.graphql_url)
            .header("Authorization", format!("Bearer {}", token))
            .header("User-Agent", "github-wrapped")
            .json(&payload)
            .send()
            .await?;

        let snapshot = RateLimitSnapshot::from_headers(response.headers());
        if let Some(snapshot) = snapshot {
            self.record_rate_limit(snapshot);
        }

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(GitHubApiError::Unauthorized);
        }

        let exhausted = snapshot.is_some_and(|s| s.is_exhausted());
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS
            || (status == reqwest::StatusCode::FORBIDDEN && exhausted)
        {
            tracing::warn!(%status, "GitHub rate limit exceeded");
            return Err(GitHubApiError::RateLimitExceeded);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GitHubApiError::GraphQLError(format!(
                "Unexpected status {status}: {body}"
            )));
        }

        let response_body: GraphQLResponse<T> = response.json().await?;
        Ok(response_body)
    }

    /// Fetch a user's contribution year from GitHub as raw records
    #[tracing::instrument(skip(self))]
    pub async fn fetch_wrapped_year(
        &self,
        username: &str,
        year: i32,
    ) -> Result<RawProfile, GitHubApiError> {
        Self::validate_username(username)?;

        let (from, to) = Self::year_window(year);
        let variables = json!({
            "login": username,
            "from": from,
            "to": to,
        });

        let response: GraphQLResponse<WrappedQueryResponse> =
            self.execute_query(Self::get_wrapped_query(), variables).await?;

        // Handle GraphQL errors
        if let Some(errors) = response.errors
            && let Some(error) = errors.first()
        {
            if error.error_type.as_deref() == Some("NOT_FOUND") {
                return Err(GitHubApiError::UserNotFound);
            }
            return Err(GitHubApiError::GraphQLError(error.message.clone()));
        }

        let user_response = response.data.ok_or(GitHubApiError::GraphQLError(
            "No data in response".to_string(),
        ))?;
        let user = user_response.user.ok_or(GitHubApiError::UserNotFound)?;

        tracing::debug!("Fetched contribution year {} for {}", year, user.login);

        Ok(user.into_raw_profile(year))
    }
}
