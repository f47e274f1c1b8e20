use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;

use crate::wrapped::{
    CommitTimestamp, ContributionCalendar, ContributionDay, PrimaryLanguage, ProfileCounters,
    RawProfile, RepositorySummary,
};

/// GitHub API error types
#[derive(thiserror::Error, Debug)]
pub enum GitHubApiError {
    #[error("User not found")]
    UserNotFound,
    #[error("Invalid username: {0}")]
    InvalidUsername(String),
    #[error("Invalid year: {0}")]
    InvalidYear(i32),
    #[error("Rate limit exceeded")]
    RateLimitExceeded,
    #[error("Rate limit protection: {0} requests remaining until {1}")]
    RateLimitProtection(u32, u64),
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),
    #[error("GraphQL error: {0}")]
    GraphQLError(String),
    #[error("Missing GitHub token")]
    MissingToken,
    #[error("GitHub rejected the configured token")]
    Unauthorized,
}

/// GraphQL response wrapper
#[derive(Debug, Deserialize)]
pub struct GraphQLResponse<T> {
    pub data: Option<T>,
    pub errors: Option<Vec<GraphQLError>>,
}

#[derive(Debug, Deserialize)]
pub struct GraphQLError {
    pub message: String,
    #[serde(rename = "type")]
    pub error_type: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct WrappedQueryResponse {
    pub user: Option<WrappedUserData>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WrappedUserData {
    pub login: String,
    pub avatar_url: String,
    pub created_at: Option<DateTime<Utc>>,
    pub followers: CountableConnection,
    pub public_repositories: CountableConnection,
    pub starred_repositories: CountableConnection,
    pub repositories_contributed_to: CountableConnection,
    pub contributions_collection: ContributionsCollection,
    pub repositories: Option<RepositoriesConnection>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CountableConnection {
    #[serde(rename = "totalCount")]
    pub total_count: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionsCollection {
    #[serde(default)]
    pub total_pull_request_contributions: u32,
    #[serde(default)]
    pub total_issue_contributions: u32,
    #[serde(default)]
    pub total_pull_request_review_contributions: u32,
    pub contribution_calendar: Option<ContributionCalendarData>,
    #[serde(default)]
    pub commit_contributions_by_repository: Option<Vec<CommitContributionsByRepository>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionCalendarData {
    pub total_contributions: u32,
    pub weeks: Vec<ContributionWeek>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionWeek {
    pub contribution_days: Vec<ContributionDayData>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionDayData {
    pub contribution_count: u32,
    pub date: NaiveDate,
}

#[derive(Debug, Deserialize)]
pub struct CommitContributionsByRepository {
    pub contributions: CommitContributionConnection,
}

#[derive(Debug, Deserialize)]
pub struct CommitContributionConnection {
    pub nodes: Vec<CommitContributionNode>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitContributionNode {
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct RepositoriesConnection {
    pub nodes: Vec<RepositoryNode>,
}

#[derive(Debug, Deserialize)]
pub struct RepositoryNode {
    pub name: String,
    pub description: Option<String>,
    pub stargazers: CountableConnection,
    pub languages: Option<LanguageConnection>,
}

#[derive(Debug, Deserialize)]
pub struct LanguageConnection {
    pub nodes: Vec<LanguageNode>,
}

#[derive(Debug, Deserialize)]
pub struct LanguageNode {
    pub name: String,
    pub color: Option<String>,
}

impl From<RepositoryNode> for RepositorySummary {
    fn from(node: RepositoryNode) -> Self {
        // Languages are requested ordered by size, so the first one is primary.
        let primary_language = node
            .languages
            .and_then(|langs| langs.nodes.into_iter().next())
            .map(|lang| PrimaryLanguage {
                name: lang.name,
                color: lang.color,
            });

        Self {
            name: node.name,
            description: node.description,
            star_count: node.stargazers.total_count,
            primary_language,
        }
    }
}

impl From<ContributionCalendarData> for ContributionCalendar {
    fn from(calendar: ContributionCalendarData) -> Self {
        Self {
            total_contributions: calendar.total_contributions,
            days: calendar
                .weeks
                .into_iter()
                .flat_map(|week| week.contribution_days)
                .map(|day| ContributionDay {
                    date: day.date,
                    contribution_count: day.contribution_count,
                })
                .collect(),
        }
    }
}

impl WrappedUserData {
    /// Flattens the GraphQL payload into the raw records the aggregator reads.
    pub fn into_raw_profile(self, year: i32) -> RawProfile {
        let collection = self.contributions_collection;

        let counters = ProfileCounters {
            login: self.login,
            avatar_url: self.avatar_url,
            follower_count: self.followers.total_count,
            public_repo_count: self.public_repositories.total_count,
            account_created_at: self.created_at,
            starred_count: self.starred_repositories.total_count,
            contributed_to_count: self.repositories_contributed_to.total_count,
            total_pr_contributions: collection.total_pull_request_contributions,
            total_issue_contributions: collection.total_issue_contributions,
            total_review_contributions: collection.total_pull_request_review_contributions,
        };

        let commit_timestamps = collection.commit_contributions_by_repository.map(|repos| {
            repos
                .into_iter()
                .flat_map(|repo| repo.contributions.nodes)
                .map(|node| CommitTimestamp {
                    occurred_at: node.occurred_at,
                })
                .collect()
        });

        RawProfile {
            year,
            counters,
            calendar: collection.contribution_calendar.map(ContributionCalendar::from),
            repositories: self
                .repositories
                .map(|repos| repos.nodes.into_iter().map(RepositorySummary::from).collect()),
            commit_timestamps,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAYLOAD: &str = r##"{
        "data": {
            "user": {
                "login": "octocat",
                "avatarUrl": "https://avatars.githubusercontent.com/u/583231",
                "createdAt": "2011-01-25T18:44:36Z",
                "followers": { "totalCount": 10 },
                "publicRepositories": { "totalCount": 8 },
                "starredRepositories": { "totalCount": 3 },
                "repositoriesContributedTo": { "totalCount": 2 },
                "contributionsCollection": {
                    "totalPullRequestContributions": 5,
                    "totalIssueContributions": 4,
                    "totalPullRequestReviewContributions": 1,
                    "contributionCalendar": {
                        "totalContributions": 3,
                        "weeks": [
                            { "contributionDays": [
                                { "contributionCount": 1, "date": "2025-01-01" },
                                { "contributionCount": 0, "date": "2025-01-02" }
                            ] },
                            { "contributionDays": [
                                { "contributionCount": 2, "date": "2025-01-03" }
                            ] }
                        ]
                    },
                    "commitContributionsByRepository": [
                        { "contributions": { "nodes": [
                            { "occurredAt": "2025-01-01T08:00:00Z" },
                            { "occurredAt": "2025-01-03T22:00:00Z" }
                        ] } }
                    ]
                },
                "repositories": { "nodes": [
                    {
                        "name": "hello-world",
                        "description": null,
                        "stargazers": { "totalCount": 7 },
                        "languages": { "nodes": [ { "name": "Rust", "color": "#dea584" } ] }
                    },
                    {
                        "name": "empty",
                        "description": "Nothing here",
                        "stargazers": { "totalCount": 0 },
                        "languages": { "nodes": [] }
                    }
                ] }
            }
        }
    }"##;

    mod fn_into_raw_profile {
        use super::*;
        use pretty_assertions::assert_eq;

        fn raw() -> RawProfile {
            let response: GraphQLResponse<WrappedQueryResponse> =
                serde_json::from_str(PAYLOAD).unwrap();
            response
                .data
                .and_then(|data| data.user)
                .unwrap()
                .into_raw_profile(2025)
        }

        #[test]
        fn flattens_calendar_weeks_in_order() {
            let calendar = raw().calendar.unwrap();
            assert_eq!(calendar.total_contributions, 3);
            let counts: Vec<u32> = calendar.days.iter().map(|d| d.contribution_count).collect();
            assert_eq!(counts, vec![1, 0, 2]);
        }

        #[test]
        fn maps_repositories_and_primary_language() {
            let repos = raw().repositories.unwrap();
            assert_eq!(repos.len(), 2);
            assert_eq!(repos[0].star_count, 7);
            assert_eq!(
                repos[0].primary_language.as_ref().map(|l| l.name.as_str()),
                Some("Rust")
            );
            assert_eq!(repos[1].primary_language, None);
            assert_eq!(repos[1].description.as_deref(), Some("Nothing here"));
        }

        #[test]
        fn collects_commit_timestamps_and_counters() {
            let raw = raw();
            assert_eq!(raw.commit_timestamps.map(|t| t.len()), Some(2));
            assert_eq!(raw.counters.login, "octocat");
            assert_eq!(raw.counters.public_repo_count, 8);
            assert_eq!(raw.counters.total_pr_contributions, 5);
            assert_eq!(raw.year, 2025);
        }

        #[test]
        fn absent_commit_contributions_stay_absent() {
            let payload = PAYLOAD.replace("commitContributionsByRepository", "unrelatedField");
            let response: GraphQLResponse<WrappedQueryResponse> =
                serde_json::from_str(&payload).unwrap();
            let raw = response
                .data
                .and_then(|data| data.user)
                .unwrap()
                .into_raw_profile(2025);
            assert!(raw.commit_timestamps.is_none());
        }
    }
}
