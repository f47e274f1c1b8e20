#![allow(dead_code)]

use chrono::{NaiveDate, TimeZone, Utc};
use github_wrapped::config::AppConfig;
use github_wrapped::wrapped::{
    CommitTimestamp, ContributionCalendar, ContributionDay, PrimaryLanguage, ProfileCounters,
    RawProfile, RepositorySummary,
};
use std::env;

/// Setup function for integration tests that require environment variables
pub fn setup_integration_test() -> AppConfig {
    // Load .env file if it exists
    dotenvy::dotenv().ok();
    AppConfig::from_env().expect("valid test configuration")
}

/// Get test GitHub username from environment or use default
pub fn get_test_username() -> String {
    env::var("TEST_GITHUB_USERNAME").unwrap_or_else(|_| "octocat".to_string())
}

/// Get a known invalid GitHub username for testing
pub fn get_invalid_username() -> String {
    "aaaaaaaaaaaaaaaaaaaaaabbbb".to_string()
}

/// Consecutive calendar days of 2025 with the given contribution counts.
pub fn calendar(counts: &[u32]) -> ContributionCalendar {
    let start = NaiveDate::from_ymd_opt(2025, 1, 1).expect("valid date");
    let days: Vec<ContributionDay> = start
        .iter_days()
        .zip(counts)
        .map(|(date, &contribution_count)| ContributionDay {
            date,
            contribution_count,
        })
        .collect();

    ContributionCalendar {
        total_contributions: counts.iter().sum(),
        days,
    }
}

pub fn repo(name: &str, stars: u32, language: Option<&str>) -> RepositorySummary {
    RepositorySummary {
        name: name.to_string(),
        description: None,
        star_count: stars,
        primary_language: language.map(|name| PrimaryLanguage {
            name: name.to_string(),
            color: Some("#123456".to_string()),
        }),
    }
}

/// A commit on 2025-01-`day` at `hour`:15 UTC.
pub fn commit_at(day: u32, hour: u32) -> CommitTimestamp {
    CommitTimestamp {
        occurred_at: Utc
            .with_ymd_and_hms(2025, 1, day, hour, 15, 0)
            .single()
            .expect("valid timestamp"),
    }
}

pub fn raw_profile(
    calendar: ContributionCalendar,
    repositories: Vec<RepositorySummary>,
    commit_timestamps: Vec<CommitTimestamp>,
) -> RawProfile {
    RawProfile {
        year: 2025,
        counters: ProfileCounters {
            login: "octocat".to_string(),
            avatar_url: "https://avatars.githubusercontent.com/u/583231".to_string(),
            follower_count: 10,
            public_repo_count: repositories.len() as u32,
            ..Default::default()
        },
        calendar: Some(calendar),
        repositories: Some(repositories),
        commit_timestamps: Some(commit_timestamps),
    }
}
