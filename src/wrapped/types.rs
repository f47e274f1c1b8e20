use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A single day of the contribution calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionDay {
    pub date: NaiveDate,
    pub contribution_count: u32,
}

/// The contribution calendar for the whole year, flattened out of its week grouping.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionCalendar {
    /// GitHub's own total for the calendar window.
    pub total_contributions: u32,
    /// Days in chronological order.
    pub days: Vec<ContributionDay>,
}

/// One recorded commit contribution event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitTimestamp {
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrimaryLanguage {
    pub name: String,
    /// Linguist color as a hex string, e.g. `#dea584`.
    pub color: Option<String>,
}

/// Summary of a repository owned by the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositorySummary {
    pub name: String,
    pub description: Option<String>,
    pub star_count: u32,
    pub primary_language: Option<PrimaryLanguage>,
}

/// Scalar profile fields passed through to the wrapped profile as-is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileCounters {
    pub login: String,
    pub avatar_url: String,
    pub follower_count: u32,
    pub public_repo_count: u32,
    pub account_created_at: Option<DateTime<Utc>>,
    pub starred_count: u32,
    pub contributed_to_count: u32,
    pub total_pr_contributions: u32,
    pub total_issue_contributions: u32,
    pub total_review_contributions: u32,
}

/// Everything fetched from GitHub for a single (user, year) pair.
///
/// A `None` collection means the upstream payload did not carry it at all,
/// which is different from an empty collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawProfile {
    pub year: i32,
    pub counters: ProfileCounters,
    pub calendar: Option<ContributionCalendar>,
    pub repositories: Option<Vec<RepositorySummary>>,
    pub commit_timestamps: Option<Vec<CommitTimestamp>>,
}

/// Commit counts split by the local time of day they happened at.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityByPeriod {
    pub morning: u32,
    pub daytime: u32,
    pub evening: u32,
    pub night: u32,
}

impl ActivityByPeriod {
    pub fn total(&self) -> u32 {
        self.morning + self.daytime + self.evening + self.night
    }
}

/// Coding persona derived from when commits happen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CodingStyle {
    #[serde(rename = "Weekend Warrior")]
    WeekendWarrior,
    #[serde(rename = "Night Owl")]
    NightOwl,
    #[serde(rename = "Early Bird")]
    EarlyBird,
    #[serde(rename = "9-to-5er")]
    NineToFiver,
    #[serde(rename = "Burner Oil")]
    BurnerOil,
    #[serde(rename = "Balanced")]
    Balanced,
}

impl CodingStyle {
    pub fn label(&self) -> &'static str {
        match self {
            CodingStyle::WeekendWarrior => "Weekend Warrior",
            CodingStyle::NightOwl => "Night Owl",
            CodingStyle::EarlyBird => "Early Bird",
            CodingStyle::NineToFiver => "9-to-5er",
            CodingStyle::BurnerOil => "Burner Oil",
            CodingStyle::Balanced => "Balanced",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            CodingStyle::WeekendWarrior => "⚔️",
            CodingStyle::NightOwl => "🦉",
            CodingStyle::EarlyBird => "🌅",
            CodingStyle::NineToFiver => "🏢",
            CodingStyle::BurnerOil => "🔥",
            CodingStyle::Balanced => "⚖️",
        }
    }

    /// Label followed by its emoji, as shown on cards.
    pub fn badge(&self) -> String {
        format!("{} {}", self.label(), self.emoji())
    }
}

impl std::fmt::Display for CodingStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Share of the user's repositories having this language as primary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LanguageShare {
    pub name: String,
    pub percent: f64,
    pub color: String,
}

/// The most starred repository of the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopRepo {
    pub name: String,
    pub stars: u32,
    pub description: String,
    pub language: String,
}

/// The derived "year in review" profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WrappedStats {
    pub year: i32,
    pub username: String,
    pub avatar_url: String,
    pub followers: u32,
    pub total_commits: u32,
    pub total_public_repos: u32,
    pub days_active: u32,
    pub longest_streak: u32,
    pub current_streak: u32,
    pub most_active_month: String,
    pub most_active_day: String,
    pub top_language: String,
    pub languages: Vec<LanguageShare>,
    pub coding_style: CodingStyle,
    #[serde(rename = "totalPRs")]
    pub total_prs: u32,
    pub total_issues: u32,
    pub total_reviews: u32,
    pub total_stars: u32,
    pub roast: String,
    pub top_repo: TopRepo,
    pub created_at: Option<DateTime<Utc>>,
    pub total_starred: u32,
    pub total_contributed_to: u32,
    pub activity_by_period: ActivityByPeriod,
}

/// Errors raised when the raw data is missing a required collection.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum WrappedError {
    #[error("Missing required collection: {0}")]
    MissingCollection(&'static str),
}
