//! The stats aggregator: raw GitHub records in, [WrappedStats] out.
//!
//! Every pass is a pure fold over data that has already been fetched, so
//! [aggregate] can run concurrently for any number of requests.

pub mod calendar;
pub mod languages;
pub mod persona;
pub mod roast;
pub mod share;
pub mod tally;
pub mod top_repo;
pub mod types;

pub use share::ShareMetadata;
pub use types::*;

use chrono::FixedOffset;

use crate::wrapped::calendar::summarize_calendar;
use crate::wrapped::languages::rank_languages;
use crate::wrapped::persona::classify_persona;
use crate::wrapped::roast::{RoastInput, select_roast};
use crate::wrapped::top_repo::select_top_repo;

/// Derives the wrapped profile of a user from their raw GitHub year.
///
/// Commit timestamps are read in the `utc_offset` timezone. A missing
/// timestamp collection counts as empty; a missing calendar or repository
/// list is an error.
pub fn aggregate(raw: &RawProfile, utc_offset: FixedOffset) -> Result<WrappedStats, WrappedError> {
    let calendar = raw
        .calendar
        .as_ref()
        .ok_or(WrappedError::MissingCollection("contribution calendar"))?;
    let repos = raw
        .repositories
        .as_deref()
        .ok_or(WrappedError::MissingCollection("repositories"))?;
    let timestamps = raw.commit_timestamps.as_deref().unwrap_or_default();

    let days = summarize_calendar(&calendar.days);
    let persona = classify_persona(timestamps, utc_offset);
    let ranking = rank_languages(repos);
    let top_repo = select_top_repo(repos);

    let top_language = ranking.top_language().to_string();
    let roast = select_roast(&RoastInput {
        total_commits: calendar.total_contributions,
        language_count: ranking.languages.len(),
        top_language: &top_language,
        longest_streak: days.longest_streak,
        coding_style: persona.coding_style,
    });

    tracing::debug!(
        login = %raw.counters.login,
        year = raw.year,
        days = calendar.days.len(),
        repos = repos.len(),
        commit_samples = timestamps.len(),
        coding_style = %persona.coding_style,
        "Aggregated wrapped stats"
    );

    let counters = &raw.counters;
    Ok(WrappedStats {
        year: raw.year,
        username: counters.login.clone(),
        avatar_url: counters.avatar_url.clone(),
        followers: counters.follower_count,
        total_commits: calendar.total_contributions,
        total_public_repos: counters.public_repo_count,
        days_active: days.days_active,
        longest_streak: days.longest_streak,
        current_streak: days.current_streak,
        most_active_month: days.most_active_month.to_string(),
        most_active_day: days.most_active_day.to_string(),
        top_language,
        languages: ranking.languages,
        coding_style: persona.coding_style,
        total_prs: counters.total_pr_contributions,
        total_issues: counters.total_issue_contributions,
        total_reviews: counters.total_review_contributions,
        total_stars: repos.iter().map(|repo| repo.star_count).sum(),
        roast: roast.to_string(),
        top_repo,
        created_at: counters.account_created_at,
        total_starred: counters.starred_count,
        total_contributed_to: counters.contributed_to_count,
        activity_by_period: persona.activity_by_period,
    })
}
