//! Serialization of a [WrappedStats] across URL boundaries.
//!
//! Image renderers receive the profile as query parameters: numbers as decimal
//! strings, nested structures as JSON text.

use serde::Serialize;
use url::form_urlencoded;

use crate::wrapped::types::WrappedStats;

pub const OG_IMAGE_PATH: &str = "/api/og";
pub const OG_IMAGE_WIDTH: u32 = 1080;
pub const OG_IMAGE_HEIGHT: u32 = 1350;
pub const DEFAULT_THEME: &str = "cyberpunk";

/// Builds the urlencoded query consumed by the OG image endpoint.
pub fn og_image_query(stats: &WrappedStats, theme: &str) -> Result<String, serde_json::Error> {
    let languages = serde_json::to_string(&stats.languages)?;
    let activity = serde_json::to_string(&stats.activity_by_period)?;
    let created = stats
        .created_at
        .map(|created| created.to_rfc3339())
        .unwrap_or_default();

    let query = form_urlencoded::Serializer::new(String::new())
        .append_pair("username", &stats.username)
        .append_pair("avatar", &stats.avatar_url)
        .append_pair("commits", &stats.total_commits.to_string())
        .append_pair("repos", &stats.total_public_repos.to_string())
        .append_pair("days", &stats.days_active.to_string())
        .append_pair("streak", &stats.longest_streak.to_string())
        .append_pair("currentStreak", &stats.current_streak.to_string())
        .append_pair("lang", &stats.top_language)
        .append_pair("month", &stats.most_active_month)
        .append_pair("prs", &stats.total_prs.to_string())
        .append_pair("stars", &stats.total_stars.to_string())
        .append_pair("style", &stats.coding_style.badge())
        .append_pair("theme", theme)
        .append_pair("roast", &stats.roast)
        .append_pair("repo", &stats.top_repo.name)
        .append_pair("repoStars", &stats.top_repo.stars.to_string())
        .append_pair("followers", &stats.followers.to_string())
        .append_pair("peakDay", &stats.most_active_day)
        .append_pair("created", &created)
        .append_pair("starred", &stats.total_starred.to_string())
        .append_pair("activity", &activity)
        .append_pair("languages", &languages)
        .finish();

    Ok(query)
}

/// Page and social metadata for sharing a wrapped profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareMetadata {
    pub title: String,
    pub description: String,
    pub og_image_url: String,
    pub og_image_width: u32,
    pub og_image_height: u32,
    pub og_image_alt: String,
    pub share_text: String,
    pub download_filename: String,
}

impl ShareMetadata {
    pub fn for_stats(stats: &WrappedStats, theme: &str) -> Result<Self, serde_json::Error> {
        let query = og_image_query(stats, theme)?;

        Ok(Self {
            title: format!("GitHub Wrapped {}: @{}", stats.year, stats.username),
            description: format!(
                "Check out my GitHub {} stats: {} commits, {} day streak, and my coding personality is \"{}\".",
                stats.year,
                stats.total_commits,
                stats.longest_streak,
                stats.coding_style.badge()
            ),
            og_image_url: format!("{OG_IMAGE_PATH}?{query}"),
            og_image_width: OG_IMAGE_WIDTH,
            og_image_height: OG_IMAGE_HEIGHT,
            og_image_alt: format!("GitHub Wrapped {} for {}", stats.year, stats.username),
            share_text: format!(
                "Check out my {} GitHub Wrapped! 🚀\n\n{} Commits\n{} Public Repos\n\nGenerate yours:",
                stats.year, stats.total_commits, stats.total_public_repos
            ),
            download_filename: format!("github-wrapped-{}-{}.png", stats.username, stats.year),
        })
    }
}
