use std::cmp::Reverse;

use crate::wrapped::languages::NO_LANGUAGE;
use crate::wrapped::types::{RepositorySummary, TopRepo};

const NO_DESCRIPTION: &str = "No description provided.";

impl TopRepo {
    /// Placeholder used when the user owns no repositories.
    pub fn sentinel() -> Self {
        Self {
            name: "N/A".to_string(),
            stars: 0,
            description: "No top project found.".to_string(),
            language: NO_LANGUAGE.to_string(),
        }
    }
}

impl From<&RepositorySummary> for TopRepo {
    fn from(repo: &RepositorySummary) -> Self {
        Self {
            name: repo.name.clone(),
            stars: repo.star_count,
            description: repo
                .description
                .clone()
                .unwrap_or_else(|| NO_DESCRIPTION.to_string()),
            language: repo
                .primary_language
                .as_ref()
                .map_or_else(|| NO_LANGUAGE.to_string(), |lang| lang.name.clone()),
        }
    }
}

/// Picks the most starred repository; the earliest one wins on equal stars.
pub fn select_top_repo(repos: &[RepositorySummary]) -> TopRepo {
    // `min_by_key` returns the first of several equal minima.
    repos
        .iter()
        .min_by_key(|repo| Reverse(repo.star_count))
        .map_or_else(TopRepo::sentinel, TopRepo::from)
}
