use crate::wrapped::tally::OrderedTally;
use crate::wrapped::types::{LanguageShare, RepositorySummary};

/// Maximum number of languages kept in the ranking.
pub const MAX_LANGUAGES: usize = 5;
/// Used for `top_language` when no repository declares a primary language.
pub const NO_LANGUAGE: &str = "N/A";
/// Used when GitHub has no linguist color for a language.
pub const FALLBACK_COLOR: &str = "#ccc";

/// Ranked primary languages of the user's repositories.
#[derive(Debug, Clone, PartialEq)]
pub struct LanguageRanking {
    /// Top languages, most used first.
    pub languages: Vec<LanguageShare>,
    /// Number of repositories that declare a primary language.
    pub repos_with_language: u64,
}

impl LanguageRanking {
    pub fn top_language(&self) -> &str {
        self.languages
            .first()
            .map_or(NO_LANGUAGE, |lang| lang.name.as_str())
    }
}

/// Tallies primary languages per repository and ranks them by repository count.
///
/// Languages with the same count keep the order they were first seen in.
pub fn rank_languages(repos: &[RepositorySummary]) -> LanguageRanking {
    let mut counts: OrderedTally<&str> = OrderedTally::new();
    // First color seen for a language wins.
    let mut colors: Vec<(&str, &str)> = Vec::new();

    for lang in repos.iter().filter_map(|repo| repo.primary_language.as_ref()) {
        let name = lang.name.as_str();
        if counts.get(&name).is_none() {
            let color = lang.color.as_deref().unwrap_or(FALLBACK_COLOR);
            colors.push((name, color));
        }
        counts.add(name, 1);
    }

    let total = counts.total();
    let mut ranked: Vec<(&str, u64)> = counts.iter().map(|(name, count)| (*name, count)).collect();
    // `sort_by` is stable, which keeps first-seen order among equal counts.
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked.truncate(MAX_LANGUAGES);

    let languages = ranked
        .into_iter()
        .map(|(name, count)| {
            let percent = if total > 0 {
                count as f64 / total as f64 * 100.0
            } else {
                0.0
            };
            let color = colors
                .iter()
                .find(|(n, _)| *n == name)
                .map_or(FALLBACK_COLOR, |(_, c)| *c);

            LanguageShare {
                name: name.to_string(),
                percent,
                color: color.to_string(),
            }
        })
        .collect();

    LanguageRanking {
        languages,
        repos_with_language: total,
    }
}
