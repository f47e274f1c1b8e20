//! Roast selection from an ordered rule table.

use crate::wrapped::types::CodingStyle;

/// Facts a roast rule may look at.
#[derive(Debug, Clone, Copy)]
pub struct RoastInput<'a> {
    pub total_commits: u32,
    pub language_count: usize,
    pub top_language: &'a str,
    pub longest_streak: u32,
    pub coding_style: CodingStyle,
}

/// A predicate paired with the value it yields when it matches.
pub struct Rule<I, T> {
    pub applies: fn(&I) -> bool,
    pub value: T,
}

/// Evaluates `rules` top to bottom and returns the value of the first match.
pub fn first_match<I, T: Copy>(rules: &[Rule<I, T>], input: &I) -> Option<T> {
    rules
        .iter()
        .find(|rule| (rule.applies)(input))
        .map(|rule| rule.value)
}

pub const DEFAULT_ROAST: &str = "You write code like a focused machine.";

/// The roast table, highest priority first.
///
/// Earlier rules shadow later ones: a prolific polyglot is told to touch grass.
pub fn roast_rules<'a>() -> [Rule<RoastInput<'a>, &'static str>; 9] {
    [
        Rule {
            applies: |i| i.total_commits < 10,
            value: "Lurker detected. Do you even git push?",
        },
        Rule {
            applies: |i| i.total_commits > 1000,
            value: "Go touch grass. Seriously.",
        },
        Rule {
            applies: |i| i.language_count > 6,
            value: "Jack of all trades, master of none.",
        },
        Rule {
            applies: |i| matches!(i.top_language, "JavaScript" | "TypeScript"),
            value: "Another frontend dev chasing the hype train.",
        },
        Rule {
            applies: |i| i.top_language == "Rust",
            value: "We get it, you rewrite everything in Rust.",
        },
        Rule {
            applies: |i| i.top_language == "Python",
            value: "Indentation error: whitespace on line 42.",
        },
        Rule {
            applies: |i| i.top_language == "Java",
            value: "Standard Enterprise Grade boilerplate generator.",
        },
        Rule {
            applies: |i| i.longest_streak > 30,
            value: "Consistency is key, but so is sleep.",
        },
        Rule {
            applies: |i| i.coding_style == CodingStyle::WeekendWarrior,
            value: "Weekend Warrior: Coding only when paid to do so? Oh wait, it's free.",
        },
    ]
}

pub fn select_roast(input: &RoastInput<'_>) -> &'static str {
    first_match(&roast_rules(), input).unwrap_or(DEFAULT_ROAST)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Input that matches no rule at all.
    fn quiet() -> RoastInput<'static> {
        RoastInput {
            total_commits: 500,
            language_count: 2,
            top_language: "Go",
            longest_streak: 5,
            coding_style: CodingStyle::EarlyBird,
        }
    }

    mod fn_first_match {
        use super::*;

        #[test]
        fn returns_first_matching_value() {
            let rules: [Rule<u32, char>; 3] = [
                Rule {
                    applies: |n| *n > 10,
                    value: 'a',
                },
                Rule {
                    applies: |n| *n > 5,
                    value: 'b',
                },
                Rule {
                    applies: |n| *n > 0,
                    value: 'c',
                },
            ];
            assert_eq!(first_match(&rules, &7), Some('b'));
            assert_eq!(first_match(&rules, &20), Some('a'));
            assert_eq!(first_match(&rules, &0), None);
        }
    }

    mod fn_select_roast {
        use super::*;

        #[test]
        fn default_when_nothing_matches() {
            assert_eq!(select_roast(&quiet()), DEFAULT_ROAST);
        }

        #[test]
        fn lurker_beats_everything() {
            let input = RoastInput {
                total_commits: 3,
                top_language: "Rust",
                longest_streak: 100,
                ..quiet()
            };
            assert_eq!(select_roast(&input), "Lurker detected. Do you even git push?");
        }

        #[test]
        fn touch_grass_shadows_polyglot() {
            let input = RoastInput {
                total_commits: 2000,
                language_count: 8,
                ..quiet()
            };
            assert_eq!(select_roast(&input), "Go touch grass. Seriously.");
        }

        #[test]
        fn polyglot_when_commits_are_moderate() {
            let input = RoastInput {
                language_count: 7,
                top_language: "Rust",
                ..quiet()
            };
            assert_eq!(select_roast(&input), "Jack of all trades, master of none.");
        }

        #[test]
        fn commit_boundaries_are_exclusive() {
            let ten = RoastInput {
                total_commits: 10,
                ..quiet()
            };
            assert_eq!(select_roast(&ten), DEFAULT_ROAST);

            let thousand = RoastInput {
                total_commits: 1000,
                ..quiet()
            };
            assert_eq!(select_roast(&thousand), DEFAULT_ROAST);
        }

        #[test]
        fn language_roasts() {
            let cases = [
                ("JavaScript", "Another frontend dev chasing the hype train."),
                ("TypeScript", "Another frontend dev chasing the hype train."),
                ("Rust", "We get it, you rewrite everything in Rust."),
                ("Python", "Indentation error: whitespace on line 42."),
                ("Java", "Standard Enterprise Grade boilerplate generator."),
            ];
            for (language, expected) in cases {
                let input = RoastInput {
                    top_language: language,
                    longest_streak: 60,
                    ..quiet()
                };
                assert_eq!(select_roast(&input), expected, "language {language}");
            }
        }

        #[test]
        fn streak_beats_weekend_warrior() {
            let input = RoastInput {
                longest_streak: 31,
                coding_style: CodingStyle::WeekendWarrior,
                ..quiet()
            };
            assert_eq!(select_roast(&input), "Consistency is key, but so is sleep.");

            let input = RoastInput {
                longest_streak: 30,
                coding_style: CodingStyle::WeekendWarrior,
                ..quiet()
            };
            assert_eq!(
                select_roast(&input),
                "Weekend Warrior: Coding only when paid to do so? Oh wait, it's free."
            );
        }
    }
}
