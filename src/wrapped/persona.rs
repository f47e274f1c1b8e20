//! Behavioral persona from commit timestamps.

use chrono::{Datelike, FixedOffset, Timelike, Weekday};

use crate::wrapped::types::{ActivityByPeriod, CodingStyle, CommitTimestamp};

/// Part of the day a commit falls into, by local hour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayPeriod {
    /// `[5, 12)`
    Morning,
    /// `[12, 17)`
    Daytime,
    /// `[17, 23)`
    Evening,
    /// `[23, 24)` and `[0, 5)`
    Night,
}

impl DayPeriod {
    pub fn from_hour(hour: u32) -> Self {
        match hour {
            5..=11 => DayPeriod::Morning,
            12..=16 => DayPeriod::Daytime,
            17..=22 => DayPeriod::Evening,
            _ => DayPeriod::Night,
        }
    }
}

/// Fold state for the persona pass.
#[derive(Debug, Clone, Copy, Default)]
struct PersonaAccumulator {
    activity: ActivityByPeriod,
    weekend: u32,
    samples: u32,
}

impl PersonaAccumulator {
    fn step(mut self, timestamp: &CommitTimestamp, offset: FixedOffset) -> Self {
        let local = timestamp.occurred_at.with_timezone(&offset);

        match DayPeriod::from_hour(local.hour()) {
            DayPeriod::Morning => self.activity.morning += 1,
            DayPeriod::Daytime => self.activity.daytime += 1,
            DayPeriod::Evening => self.activity.evening += 1,
            DayPeriod::Night => self.activity.night += 1,
        }
        if matches!(local.weekday(), Weekday::Sat | Weekday::Sun) {
            self.weekend += 1;
        }
        self.samples += 1;
        self
    }

    fn classify(&self) -> CodingStyle {
        if self.samples == 0 {
            return CodingStyle::Balanced;
        }

        // weekend / samples > 0.4, kept in integers.
        if u64::from(self.weekend) * 5 > u64::from(self.samples) * 2 {
            return CodingStyle::WeekendWarrior;
        }

        let activity = self.activity;
        let max = activity
            .night
            .max(activity.morning)
            .max(activity.daytime)
            .max(activity.evening);

        // Ties go to the earliest entry.
        [
            (activity.night, CodingStyle::NightOwl),
            (activity.morning, CodingStyle::EarlyBird),
            (activity.daytime, CodingStyle::NineToFiver),
            (activity.evening, CodingStyle::BurnerOil),
        ]
        .into_iter()
        .find(|(count, _)| *count == max)
        .map_or(CodingStyle::Balanced, |(_, style)| style)
    }
}

/// Result of the persona pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Persona {
    pub activity_by_period: ActivityByPeriod,
    pub weekend_commits: u32,
    pub coding_style: CodingStyle,
}

/// Buckets commit timestamps by local time of day and picks a [CodingStyle].
///
/// `offset` shifts every timestamp into the viewer's local time before the
/// hour and weekday are read.
pub fn classify_persona(timestamps: &[CommitTimestamp], offset: FixedOffset) -> Persona {
    let acc = timestamps
        .iter()
        .fold(PersonaAccumulator::default(), |acc, ts| acc.step(ts, offset));

    Persona {
        activity_by_period: acc.activity,
        weekend_commits: acc.weekend,
        coding_style: acc.classify(),
    }
}
