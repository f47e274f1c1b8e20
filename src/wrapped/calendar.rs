//! Calendar reduction: active days, streaks and the busiest month/weekday.

use chrono::{Datelike, Weekday};

use crate::wrapped::tally::OrderedTally;
use crate::wrapped::types::ContributionDay;

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Reported when no day of the year has any contribution.
pub const DEFAULT_MONTH: &str = "January";
pub const DEFAULT_WEEKDAY: &str = "Wednesday";

pub fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Fold state for the calendar pass.
#[derive(Debug, Clone, Default)]
struct CalendarAccumulator {
    days_active: u32,
    current_streak: u32,
    longest_streak: u32,
    by_month: OrderedTally<&'static str>,
    by_weekday: OrderedTally<&'static str>,
}

impl CalendarAccumulator {
    fn step(mut self, day: &ContributionDay) -> Self {
        if day.contribution_count > 0 {
            self.days_active += 1;
            self.current_streak += 1;

            let count = u64::from(day.contribution_count);
            self.by_month.add(MONTH_NAMES[day.date.month0() as usize], count);
            self.by_weekday.add(weekday_name(day.date.weekday()), count);
        } else {
            self.longest_streak = self.longest_streak.max(self.current_streak);
            self.current_streak = 0;
        }
        self
    }

    fn finish(mut self) -> CalendarSummary {
        // A streak still running on the last day was never closed by a zero day.
        self.longest_streak = self.longest_streak.max(self.current_streak);

        CalendarSummary {
            days_active: self.days_active,
            longest_streak: self.longest_streak,
            current_streak: self.current_streak,
            most_active_month: self.by_month.leader().copied().unwrap_or(DEFAULT_MONTH),
            most_active_day: self.by_weekday.leader().copied().unwrap_or(DEFAULT_WEEKDAY),
            by_month: self.by_month,
            by_weekday: self.by_weekday,
        }
    }
}

/// Result of the calendar pass.
#[derive(Debug, Clone)]
pub struct CalendarSummary {
    pub days_active: u32,
    pub longest_streak: u32,
    /// Length of the streak still running on the last calendar day.
    pub current_streak: u32,
    pub most_active_month: &'static str,
    pub most_active_day: &'static str,
    /// Contributions summed per month, in first-seen order.
    pub by_month: OrderedTally<&'static str>,
    /// Contributions summed per weekday, in first-seen order.
    pub by_weekday: OrderedTally<&'static str>,
}

/// Reduces chronologically ordered days into a [CalendarSummary].
pub fn summarize_calendar(days: &[ContributionDay]) -> CalendarSummary {
    days.iter()
        .fold(CalendarAccumulator::default(), CalendarAccumulator::step)
        .finish()
}
