use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

//
// ─── STREAK OUTCOME ────────────────────────────────────────────────────────────
//

/// How meeting the daily goal on a given date moves the streak.
///
/// Produced by [`classify`] from the last practice date and today's date.
/// `UserStats::record_goal_met` applies it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StreakOutcome {
    /// No previous practice date: the streak starts at one.
    Started,
    /// The goal was last met yesterday: the streak grows by one.
    Extended,
    /// One or more days were missed: the streak restarts at one.
    Broken { missed_days: u32 },
    /// The goal was already met today: nothing changes.
    SameDay,
    /// Today is before the last practice date. Nothing changes.
    ClockSkew { last: NaiveDate },
}

impl StreakOutcome {
    /// Returns true if applying this outcome changes the stored stats.
    #[must_use]
    pub fn changes_stats(self) -> bool {
        matches!(
            self,
            StreakOutcome::Started | StreakOutcome::Extended | StreakOutcome::Broken { .. }
        )
    }
}

//
// ─── CLASSIFICATION ────────────────────────────────────────────────────────────
//

/// Classify a goal completion on `today` given the last date the goal was met.
///
/// Only whole calendar days count; time of day plays no part.
///
/// ```
/// # use chrono::NaiveDate;
/// # use practice_core::streak::{classify, StreakOutcome};
/// let monday = NaiveDate::from_ymd_opt(2024, 5, 6).unwrap();
/// let tuesday = NaiveDate::from_ymd_opt(2024, 5, 7).unwrap();
/// assert_eq!(classify(Some(monday), tuesday), StreakOutcome::Extended);
/// assert_eq!(classify(None, tuesday), StreakOutcome::Started);
/// ```
#[must_use]
pub fn classify(last: Option<NaiveDate>, today: NaiveDate) -> StreakOutcome {
    let Some(last) = last else {
        return StreakOutcome::Started;
    };

    let diff_days = (today - last).num_days();
    match diff_days {
        0 => StreakOutcome::SameDay,
        1 => StreakOutcome::Extended,
        d if d > 1 => StreakOutcome::Broken {
            missed_days: u32::try_from(d - 1).unwrap_or(u32::MAX),
        },
        _ => StreakOutcome::ClockSkew { last },
    }
}
