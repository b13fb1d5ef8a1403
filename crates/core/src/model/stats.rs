use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::model::DailyGoal;
use crate::streak::{self, StreakOutcome};

/// Long-lived practice statistics for the installed client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStats {
    current_streak: u32,
    best_streak: u32,
    last_practice_date: Option<NaiveDate>,
    daily_goal_minutes: DailyGoal,
    total_days_practiced: u32,
}

impl UserStats {
    #[must_use]
    pub fn new(daily_goal: DailyGoal) -> Self {
        Self {
            current_streak: 0,
            best_streak: 0,
            last_practice_date: None,
            daily_goal_minutes: daily_goal,
            total_days_practiced: 0,
        }
    }

    /// Rehydrate stats from persisted storage.
    ///
    /// `best_streak` is raised to `current_streak` if a stored document
    /// disagrees, so the best streak never reads lower than the current one.
    #[must_use]
    pub fn from_persisted(
        current_streak: u32,
        best_streak: u32,
        last_practice_date: Option<NaiveDate>,
        daily_goal: DailyGoal,
        total_days_practiced: u32,
    ) -> Self {
        Self {
            current_streak,
            best_streak: best_streak.max(current_streak),
            last_practice_date,
            daily_goal_minutes: daily_goal,
            total_days_practiced,
        }
    }

    #[must_use]
    pub fn current_streak(&self) -> u32 {
        self.current_streak
    }

    #[must_use]
    pub fn best_streak(&self) -> u32 {
        self.best_streak
    }

    #[must_use]
    pub fn last_practice_date(&self) -> Option<NaiveDate> {
        self.last_practice_date
    }

    #[must_use]
    pub fn daily_goal(&self) -> DailyGoal {
        self.daily_goal_minutes
    }

    #[must_use]
    pub fn total_days_practiced(&self) -> u32 {
        self.total_days_practiced
    }

    pub(crate) fn normalize(&mut self) {
        self.best_streak = self.best_streak.max(self.current_streak);
    }

    pub fn set_daily_goal(&mut self, goal: DailyGoal) {
        self.daily_goal_minutes = goal;
    }

    /// Apply the streak rules for meeting the daily goal on `today`.
    ///
    /// Repeated calls on the same date change nothing after the first.
    /// A `today` earlier than the last practice date leaves the stats untouched.
    pub fn record_goal_met(&mut self, today: NaiveDate) -> StreakOutcome {
        let outcome = streak::classify(self.last_practice_date, today);

        self.current_streak = match outcome {
            StreakOutcome::Started | StreakOutcome::Broken { .. } => 1,
            StreakOutcome::Extended => self.current_streak.saturating_add(1),
            StreakOutcome::SameDay => self.current_streak,
            StreakOutcome::ClockSkew { .. } => return outcome,
        };
        self.best_streak = self.best_streak.max(self.current_streak);
        if self.last_practice_date != Some(today) {
            self.total_days_practiced = self.total_days_practiced.saturating_add(1);
        }
        self.last_practice_date = Some(today);

        outcome
    }
}

impl Default for UserStats {
    fn default() -> Self {
        Self::new(DailyGoal::default())
    }
}
