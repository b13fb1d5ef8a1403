use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::model::{Accuracy, DailyGoal, PracticeCategory, WeeklyEntry};

/// Minutes credited for each completed practice session.
pub const MINUTES_PER_SESSION: u32 = 2;

/// Progress for a single calendar day.
///
/// Category scores hold the accuracy of the most recent session in that
/// category; zero means the category was not practiced on `date`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodayProgress {
    date: NaiveDate,
    speaking: Accuracy,
    vocabulary: Accuracy,
    listening: Accuracy,
    grammar: Accuracy,
    total_minutes: u32,
    is_complete: bool,
    is_perfect_day: bool,
}

/// Result of recording one session into the day's progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayRecord {
    /// The goal was not met before this session and is met now.
    pub goal_reached: bool,
    /// All four categories have a non-zero score after this session.
    pub perfect_day: bool,
}

impl TodayProgress {
    /// Empty progress for `date`.
    #[must_use]
    pub fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            speaking: Accuracy::ZERO,
            vocabulary: Accuracy::ZERO,
            listening: Accuracy::ZERO,
            grammar: Accuracy::ZERO,
            total_minutes: 0,
            is_complete: false,
            is_perfect_day: false,
        }
    }

    #[must_use]
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    #[must_use]
    pub fn score(&self, category: PracticeCategory) -> Accuracy {
        match category {
            PracticeCategory::Speaking => self.speaking,
            PracticeCategory::Vocabulary => self.vocabulary,
            PracticeCategory::Listening => self.listening,
            PracticeCategory::Grammar => self.grammar,
        }
    }

    #[must_use]
    pub fn total_minutes(&self) -> u32 {
        self.total_minutes
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.is_complete
    }

    #[must_use]
    pub fn is_perfect_day(&self) -> bool {
        self.is_perfect_day
    }

    /// Categories that have not been practiced yet on this day.
    #[must_use]
    pub fn remaining_categories(&self) -> Vec<PracticeCategory> {
        PracticeCategory::ALL
            .into_iter()
            .filter(|c| !self.score(*c).is_attempted())
            .collect()
    }

    /// Record a finished session and recompute the derived flags.
    ///
    /// The category score is overwritten, not averaged.
    pub fn record_session(
        &mut self,
        category: PracticeCategory,
        accuracy: Accuracy,
        goal: DailyGoal,
    ) -> DayRecord {
        let was_complete = self.is_complete;

        *self.score_mut(category) = accuracy;
        self.total_minutes = self.total_minutes.saturating_add(MINUTES_PER_SESSION);
        self.refresh_flags(goal);

        DayRecord {
            goal_reached: self.is_complete && !was_complete,
            perfect_day: self.is_perfect_day,
        }
    }

    /// The weekly-history entry summarizing this day.
    #[must_use]
    pub fn weekly_entry(&self) -> WeeklyEntry {
        WeeklyEntry::new(self.date, self.total_minutes, self.is_perfect_day)
    }

    // Completion is left as stored: goal changes are not retroactive.
    pub(crate) fn normalize(&mut self) {
        self.is_perfect_day = self.all_attempted();
    }

    fn refresh_flags(&mut self, goal: DailyGoal) {
        self.is_complete = goal.is_met_by(self.total_minutes);
        self.is_perfect_day = self.all_attempted();
    }

    fn all_attempted(&self) -> bool {
        PracticeCategory::ALL
            .into_iter()
            .all(|c| self.score(c).is_attempted())
    }

    fn score_mut(&mut self, category: PracticeCategory) -> &mut Accuracy {
        match category {
            PracticeCategory::Speaking => &mut self.speaking,
            PracticeCategory::Vocabulary => &mut self.vocabulary,
            PracticeCategory::Listening => &mut self.listening,
            PracticeCategory::Grammar => &mut self.grammar,
        }
    }
}
