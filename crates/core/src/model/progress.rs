use chrono::{DateTime, NaiveDate, Utc};

use crate::model::{
    Accuracy, ActiveSession, DailyGoal, PracticeCategory, ProgressSnapshot, SessionProgress,
    TodayProgress, WeeklyEntry,
};
use crate::streak::StreakOutcome;

//
// ─── TRANSITION RESULTS ────────────────────────────────────────────────────────
//

/// How `start_session` changed the session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionTransition {
    /// No session was active.
    Started,
    /// A session was active and has been discarded without credit.
    Replaced,
}

/// The previous day's progress was closed because the calendar date changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rollover {
    pub from: NaiveDate,
    pub to: NaiveDate,
    /// Entry written to the weekly history, if the closed day had any practice.
    pub archived: Option<WeeklyEntry>,
}

/// Outcome of crediting one session to today's progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressUpdate {
    pub category: PracticeCategory,
    pub accuracy: Accuracy,
    pub today: TodayProgress,
    /// Set only when this update met the daily goal.
    pub streak: Option<StreakOutcome>,
    pub rollover: Option<Rollover>,
}

//
// ─── TRANSITIONS ───────────────────────────────────────────────────────────────
//

impl ProgressSnapshot {
    /// Close the stored day if `today` is a later date and start a new one.
    ///
    /// The closed day is written to the weekly history when it has any minutes.
    /// A `today` earlier than the stored day leaves everything in place.
    pub fn roll_over(&mut self, today: NaiveDate) -> Option<Rollover> {
        let from = self.today_progress.date();
        if today <= from {
            return None;
        }

        let archived = (self.today_progress.total_minutes() > 0)
            .then(|| self.today_progress.weekly_entry());
        if let Some(entry) = archived {
            self.weekly_progress.record(entry);
        }
        self.today_progress = TodayProgress::empty(today);

        Some(Rollover {
            from,
            to: today,
            archived,
        })
    }

    /// Start a new session, replacing any active one.
    pub fn start_session(
        &mut self,
        category: PracticeCategory,
        now: DateTime<Utc>,
    ) -> SessionTransition {
        let previous = self.active_session.replace(ActiveSession::start(category, now));
        if previous.is_some() {
            SessionTransition::Replaced
        } else {
            SessionTransition::Started
        }
    }

    /// Drop the active session without crediting it.
    pub fn abandon_session(&mut self) -> Option<ActiveSession> {
        self.active_session.take()
    }

    /// Record an answer in the active session. Returns `None` when idle.
    pub fn answer_question(&mut self, correct: bool) -> Option<SessionProgress> {
        let session = self.active_session.as_mut()?;
        session.record_answer(correct);
        Some(session.progress())
    }

    /// Credit a finished session to today's progress and update the streak.
    pub fn update_progress(
        &mut self,
        category: PracticeCategory,
        accuracy: Accuracy,
        today: NaiveDate,
    ) -> ProgressUpdate {
        let rollover = self.roll_over(today);
        let goal = self.user_stats.daily_goal();
        let record = self.today_progress.record_session(category, accuracy, goal);

        let streak = record
            .goal_reached
            .then(|| self.user_stats.record_goal_met(today));

        ProgressUpdate {
            category,
            accuracy,
            today: self.today_progress.clone(),
            streak,
            rollover,
        }
    }

    /// End the active session with the given accuracy.
    ///
    /// Does nothing and returns `None` when no session is active.
    pub fn end_session(&mut self, accuracy: Accuracy, today: NaiveDate) -> Option<ProgressUpdate> {
        let session = self.active_session.take()?;
        Some(self.update_progress(session.category(), accuracy, today))
    }

    /// End the active session using its own answer count.
    pub fn finish_session(&mut self, today: NaiveDate) -> Option<ProgressUpdate> {
        let accuracy = self.active_session.as_ref()?.accuracy();
        self.end_session(accuracy, today)
    }

    /// Replace the daily goal. Today's completion flag is not recomputed.
    pub fn set_daily_goal(&mut self, goal: DailyGoal) -> DailyGoal {
        let previous = self.user_stats.daily_goal();
        self.user_stats.set_daily_goal(goal);
        previous
    }

    /// Upsert one day of the weekly history.
    pub fn record_weekly_entry(&mut self, entry: WeeklyEntry) {
        self.weekly_progress.record(entry);
    }
}
