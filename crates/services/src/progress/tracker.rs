use std::sync::Arc;

use chrono::NaiveDate;
use tokio::sync::Mutex;

use practice_core::model::{
    Accuracy, ActiveSession, DailyGoal, PracticeCategory, ProgressSnapshot, ProgressUpdate,
    Rollover, SessionProgress, SessionTransition, WeeklyEntry,
};
use practice_core::streak::StreakOutcome;
use storage::repository::ProgressRepository;

use super::view::ProgressView;
use crate::Clock;
use crate::error::ProgressError;

/// Single owner of the user's progress document.
///
/// Every mutation takes the lock, rolls the stored day forward if the calendar
/// date changed, applies the change, and saves the whole document before the
/// lock is released. Session operations called while idle change nothing. If the save fails the in-memory change is kept and the
/// error is returned; the next successful save persists it.
pub struct ProgressTracker {
    clock: Clock,
    repo: Arc<dyn ProgressRepository>,
    state: Mutex<ProgressSnapshot>,
}

impl ProgressTracker {
    /// Load the stored document, or start a fresh one for today.
    ///
    /// A stored day older than today is rolled over and saved immediately.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::Storage` if the document cannot be read, has an
    /// unsupported version, or the rolled-over document cannot be saved.
    pub async fn load(
        clock: Clock,
        repo: Arc<dyn ProgressRepository>,
    ) -> Result<Self, ProgressError> {
        let today = clock.today();
        let snapshot = match repo.load_snapshot().await? {
            Some(mut snapshot) => {
                if let Some(rollover) = snapshot.roll_over(today) {
                    log_rollover(&rollover);
                    repo.save_snapshot(&snapshot).await?;
                }
                snapshot
            }
            None => {
                tracing::info!(%today, "no stored progress, starting fresh");
                ProgressSnapshot::fresh(today)
            }
        };

        Ok(Self {
            clock,
            repo,
            state: Mutex::new(snapshot),
        })
    }

    #[must_use]
    pub fn clock(&self) -> Clock {
        self.clock
    }

    /// Start a session in `category`, discarding any active one.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::Storage` if the document cannot be saved.
    pub async fn start_session(
        &self,
        category: PracticeCategory,
    ) -> Result<SessionTransition, ProgressError> {
        let now = self.clock.now();
        self.mutate(|snapshot, today| {
            roll_over(snapshot, today);
            let transition = snapshot.start_session(category, now);
            if transition == SessionTransition::Replaced {
                tracing::debug!(%category, "replaced active session without credit");
            }
            tracing::info!(%category, "session started");
            transition
        })
        .await
    }

    /// Drop the active session without crediting it.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::Storage` if the document cannot be saved.
    pub async fn abandon_session(&self) -> Result<Option<ActiveSession>, ProgressError> {
        self.mutate_active(|snapshot, today| {
            roll_over(snapshot, today);
            let abandoned = snapshot.abandon_session();
            if let Some(session) = &abandoned {
                tracing::info!(
                    category = %session.category(),
                    answered = session.question_index(),
                    "session abandoned"
                );
            }
            abandoned
        })
        .await
    }

    /// Record an answer in the active session. Returns `None` when idle.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::Storage` if the document cannot be saved.
    pub async fn answer_question(
        &self,
        correct: bool,
    ) -> Result<Option<SessionProgress>, ProgressError> {
        self.mutate_active(|snapshot, today| {
            roll_over(snapshot, today);
            snapshot.answer_question(correct)
        })
        .await
    }

    /// End the active session with an explicit accuracy. Returns `None` when idle.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::Storage` if the document cannot be saved.
    pub async fn end_session(
        &self,
        accuracy: Accuracy,
    ) -> Result<Option<ProgressUpdate>, ProgressError> {
        self.mutate_active(|snapshot, today| {
            snapshot.end_session(accuracy, today).inspect(log_update)
        })
        .await
    }

    /// End the active session using its own answer count. Returns `None` when idle.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::Storage` if the document cannot be saved.
    pub async fn finish_session(&self) -> Result<Option<ProgressUpdate>, ProgressError> {
        self.mutate_active(|snapshot, today| {
            snapshot.finish_session(today).inspect(log_update)
        })
        .await
    }

    /// Credit a completed session in `category` to today's progress.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::Storage` if the document cannot be saved.
    pub async fn update_progress(
        &self,
        category: PracticeCategory,
        accuracy: Accuracy,
    ) -> Result<ProgressUpdate, ProgressError> {
        self.mutate(|snapshot, today| {
            let update = snapshot.update_progress(category, accuracy, today);
            log_update(&update);
            update
        })
        .await
    }

    /// Replace the daily goal, returning the previous one.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::Storage` if the document cannot be saved.
    pub async fn set_daily_goal(&self, goal: DailyGoal) -> Result<DailyGoal, ProgressError> {
        self.mutate(|snapshot, today| {
            roll_over(snapshot, today);
            let previous = snapshot.set_daily_goal(goal);
            tracing::info!(
                previous = previous.minutes(),
                minutes = goal.minutes(),
                "daily goal changed"
            );
            previous
        })
        .await
    }

    /// Upsert one day of the weekly history.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::Storage` if the document cannot be saved.
    pub async fn record_weekly_entry(&self, entry: WeeklyEntry) -> Result<(), ProgressError> {
        self.mutate(|snapshot, today| {
            roll_over(snapshot, today);
            snapshot.record_weekly_entry(entry);
        })
        .await
    }

    /// Write today's progress into the weekly history when it has any minutes.
    ///
    /// Returns the document as recorded, or `None` if nothing was practiced today.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::Storage` if the document cannot be saved.
    pub async fn record_today_in_history(&self) -> Result<Option<ProgressSnapshot>, ProgressError> {
        self.mutate(|snapshot, today| {
            roll_over(snapshot, today);
            let progress = snapshot.today_progress();
            if progress.total_minutes() == 0 {
                return None;
            }
            let entry = progress.weekly_entry();
            snapshot.record_weekly_entry(entry);
            Some(snapshot.clone())
        })
        .await
    }

    /// A copy of the current document.
    pub async fn snapshot(&self) -> ProgressSnapshot {
        self.state.lock().await.clone()
    }

    /// Read model for screens, as of the clock's current date.
    ///
    /// A stale stored day is shown as already rolled over; nothing is saved.
    pub async fn view(&self) -> ProgressView {
        let today = self.clock.today();
        let mut snapshot = self.snapshot().await;
        snapshot.roll_over(today);
        ProgressView::build(&snapshot, today)
    }

    async fn mutate<T>(
        &self,
        op: impl FnOnce(&mut ProgressSnapshot, NaiveDate) -> T,
    ) -> Result<T, ProgressError> {
        let today = self.clock.today();
        let mut state = self.state.lock().await;
        let out = op(&mut state, today);
        self.save(&state).await?;
        Ok(out)
    }

    /// Like `mutate`, but a no-op when no session is active: nothing rolls
    /// over and nothing is saved.
    async fn mutate_active<T>(
        &self,
        op: impl FnOnce(&mut ProgressSnapshot, NaiveDate) -> Option<T>,
    ) -> Result<Option<T>, ProgressError> {
        let today = self.clock.today();
        let mut state = self.state.lock().await;
        if state.active_session().is_none() {
            tracing::debug!("no active session");
            return Ok(None);
        }
        let out = op(&mut state, today);
        self.save(&state).await?;
        Ok(out)
    }

    async fn save(&self, snapshot: &ProgressSnapshot) -> Result<(), ProgressError> {
        self.repo.save_snapshot(snapshot).await?;
        tracing::trace!("progress snapshot saved");
        Ok(())
    }
}

fn roll_over(snapshot: &mut ProgressSnapshot, today: NaiveDate) {
    if let Some(rollover) = snapshot.roll_over(today) {
        log_rollover(&rollover);
    }
}

fn log_rollover(rollover: &Rollover) {
    tracing::info!(
        from = %rollover.from,
        to = %rollover.to,
        archived_minutes = rollover.archived.map_or(0, |e| e.minutes),
        "day rolled over"
    );
}

fn log_update(update: &ProgressUpdate) {
    if let Some(rollover) = &update.rollover {
        log_rollover(rollover);
    }
    tracing::info!(
        category = %update.category,
        accuracy = u32::from(update.accuracy.percent()),
        minutes = update.today.total_minutes(),
        complete = update.today.is_complete(),
        perfect = update.today.is_perfect_day(),
        "progress updated"
    );
    match update.streak {
        Some(StreakOutcome::ClockSkew { last }) => {
            tracing::warn!(%last, "last practice date is in the future; streak left unchanged");
        }
        Some(outcome) => tracing::info!(?outcome, "daily goal met"),
        None => {}
    }
}
