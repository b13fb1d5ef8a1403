use std::sync::Arc;

use super::tracker::ProgressTracker;
use crate::error::ProgressError;
use crate::sync::{ProgressSync, ProgressSyncReport};

/// Records today's practice in the weekly history and pushes it to the sync target.
#[derive(Clone)]
pub struct DailyProgressService {
    tracker: Arc<ProgressTracker>,
    sync: Arc<dyn ProgressSync>,
}

impl DailyProgressService {
    #[must_use]
    pub fn new(tracker: Arc<ProgressTracker>, sync: Arc<dyn ProgressSync>) -> Self {
        Self { tracker, sync }
    }

    /// Sync today's progress. Returns `false` when nothing was practiced today.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::Storage` if the weekly entry cannot be saved and
    /// `ProgressError::Sync` if the sync target rejects the report.
    pub async fn sync_today(&self) -> Result<bool, ProgressError> {
        let Some(snapshot) = self.tracker.record_today_in_history().await? else {
            tracing::debug!("nothing practiced today, skipping sync");
            return Ok(false);
        };

        let today = snapshot.today_progress();
        let report = ProgressSyncReport {
            date: today.date(),
            total_minutes: today.total_minutes(),
            is_perfect_day: today.is_perfect_day(),
            is_complete: today.is_complete(),
            current_streak: snapshot.user_stats().current_streak(),
        };
        self.sync.push(&report).await?;
        Ok(true)
    }
}
