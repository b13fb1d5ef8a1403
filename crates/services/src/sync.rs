use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SyncError {
    #[error("progress sync failed: {0}")]
    Remote(String),
}

/// Daily progress pushed to a remote store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressSyncReport {
    pub date: NaiveDate,
    pub total_minutes: u32,
    pub is_perfect_day: bool,
    pub is_complete: bool,
    pub current_streak: u32,
}

/// Remote progress sync seam.
#[async_trait]
pub trait ProgressSync: Send + Sync {
    /// Push today's progress.
    ///
    /// # Errors
    ///
    /// Returns `SyncError` if the remote store rejects the report.
    async fn push(&self, report: &ProgressSyncReport) -> Result<(), SyncError>;
}

/// Sync target that only logs the report. Used until a remote store exists.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingProgressSync;

#[async_trait]
impl ProgressSync for LoggingProgressSync {
    async fn push(&self, report: &ProgressSyncReport) -> Result<(), SyncError> {
        tracing::info!(
            date = %report.date,
            minutes = report.total_minutes,
            perfect = report.is_perfect_day,
            streak = report.current_streak,
            "syncing progress"
        );
        Ok(())
    }
}
