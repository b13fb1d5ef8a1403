use std::sync::Arc;

use storage::repository::Storage;

use crate::Clock;
use crate::error::AppServicesError;
use crate::progress::{DailyProgressService, ProgressTracker};
use crate::sync::{LoggingProgressSync, ProgressSync};

/// Assembles app-facing services over one storage backend.
#[derive(Clone)]
pub struct AppServices {
    tracker: Arc<ProgressTracker>,
    daily: Arc<DailyProgressService>,
}

impl AppServices {
    /// Build services backed by `SQLite` storage.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization or loading the
    /// progress document fails.
    pub async fn new_sqlite(db_url: &str, clock: Clock) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        Self::from_storage(storage, clock, Arc::new(LoggingProgressSync)).await
    }

    /// Build services over an existing storage backend and sync target.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if the progress document cannot be loaded.
    pub async fn from_storage(
        storage: Storage,
        clock: Clock,
        sync: Arc<dyn ProgressSync>,
    ) -> Result<Self, AppServicesError> {
        let tracker = Arc::new(ProgressTracker::load(clock, Arc::clone(&storage.progress)).await?);
        let daily = Arc::new(DailyProgressService::new(Arc::clone(&tracker), sync));
        Ok(Self { tracker, daily })
    }

    #[must_use]
    pub fn tracker(&self) -> Arc<ProgressTracker> {
        Arc::clone(&self.tracker)
    }

    #[must_use]
    pub fn daily(&self) -> Arc<DailyProgressService> {
        Arc::clone(&self.daily)
    }
}
