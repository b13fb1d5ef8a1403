use thiserror::Error;

use crate::model::{AccountValidationError, AccuracyError, DailyGoalError, SnapshotError};

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Accuracy(#[from] AccuracyError),
    #[error(transparent)]
    DailyGoal(#[from] DailyGoalError),
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
    #[error(transparent)]
    AccountValidation(#[from] AccountValidationError),
}
