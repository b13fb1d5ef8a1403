//! Shared error types for the services crate.

use thiserror::Error;

use practice_core::model::AccountValidationError;
use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;

use crate::sync::SyncError;

/// Errors emitted by `ProgressTracker` and the daily sync.
///
/// Tracker operations themselves cannot fail; only persistence and remote
/// sync can.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProgressError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Sync(#[from] SyncError),
}

/// Failure reported by the authentication backend, carrying its message.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct GatewayError {
    pub message: String,
}

impl GatewayError {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Errors emitted by `AccountService`. `Display` is the user-facing message.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum AccountError {
    #[error(transparent)]
    Validation(#[from] AccountValidationError),
    #[error(transparent)]
    Remote(#[from] GatewayError),
    #[error("{0}")]
    Failed(&'static str),
}

impl AccountError {
    /// Message suitable for showing to the user.
    #[must_use]
    pub fn message(&self) -> String {
        self.to_string()
    }
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
    #[error(transparent)]
    Progress(#[from] ProgressError),
}
