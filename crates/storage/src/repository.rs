use async_trait::async_trait;
use practice_core::model::{ProgressSnapshot, SnapshotError};
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
}

/// Repository contract for the persisted progress document.
///
/// The document is read once at startup and rewritten in full after every
/// mutation, so the contract is a single load and a single save.
#[async_trait]
pub trait ProgressRepository: Send + Sync {
    /// Load the stored document, if one has been saved.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Snapshot` when the stored document has an
    /// unsupported version or layout, or other storage errors.
    async fn load_snapshot(&self) -> Result<Option<ProgressSnapshot>, StorageError>;

    /// Replace the stored document.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the document cannot be stored.
    async fn save_snapshot(&self, snapshot: &ProgressSnapshot) -> Result<(), StorageError>;
}

/// Simple in-memory repository implementation for testing and prototyping.
///
/// Holds the serialized document so loads go through the same parsing path as
/// the `SQLite` backend.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    document: Arc<Mutex<Option<String>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self {
            document: Arc::new(Mutex::new(None)),
        }
    }

    /// Raw JSON of the last saved document.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Connection` if the lock is poisoned.
    pub fn document(&self) -> Result<Option<String>, StorageError> {
        let guard = self
            .document
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.clone())
    }

    /// Replace the raw stored JSON, bypassing serialization.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Connection` if the lock is poisoned.
    pub fn put_document(&self, document: impl Into<String>) -> Result<(), StorageError> {
        let mut guard = self
            .document
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        *guard = Some(document.into());
        Ok(())
    }
}

#[async_trait]
impl ProgressRepository for InMemoryRepository {
    async fn load_snapshot(&self) -> Result<Option<ProgressSnapshot>, StorageError> {
        let Some(document) = self.document()? else {
            return Ok(None);
        };
        Ok(Some(ProgressSnapshot::from_json(&document)?))
    }

    async fn save_snapshot(&self, snapshot: &ProgressSnapshot) -> Result<(), StorageError> {
        let document = snapshot.to_json()?;
        self.put_document(document)
    }
}

/// Aggregates repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub progress: Arc<dyn ProgressRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let progress: Arc<dyn ProgressRepository> = Arc::new(InMemoryRepository::new());
        Self { progress }
    }
}
