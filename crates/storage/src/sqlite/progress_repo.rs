use async_trait::async_trait;
use chrono::Utc;
use practice_core::model::ProgressSnapshot;

use super::SqliteRepository;
use super::mapping::{map_snapshot_row, version_to_i64};
use crate::repository::{ProgressRepository, StorageError};

#[async_trait]
impl ProgressRepository for SqliteRepository {
    async fn load_snapshot(&self) -> Result<Option<ProgressSnapshot>, StorageError> {
        let row = sqlx::query(
            r"
            SELECT version, document
            FROM progress_snapshots
            WHERE id = 1
            ",
        )
        .fetch_optional(&self.pool)
        .await
        .map_err(|err| StorageError::Connection(err.to_string()))?;

        row.as_ref().map(map_snapshot_row).transpose()
    }

    async fn save_snapshot(&self, snapshot: &ProgressSnapshot) -> Result<(), StorageError> {
        let document = snapshot.to_json()?;

        sqlx::query(
            r"
            INSERT INTO progress_snapshots (id, version, document, updated_at)
            VALUES (?1, ?2, ?3, ?4)
            ON CONFLICT(id) DO UPDATE SET
                version = excluded.version,
                document = excluded.document,
                updated_at = excluded.updated_at
            ",
        )
        .bind(1_i64)
        .bind(version_to_i64(snapshot.version()))
        .bind(&document)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(|err| StorageError::Connection(err.to_string()))?;

        tracing::trace!(bytes = document.len(), "saved progress snapshot");
        Ok(())
    }
}
