use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{ActiveSession, TodayProgress, UserStats, WeeklyHistory};

/// Version tag written into every persisted progress document.
pub const SNAPSHOT_VERSION: u32 = 1;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SnapshotError {
    #[error("unsupported progress document version {found} (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },

    #[error("malformed progress document: {0}")]
    Malformed(String),
}

/// The complete persisted progress document.
///
/// Read in full at startup and rewritten in full after every mutation.
/// State transitions live in `model::progress`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressSnapshot {
    pub(crate) version: u32,
    pub(crate) user_stats: UserStats,
    pub(crate) today_progress: TodayProgress,
    pub(crate) active_session: Option<ActiveSession>,
    pub(crate) weekly_progress: WeeklyHistory,
}

impl ProgressSnapshot {
    /// A first-launch document with default stats and empty progress for `today`.
    #[must_use]
    pub fn fresh(today: NaiveDate) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            user_stats: UserStats::default(),
            today_progress: TodayProgress::empty(today),
            active_session: None,
            weekly_progress: WeeklyHistory::new(),
        }
    }

    /// Assemble a document from its parts, normalizing derived fields.
    #[must_use]
    pub fn from_parts(
        user_stats: UserStats,
        today_progress: TodayProgress,
        active_session: Option<ActiveSession>,
        weekly_progress: WeeklyHistory,
    ) -> Self {
        let mut snapshot = Self {
            version: SNAPSHOT_VERSION,
            user_stats,
            today_progress,
            active_session,
            weekly_progress,
        };
        snapshot.normalize();
        snapshot
    }

    /// Parse a persisted JSON document.
    ///
    /// # Errors
    ///
    /// Returns `SnapshotError::Malformed` if the JSON does not match the layout
    /// and `SnapshotError::UnsupportedVersion` for documents of another version.
    pub fn from_json(document: &str) -> Result<Self, SnapshotError> {
        let value: serde_json::Value =
            serde_json::from_str(document).map_err(|e| SnapshotError::Malformed(e.to_string()))?;

        // Check the tag before the layout so older or newer documents are
        // reported as a version problem rather than a parse failure.
        let found = value
            .get("version")
            .and_then(serde_json::Value::as_u64)
            .ok_or_else(|| SnapshotError::Malformed("missing version".into()))?;
        if found != u64::from(SNAPSHOT_VERSION) {
            return Err(SnapshotError::UnsupportedVersion {
                found: u32::try_from(found).unwrap_or(u32::MAX),
                expected: SNAPSHOT_VERSION,
            });
        }

        let snapshot: Self =
            serde_json::from_value(value).map_err(|e| SnapshotError::Malformed(e.to_string()))?;
        snapshot.validate_persisted()
    }

    /// Check the version tag and repair derived fields of a deserialized document.
    ///
    /// # Errors
    ///
    /// Returns `SnapshotError::UnsupportedVersion` for documents of another version.
    pub fn validate_persisted(mut self) -> Result<Self, SnapshotError> {
        if self.version != SNAPSHOT_VERSION {
            return Err(SnapshotError::UnsupportedVersion {
                found: self.version,
                expected: SNAPSHOT_VERSION,
            });
        }
        self.normalize();
        Ok(self)
    }

    /// Serialize the document to JSON.
    ///
    /// # Errors
    ///
    /// Returns `SnapshotError::Malformed` if serialization fails.
    pub fn to_json(&self) -> Result<String, SnapshotError> {
        serde_json::to_string(self).map_err(|e| SnapshotError::Malformed(e.to_string()))
    }

    #[must_use]
    pub fn version(&self) -> u32 {
        self.version
    }

    #[must_use]
    pub fn user_stats(&self) -> &UserStats {
        &self.user_stats
    }

    #[must_use]
    pub fn today_progress(&self) -> &TodayProgress {
        &self.today_progress
    }

    #[must_use]
    pub fn active_session(&self) -> Option<&ActiveSession> {
        self.active_session.as_ref()
    }

    #[must_use]
    pub fn weekly_progress(&self) -> &WeeklyHistory {
        &self.weekly_progress
    }

    fn normalize(&mut self) {
        self.user_stats.normalize();
        self.today_progress.normalize();
        self.weekly_progress.normalize();
    }
}
