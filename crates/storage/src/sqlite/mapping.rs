use practice_core::model::{ProgressSnapshot, SNAPSHOT_VERSION, SnapshotError};
use sqlx::Row;

use crate::repository::StorageError;

fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

pub(crate) fn version_to_i64(version: u32) -> i64 {
    i64::from(version)
}

fn version_from_i64(v: i64) -> Result<u32, StorageError> {
    u32::try_from(v).map_err(|_| StorageError::Serialization(format!("invalid version: {v}")))
}

/// Maps a `progress_snapshots` row back into the domain document.
///
/// The version column is checked before the JSON body is parsed; both must
/// agree with the current document version.
pub(crate) fn map_snapshot_row(
    row: &sqlx::sqlite::SqliteRow,
) -> Result<ProgressSnapshot, StorageError> {
    let version = version_from_i64(row.try_get::<i64, _>("version").map_err(ser)?)?;
    if version != SNAPSHOT_VERSION {
        return Err(SnapshotError::UnsupportedVersion {
            found: version,
            expected: SNAPSHOT_VERSION,
        }
        .into());
    }

    let document: String = row.try_get("document").map_err(ser)?;
    Ok(ProgressSnapshot::from_json(&document)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_out_of_range_is_rejected() {
        assert!(version_from_i64(-1).is_err());
        assert_eq!(version_from_i64(1).unwrap(), 1);
    }
}
