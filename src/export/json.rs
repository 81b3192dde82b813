//! JSON snapshot import/export for review states.
//! Moves progress between stores, e.g. from the in-memory store into SQLite.

use crate::error::ReviewError;
use crate::models::ReviewState;
use crate::service::ReviewService;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("Snapshot I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid snapshot JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Review(#[from] ReviewError),
}

/// Writes states to `path` as a pretty printed JSON array.
pub fn export_states_to_path(
    states: &[ReviewState],
    path: impl AsRef<Path>,
) -> Result<(), SnapshotError> {
    let path = path.as_ref();
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, states)?;
    writer.flush()?;

    info!(count = states.len(), path = %path.display(), "Exported review states");
    Ok(())
}

/// Reads a JSON array of states written by [`export_states_to_path`].
pub fn import_states(path: impl AsRef<Path>) -> Result<Vec<ReviewState>, SnapshotError> {
    let path = path.as_ref();
    let reader = BufReader::new(File::open(path)?);
    let states: Vec<ReviewState> = serde_json::from_reader(reader)?;

    info!(count = states.len(), path = %path.display(), "Read review state snapshot");
    Ok(states)
}

/// Writes every state held by `service` to `path`. Returns how many were written.
pub fn export_service_to_path(
    service: &ReviewService,
    path: impl AsRef<Path>,
) -> Result<usize, SnapshotError> {
    let states = service.export_snapshot()?;
    export_states_to_path(&states, path)?;
    Ok(states.len())
}

/// Loads a snapshot file into `service`. A file with any out of range state
/// is rejected as a whole.
pub fn import_into_service(
    service: &ReviewService,
    path: impl AsRef<Path>,
) -> Result<usize, SnapshotError> {
    let states = import_states(path)?;
    Ok(service.import_snapshot(&states)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::{MemoryStore, SqliteStore};
    use crate::models::ManualClock;
    use chrono::{TimeZone, Utc};
    use std::fs;
    use std::sync::Arc;

    fn sample_states() -> Vec<ReviewState> {
        let mut learned = ReviewState::new("schmetterling");
        learned.interval = 6;
        learned.repetitions = 2;
        learned.total_reviews = 2;
        learned.correct_streak = 2;
        learned.last_review = Some(Utc.with_ymd_and_hms(2024, 7, 1, 8, 0, 0).unwrap());
        learned.next_review = Some(Utc.with_ymd_and_hms(2024, 7, 7, 8, 0, 0).unwrap());

        vec![learned, ReviewState::new("eichhörnchen")]
    }

    #[test]
    fn test_export_then_import() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("snapshot.json");
        let states = sample_states();

        export_states_to_path(&states, &path).unwrap();
        assert!(fs::metadata(&path).is_ok(), "File should exist");

        let imported = import_states(&path).unwrap();
        assert_eq!(imported, states);
    }

    #[test]
    fn test_import_handwritten_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("handwritten.json");
        fs::write(
            &path,
            r#"[
  {
    "item_id": "tisch",
    "interval": 15,
    "ease_factor": 2.6,
    "repetitions": 3,
    "next_review": "2024-08-20T10:00:00Z",
    "last_review": "2024-08-05T10:00:00Z",
    "total_reviews": 3,
    "correct_streak": 3,
    "difficulty": 0.9025
  }
]"#,
        )
        .unwrap();

        let states = import_states(&path).unwrap();
        assert_eq!(states.len(), 1);
        assert_eq!(states[0].item_id, "tisch");
        assert_eq!(states[0].interval, 15);
        assert_eq!(
            states[0].next_review,
            Some(Utc.with_ymd_and_hms(2024, 8, 20, 10, 0, 0).unwrap())
        );
    }

    fn service_with(store: Box<dyn crate::database::ReviewStore>) -> ReviewService {
        let clock = ManualClock::new(Utc.with_ymd_and_hms(2024, 7, 1, 8, 0, 0).unwrap());
        ReviewService::new(store, Arc::new(clock))
    }

    #[test]
    fn test_move_states_from_memory_to_sqlite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("moved.json");

        let memory = service_with(Box::new(MemoryStore::new()));
        memory.review("apfel", 4).unwrap();
        memory.review("birne", 1).unwrap();

        assert_eq!(export_service_to_path(&memory, &path).unwrap(), 2);

        let sqlite = service_with(Box::new(SqliteStore::open_in_memory().unwrap()));
        assert_eq!(import_into_service(&sqlite, &path).unwrap(), 2);
        assert_eq!(
            sqlite.export_snapshot().unwrap(),
            memory.export_snapshot().unwrap()
        );
    }

    #[test]
    fn test_import_into_service_rejects_out_of_range_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        let mut broken = ReviewState::new("x");
        broken.interval = 0;
        broken.ease_factor = 0.2;
        broken.difficulty = 9.0;
        export_states_to_path(&[ReviewState::new("gut"), broken], &path).unwrap();

        let service = service_with(Box::new(MemoryStore::new()));
        assert!(matches!(
            import_into_service(&service, &path),
            Err(SnapshotError::Review(ReviewError::InvalidState { .. }))
        ));
        assert!(service.export_snapshot().unwrap().is_empty());
    }

    #[test]
    fn test_import_nonexistent_file() {
        let result = import_states("nonexistent_snapshot_xyz123.json");
        assert!(matches!(result, Err(SnapshotError::Io(_))));
    }

    #[test]
    fn test_import_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("invalid.json");
        fs::write(&path, "{ this is not valid json }").unwrap();

        assert!(matches!(import_states(&path), Err(SnapshotError::Json(_))));
    }
}
