use super::files::{atomic_write, backup_corrupt_file};
use crate::domain::SnapshotRecord;
use crate::error::PersistenceError;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::{debug, warn};

/// Read the task file. A missing file is an empty list.
pub fn load_snapshot<P: AsRef<Path>>(path: P) -> Result<Vec<SnapshotRecord>, PersistenceError> {
    let path = path.as_ref();

    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(source) => {
            return Err(PersistenceError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    if content.trim().is_empty() {
        return Ok(Vec::new());
    }

    serde_json::from_str(&content).map_err(|source| PersistenceError::Malformed {
        path: path.to_path_buf(),
        source,
    })
}

/// Load the task file, falling back to an empty list on any failure.
///
/// A damaged file is copied aside first so the next save cannot destroy it.
pub fn load_snapshot_or_empty<P: AsRef<Path>>(path: P) -> Vec<SnapshotRecord> {
    let path = path.as_ref();
    match load_snapshot(path) {
        Ok(records) => {
            debug!(path = %path.display(), count = records.len(), "tasks loaded");
            records
        }
        Err(err) => {
            warn!(error = %err, "could not load tasks, starting with an empty list");
            if path.exists() {
                match backup_corrupt_file(path) {
                    Ok(backup) => warn!(backup = %backup.display(), "damaged task file copied aside"),
                    Err(e) => warn!(error = %e, "could not copy damaged task file aside"),
                }
            }
            Vec::new()
        }
    }
}

/// Write the task file as an indented JSON array
pub fn save_snapshot<P: AsRef<Path>>(path: P, records: &[SnapshotRecord]) -> Result<(), PersistenceError> {
    let path = path.as_ref();
    let json = serde_json::to_string_pretty(records).map_err(|source| PersistenceError::Malformed {
        path: path.to_path_buf(),
        source,
    })?;
    atomic_write(path, &json)?;
    debug!(path = %path.display(), count = records.len(), "tasks saved");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    fn record(description: &str, total_seconds: u64) -> SnapshotRecord {
        SnapshotRecord {
            description: description.to_string(),
            total_seconds,
        }
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("TaskData.json");
        assert!(load_snapshot(&path).unwrap().is_empty());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("TaskData.json");
        let records = vec![record("Design", 3600), record("", 0)];

        save_snapshot(&path, &records).unwrap();
        let loaded = load_snapshot(&path).unwrap();

        assert_eq!(loaded, records);
    }

    #[test]
    fn test_saved_file_is_indented_array() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("TaskData.json");
        save_snapshot(&path, &[record("Email", 45)]).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(
            content,
            "[\n  {\n    \"TaskDescription\": \"Email\",\n    \"TimeSpentInSeconds\": 45\n  }\n]"
        );
    }

    #[test]
    fn test_load_ignores_legacy_task_number() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("TaskData.json");
        fs::write(
            &path,
            r#"[{"TaskNumber": 1, "TaskDescription": "Old", "TimeSpentInSeconds": 90}]"#,
        )
        .unwrap();

        assert_eq!(load_snapshot(&path).unwrap(), vec![record("Old", 90)]);
    }

    #[test]
    fn test_load_malformed_file_is_error() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("TaskData.json");
        fs::write(&path, r#"[{"TaskDescription": "x", "TimeSpentInSeconds": -5}]"#).unwrap();

        assert!(matches!(
            load_snapshot(&path),
            Err(PersistenceError::Malformed { .. })
        ));
    }

    #[test]
    fn test_fallback_backs_up_corrupt_file() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("TaskData.json");
        fs::write(&path, "{ definitely not a list").unwrap();

        let records = load_snapshot_or_empty(&path);

        assert!(records.is_empty());
        let backups = fs::read_dir(temp_dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().contains(".corrupt-"))
            .count();
        assert_eq!(backups, 1);
    }
}
