use crate::error::PersistenceError;
use anyhow::{Context, Result};
use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

const DIR_NAME: &str = ".tasktime";

/// Get the data directory - checks for local .tasktime first, then falls back to global ~/.tasktime
pub fn get_data_dir() -> Result<PathBuf> {
    let current_dir = env::current_dir().context("Could not determine current directory")?;

    if let Some(local_dir) = find_local_dir(&current_dir) {
        return Ok(local_dir);
    }

    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(DIR_NAME))
}

/// Find local .tasktime directory by walking up the directory tree
fn find_local_dir(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir;

    loop {
        let candidate = current.join(DIR_NAME);
        if candidate.is_dir() {
            return Some(candidate);
        }
        current = current.parent()?;
    }
}

/// Ensure the data directory exists
pub fn ensure_data_dir() -> Result<PathBuf> {
    let dir = get_data_dir()?;
    if !dir.exists() {
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
    }
    Ok(dir)
}

/// Initialize a local .tasktime directory in the current directory
pub fn init_local_dir() -> Result<PathBuf> {
    let current_dir = env::current_dir().context("Could not determine current directory")?;
    let dir = current_dir.join(DIR_NAME);

    if dir.exists() {
        anyhow::bail!("Data directory already exists: {}", dir.display());
    }

    fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create directory: {}", dir.display()))?;

    Ok(dir)
}

/// Path of the log file inside the data directory
pub fn log_file(data_dir: &Path) -> PathBuf {
    data_dir.join("tasktime.log")
}

/// Atomically write content to a file using temp file + rename
pub fn atomic_write<P: AsRef<Path>>(path: P, content: &str) -> Result<(), PersistenceError> {
    let path = path.as_ref();
    let io_err = |source| PersistenceError::Io {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };

    let mut temp_file = NamedTempFile::new_in(&dir).map_err(io_err)?;
    temp_file.write_all(content.as_bytes()).map_err(io_err)?;
    temp_file.as_file().sync_all().map_err(io_err)?;
    temp_file.persist(path).map_err(|e| io_err(e.error))?;

    Ok(())
}

/// Copy a damaged file aside with a timestamp so it is never overwritten
pub fn backup_corrupt_file<P: AsRef<Path>>(path: P) -> Result<PathBuf> {
    let path = path.as_ref();
    let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
    let file_name = path
        .file_name()
        .context("File path has no file name")?
        .to_string_lossy();
    let backup_path = path.with_file_name(format!("{}.corrupt-{}", file_name, timestamp));

    fs::copy(path, &backup_path)
        .with_context(|| format!("Failed to backup file: {}", path.display()))?;

    Ok(backup_path)
}
