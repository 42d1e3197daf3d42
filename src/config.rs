use crate::domain::DEFAULT_MAX_TASKS;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::warn;

fn default_max_tasks() -> usize {
    DEFAULT_MAX_TASKS
}

fn default_autosave_secs() -> u64 {
    5
}

fn default_data_file() -> PathBuf {
    PathBuf::from("TaskData.json")
}

/// Runtime settings stored in config.json
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_max_tasks")]
    pub max_tasks: usize,
    /// Seconds between autosaves while dirty or tracking
    #[serde(default = "default_autosave_secs")]
    pub autosave_secs: u64,
    /// Task file, relative to the data directory unless absolute
    #[serde(default = "default_data_file")]
    pub data_file: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_tasks: default_max_tasks(),
            autosave_secs: default_autosave_secs(),
            data_file: default_data_file(),
        }
    }
}

impl Config {
    /// Resolve the task file against the data directory
    pub fn data_path(&self, data_dir: &Path) -> PathBuf {
        if self.data_file.is_absolute() {
            self.data_file.clone()
        } else {
            data_dir.join(&self.data_file)
        }
    }

    /// Apply command-line overrides
    pub fn with_overrides(mut self, max_tasks: Option<usize>, data_file: Option<PathBuf>) -> Self {
        if let Some(max) = max_tasks {
            self.max_tasks = max;
        }
        if let Some(file) = data_file {
            self.data_file = file;
        }
        self
    }
}

/// Path to config.json inside the data directory
pub fn config_file(data_dir: &Path) -> PathBuf {
    data_dir.join("config.json")
}

/// Load config.json, using defaults when the file is missing
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let path = path.as_ref();

    if !path.exists() {
        return Ok(Config::default());
    }

    let content = std::fs::read_to_string(path)?;
    let config: Config = serde_json::from_str(&content)?;
    Ok(config)
}

/// Load config.json; a broken file is logged and replaced by defaults
pub fn load_config_or_default<P: AsRef<Path>>(path: P) -> Config {
    let path = path.as_ref();
    load_config(path).unwrap_or_else(|e| {
        warn!(path = %path.display(), error = %e, "ignoring unreadable config");
        Config::default()
    })
}
