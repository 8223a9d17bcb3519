//! Path utilities for determining data storage locations.
//!
//! `tasker` keeps its files in `~/.tasker/`: the task store `tasks.csv` and an
//! optional `config.yaml`.

use std::path::{Path, PathBuf};

/// The base directory name for tasker data.
const DATA_DIR_NAME: &str = ".tasker";

/// The default store filename.
pub const STORE_FILENAME: &str = "tasks.csv";

/// The config filename.
pub const CONFIG_FILENAME: &str = "config.yaml";

/// Get the base data directory.
///
/// Returns `~/.tasker/` or `None` if the home directory cannot be determined.
#[must_use]
pub fn data_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(DATA_DIR_NAME))
}

/// Get the config file path, `~/.tasker/config.yaml`.
#[must_use]
pub fn config_path() -> Option<PathBuf> {
    data_dir().map(|dir| dir.join(CONFIG_FILENAME))
}

/// Get the default store path.
///
/// Returns `~/.tasker/tasks.csv`, or `tasks.csv` in the working directory when there
/// is no home directory.
#[must_use]
pub fn default_store_path() -> PathBuf {
    data_dir().map_or_else(|| PathBuf::from(STORE_FILENAME), |dir| dir.join(STORE_FILENAME))
}

/// Resolve a store path from a config file relative to the config file's directory.
///
/// Absolute paths are returned unchanged. A leading `~/` expands to the home directory.
#[must_use]
pub fn resolve_relative_to(path: &Path, base_dir: &Path) -> PathBuf {
    if let Ok(rest) = path.strip_prefix("~") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base_dir.join(path)
    }
}
