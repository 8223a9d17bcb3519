//! Configuration management for tasker.
//!
//! Settings live in an optional YAML file, `~/.tasker/config.yaml`:
//!
//! ```yaml
//! data_file: ~/Dropbox/tasks.csv
//! ```
//!
//! A relative `data_file` is resolved against the directory holding the config file.

use crate::error::Result;
use crate::paths;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// User configuration.
#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    /// Path of the CSV task store. None means the default location.
    #[serde(default)]
    pub data_file: Option<PathBuf>,
}

impl Config {
    /// Load config from a specific file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_from(config_path: &Path) -> Result<Option<Self>> {
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path)?;
        if content.trim().is_empty() {
            return Ok(Some(Self::default()));
        }
        let config: Self = serde_yaml::from_str(&content)?;
        Ok(Some(config))
    }
}

/// Where the store path came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreSource {
    /// The `--file` command-line flag.
    Flag,
    /// `data_file` in the config file.
    ConfigFile,
    /// The built-in default.
    Default,
}

impl std::fmt::Display for StoreSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Flag => "--file flag",
            Self::ConfigFile => "config file",
            Self::Default => "default",
        };
        f.write_str(s)
    }
}

/// Fully resolved settings for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// The config file consulted, if a location could be determined.
    pub config_file: Option<PathBuf>,
    /// The task store to operate on.
    pub store_path: PathBuf,
    /// Where `store_path` came from.
    pub store_source: StoreSource,
}

impl Settings {
    /// Resolve settings using the default config file location.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn resolve(file_flag: Option<PathBuf>) -> Result<Self> {
        Self::resolve_with(file_flag, paths::config_path())
    }

    /// Resolve settings against an explicit config file location.
    ///
    /// Precedence: the flag, then `data_file` from the config file, then the default
    /// store path. The config file is not read when the flag is given.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file must be read and cannot be parsed.
    pub fn resolve_with(file_flag: Option<PathBuf>, config_file: Option<PathBuf>) -> Result<Self> {
        if let Some(path) = file_flag {
            return Ok(Self { config_file, store_path: path, store_source: StoreSource::Flag });
        }

        if let Some(config_path) = config_file.as_deref() {
            if let Some(data_file) = Config::load_from(config_path)?.and_then(|c| c.data_file) {
                let base = config_path.parent().unwrap_or_else(|| Path::new("."));
                return Ok(Self {
                    store_path: paths::resolve_relative_to(&data_file, base),
                    store_source: StoreSource::ConfigFile,
                    config_file,
                });
            }
        }

        Ok(Self {
            config_file,
            store_path: paths::default_store_path(),
            store_source: StoreSource::Default,
        })
    }
}
