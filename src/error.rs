//! Error types for `tasker`.

use std::path::PathBuf;

/// Errors that can occur while reading or modifying the task store.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The store file could not be created, opened, locked, read, or written.
    #[error("task store {path} is unavailable: {source}")]
    StoreUnavailable {
        /// Path of the store file.
        path: PathBuf,
        /// The underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// A data line has fewer than the four required fields.
    #[error("malformed record on line {line}: expected at least 4 fields but got {fields} in record: {record}")]
    MalformedRecord {
        /// 1-based line number where the record starts.
        line: u64,
        /// Number of fields found.
        fields: usize,
        /// The record as read, fields re-joined with commas.
        record: String,
    },

    /// The ID field of a record is not a non-negative integer.
    #[error("failed to parse ID on line {line}: '{value}'")]
    InvalidId {
        /// 1-based line number where the record starts.
        line: u64,
        /// The offending text.
        value: String,
    },

    /// The `CreatedAt` field of a record is not an RFC 3339 timestamp.
    #[error("failed to parse CreatedAt on line {line}: '{value}': {source}")]
    InvalidTimestamp {
        /// 1-based line number where the record starts.
        line: u64,
        /// The offending text.
        value: String,
        /// Why chrono rejected it.
        #[source]
        source: chrono::ParseError,
    },

    /// The `IsComplete` field of a record is not a boolean.
    #[error("failed to parse IsCompleted on line {line}: '{value}'")]
    InvalidCompletionFlag {
        /// 1-based line number where the record starts.
        line: u64,
        /// The offending text.
        value: String,
    },

    /// No task with the given ID exists in the store.
    #[error("task not found: {0}")]
    NotFound(u64),

    /// The store already holds the largest representable ID, so no new one can be issued.
    #[error("no task IDs left: the store already holds ID {0}")]
    IdSpaceExhausted(u64),

    /// A task ID supplied by the caller is not an integer.
    #[error("invalid task ID: '{0}'")]
    InvalidIdArgument(String),

    /// The store file is not valid CSV (for example, it is not UTF-8).
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// An I/O error occurred outside the store file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A YAML parsing error occurred.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A JSON serialization error occurred.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for this crate.
pub type Result<T> = std::result::Result<T, Error>;
