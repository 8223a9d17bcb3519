//! Task model type for the to-do store.

use chrono::{DateTime, FixedOffset, SecondsFormat};
use serde::{Deserialize, Serialize};

/// A task in the to-do list.
///
/// `created_at` is the instant the task was added. Completing a task does not touch it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Unique identifier, assigned as one more than the largest existing ID.
    pub id: u64,
    /// Free-form description of the task.
    pub description: String,
    /// When the task was created, with the offset it was recorded in.
    pub created_at: DateTime<FixedOffset>,
    /// Whether the task has been completed.
    pub is_completed: bool,
}

impl Task {
    /// Create an open task.
    #[must_use]
    pub fn new(id: u64, description: impl Into<String>, created_at: DateTime<FixedOffset>) -> Self {
        Self { id, description: description.into(), created_at, is_completed: false }
    }

    /// `created_at` in the RFC 3339 form used by the store file.
    #[must_use]
    pub fn created_at_rfc3339(&self) -> String {
        self.created_at.to_rfc3339_opts(SecondsFormat::AutoSi, true)
    }
}

impl std::fmt::Display for Task {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}\t{}\t{}\t{}",
            self.id,
            self.description,
            self.created_at_rfc3339(),
            self.is_completed
        )
    }
}
