//! Task store trait and CSV file implementation.

use crate::error::{Error, Result};
use crate::tasks::codec;
use crate::tasks::file::StoreFile;
use crate::tasks::models::Task;
use chrono::{DateTime, FixedOffset, Local, Timelike};
use std::path::{Path, PathBuf};

/// Trait for task storage operations.
///
/// Every call is a complete transaction against the backing store: nothing is cached
/// between calls.
#[allow(clippy::missing_errors_doc)]
pub trait TaskStore {
    /// Append a new open task and return it.
    fn add_task(&self, description: &str) -> Result<Task>;

    /// List tasks in insertion order, leaving out completed ones unless asked.
    fn list_tasks(&self, include_completed: bool) -> Result<Vec<Task>>;

    /// Mark a task complete and return it.
    fn complete_task(&self, id: u64) -> Result<Task>;

    /// Remove a task and return it.
    fn delete_task(&self, id: u64) -> Result<Task>;
}

/// Parse a task ID given as text, e.g. from the command line.
///
/// # Errors
///
/// Returns `InvalidIdArgument` if the text is not a non-negative integer.
pub fn parse_task_id(text: &str) -> Result<u64> {
    text.trim().parse().map_err(|_| Error::InvalidIdArgument(text.to_string()))
}

/// The ID the next added task receives.
///
/// # Errors
///
/// Returns `IdSpaceExhausted` if the highest stored ID is already `u64::MAX`.
pub fn next_id(tasks: &[Task]) -> Result<u64> {
    let highest = tasks.iter().map(|t| t.id).max().unwrap_or(0);
    highest.checked_add(1).ok_or(Error::IdSpaceExhausted(highest))
}

/// Current local time truncated to whole seconds, the precision new tasks are stamped with.
fn now() -> DateTime<FixedOffset> {
    let now = Local::now().fixed_offset();
    now.with_nanosecond(0).unwrap_or(now)
}

/// Task store backed by a single CSV file.
///
/// Each operation opens and locks the file, decodes every record, applies the change in
/// memory, re-encodes the whole set, and rewrites the file before releasing the lock.
#[derive(Debug, Clone)]
pub struct CsvTaskStore {
    path: PathBuf,
}

impl CsvTaskStore {
    /// Create a store for the file at `path`. The file is created on first use.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self { path: path.as_ref().to_path_buf() }
    }

    /// Get the store file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Run `f` over the decoded tasks while holding the lock, writing the tasks back
    /// if `f` reports a change.
    ///
    /// The lock is released on every path, including decode and write failures.
    fn transaction<T>(&self, f: impl FnOnce(&mut Vec<Task>) -> Result<(T, bool)>) -> Result<T> {
        let mut file = StoreFile::open(&self.path)?;
        let result = Self::apply(&mut file, f);
        let closed = file.close();
        let value = result?;
        closed?;
        Ok(value)
    }

    fn apply<T>(
        file: &mut StoreFile,
        f: impl FnOnce(&mut Vec<Task>) -> Result<(T, bool)>,
    ) -> Result<T> {
        let mut tasks = codec::decode(&file.read_all()?)?;
        let (value, changed) = f(&mut tasks)?;
        if changed {
            // Encode fully before touching the file so a failure leaves it intact.
            let data = codec::encode(&tasks)?;
            file.write_all(&data)?;
        }
        Ok(value)
    }
}

impl TaskStore for CsvTaskStore {
    fn add_task(&self, description: &str) -> Result<Task> {
        let task = self.transaction(|tasks| {
            let task = Task::new(next_id(tasks)?, description, now());
            tasks.push(task.clone());
            Ok((task, true))
        })?;
        log::info!("added task {} to {}", task.id, self.path.display());
        Ok(task)
    }

    fn list_tasks(&self, include_completed: bool) -> Result<Vec<Task>> {
        self.transaction(|tasks| {
            let listed = if include_completed {
                std::mem::take(tasks)
            } else {
                tasks.iter().filter(|t| !t.is_completed).cloned().collect()
            };
            Ok((listed, false))
        })
    }

    fn complete_task(&self, id: u64) -> Result<Task> {
        let task = self.transaction(|tasks| {
            let task = tasks.iter_mut().find(|t| t.id == id).ok_or(Error::NotFound(id))?;
            let changed = !task.is_completed;
            task.is_completed = true;
            Ok((task.clone(), changed))
        })?;
        log::info!("completed task {id} in {}", self.path.display());
        Ok(task)
    }

    fn delete_task(&self, id: u64) -> Result<Task> {
        let task = self.transaction(|tasks| {
            let index = tasks.iter().position(|t| t.id == id).ok_or(Error::NotFound(id))?;
            Ok((tasks.remove(index), true))
        })?;
        log::info!("deleted task {id} from {}", self.path.display());
        Ok(task)
    }
}
