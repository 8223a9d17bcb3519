//! To-do list storage.
//!
//! This module provides:
//! - [`Task`], one to-do item
//! - [`codec`], conversion between tasks and the CSV store format
//! - [`file`], creation and exclusive locking of the store file
//! - [`TaskStore`] and its CSV implementation [`CsvTaskStore`]
//!
//! # Example
//!
//! ```no_run
//! use tasker::tasks::{CsvTaskStore, TaskStore};
//!
//! let store = CsvTaskStore::new("/tmp/tasks.csv");
//!
//! let task = store.add_task("Buy groceries").unwrap();
//! store.complete_task(task.id).unwrap();
//!
//! // Completed tasks are hidden unless asked for
//! assert!(store.list_tasks(false).unwrap().is_empty());
//! assert_eq!(store.list_tasks(true).unwrap().len(), 1);
//! ```

pub mod codec;
pub mod file;
pub mod models;
pub mod store;

pub use models::Task;
pub use store::{next_id, parse_task_id, CsvTaskStore, TaskStore};
