//! # `tasker`
//!
//! A to-do list kept in a CSV file, with exclusive locking so concurrent
//! invocations on the same host never interleave their updates.

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod paths;
pub mod tasks;

pub use error::{Error, Result};
pub use tasks::{CsvTaskStore, Task, TaskStore};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
