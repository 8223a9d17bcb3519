//! Command-line interface for tasker.
//!
//! Each invocation resolves the store path, runs one store operation, and reports
//! the result. Parsing lives here; execution and output rendering live in [`run`].

mod run;


pub use run::{run, CliOutput};

use clap::builder::NonEmptyStringValueParser;
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// Tasker - a to-do list for the terminal.
///
/// Tasks are kept in a CSV file, `~/.tasker/tasks.csv` unless `--file` or the
/// `data_file` setting in `~/.tasker/config.yaml` says otherwise.
///
/// Examples:
///   tasker add "Buy groceries"
///   tasker list --all
///   tasker complete 1
///   tasker delete 1
#[derive(Parser, Debug)]
#[command(name = "tasker")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Task store to use instead of the configured one
    #[arg(short, long, global = true, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Log more detail to stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Add a new task to your to-do list.
    ///
    /// All words are joined into one description, so quoting is optional:
    ///   tasker add Buy groceries
    Add {
        /// Task description
        #[arg(required = true, num_args = 1.., value_parser = NonEmptyStringValueParser::new())]
        description: Vec<String>,
    },

    /// List tasks. Completed tasks are hidden unless --all is given.
    List {
        /// Include completed tasks
        #[arg(short, long)]
        all: bool,

        /// Print tasks as a JSON array
        #[arg(long)]
        json: bool,
    },

    /// Mark a task as completed.
    Complete {
        /// Task ID
        id: String,
    },

    /// Delete a task by its ID.
    Delete {
        /// Task ID
        id: String,
    },

    /// Show which config file and task store are in use.
    Config,
}
