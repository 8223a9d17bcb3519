//! Command execution for the CLI.
//!
//! This module handles running CLI commands and producing output.

use crate::cli::{Cli, Command};
use crate::config::Settings;
use crate::error::Error;
use crate::tasks::{parse_task_id, CsvTaskStore, Task, TaskStore};
use serde::Serialize;
use std::process::ExitCode;

/// Output from running the CLI, with separate stdout and stderr messages.
#[derive(Debug)]
pub struct CliOutput {
    /// Exit code for the process.
    pub exit_code: ExitCode,
    /// Messages to print to stdout.
    pub stdout: Vec<String>,
    /// Messages to print to stderr.
    pub stderr: Vec<String>,
}

impl CliOutput {
    /// Resolve settings for a parsed command line and run its command.
    pub fn from_cli(cli: Cli) -> Self {
        match Settings::resolve(cli.file) {
            Ok(settings) => run(cli.command, &settings),
            Err(e) => error_output(&e),
        }
    }
}

/// Run a CLI command against the resolved settings.
pub fn run(command: Command, settings: &Settings) -> CliOutput {
    let store = CsvTaskStore::new(&settings.store_path);
    log::debug!("using task store {} ({})", settings.store_path.display(), settings.store_source);

    match command {
        Command::Add { description } => run_add(&store, &description.join(" ")),
        Command::List { all, json } => run_list(&store, all, json),
        Command::Complete { id } => run_complete(&store, &id),
        Command::Delete { id } => run_delete(&store, &id),
        Command::Config => run_config(settings),
    }
}

fn run_add(store: &impl TaskStore, description: &str) -> CliOutput {
    match store.add_task(description) {
        Ok(task) => success_output(format!("Task added: {} {}", task.id, task.description)),
        Err(e) => error_output(&e),
    }
}

fn run_list(store: &impl TaskStore, all: bool, json: bool) -> CliOutput {
    match store.list_tasks(all) {
        Ok(tasks) if json => json_output(&tasks),
        Ok(tasks) if tasks.is_empty() => success_output("No tasks.".to_string()),
        Ok(tasks) => {
            CliOutput { exit_code: ExitCode::SUCCESS, stdout: render_table(&tasks), stderr: vec![] }
        }
        Err(e) => error_output(&e),
    }
}

fn run_complete(store: &impl TaskStore, id: &str) -> CliOutput {
    match parse_task_id(id).and_then(|id| store.complete_task(id)) {
        Ok(task) => success_output(format!("Task completed: {}", task.id)),
        Err(e) => error_output(&e),
    }
}

fn run_delete(store: &impl TaskStore, id: &str) -> CliOutput {
    match parse_task_id(id).and_then(|id| store.delete_task(id)) {
        Ok(task) => success_output(format!("Task deleted: {}", task.id)),
        Err(e) => error_output(&e),
    }
}

fn run_config(settings: &Settings) -> CliOutput {
    let config_file = settings
        .config_file
        .as_ref()
        .map_or_else(|| "(none)".to_string(), |p| p.display().to_string());
    CliOutput {
        exit_code: ExitCode::SUCCESS,
        stdout: vec![
            format!("config file: {config_file}"),
            format!("task store:  {} ({})", settings.store_path.display(), settings.store_source),
        ],
        stderr: vec![],
    }
}

/// Render tasks as an aligned table with a header row.
fn render_table(tasks: &[Task]) -> Vec<String> {
    let header = ["ID", "Description", "Created", "Done"];
    let rows: Vec<[String; 4]> = tasks
        .iter()
        .map(|t| {
            [
                t.id.to_string(),
                single_line(&t.description),
                t.created_at_rfc3339(),
                if t.is_completed { "yes" } else { "no" }.to_string(),
            ]
        })
        .collect();

    let mut widths = header.map(|h| h.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let format_row = |cells: [&str; 4]| {
        let padded: Vec<String> = cells
            .iter()
            .zip(widths)
            .map(|(cell, width)| format!("{cell:<width$}"))
            .collect();
        padded.join(" | ").trim_end().to_string()
    };

    std::iter::once(format_row(header))
        .chain(rows.iter().map(|r| format_row(r.each_ref().map(String::as_str))))
        .collect()
}

/// Descriptions may hold line breaks; keep each task on one table row.
fn single_line(text: &str) -> String {
    text.replace("\r\n", " ").replace(['\n', '\r'], " ")
}

fn json_output<T: Serialize>(value: &T) -> CliOutput {
    match serde_json::to_string_pretty(value) {
        Ok(json) => CliOutput { exit_code: ExitCode::SUCCESS, stdout: vec![json], stderr: vec![] },
        Err(e) => error_output(&Error::from(e)),
    }
}

fn success_output(message: String) -> CliOutput {
    CliOutput { exit_code: ExitCode::SUCCESS, stdout: vec![message], stderr: vec![] }
}

fn error_output(error: &dyn std::fmt::Display) -> CliOutput {
    CliOutput {
        exit_code: ExitCode::from(1),
        stdout: vec![],
        stderr: vec![format!("Error: {error}")],
    }
}
