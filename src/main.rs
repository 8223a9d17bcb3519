//! CLI binary for `tasker`.
//!
//! This binary is a thin wrapper that parses arguments and delegates to the library.

use std::process::ExitCode;

use clap::Parser;
use tasker::cli::{Cli, CliOutput};

fn main() -> ExitCode {
    let cli = Cli::parse();
    tasker::logging::init(cli.verbose);

    let output = CliOutput::from_cli(cli);

    for line in output.stdout {
        println!("{line}");
    }
    for msg in output.stderr {
        eprintln!("{msg}");
    }

    output.exit_code
}
