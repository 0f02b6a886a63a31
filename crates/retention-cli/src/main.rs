//! HR retention dashboard CLI.

use clap::Parser;
use retention_cli::cli::{Cli, Command};
use retention_cli::logging::init_logging;

mod commands;
mod summary;
mod types;

use crate::commands::{run_dashboard, run_inspect, run_package};
use crate::summary::{print_dashboard, print_inspect, print_package};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = cli.log_config();
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let outcome = match &cli.command {
        Command::Inspect(args) => run_inspect(args).map(|result| {
            print_inspect(&result);
            if result.is_blocked() { 1 } else { 0 }
        }),
        Command::Dashboard(args) => run_dashboard(args).map(|result| {
            print_dashboard(&result);
            0
        }),
        Command::Package(args) => run_package(args).map(|result| {
            print_package(&result);
            0
        }),
    };
    let exit_code = match outcome {
        Ok(code) => code,
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(exit_code);
}
