//! Contract import CLI.

use std::io::{self, IsTerminal};

use clap::Parser;

use contract_cli::cli::{Cli, Command};
use contract_cli::commands::{run_import, run_sample};
use contract_cli::logging::init_logging;
use contract_cli::summary::print_report;

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = cli.log_config(io::stderr().is_terminal());
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let exit_code = match &cli.command {
        Command::Import(args) => match run_import(args) {
            Ok(report) => {
                print_report(&report, args);
                0
            }
            Err(error) => {
                eprintln!("error: {error:#}");
                1
            }
        },
        Command::Sample(args) => match run_sample(args) {
            Ok(path) => {
                println!("Sample workbook written to {}", path.display());
                0
            }
            Err(error) => {
                eprintln!("error: {error:#}");
                1
            }
        },
    };
    std::process::exit(exit_code);
}
