use clap::Parser;
use strata::cli::commands::{inspect, locate, refs};
use strata::cli::errors::{print_build_errors, print_error_with_json};
use strata::cli::tracing_init::init_tracing;
use strata::cli::{Cli, Commands};
use strata::error::Error;
use strata::fs::OsFileSystem;
use std::io::Write;

fn main() {
    let cli = Cli::parse();
    let json_errors = cli.json_errors;
    init_tracing(cli.verbosity);

    match run_command(cli) {
        Ok(true) => {}
        Ok(false) => {
            let _ = std::io::stdout().flush();
            std::process::exit(1);
        }
        Err(e) => {
            print_error_with_json(&e, json_errors);
            std::process::exit(1);
        }
    }
}

/// Runs the command; `Ok(false)` means it ran but found problems
fn run_command(cli: Cli) -> Result<bool, Error> {
    match cli.command {
        Commands::Inspect {
            source,
            format,
            max_depth,
            truncate,
            resolve_schemas,
        } => {
            let options = inspect::InspectOptions {
                max_depth,
                truncate,
                resolve_schemas,
            };
            let report = inspect::execute(&source, options)?;
            print!("{}", inspect::render(&report, format)?);
            Ok(!report.has_errors())
        }
        Commands::Locate { file, pointer } => {
            let position = locate::execute(&OsFileSystem, &file, &pointer)?;
            println!("{position}");
            Ok(true)
        }
        Commands::Refs { source } => {
            let report = refs::execute(&source)?;
            print!("{}", refs::render(&report));
            if report.errors.is_empty() {
                return Ok(true);
            }
            print_build_errors(&report.errors, cli.json_errors);
            Ok(false)
        }
    }
}
