//! Main entry point for the staybook CLI.
//!
//! This is the command-line interface for the staybook booking engine.
//! It provides commands for the booking lifecycle:
//! - `availability` / `quote`: inspect a stay before booking
//! - `book`: create a pending reservation
//! - `confirm` / `cancel` / `payment`: move a reservation along
//! - `show` / `list`: inspect reservations

mod cli;
mod commands;
mod error;
mod utils;

use clap::error::ErrorKind;
use clap::Parser;
use cli::Cli;
use utils::GlobalOptions;

/// Exit code for arguments clap rejects.
const INVALID_ARGUMENTS: i32 = 4;

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp
            | ErrorKind::DisplayVersion
            | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => e.exit(),
            _ => {
                let _ = e.print();
                std::process::exit(INVALID_ARGUMENTS);
            }
        },
    };

    // A second install can only fail in tests embedding the binary; ignore it.
    let _ = staybook::init_logger(cli.verbose, cli.quiet).install();

    let global = GlobalOptions {
        verbose: cli.verbose,
        quiet: cli.quiet,
        data_dir: cli.data_dir,
        busy_timeout: cli.busy_timeout,
        disable_autoinit: cli.disable_autoinit,
    };

    let result = match cli.command {
        cli::Command::Availability(cmd) => cmd.execute(&global),
        cli::Command::Quote(cmd) => cmd.execute(&global),
        cli::Command::Book(cmd) => cmd.execute(&global),
        cli::Command::Confirm(cmd) => cmd.execute(&global),
        cli::Command::Cancel(cmd) => cmd.execute(&global),
        cli::Command::Payment(cmd) => cmd.execute(&global),
        cli::Command::Show(cmd) => cmd.execute(&global),
        cli::Command::List(cmd) => cmd.execute(&global),
        cli::Command::Init(cmd) => cmd.execute(&global),
        cli::Command::Validate(cmd) => cmd.execute(&global),
        cli::Command::Completions(cmd) => cmd.execute(&global),
    };

    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}
