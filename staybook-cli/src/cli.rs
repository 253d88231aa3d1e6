//! CLI structure and command definitions.
//!
//! This module defines the main CLI structure using clap's derive macros,
//! including global options and subcommands.

use crate::commands::{
    AvailabilityCommand, BookCommand, CancelCommand, CompletionsCommand, ConfirmCommand,
    InitCommand, ListCommand, PaymentCommand, QuoteCommand, ShowCommand, ValidateCommand,
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line tool for booking vacation rental stays.
#[derive(Parser)]
#[command(name = "staybook")]
#[command(version, about = "Book vacation rental stays", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Override the data directory location
    #[arg(long, value_name = "PATH", global = true, env = "STAYBOOK_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Override the default busy timeout (in seconds)
    #[arg(long, value_name = "SECONDS", global = true, env = "STAYBOOK_BUSY_TIMEOUT")]
    pub busy_timeout: Option<u32>,

    /// Disable automatic database initialization
    #[arg(long, global = true, env = "STAYBOOK_DISABLE_AUTOINIT")]
    pub disable_autoinit: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Command {
    /// Check whether a property is free for a stay
    Availability(AvailabilityCommand),

    /// Price a stay without booking it
    Quote(QuoteCommand),

    /// Book a stay
    Book(BookCommand),

    /// Confirm a pending reservation
    Confirm(ConfirmCommand),

    /// Cancel a reservation, releasing its dates
    Cancel(CancelCommand),

    /// Record the payment status of a reservation
    Payment(PaymentCommand),

    /// Show one reservation
    Show(ShowCommand),

    /// List reservations
    List(ListCommand),

    /// Initialize the data directory and database
    Init(InitCommand),

    /// Validate a configuration file
    Validate(ValidateCommand),

    /// Generate shell completion scripts
    Completions(CompletionsCommand),
}
