//! Build script for staybook-cli.
//!
//! This script generates man pages at build time using clap_mangen.
//! The generated man page is placed in OUT_DIR for inclusion in release builds.
//!
//! Note: We build a minimal command structure here rather than importing from
//! the main crate, since build scripts cannot depend on the crate being built.

use clap::{Arg, Command};
use clap_mangen::Man;
use std::fs;
use std::path::PathBuf;

/// Build the CLI command structure for man page generation.
///
/// Keep this synchronized with src/cli.rs.
fn build_cli() -> Command {
    Command::new("staybook")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Book vacation rental stays")
        .long_about(
            "Command-line tool for checking availability, pricing and booking vacation rental stays",
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .help("Enable verbose output")
                .global(true)
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .help("Suppress non-essential output")
                .global(true)
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("data-dir")
                .long("data-dir")
                .help("Override the data directory location")
                .value_name("PATH")
                .global(true)
                .env("STAYBOOK_DATA_DIR"),
        )
        .arg(
            Arg::new("busy-timeout")
                .long("busy-timeout")
                .help("Override the default busy timeout (in seconds)")
                .value_name("SECONDS")
                .global(true)
                .env("STAYBOOK_BUSY_TIMEOUT"),
        )
        .arg(
            Arg::new("disable-autoinit")
                .long("disable-autoinit")
                .help("Disable automatic database initialization")
                .global(true)
                .action(clap::ArgAction::SetTrue)
                .env("STAYBOOK_DISABLE_AUTOINIT"),
        )
        .subcommands(vec![
            Command::new("availability")
                .about("Check whether a property is free for a stay")
                .long_about("List the active reservations that overlap a stay, if any"),
            Command::new("quote")
                .about("Price a stay without booking it")
                .long_about("Itemize base price, service fee, pet fee and tax for a stay"),
            Command::new("book")
                .about("Book a stay")
                .long_about("Create a pending reservation and print its id and confirmation code"),
            Command::new("confirm")
                .about("Confirm a pending reservation")
                .long_about("Move a pending reservation to confirmed; confirming twice is harmless"),
            Command::new("cancel")
                .about("Cancel a reservation, releasing its dates")
                .long_about("Cancel a reservation; cancelling twice keeps the first reason"),
            Command::new("payment")
                .about("Record the payment status of a reservation")
                .long_about("Record pending, completed, failed or refunded without touching the booking"),
            Command::new("show")
                .about("Show one reservation")
                .long_about("Display every field of a reservation"),
            Command::new("list")
                .about("List reservations")
                .long_about("Display reservations as a table, JSON, CSV or TSV"),
            Command::new("init")
                .about("Initialize the data directory and database")
                .long_about("Create the staybook database and optionally a default configuration"),
            Command::new("validate")
                .about("Validate a configuration file")
                .long_about("Check a staybook configuration file for errors"),
            Command::new("completions")
                .about("Generate shell completion scripts")
                .long_about("Generate shell completion scripts for bash, zsh, fish, or PowerShell"),
        ])
}

fn main() -> std::io::Result<()> {
    let out_dir = PathBuf::from(std::env::var_os("OUT_DIR").ok_or_else(|| {
        std::io::Error::new(std::io::ErrorKind::NotFound, "OUT_DIR is not set")
    })?);
    let man_dir = out_dir.join("man");
    fs::create_dir_all(&man_dir)?;

    let mut buffer = Vec::new();
    Man::new(build_cli()).render(&mut buffer)?;
    fs::write(man_dir.join("staybook.1"), buffer)?;

    println!("cargo:rerun-if-changed=src/cli.rs");
    println!("cargo:rerun-if-changed=src/commands/");
    Ok(())
}
