//! Init command implementation.
//!
//! This module implements the `init` command for explicitly initializing
//! the staybook data directory and database.

use crate::error::CliError;
use crate::utils::GlobalOptions;
use clap::Parser;
use staybook::database::{init_data_dir, InitOptions, DATABASE_FILE_NAME};
use staybook::config::USER_CONFIG_FILE;
use std::path::PathBuf;

/// Initialize the staybook data directory and database.
#[derive(Parser)]
#[command(about = "Initialize the staybook data directory and database")]
pub struct InitCommand {
    /// Data directory to initialize
    #[arg(long = "path", value_name = "PATH")]
    path: Option<PathBuf>,

    /// Create default configuration file
    #[arg(long)]
    with_config: bool,

    /// Preview actions without executing
    #[arg(long)]
    dry_run: bool,
}

impl InitCommand {
    /// Execute the init command.
    ///
    /// `--disable-autoinit` is ignored here; creating the database is the
    /// whole point.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let data_dir = match self.path {
            Some(path) => path,
            None => global.data_dir()?,
        };

        if self.dry_run {
            println!("Dry-run mode: no changes will be made");
            println!();
            println!("Would initialize staybook in: {}", data_dir.display());

            if data_dir.exists() {
                println!("  - Data directory already exists: {}", data_dir.display());
            } else {
                println!("  - Create data directory: {}", data_dir.display());
            }

            let db_path = data_dir.join(DATABASE_FILE_NAME);
            if db_path.exists() {
                println!("  - Verify existing database: {}", db_path.display());
            } else {
                println!("  - Create database: {}", db_path.display());
            }

            if self.with_config {
                let config_path = data_dir.join(USER_CONFIG_FILE);
                if config_path.exists() {
                    println!(
                        "  - Configuration file already exists (will not overwrite): {}",
                        config_path.display()
                    );
                } else {
                    println!("  - Create configuration file: {}", config_path.display());
                }
            }

            return Ok(());
        }

        let options = InitOptions::new(data_dir).with_create_config(self.with_config);
        let result = init_data_dir(&options)?;

        if global.quiet {
            return Ok(());
        }

        println!("Initialized staybook in: {}", result.data_dir.display());
        if result.data_dir_created {
            println!("  - Created data directory");
        }
        if result.database_created {
            println!("  - Created database");
        } else {
            println!("  - Database already exists (kept)");
        }
        if result.config_created {
            println!("  - Created default configuration file");
        } else if self.with_config {
            println!("  - Configuration file already exists (not overwritten)");
        }

        Ok(())
    }
}
