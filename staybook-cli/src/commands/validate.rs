//! Command to validate a staybook configuration file.

use crate::error::CliError;
use crate::utils::GlobalOptions;
use clap::Args;
use staybook::config::{ConfigLoader, ConfigValidator};
use std::path::PathBuf;

/// Validate a staybook configuration file.
#[derive(Args)]
pub struct ValidateCommand {
    /// Configuration file to validate
    #[arg(value_name = "CONFIG_PATH")]
    pub config_path: PathBuf,
}

impl ValidateCommand {
    /// Execute the validate command.
    ///
    /// A file that parses but breaks a rule exits 1 rather than 7, so
    /// scripts can tell "bad file" from "could not run".
    pub fn execute(self, _global: &GlobalOptions) -> Result<(), CliError> {
        if !self.config_path.exists() {
            return Err(CliError::InvalidArguments(format!(
                "File not found: {}",
                self.config_path.display()
            )));
        }

        let config = match ConfigLoader::load_file(&self.config_path) {
            Ok(c) => c,
            Err(staybook::Error::Io(e)) => return Err(CliError::Io(e)),
            Err(e) => {
                eprintln!("Parse error: {e}");
                return Err(CliError::SemanticFailure(
                    "Configuration file is invalid".to_string(),
                ));
            }
        };

        match ConfigValidator::validate(&config) {
            Ok(()) => {
                println!("Configuration is valid");
                Ok(())
            }
            Err(e) => {
                eprintln!("Validation error: {e}");
                Err(CliError::SemanticFailure(
                    "Configuration validation failed".to_string(),
                ))
            }
        }
    }
}
