//! Availability command implementation.

use crate::error::CliError;
use crate::utils::{open_engine, parse_property, parse_stay, write_json, GlobalOptions};
use clap::Args;
use std::io::Write;

/// Check whether a property is free for a stay.
#[derive(Args)]
pub struct AvailabilityCommand {
    /// Property to check
    #[arg(long, value_name = "PROPERTY")]
    pub property: String,

    /// First night of the stay (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub check_in: String,

    /// Departure day (YYYY-MM-DD), not occupied
    #[arg(long, value_name = "DATE")]
    pub check_out: String,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}

impl AvailabilityCommand {
    /// Execute the availability command.
    ///
    /// Exits successfully whether or not the stay is free; the answer is
    /// on stdout.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let property = parse_property(&self.property)?;
        let stay = parse_stay(&self.check_in, &self.check_out)?;
        let (_, engine) = open_engine(global)?;

        let availability = engine.check_availability(&property, stay)?;

        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        if self.json {
            return write_json(&mut out, &availability);
        }

        if availability.available {
            writeln!(out, "available")?;
        } else {
            let ids: Vec<String> = availability
                .conflicts
                .iter()
                .map(ToString::to_string)
                .collect();
            writeln!(out, "not available (conflicts: {})", ids.join(", "))?;
        }
        Ok(())
    }
}
