//! Confirm command implementation.

use crate::error::CliError;
use crate::utils::{open_engine, parse_reservation_id, GlobalOptions};
use clap::Args;
use std::io::Write;

/// Confirm a pending reservation.
#[derive(Args)]
pub struct ConfirmCommand {
    /// Reservation to confirm (R-000042 or 42)
    #[arg(value_name = "RESERVATION")]
    pub reservation: String,
}

impl ConfirmCommand {
    /// Execute the confirm command.
    ///
    /// Confirming twice is not an error; a cancelled reservation exits 1.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let id = parse_reservation_id(&self.reservation)?;
        let (_, engine) = open_engine(global)?;

        let reservation = engine.confirm_reservation(id)?;

        let stdout = std::io::stdout();
        writeln!(stdout.lock(), "{} {}", reservation.id, reservation.status)?;
        Ok(())
    }
}
