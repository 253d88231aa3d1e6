//! Cancel command implementation.

use crate::error::CliError;
use crate::utils::{open_engine, parse_reservation_id, GlobalOptions};
use clap::Args;
use std::io::Write;

/// Cancel a reservation, releasing its dates.
#[derive(Args)]
pub struct CancelCommand {
    /// Reservation to cancel (R-000042 or 42)
    #[arg(value_name = "RESERVATION")]
    pub reservation: String,

    /// Why the reservation is being cancelled
    #[arg(long, value_name = "TEXT")]
    pub reason: Option<String>,
}

impl CancelCommand {
    /// Execute the cancel command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let id = parse_reservation_id(&self.reservation)?;
        let (_, engine) = open_engine(global)?;

        let reservation = engine.cancel_reservation(id, self.reason)?;

        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        writeln!(out, "{} {}", reservation.id, reservation.status)?;
        if let Some(ref reason) = reservation.cancellation_reason {
            if !global.quiet {
                writeln!(out, "reason: {reason}")?;
            }
        }
        Ok(())
    }
}
