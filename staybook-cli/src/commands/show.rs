//! Show command implementation.

use crate::error::CliError;
use crate::utils::{open_engine, parse_reservation_id, write_json, write_reservation, GlobalOptions};
use clap::Args;

/// Show one reservation.
#[derive(Args)]
pub struct ShowCommand {
    /// Reservation to show (R-000042 or 42)
    #[arg(value_name = "RESERVATION")]
    pub reservation: String,

    /// Print the reservation as JSON
    #[arg(long)]
    pub json: bool,
}

impl ShowCommand {
    /// Execute the show command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let id = parse_reservation_id(&self.reservation)?;
        let (_, engine) = open_engine(global)?;

        let reservation = engine.get_reservation(id)?;

        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        if self.json {
            write_json(&mut out, &reservation)
        } else {
            write_reservation(&mut out, &reservation)
        }
    }
}
