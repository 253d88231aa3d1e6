//! Payment command implementation.
//!
//! Records the outcome reported by the payment processor. The booking
//! status is left alone: a failed payment does not cancel the stay.

use crate::error::CliError;
use crate::utils::{open_engine, parse_reservation_id, GlobalOptions};
use clap::Args;
use staybook::PaymentStatus;
use std::io::Write;

/// Record the payment status of a reservation.
#[derive(Args)]
pub struct PaymentCommand {
    /// Reservation to update (R-000042 or 42)
    #[arg(value_name = "RESERVATION")]
    pub reservation: String,

    /// New payment status (pending, completed, failed, refunded)
    #[arg(value_name = "STATUS")]
    pub status: PaymentStatus,
}

impl PaymentCommand {
    /// Execute the payment command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let id = parse_reservation_id(&self.reservation)?;
        let (_, engine) = open_engine(global)?;

        let reservation = engine.update_payment_status(id, self.status)?;

        let stdout = std::io::stdout();
        writeln!(
            stdout.lock(),
            "{} {} payment {}",
            reservation.id,
            reservation.status,
            reservation.payment_status
        )?;
        Ok(())
    }
}
