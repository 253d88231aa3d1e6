//! Book command implementation.
//!
//! Creates a pending reservation. On success the reservation id and
//! confirmation code are printed on stdout so scripts can capture them.

use crate::error::CliError;
use crate::utils::{
    open_engine, parse_key_value, parse_property, parse_stay, write_reservation, GlobalOptions,
};
use clap::Args;
use staybook::{CreateReservation, GuestDetails, RequesterId};
use std::io::Write;

/// Book a stay.
#[derive(Args)]
pub struct BookCommand {
    /// Property to book
    #[arg(long, value_name = "PROPERTY")]
    pub property: String,

    /// First night of the stay (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub check_in: String,

    /// Departure day (YYYY-MM-DD), not occupied
    #[arg(long, value_name = "DATE")]
    pub check_out: String,

    /// Who is booking
    #[arg(long, value_name = "ID", env = "STAYBOOK_REQUESTER")]
    pub requester: String,

    /// Number of guests
    #[arg(long, default_value_t = 1)]
    pub guests: u32,

    /// Number of pets
    #[arg(long, default_value_t = 0)]
    pub pets: u32,

    /// Guest contact detail (repeatable)
    #[arg(long = "detail", value_name = "KEY=VALUE", value_parser = parse_key_value)]
    pub details: Vec<(String, String)>,

    /// Free-text requests for the host
    #[arg(long, value_name = "TEXT")]
    pub special_requests: Option<String>,
}

impl BookCommand {
    /// Execute the book command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let property = parse_property(&self.property)?;
        let stay = parse_stay(&self.check_in, &self.check_out)?;
        let requester = RequesterId::new(self.requester)
            .map_err(|e| CliError::InvalidArguments(e.to_string()))?;
        let details: GuestDetails = self.details.into_iter().collect();

        let (_, engine) = open_engine(global)?;

        let request = CreateReservation::new(property, requester, stay, self.guests)
            .with_pets(self.pets)
            .with_guest_details(details)
            .with_special_requests(self.special_requests);
        let reservation = engine.create_reservation(request)?;

        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        writeln!(out, "{} {}", reservation.id, reservation.confirmation_code)?;

        if global.verbose {
            let stderr = std::io::stderr();
            write_reservation(&mut stderr.lock(), &reservation)?;
        }
        Ok(())
    }
}
