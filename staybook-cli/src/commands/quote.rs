//! Quote command implementation.
//!
//! Prices a stay with the configured policy without writing anything.

use crate::error::CliError;
use crate::utils::{open_engine, parse_property, parse_stay, write_json, GlobalOptions};
use clap::Args;
use staybook::PriceBreakdown;
use std::io::Write;

/// Price a stay without booking it.
#[derive(Args)]
pub struct QuoteCommand {
    /// Property to price
    #[arg(long, value_name = "PROPERTY")]
    pub property: String,

    /// First night of the stay (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub check_in: String,

    /// Departure day (YYYY-MM-DD), not occupied
    #[arg(long, value_name = "DATE")]
    pub check_out: String,

    /// Number of guests
    #[arg(long, default_value_t = 1)]
    pub guests: u32,

    /// Number of pets
    #[arg(long, default_value_t = 0)]
    pub pets: u32,

    /// Print the breakdown as JSON (amounts in minor units)
    #[arg(long)]
    pub json: bool,
}

impl QuoteCommand {
    /// Execute the quote command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let property = parse_property(&self.property)?;
        let stay = parse_stay(&self.check_in, &self.check_out)?;
        let (_, engine) = open_engine(global)?;

        let quote = engine.quote(&property, stay, self.guests, self.pets)?;

        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        if self.json {
            write_json(&mut out, &quote)
        } else {
            write_breakdown(&mut out, &quote)
        }
    }
}

/// Writes an itemized breakdown, one component per line.
fn write_breakdown(out: &mut impl Write, quote: &PriceBreakdown) -> Result<(), CliError> {
    writeln!(
        out,
        "Base ({} x {}): {}",
        quote.nights, quote.nightly_rate, quote.base_subtotal
    )?;
    writeln!(out, "Service fee:  {}", quote.service_fee)?;
    if !quote.pet_fee.is_zero() {
        writeln!(out, "Pet fee:      {}", quote.pet_fee)?;
    }
    if !quote.tax.is_zero() {
        writeln!(out, "Tax:          {}", quote.tax)?;
    }
    writeln!(out, "Total:        {}", quote.total)?;
    Ok(())
}
