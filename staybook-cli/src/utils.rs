//! Utility functions for CLI operations.
//!
//! Configuration loading, database and engine construction, argument
//! parsing helpers and shared output formatting.

use crate::error::CliError;
use chrono::{DateTime, Utc};
use staybook::database::{resolve_data_dir, DATABASE_FILE_NAME};
use staybook::{
    Config, ConfigBuilder, Database, DatabaseConfig, DateRange, InMemoryCatalog, PropertyId,
    Reservation, ReservationEngine, ReservationId,
};
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

/// The engine every booking command runs against.
pub type Engine = ReservationEngine<InMemoryCatalog, Database>;

/// Global CLI options shared across all commands.
#[derive(Debug, Clone)]
pub struct GlobalOptions {
    /// Enable verbose output.
    pub verbose: bool,

    /// Suppress non-essential output.
    pub quiet: bool,

    /// Override the data directory location.
    pub data_dir: Option<PathBuf>,

    /// Override the default busy timeout (in seconds).
    pub busy_timeout: Option<u32>,

    /// Disable automatic database initialization.
    pub disable_autoinit: bool,
}

impl GlobalOptions {
    /// The data directory: `--data-dir`, `$STAYBOOK_DATA_DIR`, or `~/.staybook`.
    pub fn data_dir(&self) -> Result<PathBuf, CliError> {
        match self.data_dir {
            Some(ref dir) => Ok(dir.clone()),
            None => resolve_data_dir().map_err(|e| CliError::Config(e.to_string())),
        }
    }
}

/// Load hierarchical configuration.
///
/// Configuration is merged from multiple sources with precedence:
/// 1. Global options (highest priority)
/// 2. Environment variables
/// 3. Configuration files
/// 4. Built-in defaults (lowest priority)
pub fn load_configuration(global: &GlobalOptions) -> Result<Config, CliError> {
    let mut builder = ConfigBuilder::new().with_data_dir(global.data_dir()?);

    if global.disable_autoinit {
        builder = builder.with_config(Config {
            disable_autoinit: Some(true),
            ..Config::default()
        });
    }

    builder.build().map_err(|e| CliError::Config(e.to_string()))
}

/// Open database with configuration.
///
/// # Errors
///
/// Returns `NoDataDirectory` if the database doesn't exist and auto-init is disabled.
pub fn open_database(global: &GlobalOptions, config: &Config) -> Result<Database, CliError> {
    let db_path = global.data_dir()?.join(DATABASE_FILE_NAME);

    if !db_path.exists() && !config.autoinit_enabled() {
        return Err(CliError::NoDataDirectory);
    }

    let busy_timeout = match global.busy_timeout {
        Some(seconds) => Duration::from_secs(seconds.into()),
        None => config.lock_wait(),
    };

    Database::open(DatabaseConfig::new(db_path).with_busy_timeout(busy_timeout))
        .map_err(CliError::from)
}

/// Loads configuration and opens the engine over the configured catalog.
pub fn open_engine(global: &GlobalOptions) -> Result<(Config, Engine), CliError> {
    let config = load_configuration(global)?;
    let db = open_database(global, &config)?;
    let engine = ReservationEngine::new(config.catalog(), db, config.pricing_policy());
    Ok((config, engine))
}

/// Parses a property id argument.
pub fn parse_property(value: &str) -> Result<PropertyId, CliError> {
    PropertyId::new(value).map_err(|e| CliError::InvalidArguments(e.to_string()))
}

/// Parses a reservation id argument (`R-000042` or `42`).
pub fn parse_reservation_id(value: &str) -> Result<ReservationId, CliError> {
    value
        .parse()
        .map_err(|e: staybook::ValidationError| CliError::InvalidArguments(e.to_string()))
}

/// Builds a stay from `--check-in` / `--check-out` arguments.
pub fn parse_stay(check_in: &str, check_out: &str) -> Result<DateRange, CliError> {
    DateRange::parse(check_in, check_out).map_err(CliError::from)
}

/// Splits a `KEY=VALUE` argument.
pub fn parse_key_value(value: &str) -> Result<(String, String), String> {
    match value.split_once('=') {
        Some((key, val)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), val.trim().to_string()))
        }
        _ => Err(format!("expected KEY=VALUE, got '{value}'")),
    }
}

/// Format a timestamp for display.
pub fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Writes a reservation as aligned `field: value` lines.
pub fn write_reservation(out: &mut impl Write, r: &Reservation) -> Result<(), CliError> {
    writeln!(out, "Reservation:       {}", r.id)?;
    writeln!(out, "Confirmation code: {}", r.confirmation_code)?;
    writeln!(out, "Property:          {}", r.property_id)?;
    writeln!(out, "Requester:         {}", r.requester_id)?;
    writeln!(
        out,
        "Stay:              {} ({} night(s))",
        r.stay,
        r.stay.nights()
    )?;
    writeln!(out, "Guests:            {}", r.guests)?;
    writeln!(out, "Pets:              {}", r.pets)?;
    writeln!(out, "Status:            {}", r.status)?;
    writeln!(out, "Payment:           {}", r.payment_status)?;
    writeln!(out, "Total:             {}", r.price.total)?;
    for (key, value) in &r.guest_details {
        writeln!(out, "Guest {key}: {value}")?;
    }
    if let Some(ref requests) = r.special_requests {
        writeln!(out, "Special requests:  {requests}")?;
    }
    if let Some(ref reason) = r.cancellation_reason {
        writeln!(out, "Cancelled because: {reason}")?;
    }
    writeln!(out, "Created:           {}", format_timestamp(r.created_at))?;
    writeln!(out, "Updated:           {}", format_timestamp(r.updated_at))?;
    Ok(())
}

/// Writes `value` as pretty JSON followed by a newline.
pub fn write_json<T: serde::Serialize>(out: &mut impl Write, value: &T) -> Result<(), CliError> {
    serde_json::to_writer_pretty(&mut *out, value)
        .map_err(|e| CliError::Io(std::io::Error::new(std::io::ErrorKind::Other, e)))?;
    writeln!(out)?;
    Ok(())
}
