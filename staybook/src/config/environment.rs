//! Environment variable handling for configuration overrides.
//!
//! `STAYBOOK_*` environment variables override values from configuration
//! files.

use crate::config::schema::Config;
use crate::error::{Error, Result};
use crate::pricing::Money;
use std::env;
use std::str::FromStr;

/// Service fee override, in basis points.
pub const SERVICE_FEE_BPS_ENV: &str = "STAYBOOK_SERVICE_FEE_BPS";
/// Tax override, in basis points.
pub const TAX_BPS_ENV: &str = "STAYBOOK_TAX_BPS";
/// Per-pet fee override, in minor units.
pub const PET_FEE_ENV: &str = "STAYBOOK_PET_FEE";
/// Lock wait override, in seconds.
pub const MAXIMUM_LOCK_WAIT_SECONDS_ENV: &str = "STAYBOOK_MAXIMUM_LOCK_WAIT_SECONDS";
/// Disables automatic data directory creation.
pub const DISABLE_AUTOINIT_ENV: &str = "STAYBOOK_DISABLE_AUTOINIT";

/// Handles environment variable overrides for configuration.
///
/// # Examples
///
/// ```no_run
/// use staybook::config::{Config, EnvironmentConfig};
///
/// let mut config = Config::default();
/// EnvironmentConfig::apply_overrides(&mut config).unwrap();
/// ```
pub struct EnvironmentConfig;

impl EnvironmentConfig {
    /// Apply environment variable overrides to config.
    ///
    /// # Errors
    ///
    /// Returns an error if any variable holds a value that does not parse,
    /// such as a negative fee or an unknown boolean spelling.
    pub fn apply_overrides(config: &mut Config) -> Result<()> {
        if let Ok(val) = env::var(SERVICE_FEE_BPS_ENV) {
            let pricing = config.pricing.get_or_insert_with(Default::default);
            pricing.service_fee_bps = Some(Self::parse_number(SERVICE_FEE_BPS_ENV, &val)?);
        }

        if let Ok(val) = env::var(TAX_BPS_ENV) {
            let pricing = config.pricing.get_or_insert_with(Default::default);
            pricing.tax_bps = Some(Self::parse_number(TAX_BPS_ENV, &val)?);
        }

        if let Ok(val) = env::var(PET_FEE_ENV) {
            let pricing = config.pricing.get_or_insert_with(Default::default);
            pricing.pet_fee = Some(Money::from_minor(Self::parse_number(PET_FEE_ENV, &val)?));
        }

        if let Ok(val) = env::var(MAXIMUM_LOCK_WAIT_SECONDS_ENV) {
            config.maximum_lock_wait_seconds =
                Some(Self::parse_number(MAXIMUM_LOCK_WAIT_SECONDS_ENV, &val)?);
        }

        if let Ok(val) = env::var(DISABLE_AUTOINIT_ENV) {
            config.disable_autoinit = Some(Self::parse_bool(DISABLE_AUTOINIT_ENV, &val)?);
        }

        Ok(())
    }

    fn parse_number<T: FromStr>(field: &str, s: &str) -> Result<T> {
        s.trim().parse().map_err(|_| Error::Validation {
            field: field.into(),
            message: format!("Must be a non-negative integer, got '{s}'"),
        })
    }

    /// Parse a boolean value from a string.
    ///
    /// Accepts: true/1/yes/on for true, false/0/no/off for false (case-insensitive).
    fn parse_bool(field: &str, s: &str) -> Result<bool> {
        match s.to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(true),
            "false" | "0" | "no" | "off" => Ok(false),
            _ => Err(Error::Validation {
                field: field.into(),
                message: format!(
                    "Invalid boolean value: '{s}' (expected true/false/1/0/yes/no/on/off)"
                ),
            }),
        }
    }
}
