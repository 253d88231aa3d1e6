//! Configuration schema definitions.
//!
//! This module defines the configuration structure for staybook: pricing
//! rates, the property catalog, lock waiting and output preferences.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::pricing::{Money, PricingPolicy};
use crate::property::{InMemoryCatalog, Property};

/// Default number of seconds to wait for the database write lock.
pub const DEFAULT_LOCK_WAIT_SECONDS: u64 = 5;

/// Complete configuration structure.
///
/// Every field is optional so that partial files can be layered on top of
/// each other; absent values fall back to built-in defaults when the
/// configuration is turned into runtime objects.
///
/// # Examples
///
/// ```
/// use staybook::config::{Config, PricingConfig};
///
/// let config = Config {
///     pricing: Some(PricingConfig {
///         service_fee_bps: Some(1000),
///         ..Default::default()
///     }),
///     ..Default::default()
/// };
/// assert_eq!(config.pricing_policy().service_fee_bps, 1000);
/// assert_eq!(config.pricing_policy().tax_bps, 0);
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Fee and tax rates.
    pub pricing: Option<PricingConfig>,

    /// Property catalog entries.
    pub properties: Option<Vec<Property>>,

    /// Disable automatic creation of the data directory and database.
    pub disable_autoinit: Option<bool>,

    /// Maximum time to wait for database lock acquisition (seconds).
    pub maximum_lock_wait_seconds: Option<u64>,

    /// Output format for list commands.
    pub output_format: Option<OutputFormat>,
}

impl Config {
    /// The pricing policy described by this configuration.
    ///
    /// Unset rates take their [`PricingPolicy::default`] values.
    #[must_use]
    pub fn pricing_policy(&self) -> PricingPolicy {
        let defaults = PricingPolicy::default();
        let Some(pricing) = &self.pricing else {
            return defaults;
        };
        PricingPolicy {
            service_fee_bps: pricing.service_fee_bps.unwrap_or(defaults.service_fee_bps),
            tax_bps: pricing.tax_bps.unwrap_or(defaults.tax_bps),
            pet_fee: pricing.pet_fee.unwrap_or(defaults.pet_fee),
        }
    }

    /// Builds a catalog holding the configured properties.
    #[must_use]
    pub fn catalog(&self) -> InMemoryCatalog {
        self.properties.iter().flatten().cloned().collect()
    }

    /// How long to wait for the database write lock.
    #[must_use]
    pub fn lock_wait(&self) -> Duration {
        Duration::from_secs(
            self.maximum_lock_wait_seconds
                .unwrap_or(DEFAULT_LOCK_WAIT_SECONDS),
        )
    }

    /// Whether the data directory may be created on first use.
    #[must_use]
    pub fn autoinit_enabled(&self) -> bool {
        !self.disable_autoinit.unwrap_or(false)
    }
}

/// Pricing rates.
///
/// Rates are in basis points (1/100 of a percent) of the base subtotal.
///
/// # Examples
///
/// ```
/// use staybook::config::PricingConfig;
///
/// let pricing: PricingConfig = serde_yaml::from_str("tax_bps: 800\n").unwrap();
/// assert_eq!(pricing.tax_bps, Some(800));
/// assert!(pricing.service_fee_bps.is_none());
/// ```
#[derive(Debug, Clone, Copy, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct PricingConfig {
    /// Service fee in basis points.
    pub service_fee_bps: Option<u32>,

    /// Tax in basis points.
    pub tax_bps: Option<u32>,

    /// Flat per-pet fee in minor units.
    pub pet_fee: Option<Money>,
}

/// Output format for list commands.
///
/// # Examples
///
/// ```
/// use staybook::config::OutputFormat;
///
/// let format = OutputFormat::Json;
/// assert_eq!(format.to_string(), "json");
/// ```
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// JSON output format.
    Json,
    /// CSV output format.
    Csv,
    /// TSV output format.
    Tsv,
    /// Human-readable table format.
    Table,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json => write!(f, "json"),
            Self::Csv => write!(f, "csv"),
            Self::Tsv => write!(f, "tsv"),
            Self::Table => write!(f, "table"),
        }
    }
}
