//! Configuration validation.
//!
//! Checks value ranges and cross-field consistency that the YAML schema
//! alone cannot express.

use crate::config::schema::{Config, PricingConfig};
use crate::error::{Error, Result};
use crate::pricing::BPS_DENOMINATOR;
use crate::property::Property;
use std::collections::HashSet;

/// Longest accepted property name.
const MAX_NAME_LEN: usize = 255;

/// Validates configuration values.
///
/// # Examples
///
/// ```
/// use staybook::config::{Config, ConfigValidator};
///
/// let config = Config::default();
/// ConfigValidator::validate(&config).unwrap();
/// ```
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate a complete configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] naming the first offending field.
    pub fn validate(config: &Config) -> Result<()> {
        if let Some(ref pricing) = config.pricing {
            Self::validate_pricing(pricing)?;
        }

        if let Some(ref properties) = config.properties {
            Self::validate_properties(properties)?;
        }

        if let Some(timeout) = config.maximum_lock_wait_seconds {
            if timeout == 0 {
                return Err(Error::Validation {
                    field: "maximum_lock_wait_seconds".into(),
                    message: "Timeout must be greater than 0".into(),
                });
            }
        }

        Ok(())
    }

    /// Rates above 100% are almost certainly a units mistake.
    fn validate_pricing(pricing: &PricingConfig) -> Result<()> {
        for (field, value) in [
            ("pricing.service_fee_bps", pricing.service_fee_bps),
            ("pricing.tax_bps", pricing.tax_bps),
        ] {
            if let Some(bps) = value {
                if bps > BPS_DENOMINATOR {
                    return Err(Error::Validation {
                        field: field.into(),
                        message: format!("{bps} basis points exceeds 100%"),
                    });
                }
            }
        }
        Ok(())
    }

    fn validate_properties(properties: &[Property]) -> Result<()> {
        let mut seen = HashSet::new();
        for property in properties {
            if !seen.insert(&property.id) {
                return Err(Error::Validation {
                    field: "properties".into(),
                    message: format!("duplicate property id '{}'", property.id),
                });
            }
            property.validate()?;
            if let Some(ref name) = property.name {
                Self::validate_name(&format!("properties.{}.name", property.id), name)?;
            }
        }
        Ok(())
    }

    fn validate_name(field: &str, value: &str) -> Result<()> {
        let trimmed = value.trim();

        if trimmed.is_empty() {
            return Err(Error::Validation {
                field: field.into(),
                message: "Cannot be empty or only whitespace".into(),
            });
        }

        if trimmed.contains('\0') {
            return Err(Error::Validation {
                field: field.into(),
                message: "Cannot contain null bytes".into(),
            });
        }

        if trimmed.len() > MAX_NAME_LEN {
            return Err(Error::Validation {
                field: field.into(),
                message: format!("Cannot exceed {MAX_NAME_LEN} characters"),
            });
        }

        Ok(())
    }
}
