//! Configuration merging and precedence handling.
//!
//! Sources are merged from lowest to highest precedence. Scalar settings
//! are overwritten, pricing is merged rate by rate, and property
//! definitions accumulate with later definitions of an id replacing
//! earlier ones.

use crate::config::loader::ConfigSource;
use crate::config::schema::{Config, PricingConfig};
use crate::property::Property;

/// Merges configuration sources according to precedence rules.
///
/// # Examples
///
/// ```
/// use staybook::config::{Config, ConfigMerger};
///
/// let low = Config { maximum_lock_wait_seconds: Some(5), ..Default::default() };
/// let high = Config { maximum_lock_wait_seconds: Some(30), ..Default::default() };
///
/// let mut result = low;
/// ConfigMerger::merge_into(&mut result, &high);
/// assert_eq!(result.maximum_lock_wait_seconds, Some(30));
/// ```
pub struct ConfigMerger;

impl ConfigMerger {
    /// Merge multiple configuration sources into final config.
    ///
    /// Sources should be provided in order from lowest to highest precedence.
    #[must_use]
    pub fn merge(sources: Vec<ConfigSource>) -> Config {
        let mut result = Config::default();

        for source in sources {
            Self::merge_into(&mut result, &source.config);
        }

        result
    }

    /// Merge source config into target (source overwrites target).
    ///
    /// # Merging Rules
    ///
    /// - Simple fields: source overwrites if Some
    /// - Pricing: field-by-field merge
    /// - Properties: accumulated, keyed by id, source wins on collision
    pub fn merge_into(target: &mut Config, source: &Config) {
        if source.disable_autoinit.is_some() {
            target.disable_autoinit = source.disable_autoinit;
        }

        if source.maximum_lock_wait_seconds.is_some() {
            target.maximum_lock_wait_seconds = source.maximum_lock_wait_seconds;
        }

        if source.output_format.is_some() {
            target.output_format = source.output_format;
        }

        if let Some(source_pricing) = source.pricing {
            target.pricing = Some(match target.pricing {
                Some(target_pricing) => Self::merge_pricing(&target_pricing, &source_pricing),
                None => source_pricing,
            });
        }

        if let Some(ref source_properties) = source.properties {
            let properties = target.properties.get_or_insert_with(Vec::new);
            for property in source_properties {
                Self::upsert_property(properties, property);
            }
        }
    }

    fn merge_pricing(target: &PricingConfig, source: &PricingConfig) -> PricingConfig {
        PricingConfig {
            service_fee_bps: source.service_fee_bps.or(target.service_fee_bps),
            tax_bps: source.tax_bps.or(target.tax_bps),
            pet_fee: source.pet_fee.or(target.pet_fee),
        }
    }

    fn upsert_property(properties: &mut Vec<Property>, property: &Property) {
        match properties.iter_mut().find(|p| p.id == property.id) {
            Some(existing) => existing.clone_from(property),
            None => properties.push(property.clone()),
        }
    }
}
