//! Property-based tests for configuration merging.

use super::merger::ConfigMerger;
use super::schema::{Config, PricingConfig};
use crate::pricing::Money;
use crate::property::{Property, PropertyId};
use proptest::prelude::*;

fn pricing_strategy() -> impl Strategy<Value = PricingConfig> {
    (
        prop::option::of(0u32..=5000),
        prop::option::of(0u32..=3000),
        prop::option::of(0u64..=10_000),
    )
        .prop_map(|(service_fee_bps, tax_bps, pet_fee)| PricingConfig {
            service_fee_bps,
            tax_bps,
            pet_fee: pet_fee.map(Money::from_minor),
        })
}

fn properties_strategy() -> impl Strategy<Value = Vec<Property>> {
    prop::collection::vec(("[a-d]", 1u64..=50_000, 1u32..=10), 0..6).prop_map(|entries| {
        entries
            .into_iter()
            .filter_map(|(id, rate, guests)| {
                PropertyId::new(id)
                    .ok()
                    .map(|id| Property::new(id, Money::from_minor(rate), guests))
            })
            .collect()
    })
}

fn config_strategy() -> impl Strategy<Value = Config> {
    (
        prop::option::of(pricing_strategy()),
        prop::option::of(properties_strategy()),
        prop::option::of(any::<bool>()),
        prop::option::of(1u64..=600),
    )
        .prop_map(
            |(pricing, properties, disable_autoinit, maximum_lock_wait_seconds)| Config {
                pricing,
                properties,
                disable_autoinit,
                maximum_lock_wait_seconds,
                output_format: None,
            },
        )
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 2000,
        .. ProptestConfig::default()
    })]

    // Scalars from the higher source win when set
    #[test]
    fn config_merge_higher_precedence_wins(low in config_strategy(), high in config_strategy()) {
        let mut result = low.clone();
        ConfigMerger::merge_into(&mut result, &high);

        prop_assert_eq!(
            result.disable_autoinit,
            high.disable_autoinit.or(low.disable_autoinit)
        );
        prop_assert_eq!(
            result.maximum_lock_wait_seconds,
            high.maximum_lock_wait_seconds.or(low.maximum_lock_wait_seconds)
        );

        let low_policy = low.pricing_policy();
        let high_pricing = high.pricing.unwrap_or_default();
        let policy = result.pricing_policy();
        prop_assert_eq!(
            policy.service_fee_bps,
            high_pricing.service_fee_bps.unwrap_or(low_policy.service_fee_bps)
        );
        prop_assert_eq!(policy.tax_bps, high_pricing.tax_bps.unwrap_or(low_policy.tax_bps));
        prop_assert_eq!(policy.pet_fee, high_pricing.pet_fee.unwrap_or(low_policy.pet_fee));
    }

    // Empty config is identity element for merge
    #[test]
    fn config_merge_identity(config in config_strategy()) {
        let mut merged = config.clone();
        ConfigMerger::merge_into(&mut merged, &Config::default());
        prop_assert_eq!(merged, config);
    }

    // Every property id from any source survives, with the last definition winning
    #[test]
    fn merged_properties_are_union_with_last_wins(
        low in properties_strategy(),
        high in properties_strategy()
    ) {
        let mut result = Config { properties: Some(low.clone()), ..Default::default() };
        ConfigMerger::merge_into(&mut result, &Config { properties: Some(high.clone()), ..Default::default() });
        let merged = result.properties.unwrap_or_default();

        let catalog = Config { properties: Some(merged.clone()), ..Default::default() }.catalog();
        for property in low.iter().chain(high.iter()) {
            prop_assert!(merged.iter().any(|p| p.id == property.id));
        }
        for property in &high {
            let last = high.iter().rev().find(|p| p.id == property.id).unwrap();
            let stored = merged.iter().find(|p| p.id == property.id).unwrap();
            prop_assert_eq!(stored, last);
        }

        let mut ids: Vec<_> = merged.iter().map(|p| p.id.clone()).collect();
        ids.sort();
        ids.dedup();
        prop_assert_eq!(ids.len(), catalog.len());
    }
}
