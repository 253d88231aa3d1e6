//! Deterministic stay pricing.
//!
//! All amounts are integers in the currency's minor unit and all rates are
//! basis points, so a quote is a pure function of its inputs. Each fee
//! component is rounded on its own before the components are summed.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::property::Property;
use crate::stay::DateRange;

/// Basis points in one whole (100 %).
pub const BPS_DENOMINATOR: u32 = 10_000;

/// An amount of money in currency minor units (cents).
///
/// # Examples
///
/// ```
/// use staybook::Money;
///
/// let fee = Money::from_minor(1800);
/// assert_eq!(fee.to_string(), "18.00");
/// assert_eq!(fee.minor(), 1800);
/// ```
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(u64);

impl Money {
    /// Zero.
    pub const ZERO: Self = Self(0);

    /// Creates an amount from minor units.
    #[must_use]
    pub const fn from_minor(minor: u64) -> Self {
        Self(minor)
    }

    /// The amount in minor units.
    #[must_use]
    pub const fn minor(self) -> u64 {
        self.0
    }

    /// Whether the amount is zero.
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Adds two amounts, failing on overflow.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the sum does not fit.
    pub fn checked_add(self, other: Self) -> Result<Self> {
        self.0.checked_add(other.0).map(Self).ok_or_else(overflow)
    }

    /// Multiplies by a count, failing on overflow.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the product does not fit.
    pub fn checked_times(self, count: u32) -> Result<Self> {
        self.0
            .checked_mul(u64::from(count))
            .map(Self)
            .ok_or_else(overflow)
    }

    /// Applies a rate in basis points, rounding half up to the minor unit.
    ///
    /// # Examples
    ///
    /// ```
    /// use staybook::Money;
    ///
    /// assert_eq!(Money::from_minor(15000).apply_rate(1200).minor(), 1800);
    /// // 999 * 10.5% = 104.895 -> 105
    /// assert_eq!(Money::from_minor(999).apply_rate(1050).minor(), 105);
    /// ```
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn apply_rate(self, bps: u32) -> Self {
        let denominator = u128::from(BPS_DENOMINATOR);
        let scaled = u128::from(self.0) * u128::from(bps) + denominator / 2;
        // a rate above 100% could exceed u64 only for absurd amounts
        Self(u64::try_from(scaled / denominator).unwrap_or(u64::MAX))
    }
}

fn overflow() -> Error {
    Error::Validation {
        field: "amount".into(),
        message: "amount overflows the supported range".into(),
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

/// Configurable fee rates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingPolicy {
    /// Service fee in basis points of the base subtotal.
    pub service_fee_bps: u32,
    /// Tax in basis points of the base subtotal; zero disables tax.
    pub tax_bps: u32,
    /// Flat fee per pet for properties without their own pet fee.
    pub pet_fee: Money,
}

impl Default for PricingPolicy {
    fn default() -> Self {
        Self {
            service_fee_bps: 1200,
            tax_bps: 0,
            pet_fee: Money::from_minor(2500),
        }
    }
}

/// Itemized price of a stay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PriceBreakdown {
    /// Nights in the stay.
    pub nights: u32,
    /// Nightly rate the quote was computed with.
    pub nightly_rate: Money,
    /// `nightly_rate * nights`.
    pub base_subtotal: Money,
    /// Service fee.
    pub service_fee: Money,
    /// Pet fee.
    pub pet_fee: Money,
    /// Tax.
    pub tax: Money,
    /// Sum of the four components above.
    pub total: Money,
}

impl PriceBreakdown {
    /// Recomputes the sum of the components.
    ///
    /// # Errors
    ///
    /// Returns a validation error on overflow.
    pub fn components_sum(&self) -> Result<Money> {
        self.base_subtotal
            .checked_add(self.service_fee)?
            .checked_add(self.pet_fee)?
            .checked_add(self.tax)
    }
}

/// Computes quotes under a [`PricingPolicy`].
///
/// # Examples
///
/// ```
/// use staybook::{DateRange, Money, PricingEngine, PricingPolicy, Property, PropertyId};
///
/// let property = Property::new(PropertyId::new("cabin").unwrap(), Money::from_minor(5000), 4)
///     .with_pets_allowed(true);
/// let engine = PricingEngine::new(PricingPolicy {
///     service_fee_bps: 1200,
///     tax_bps: 0,
///     pet_fee: Money::from_minor(500),
/// });
///
/// let stay = DateRange::parse("2024-03-01", "2024-03-04").unwrap();
/// let quote = engine.quote(&property, stay, 2, 1).unwrap();
/// assert_eq!(quote.base_subtotal.minor(), 15000);
/// assert_eq!(quote.service_fee.minor(), 1800);
/// assert_eq!(quote.pet_fee.minor(), 500);
/// assert_eq!(quote.total.minor(), 17300);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PricingEngine {
    policy: PricingPolicy,
}

impl PricingEngine {
    /// Creates a pricing engine.
    #[must_use]
    pub const fn new(policy: PricingPolicy) -> Self {
        Self { policy }
    }

    /// The policy in effect.
    #[must_use]
    pub const fn policy(&self) -> &PricingPolicy {
        &self.policy
    }

    /// Checks guest and pet counts against the property.
    ///
    /// # Errors
    ///
    /// - [`Error::Validation`] if `guests` is zero
    /// - [`Error::CapacityExceeded`] if `guests` exceeds the property maximum
    /// - [`Error::PetsNotAllowed`] if pets are requested where not allowed
    pub fn check_occupancy(&self, property: &Property, guests: u32, pets: u32) -> Result<()> {
        if guests == 0 {
            return Err(Error::Validation {
                field: "guests".into(),
                message: "at least one guest is required".into(),
            });
        }
        if guests > property.max_guests {
            return Err(Error::CapacityExceeded {
                property: property.id.clone(),
                requested: guests,
                max: property.max_guests,
            });
        }
        if pets > 0 && !property.pet_friendly {
            return Err(Error::PetsNotAllowed {
                property: property.id.clone(),
                pets,
            });
        }
        Ok(())
    }

    /// Prices a stay.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`PricingEngine::check_occupancy`], or a
    /// validation error if an amount overflows.
    pub fn quote(
        &self,
        property: &Property,
        stay: DateRange,
        guests: u32,
        pets: u32,
    ) -> Result<PriceBreakdown> {
        self.check_occupancy(property, guests, pets)?;

        let nights = stay.nights();
        let base_subtotal = property.nightly_rate.checked_times(nights)?;
        let service_fee = base_subtotal.apply_rate(self.policy.service_fee_bps);
        let pet_fee = property
            .pet_fee
            .unwrap_or(self.policy.pet_fee)
            .checked_times(pets)?;
        let tax = base_subtotal.apply_rate(self.policy.tax_bps);

        let mut breakdown = PriceBreakdown {
            nights,
            nightly_rate: property.nightly_rate,
            base_subtotal,
            service_fee,
            pet_fee,
            tax,
            total: Money::ZERO,
        };
        breakdown.total = breakdown.components_sum()?;
        Ok(breakdown)
    }
}
