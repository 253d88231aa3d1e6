//! Common test utilities for integration tests.
//!
//! Fixtures for the lakeside cabin used throughout the booking tests, plus
//! engine constructors over both stores.

pub mod database;

use chrono::NaiveDate;

use staybook::{
    CreateReservation, DateRange, FixedClock, InMemoryCatalog, Money, PricingPolicy, Property,
    PropertyId, RequesterId, ReservationEngine, ReservationStore,
};

/// The "today" every test engine runs at.
#[allow(dead_code)]
pub const TODAY: &str = "2024-02-01";

/// Parses a `YYYY-MM-DD` date.
#[allow(dead_code)]
pub fn date(value: &str) -> NaiveDate {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").unwrap()
}

/// Builds a stay from two `YYYY-MM-DD` dates.
#[allow(dead_code)]
pub fn stay(check_in: &str, check_out: &str) -> DateRange {
    DateRange::parse(check_in, check_out).unwrap()
}

/// Id of the pet-friendly cabin.
#[allow(dead_code)]
pub fn cabin_id() -> PropertyId {
    PropertyId::new("lakeside-cabin").unwrap()
}

/// Id of the two-guest loft that refuses pets.
#[allow(dead_code)]
pub fn loft_id() -> PropertyId {
    PropertyId::new("city-loft").unwrap()
}

/// Catalog with a cabin (5000/night, 4 guests, pets) and a loft
/// (12000/night, 2 guests, no pets).
#[allow(dead_code)]
pub fn test_catalog() -> InMemoryCatalog {
    vec![
        Property::new(cabin_id(), Money::from_minor(5000), 4)
            .with_name("Lakeside Cabin")
            .with_pets_allowed(true),
        Property::new(loft_id(), Money::from_minor(12000), 2).with_name("City Loft"),
    ]
    .into_iter()
    .collect()
}

/// 12% service fee, no tax, 5.00 per pet.
#[allow(dead_code)]
pub fn test_policy() -> PricingPolicy {
    PricingPolicy {
        service_fee_bps: 1200,
        tax_bps: 0,
        pet_fee: Money::from_minor(500),
    }
}

/// An engine over `store` with the test catalog and a clock frozen at [`TODAY`].
#[allow(dead_code)]
pub fn engine_with<S: ReservationStore>(store: S) -> ReservationEngine<InMemoryCatalog, S> {
    ReservationEngine::new(test_catalog(), store, test_policy())
        .with_clock(FixedClock::at_date(date(TODAY)))
}

/// A cabin booking request for `guests` guests.
#[allow(dead_code)]
pub fn cabin_request(check_in: &str, check_out: &str, guests: u32) -> CreateReservation {
    CreateReservation::new(
        cabin_id(),
        RequesterId::new("guest-1").unwrap(),
        stay(check_in, check_out),
        guests,
    )
}
