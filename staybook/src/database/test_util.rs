//! Shared test utilities for database unit tests.

use tempfile::tempdir;

use crate::database::{Database, DatabaseConfig};
use crate::pricing::{Money, PricingEngine};
use crate::property::{Property, PropertyId};
use crate::reservation::{NewReservation, RequesterId};
use crate::stay::DateRange;

/// Creates a temporary file-backed test database.
///
/// # Panics
///
/// Panics if the temporary directory or database cannot be created.
#[must_use]
pub fn create_test_database() -> Database {
    let dir = tempdir().unwrap();
    let path = dir.path().join("test.db");
    let db = Database::open(DatabaseConfig::new(path)).unwrap();

    // Prevent the TempDir from being dropped immediately
    std::mem::forget(dir);

    db
}

/// Builds a one-guest draft for `property` over `[check_in, check_out)`.
///
/// # Panics
///
/// Panics if the dates or identifiers are invalid.
#[must_use]
pub fn test_draft(property: &str, check_in: &str, check_out: &str) -> NewReservation {
    let property = Property::new(
        PropertyId::new(property).unwrap(),
        Money::from_minor(5000),
        4,
    );
    let stay = DateRange::parse(check_in, check_out).unwrap();
    let price = PricingEngine::default()
        .quote(&property, stay, 1, 0)
        .unwrap();
    NewReservation::builder(property.id, RequesterId::new("user-1").unwrap(), stay)
        .price(price)
        .build()
        .unwrap()
}
