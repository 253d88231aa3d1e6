//! Availability checks.
//!
//! The check is advisory: it reads the store without taking the insert
//! lock, so a range reported available can still be lost to a concurrent
//! booking. [`crate::ReservationStore::atomic_insert`] is the authority.

use serde::Serialize;

use crate::error::Result;
use crate::property::{PropertyCatalog, PropertyId};
use crate::reservation::{Reservation, ReservationId};
use crate::stay::DateRange;
use crate::store::ReservationStore;

/// Outcome of an availability check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Availability {
    /// True when no active reservation overlaps the range.
    pub available: bool,
    /// Active reservations overlapping the range, ordered by id.
    pub conflicts: Vec<ReservationId>,
}

impl Availability {
    fn from_conflicts(conflicts: Vec<ReservationId>) -> Self {
        Self {
            available: conflicts.is_empty(),
            conflicts,
        }
    }
}

/// Returns the ids of active reservations in `existing` that overlap `stay`.
///
/// Cancelled reservations never conflict. The result is sorted by id.
///
/// # Examples
///
/// ```
/// use staybook::{find_conflicts, DateRange, Reservation};
///
/// let stay = DateRange::parse("2024-03-01", "2024-03-04").unwrap();
/// let existing: Vec<Reservation> = Vec::new();
/// assert!(find_conflicts(&existing, &stay).is_empty());
/// ```
pub fn find_conflicts<'a, I>(existing: I, stay: &DateRange) -> Vec<ReservationId>
where
    I: IntoIterator<Item = &'a Reservation>,
{
    let mut conflicts: Vec<ReservationId> = existing
        .into_iter()
        .filter(|r| r.is_active() && r.stay.overlaps(stay))
        .map(|r| r.id)
        .collect();
    conflicts.sort_unstable();
    conflicts
}

/// Answers whether a property is free for a date range.
#[derive(Debug)]
pub struct AvailabilityChecker<'a, C: ?Sized, S: ?Sized> {
    catalog: &'a C,
    store: &'a S,
}

impl<'a, C, S> AvailabilityChecker<'a, C, S>
where
    C: PropertyCatalog + ?Sized,
    S: ReservationStore + ?Sized,
{
    /// Creates a checker over a catalog and a store.
    pub const fn new(catalog: &'a C, store: &'a S) -> Self {
        Self { catalog, store }
    }

    /// Checks `stay` against the active reservations of `property`.
    ///
    /// Past ranges are answered like any other; the "not in the past" rule
    /// applies only when creating a reservation.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::NotFound`] for unknown properties and
    /// [`crate::Error::Unavailable`] if the store cannot be read.
    pub fn check(&self, property: &PropertyId, stay: DateRange) -> Result<Availability> {
        self.catalog.get_property(property)?;
        let active = self.store.list_active(property)?;
        let availability = Availability::from_conflicts(find_conflicts(&active, &stay));
        log::debug!(
            "availability of {property} for {stay}: {} conflict(s)",
            availability.conflicts.len()
        );
        Ok(availability)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::pricing::{Money, PricingEngine};
    use crate::property::{MockPropertyCatalog, Property};
    use crate::reservation::{ConfirmationCode, NewReservation, RequesterId};
    use crate::store::MemoryStore;

    fn cabin() -> Property {
        Property::new(PropertyId::new("cabin").unwrap(), Money::from_minor(5000), 4)
    }

    fn stay(a: &str, b: &str) -> DateRange {
        DateRange::parse(a, b).unwrap()
    }

    fn reservation(id: u64, a: &str, b: &str) -> Reservation {
        let stay = stay(a, b);
        let price = PricingEngine::default().quote(&cabin(), stay, 1, 0).unwrap();
        NewReservation::builder(cabin().id, RequesterId::new("u").unwrap(), stay)
            .price(price)
            .build()
            .unwrap()
            .into_reservation(ReservationId::new(id), ConfirmationCode::generate())
    }

    #[test]
    fn test_find_conflicts_half_open() {
        let existing = vec![reservation(1, "2024-03-01", "2024-03-04")];

        assert!(find_conflicts(&existing, &stay("2024-03-04", "2024-03-06")).is_empty());
        assert!(find_conflicts(&existing, &stay("2024-02-27", "2024-03-01")).is_empty());
        assert_eq!(
            find_conflicts(&existing, &stay("2024-03-03", "2024-03-05")),
            vec![ReservationId::new(1)]
        );
    }

    #[test]
    fn test_find_conflicts_ignores_cancelled() {
        let mut cancelled = reservation(1, "2024-03-01", "2024-03-04");
        cancelled.status = crate::reservation::BookingStatus::Cancelled;
        let active = reservation(2, "2024-03-02", "2024-03-03");

        let conflicts = find_conflicts(&[cancelled, active], &stay("2024-03-01", "2024-03-04"));
        assert_eq!(conflicts, vec![ReservationId::new(2)]);
    }

    #[test]
    fn test_find_conflicts_sorted() {
        let existing = vec![
            reservation(9, "2024-03-01", "2024-03-02"),
            reservation(3, "2024-03-02", "2024-03-03"),
        ];
        let conflicts = find_conflicts(&existing, &stay("2024-03-01", "2024-03-03"));
        assert_eq!(conflicts, vec![ReservationId::new(3), ReservationId::new(9)]);
    }

    #[test]
    fn test_check_unknown_property() {
        let mut catalog = MockPropertyCatalog::new();
        catalog.expect_get_property().returning(|id| {
            Err(Error::NotFound {
                resource: format!("property {id}"),
            })
        });
        let store = MemoryStore::new();

        let checker = AvailabilityChecker::new(&catalog, &store);
        let err = checker
            .check(
                &PropertyId::new("ghost").unwrap(),
                stay("2024-03-01", "2024-03-02"),
            )
            .unwrap_err();
        assert!(matches!(err, Error::NotFound { .. }));
    }

    #[test]
    fn test_check_catalog_unavailable_propagates() {
        let mut catalog = MockPropertyCatalog::new();
        catalog.expect_get_property().times(1).returning(|_| {
            Err(Error::Unavailable {
                reason: "catalog timeout".into(),
            })
        });
        let store = MemoryStore::new();

        let err = AvailabilityChecker::new(&catalog, &store)
            .check(&cabin().id, stay("2024-03-01", "2024-03-02"))
            .unwrap_err();
        assert!(err.is_retryable());
    }

    #[test]
    fn test_check_empty_store_is_available() {
        let mut catalog = MockPropertyCatalog::new();
        catalog.expect_get_property().returning(|_| Ok(cabin()));
        let store = MemoryStore::new();

        let availability = AvailabilityChecker::new(&catalog, &store)
            .check(&cabin().id, stay("2024-03-01", "2024-03-04"))
            .unwrap();
        assert!(availability.available);
        assert!(availability.conflicts.is_empty());
    }
}
