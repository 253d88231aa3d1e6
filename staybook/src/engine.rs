//! The reservation lifecycle manager.
//!
//! [`ReservationEngine`] ties the catalog, pricing and store together and
//! exposes the booking operations. It holds no mutable state of its own;
//! share it across threads behind an `Arc`.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};

use crate::availability::{Availability, AvailabilityChecker};
use crate::error::{Error, Result};
use crate::pricing::{PriceBreakdown, PricingEngine, PricingPolicy};
use crate::property::{PropertyCatalog, PropertyId};
use crate::reservation::{
    BookingStatus, GuestDetails, NewReservation, PaymentStatus, RequesterId, Reservation,
    ReservationId,
};
use crate::stay::DateRange;
use crate::store::{ReservationFilter, ReservationPatch, ReservationStore};

/// Source of the current time.
pub trait Clock: Send + Sync {
    /// The current instant.
    fn now(&self) -> DateTime<Utc>;

    /// Today's date in UTC.
    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

/// The system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock frozen at one instant.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use staybook::{Clock, FixedClock};
///
/// let clock = FixedClock::at_date(NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
/// assert_eq!(clock.today().to_string(), "2024-02-01");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(DateTime<Utc>);

impl FixedClock {
    /// Freezes the clock at `at`.
    #[must_use]
    pub const fn new(at: DateTime<Utc>) -> Self {
        Self(at)
    }

    /// Freezes the clock at midnight UTC of `date`.
    #[must_use]
    pub fn at_date(date: NaiveDate) -> Self {
        Self(date.and_time(chrono::NaiveTime::MIN).and_utc())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Parameters of [`ReservationEngine::create_reservation`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateReservation {
    /// The property to book.
    pub property_id: PropertyId,
    /// Who is booking.
    pub requester_id: RequesterId,
    /// Requested nights.
    pub stay: DateRange,
    /// Number of guests.
    pub guests: u32,
    /// Number of pets.
    pub pets: u32,
    /// Guest contact information.
    pub guest_details: GuestDetails,
    /// Free-text requests.
    pub special_requests: Option<String>,
}

impl CreateReservation {
    /// Creates a request without pets, details or special requests.
    ///
    /// # Examples
    ///
    /// ```
    /// use staybook::{CreateReservation, DateRange, PropertyId, RequesterId};
    ///
    /// let request = CreateReservation::new(
    ///     PropertyId::new("cabin").unwrap(),
    ///     RequesterId::new("user-1").unwrap(),
    ///     DateRange::parse("2024-03-01", "2024-03-04").unwrap(),
    ///     2,
    /// )
    /// .with_pets(1)
    /// .with_guest_detail("name", "Ada Lovelace");
    /// assert_eq!(request.pets, 1);
    /// ```
    #[must_use]
    pub fn new(
        property_id: PropertyId,
        requester_id: RequesterId,
        stay: DateRange,
        guests: u32,
    ) -> Self {
        Self {
            property_id,
            requester_id,
            stay,
            guests,
            pets: 0,
            guest_details: GuestDetails::new(),
            special_requests: None,
        }
    }

    /// Sets the pet count.
    #[must_use]
    pub const fn with_pets(mut self, pets: u32) -> Self {
        self.pets = pets;
        self
    }

    /// Adds one guest detail entry.
    #[must_use]
    pub fn with_guest_detail(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.guest_details.insert(key.into(), value.into());
        self
    }

    /// Replaces the guest details.
    #[must_use]
    pub fn with_guest_details(mut self, details: GuestDetails) -> Self {
        self.guest_details = details;
        self
    }

    /// Sets the special requests.
    #[must_use]
    pub fn with_special_requests(mut self, requests: Option<String>) -> Self {
        self.special_requests = requests;
        self
    }
}

/// The booking engine.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use staybook::{
///     BookingStatus, CreateReservation, DateRange, FixedClock, InMemoryCatalog, MemoryStore,
///     Money, PricingPolicy, Property, PropertyId, RequesterId, ReservationEngine,
/// };
///
/// let cabin = PropertyId::new("cabin").unwrap();
/// let catalog: InMemoryCatalog =
///     vec![Property::new(cabin.clone(), Money::from_minor(5000), 4)].into_iter().collect();
/// let engine = ReservationEngine::new(catalog, MemoryStore::new(), PricingPolicy::default())
///     .with_clock(FixedClock::at_date(NaiveDate::from_ymd_opt(2024, 2, 1).unwrap()));
///
/// let stay = DateRange::parse("2024-03-01", "2024-03-04").unwrap();
/// let reservation = engine
///     .create_reservation(CreateReservation::new(
///         cabin.clone(),
///         RequesterId::new("user-1").unwrap(),
///         stay,
///         2,
///     ))
///     .unwrap();
/// assert_eq!(reservation.status, BookingStatus::Pending);
/// assert!(!engine.check_availability(&cabin, stay).unwrap().available);
/// ```
pub struct ReservationEngine<C, S> {
    catalog: C,
    store: S,
    pricing: PricingEngine,
    clock: Arc<dyn Clock>,
}

impl<C, S> fmt::Debug for ReservationEngine<C, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReservationEngine")
            .field("pricing", &self.pricing)
            .finish_non_exhaustive()
    }
}

impl<C, S> ReservationEngine<C, S>
where
    C: PropertyCatalog,
    S: ReservationStore,
{
    /// Creates an engine using the system clock.
    pub fn new(catalog: C, store: S, policy: PricingPolicy) -> Self {
        Self {
            catalog,
            store,
            pricing: PricingEngine::new(policy),
            clock: Arc::new(SystemClock),
        }
    }

    /// Replaces the clock used for "today" and timestamps.
    #[must_use]
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    /// The property catalog.
    pub const fn catalog(&self) -> &C {
        &self.catalog
    }

    /// The reservation store.
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// The pricing policy in effect.
    pub const fn policy(&self) -> &PricingPolicy {
        self.pricing.policy()
    }

    /// Reports whether `stay` is free at `property`.
    ///
    /// Advisory only: a later [`Self::create_reservation`] may still fail
    /// with [`Error::DateConflict`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] for unknown properties and
    /// [`Error::Unavailable`] if a collaborator fails.
    pub fn check_availability(&self, property: &PropertyId, stay: DateRange) -> Result<Availability> {
        AvailabilityChecker::new(&self.catalog, &self.store).check(property, stay)
    }

    /// Prices a stay without booking it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`], [`Error::CapacityExceeded`],
    /// [`Error::PetsNotAllowed`] or a validation error for zero guests.
    pub fn quote(
        &self,
        property: &PropertyId,
        stay: DateRange,
        guests: u32,
        pets: u32,
    ) -> Result<PriceBreakdown> {
        let property = self.catalog.get_property(property)?;
        self.pricing.quote(&property, stay, guests, pets)
    }

    /// Books a stay.
    ///
    /// Validation and pricing happen before anything is written; the
    /// overlap check and insert are one atomic store operation. A
    /// [`Error::DateConflict`] is final for this request and never retried
    /// here.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidRange`] if check-in is before today
    /// - [`Error::NotFound`] for unknown properties
    /// - [`Error::CapacityExceeded`] / [`Error::PetsNotAllowed`]
    /// - [`Error::DateConflict`] naming the reservations in the way
    /// - [`Error::Unavailable`] if a collaborator fails
    pub fn create_reservation(&self, request: CreateReservation) -> Result<Reservation> {
        let now = self.clock.now();
        let today = self.clock.today();
        if request.stay.check_in() < today {
            return Err(Error::InvalidRange {
                check_in: request.stay.check_in(),
                check_out: request.stay.check_out(),
                reason: format!("check-in is before today ({today})"),
            });
        }

        let property = self.catalog.get_property(&request.property_id)?;
        let price = self
            .pricing
            .quote(&property, request.stay, request.guests, request.pets)?;

        let draft = NewReservation::builder(request.property_id, request.requester_id, request.stay)
            .guests(request.guests)
            .pets(request.pets)
            .price(price)
            .guest_details(request.guest_details)
            .special_requests(request.special_requests)
            .requested_at(now)
            .build()?;

        match self.store.atomic_insert(draft) {
            Ok(reservation) => {
                log::info!(
                    "created reservation {} ({}) for {} {}",
                    reservation.id,
                    reservation.confirmation_code,
                    reservation.property_id,
                    reservation.stay
                );
                Ok(reservation)
            }
            Err(err) => {
                log::info!("reservation for {} refused: {err}", property.id);
                Err(err)
            }
        }
    }

    /// Moves a pending reservation to confirmed.
    ///
    /// Confirming an already confirmed reservation succeeds without change.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] for unknown ids and
    /// [`Error::InvalidTransition`] for cancelled reservations.
    pub fn confirm_reservation(&self, id: ReservationId) -> Result<Reservation> {
        let reservation = self.store.update(
            id,
            &ReservationPatch::status(BookingStatus::Confirmed, self.clock.now()),
        )?;
        log::info!("confirmed reservation {id}");
        Ok(reservation)
    }

    /// Cancels a reservation, releasing its dates.
    ///
    /// Cancelling an already cancelled reservation succeeds without change
    /// and keeps the original reason.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] for unknown ids.
    pub fn cancel_reservation(
        &self,
        id: ReservationId,
        reason: Option<String>,
    ) -> Result<Reservation> {
        let patch = ReservationPatch::status(BookingStatus::Cancelled, self.clock.now())
            .with_cancellation_reason(reason);
        let reservation = self.store.update(id, &patch)?;
        log::info!("cancelled reservation {id}");
        Ok(reservation)
    }

    /// Records the payment outcome reported by the payment collaborator.
    ///
    /// The booking status is not touched; a failed payment does not cancel.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] for unknown ids.
    pub fn update_payment_status(
        &self,
        id: ReservationId,
        status: PaymentStatus,
    ) -> Result<Reservation> {
        let reservation = self
            .store
            .update(id, &ReservationPatch::payment(status, self.clock.now()))?;
        log::info!("payment status of reservation {id} is now {status}");
        Ok(reservation)
    }

    /// Fetches a reservation.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] for unknown ids.
    pub fn get_reservation(&self, id: ReservationId) -> Result<Reservation> {
        self.store
            .get(id)?
            .ok_or_else(|| Error::reservation_not_found(id))
    }

    /// Lists reservations matching `filter`, ordered by id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Unavailable`] if the store cannot be read.
    pub fn list_reservations(&self, filter: &ReservationFilter) -> Result<Vec<Reservation>> {
        self.store.list(filter)
    }
}
