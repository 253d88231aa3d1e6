//! Reservation persistence.
//!
//! [`ReservationStore`] is the seam between the engine and storage. Every
//! implementation must make [`ReservationStore::atomic_insert`] a single
//! atomic check-then-insert per property, and apply
//! [`ReservationStore::update`] as a compare-and-swap on the current status.
//! Two implementations ship with the crate: [`MemoryStore`] and the SQLite
//! [`crate::database::Database`].

mod memory;
#[cfg(all(test, feature = "property-tests"))]
mod proptests;

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::error::{Error, Result};
use crate::property::PropertyId;
use crate::reservation::{
    stored_timestamp, BookingStatus, NewReservation, PaymentStatus, RequesterId, Reservation, ReservationId,
};

pub use memory::MemoryStore;

/// Storage for reservations.
pub trait ReservationStore: Send + Sync {
    /// Returns the non-cancelled reservations of a property.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Unavailable`] if the store cannot be read.
    fn list_active(&self, property: &PropertyId) -> Result<Vec<Reservation>>;

    /// Inserts a reservation unless an active reservation of the same
    /// property overlaps it.
    ///
    /// The overlap check and the insert happen in one atomic section, so
    /// concurrent inserts for overlapping ranges produce at most one
    /// success. The store assigns the id and confirmation code; the record
    /// starts `pending`/`pending`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DateConflict`] naming the overlapping reservations,
    /// or [`Error::Unavailable`] if the store is busy.
    fn atomic_insert(&self, draft: NewReservation) -> Result<Reservation>;

    /// Fetches a reservation by id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Unavailable`] if the store cannot be read.
    fn get(&self, id: ReservationId) -> Result<Option<Reservation>>;

    /// Applies a patch atomically and returns the resulting record.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] for unknown ids and
    /// [`Error::InvalidTransition`] when the status change is not permitted
    /// from the status current at the time of the write.
    fn update(&self, id: ReservationId, patch: &ReservationPatch) -> Result<Reservation>;

    /// Lists reservations matching a filter, ordered by id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Unavailable`] if the store cannot be read.
    fn list(&self, filter: &ReservationFilter) -> Result<Vec<Reservation>>;
}

impl<S: ReservationStore + ?Sized> ReservationStore for Arc<S> {
    fn list_active(&self, property: &PropertyId) -> Result<Vec<Reservation>> {
        (**self).list_active(property)
    }

    fn atomic_insert(&self, draft: NewReservation) -> Result<Reservation> {
        (**self).atomic_insert(draft)
    }

    fn get(&self, id: ReservationId) -> Result<Option<Reservation>> {
        (**self).get(id)
    }

    fn update(&self, id: ReservationId, patch: &ReservationPatch) -> Result<Reservation> {
        (**self).update(id, patch)
    }

    fn list(&self, filter: &ReservationFilter) -> Result<Vec<Reservation>> {
        (**self).list(filter)
    }
}

impl<S: ReservationStore + ?Sized> ReservationStore for &S {
    fn list_active(&self, property: &PropertyId) -> Result<Vec<Reservation>> {
        (**self).list_active(property)
    }

    fn atomic_insert(&self, draft: NewReservation) -> Result<Reservation> {
        (**self).atomic_insert(draft)
    }

    fn get(&self, id: ReservationId) -> Result<Option<Reservation>> {
        (**self).get(id)
    }

    fn update(&self, id: ReservationId, patch: &ReservationPatch) -> Result<Reservation> {
        (**self).update(id, patch)
    }

    fn list(&self, filter: &ReservationFilter) -> Result<Vec<Reservation>> {
        (**self).list(filter)
    }
}

/// A change to apply to a stored reservation.
///
/// # Examples
///
/// ```
/// use chrono::Utc;
/// use staybook::{BookingStatus, ReservationPatch};
///
/// let patch = ReservationPatch::status(BookingStatus::Cancelled, Utc::now())
///     .with_cancellation_reason(Some("plans changed".to_string()));
/// assert_eq!(patch.status, Some(BookingStatus::Cancelled));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReservationPatch {
    /// Target booking status.
    pub status: Option<BookingStatus>,
    /// New payment status.
    pub payment_status: Option<PaymentStatus>,
    /// Reason recorded when the patch cancels the reservation.
    pub cancellation_reason: Option<String>,
    /// Timestamp recorded as `updated_at` if anything changes, truncated to
    /// milliseconds.
    pub updated_at: DateTime<Utc>,
}

impl ReservationPatch {
    /// A booking status change.
    #[must_use]
    pub const fn status(to: BookingStatus, at: DateTime<Utc>) -> Self {
        Self {
            status: Some(to),
            payment_status: None,
            cancellation_reason: None,
            updated_at: at,
        }
    }

    /// A payment status change.
    #[must_use]
    pub const fn payment(to: PaymentStatus, at: DateTime<Utc>) -> Self {
        Self {
            status: None,
            payment_status: Some(to),
            cancellation_reason: None,
            updated_at: at,
        }
    }

    /// Attaches a cancellation reason.
    #[must_use]
    pub fn with_cancellation_reason(mut self, reason: Option<String>) -> Self {
        self.cancellation_reason = reason
            .map(|r| r.trim().to_string())
            .filter(|r| !r.is_empty());
        self
    }

    /// Applies the patch to `reservation` in place.
    ///
    /// A status change to the status the reservation already has is a no-op,
    /// which keeps confirm and cancel idempotent. Returns whether anything
    /// changed; `updated_at` moves only if it did.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidTransition`] if the lifecycle forbids the
    /// change. The reservation is left untouched in that case.
    pub fn apply(&self, reservation: &mut Reservation) -> Result<bool> {
        let mut changed = false;

        if let Some(to) = self.status {
            if reservation.status != to {
                if !reservation.status.can_transition_to(to) {
                    return Err(Error::InvalidTransition {
                        reservation: reservation.id,
                        from: reservation.status,
                        to,
                    });
                }
                reservation.status = to;
                if to == BookingStatus::Cancelled {
                    reservation
                        .cancellation_reason
                        .clone_from(&self.cancellation_reason);
                }
                changed = true;
            }
        }

        if let Some(payment) = self.payment_status {
            if reservation.payment_status != payment {
                reservation.payment_status = payment;
                changed = true;
            }
        }

        if changed {
            reservation.updated_at = stored_timestamp(self.updated_at);
        }
        Ok(changed)
    }
}

/// Criteria for [`ReservationStore::list`]. Empty criteria match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReservationFilter {
    /// Only this property.
    pub property: Option<PropertyId>,
    /// Only this booking status.
    pub status: Option<BookingStatus>,
    /// Only this requester.
    pub requester: Option<RequesterId>,
}

impl ReservationFilter {
    /// Matches everything.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Restricts to one property.
    #[must_use]
    pub fn with_property(mut self, property: PropertyId) -> Self {
        self.property = Some(property);
        self
    }

    /// Restricts to one booking status.
    #[must_use]
    pub const fn with_status(mut self, status: BookingStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Restricts to one requester.
    #[must_use]
    pub fn with_requester(mut self, requester: RequesterId) -> Self {
        self.requester = Some(requester);
        self
    }

    /// Whether `reservation` satisfies every criterion.
    #[must_use]
    pub fn matches(&self, reservation: &Reservation) -> bool {
        self.property
            .as_ref()
            .map_or(true, |p| *p == reservation.property_id)
            && self.status.map_or(true, |s| s == reservation.status)
            && self
                .requester
                .as_ref()
                .map_or(true, |r| *r == reservation.requester_id)
    }
}
