//! Reservation records and their lifecycle states.
//!
//! A [`Reservation`] is what the store persists; a [`NewReservation`] is the
//! validated draft the engine hands to the store for the atomic
//! check-then-insert. Booking status and payment status are independent
//! state machines.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

use crate::pricing::{Money, PriceBreakdown};
use crate::property::PropertyId;
use crate::stay::DateRange;

/// Free-form guest information (name, email, phone, ...), ordered by key.
pub type GuestDetails = BTreeMap<String, String>;

/// Truncates a timestamp to the millisecond precision records are stored
/// with.
///
/// # Examples
///
/// ```
/// use chrono::{DateTime, Utc};
/// use staybook::reservation::stored_timestamp;
///
/// let at: DateTime<Utc> = "2024-03-01T10:00:00.123456789Z".parse().unwrap();
/// assert_eq!(stored_timestamp(at).to_rfc3339(), "2024-03-01T10:00:00.123+00:00");
/// ```
#[must_use]
pub fn stored_timestamp(at: DateTime<Utc>) -> DateTime<Utc> {
    at.trunc_subsecs(3)
}

/// Store-generated identifier of a reservation.
///
/// # Examples
///
/// ```
/// use staybook::ReservationId;
///
/// let id = ReservationId::new(42);
/// assert_eq!(id.to_string(), "R-000042");
/// assert_eq!("R-000042".parse::<ReservationId>().unwrap(), id);
/// assert_eq!("42".parse::<ReservationId>().unwrap(), id);
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ReservationId(u64);

impl ReservationId {
    /// Wraps a raw identifier.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// The raw identifier.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ReservationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "R-{:06}", self.0)
    }
}

impl FromStr for ReservationId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed
            .strip_prefix("R-")
            .or_else(|| trimmed.strip_prefix("r-"))
            .unwrap_or(trimmed);
        digits.parse::<u64>().map(Self).map_err(|_| ValidationError {
            field: "reservation".into(),
            message: format!("'{s}' is not a reservation id (expected R-000042 or 42)"),
        })
    }
}

/// Identifier of the user who requested a reservation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RequesterId(String);

impl RequesterId {
    /// Creates an identifier from a non-empty string.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is empty after trimming whitespace.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError {
                field: "requester".into(),
                message: "requester id must be non-empty".into(),
            });
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for RequesterId {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<RequesterId> for String {
    fn from(id: RequesterId) -> Self {
        id.0
    }
}

impl fmt::Display for RequesterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Human-facing booking reference, assigned when a reservation is first
/// persisted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfirmationCode(String);

impl ConfirmationCode {
    const PREFIX: &'static str = "SB-";

    /// Generates a fresh random code of the form `SB-XXXXXXXX`.
    #[must_use]
    pub fn generate() -> Self {
        let simple = uuid::Uuid::new_v4().simple().to_string();
        Self(format!("{}{}", Self::PREFIX, simple[..8].to_ascii_uppercase()))
    }

    /// Wraps a code read back from storage.
    #[must_use]
    pub fn from_stored(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// Returns the code as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConfirmationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Booking lifecycle state.
///
/// `Pending` moves to `Confirmed` or `Cancelled`, `Confirmed` moves to
/// `Cancelled`, and `Cancelled` is final. Only non-cancelled reservations
/// block dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    /// Created, not yet confirmed.
    Pending,
    /// Confirmed by the host or payment flow.
    Confirmed,
    /// Cancelled; retained for audit only.
    Cancelled,
}

impl BookingStatus {
    /// Every status, in lifecycle order.
    pub const ALL: [Self; 3] = [Self::Pending, Self::Confirmed, Self::Cancelled];

    /// Lowercase name used in storage and output.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Whether a reservation in this status blocks its dates.
    #[must_use]
    pub const fn is_active(self) -> bool {
        !matches!(self, Self::Cancelled)
    }

    /// Whether the lifecycle permits moving from `self` to `next`.
    ///
    /// # Examples
    ///
    /// ```
    /// use staybook::BookingStatus;
    ///
    /// assert!(BookingStatus::Pending.can_transition_to(BookingStatus::Confirmed));
    /// assert!(BookingStatus::Confirmed.can_transition_to(BookingStatus::Cancelled));
    /// assert!(!BookingStatus::Cancelled.can_transition_to(BookingStatus::Confirmed));
    /// assert!(!BookingStatus::Confirmed.can_transition_to(BookingStatus::Pending));
    /// ```
    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Confirmed | Self::Cancelled) | (Self::Confirmed, Self::Cancelled)
        )
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookingStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "confirmed" => Ok(Self::Confirmed),
            "cancelled" | "canceled" => Ok(Self::Cancelled),
            _ => Err(ValidationError {
                field: "status".into(),
                message: format!("unknown booking status '{s}'"),
            }),
        }
    }
}

/// Payment state, tracked independently of [`BookingStatus`].
///
/// Any value may be set at any time; the engine records what the payment
/// collaborator reports and leaves policy (cancel on failure, refund on
/// cancel) to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    /// No payment outcome yet.
    Pending,
    /// Payment captured.
    Completed,
    /// Payment attempt failed.
    Failed,
    /// Payment returned to the guest.
    Refunded,
}

impl PaymentStatus {
    /// Lowercase name used in storage and output.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
            Self::Failed => "failed",
            Self::Refunded => "refunded",
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "completed" => Ok(Self::Completed),
            "failed" => Ok(Self::Failed),
            "refunded" => Ok(Self::Refunded),
            _ => Err(ValidationError {
                field: "payment_status".into(),
                message: format!("unknown payment status '{s}'"),
            }),
        }
    }
}

/// A persisted reservation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    /// Store-generated identifier.
    pub id: ReservationId,
    /// The booked property.
    pub property_id: PropertyId,
    /// Who requested the booking.
    pub requester_id: RequesterId,
    /// Occupied nights.
    pub stay: DateRange,
    /// Number of guests.
    pub guests: u32,
    /// Number of pets.
    pub pets: u32,
    /// Price fixed at creation.
    pub price: PriceBreakdown,
    /// Booking lifecycle state.
    pub status: BookingStatus,
    /// Payment state.
    pub payment_status: PaymentStatus,
    /// Booking reference shown to the guest.
    pub confirmation_code: ConfirmationCode,
    /// Guest contact information.
    pub guest_details: GuestDetails,
    /// Free-text requests from the guest.
    pub special_requests: Option<String>,
    /// Reason recorded on cancellation.
    pub cancellation_reason: Option<String>,
    /// When the reservation was created.
    pub created_at: DateTime<Utc>,
    /// When the reservation last changed.
    pub updated_at: DateTime<Utc>,
}

impl Reservation {
    /// Whether this reservation blocks its dates.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.status.is_active()
    }

    /// Total price of the stay.
    #[must_use]
    pub const fn total(&self) -> Money {
        self.price.total
    }
}

/// A validated reservation draft, not yet persisted.
///
/// # Examples
///
/// ```
/// use staybook::{
///     DateRange, Money, NewReservation, PricingEngine, Property, PropertyId, RequesterId,
/// };
///
/// let property = Property::new(PropertyId::new("cabin").unwrap(), Money::from_minor(5000), 4);
/// let stay = DateRange::parse("2024-03-01", "2024-03-04").unwrap();
/// let price = PricingEngine::default().quote(&property, stay, 2, 0).unwrap();
///
/// let draft = NewReservation::builder(property.id.clone(), RequesterId::new("u1").unwrap(), stay)
///     .guests(2)
///     .price(price)
///     .guest_detail("name", "Ada")
///     .build()
///     .unwrap();
/// assert_eq!(draft.guests, 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReservation {
    /// The property to book.
    pub property_id: PropertyId,
    /// Who requests the booking.
    pub requester_id: RequesterId,
    /// Requested nights.
    pub stay: DateRange,
    /// Number of guests.
    pub guests: u32,
    /// Number of pets.
    pub pets: u32,
    /// Quoted price.
    pub price: PriceBreakdown,
    /// Guest contact information.
    pub guest_details: GuestDetails,
    /// Free-text requests.
    pub special_requests: Option<String>,
    /// Creation timestamp to record.
    pub requested_at: DateTime<Utc>,
}

impl NewReservation {
    /// Starts building a draft.
    #[must_use]
    pub fn builder(
        property_id: PropertyId,
        requester_id: RequesterId,
        stay: DateRange,
    ) -> NewReservationBuilder {
        NewReservationBuilder {
            property_id,
            requester_id,
            stay,
            guests: 1,
            pets: 0,
            price: None,
            guest_details: GuestDetails::new(),
            special_requests: None,
            requested_at: None,
        }
    }

    /// Turns the draft into a pending record with the store-assigned
    /// identity.
    #[must_use]
    pub fn into_reservation(self, id: ReservationId, code: ConfirmationCode) -> Reservation {
        Reservation {
            id,
            property_id: self.property_id,
            requester_id: self.requester_id,
            stay: self.stay,
            guests: self.guests,
            pets: self.pets,
            price: self.price,
            status: BookingStatus::Pending,
            payment_status: PaymentStatus::Pending,
            confirmation_code: code,
            guest_details: self.guest_details,
            special_requests: self.special_requests,
            cancellation_reason: None,
            created_at: self.requested_at,
            updated_at: self.requested_at,
        }
    }
}

/// Builder for [`NewReservation`].
#[derive(Debug)]
pub struct NewReservationBuilder {
    property_id: PropertyId,
    requester_id: RequesterId,
    stay: DateRange,
    guests: u32,
    pets: u32,
    price: Option<PriceBreakdown>,
    guest_details: GuestDetails,
    special_requests: Option<String>,
    requested_at: Option<DateTime<Utc>>,
}

impl NewReservationBuilder {
    /// Sets the guest count (default 1).
    #[must_use]
    pub const fn guests(mut self, guests: u32) -> Self {
        self.guests = guests;
        self
    }

    /// Sets the pet count (default 0).
    #[must_use]
    pub const fn pets(mut self, pets: u32) -> Self {
        self.pets = pets;
        self
    }

    /// Sets the quoted price. Required.
    #[must_use]
    pub const fn price(mut self, price: PriceBreakdown) -> Self {
        self.price = Some(price);
        self
    }

    /// Adds one guest detail entry.
    #[must_use]
    pub fn guest_detail(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.guest_details.insert(key.into(), value.into());
        self
    }

    /// Replaces the guest details.
    #[must_use]
    pub fn guest_details(mut self, details: GuestDetails) -> Self {
        self.guest_details = details;
        self
    }

    /// Sets the special requests. Blank text is treated as none.
    #[must_use]
    pub fn special_requests(mut self, requests: Option<String>) -> Self {
        self.special_requests = requests
            .map(|r| r.trim().to_string())
            .filter(|r| !r.is_empty());
        self
    }

    /// Sets the creation timestamp (default: now), kept to the millisecond.
    #[must_use]
    pub const fn requested_at(mut self, at: DateTime<Utc>) -> Self {
        self.requested_at = Some(at);
        self
    }

    /// Builds the draft.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - no guests are given
    /// - no price was set, or it was computed for a different number of nights
    /// - a guest detail key is blank
    pub fn build(self) -> Result<NewReservation, ValidationError> {
        if self.guests == 0 {
            return Err(ValidationError {
                field: "guests".into(),
                message: "at least one guest is required".into(),
            });
        }

        let price = self.price.ok_or_else(|| ValidationError {
            field: "price".into(),
            message: "a quote is required".into(),
        })?;
        if price.nights != self.stay.nights() {
            return Err(ValidationError {
                field: "price".into(),
                message: format!(
                    "quote covers {} night(s) but the stay has {}",
                    price.nights,
                    self.stay.nights()
                ),
            });
        }

        if self.guest_details.keys().any(|k| k.trim().is_empty()) {
            return Err(ValidationError {
                field: "guest_details".into(),
                message: "detail keys must be non-empty".into(),
            });
        }

        Ok(NewReservation {
            property_id: self.property_id,
            requester_id: self.requester_id,
            stay: self.stay,
            guests: self.guests,
            pets: self.pets,
            price,
            guest_details: self.guest_details,
            special_requests: self.special_requests,
            requested_at: stored_timestamp(self.requested_at.unwrap_or_else(Utc::now)),
        })
    }
}

/// Error type for validation failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// The field that failed validation.
    pub field: String,
    /// A description of the validation failure.
    pub message: String,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "validation error for '{}': {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

#[cfg(all(test, feature = "property-tests"))]
mod proptests;
