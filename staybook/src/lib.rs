#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # staybook
//!
//! A reservation and availability engine for vacation rental properties.
//!
//! The engine checks date availability, prices stays, and moves bookings
//! through their lifecycle while guaranteeing that no two active
//! reservations of the same property overlap, even under concurrent
//! requests.
//!
//! ## Core Types
//!
//! - [`ReservationEngine`]: the booking operations
//! - [`DateRange`]: half-open `[check_in, check_out)` stays
//! - [`PricingEngine`] and [`PriceBreakdown`]: quotes in minor units
//! - [`Reservation`], [`BookingStatus`] and [`PaymentStatus`]: booking records
//! - [`ReservationStore`]: storage, with [`MemoryStore`] and the `SQLite` [`Database`]
//! - [`Error`] and [`Result`]: error handling types
//! - [`Logger`] and [`LogLevel`]: logging infrastructure
//!
//! ## Examples
//!
//! ```
//! use staybook::{DateRange, Money, PricingEngine, PricingPolicy, Property, PropertyId};
//!
//! let cabin = Property::new(PropertyId::new("cabin").unwrap(), Money::from_minor(5000), 4)
//!     .with_pets_allowed(true);
//! let policy = PricingPolicy {
//!     service_fee_bps: 1200,
//!     tax_bps: 0,
//!     pet_fee: Money::from_minor(500),
//! };
//!
//! let stay = DateRange::parse("2024-03-01", "2024-03-04").unwrap();
//! let quote = PricingEngine::new(policy).quote(&cabin, stay, 2, 1).unwrap();
//! assert_eq!(quote.total, Money::from_minor(17300));
//! ```

pub mod availability;
pub mod config;
pub mod database;
pub mod engine;
pub mod error;
pub mod logging;
pub mod pricing;
pub mod property;
pub mod reservation;
pub mod stay;
pub mod store;

// Re-export key types at crate root for convenience
pub use availability::{find_conflicts, Availability, AvailabilityChecker};
pub use config::{Config, ConfigBuilder};
pub use database::{Database, DatabaseConfig};
pub use engine::{Clock, CreateReservation, FixedClock, ReservationEngine, SystemClock};
pub use error::{Error, ErrorKind, Result};
pub use logging::{init_logger, LogLevel, Logger};
pub use pricing::{Money, PriceBreakdown, PricingEngine, PricingPolicy};
pub use property::{InMemoryCatalog, Property, PropertyCatalog, PropertyId};
pub use reservation::{
    BookingStatus, ConfirmationCode, GuestDetails, NewReservation, PaymentStatus,
    RequesterId, Reservation, ReservationId, ValidationError,
};
pub use stay::DateRange;
pub use store::{MemoryStore, ReservationFilter, ReservationPatch, ReservationStore};
