//! Error types for the staybook library.
//!
//! This module provides the error hierarchy for every engine operation,
//! using `thiserror` for ergonomic error handling. Each booking failure
//! names the invariant it violated so callers can react to it (offer other
//! dates on [`Error::DateConflict`], show a capacity warning on
//! [`Error::CapacityExceeded`], and so on).

use chrono::NaiveDate;
use thiserror::Error;

use crate::property::PropertyId;
use crate::reservation::{BookingStatus, ReservationId};

/// Result type alias for operations that may fail with a staybook error.
///
/// # Examples
///
/// ```
/// use staybook::{Error, Result};
///
/// fn example_operation() -> Result<u32> {
///     Ok(3)
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the staybook library.
#[derive(Debug, Error)]
pub enum Error {
    /// The requested stay is not a valid bookable range.
    #[error("invalid date range {check_in}..{check_out}: {reason}")]
    InvalidRange {
        /// Requested check-in date.
        check_in: NaiveDate,
        /// Requested check-out date.
        check_out: NaiveDate,
        /// Why the range was rejected.
        reason: String,
    },

    /// More guests were requested than the property accommodates.
    #[error("property {property} accommodates at most {max} guest(s), {requested} requested")]
    CapacityExceeded {
        /// The property being booked.
        property: PropertyId,
        /// Requested guest count.
        requested: u32,
        /// Maximum guest count of the property.
        max: u32,
    },

    /// Pets were requested for a property that does not allow them.
    #[error("property {property} does not allow pets ({pets} requested)")]
    PetsNotAllowed {
        /// The property being booked.
        property: PropertyId,
        /// Requested pet count.
        pets: u32,
    },

    /// The requested stay overlaps active reservations.
    #[error("dates conflict with existing reservation(s) for property {property}: {}", join_ids(.conflicts))]
    DateConflict {
        /// The property being booked.
        property: PropertyId,
        /// The active reservations overlapping the request.
        conflicts: Vec<ReservationId>,
    },

    /// The requested resource was not found.
    #[error("not found: {resource}")]
    NotFound {
        /// The resource that was not found.
        resource: String,
    },

    /// A status change that the lifecycle does not permit.
    #[error("reservation {reservation} cannot move from {from} to {to}")]
    InvalidTransition {
        /// The reservation being changed.
        reservation: ReservationId,
        /// Its current status.
        from: BookingStatus,
        /// The requested status.
        to: BookingStatus,
    },

    /// A collaborator timed out or failed; retrying with the same input is safe.
    #[error("service unavailable: {reason}")]
    Unavailable {
        /// What failed.
        reason: String,
    },

    /// A validation error occurred.
    #[error("validation error for '{field}': {message}")]
    Validation {
        /// The field that failed validation.
        field: String,
        /// A description of the validation failure.
        message: String,
    },

    /// A database error occurred.
    #[error("database error: {0}")]
    Database(#[source] rusqlite::Error),

    /// A configuration error occurred.
    #[error("configuration error: {0}")]
    Configuration(#[from] serde_yaml::Error),

    /// Stored JSON could not be encoded or decoded.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An unsupported schema version was encountered.
    #[error("unsupported schema version: expected {expected}, found {found}")]
    UnsupportedSchemaVersion {
        /// The expected schema version.
        expected: u32,
        /// The schema version found in the database.
        found: u32,
    },
}

/// Coarse classification of an [`Error`], for callers that branch on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// See [`Error::InvalidRange`].
    InvalidRange,
    /// See [`Error::CapacityExceeded`].
    CapacityExceeded,
    /// See [`Error::PetsNotAllowed`].
    PetsNotAllowed,
    /// See [`Error::DateConflict`].
    DateConflict,
    /// See [`Error::NotFound`].
    NotFound,
    /// See [`Error::InvalidTransition`].
    InvalidTransition,
    /// See [`Error::Unavailable`].
    Unavailable,
    /// Input validation, configuration and storage failures.
    Internal,
}

fn join_ids(ids: &[ReservationId]) -> String {
    ids.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

impl From<rusqlite::Error> for Error {
    fn from(err: rusqlite::Error) -> Self {
        match err {
            rusqlite::Error::SqliteFailure(ref failure, _)
                if matches!(
                    failure.code,
                    rusqlite::ErrorCode::DatabaseBusy | rusqlite::ErrorCode::DatabaseLocked
                ) =>
            {
                Self::Unavailable {
                    reason: format!("reservation store is busy: {err}"),
                }
            }
            other => Self::Database(other),
        }
    }
}

impl From<crate::reservation::ValidationError> for Error {
    fn from(err: crate::reservation::ValidationError) -> Self {
        Self::Validation {
            field: err.field,
            message: err.message,
        }
    }
}

impl Error {
    /// Returns the coarse kind of this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidRange { .. } => ErrorKind::InvalidRange,
            Self::CapacityExceeded { .. } => ErrorKind::CapacityExceeded,
            Self::PetsNotAllowed { .. } => ErrorKind::PetsNotAllowed,
            Self::DateConflict { .. } => ErrorKind::DateConflict,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::InvalidTransition { .. } => ErrorKind::InvalidTransition,
            Self::Unavailable { .. } => ErrorKind::Unavailable,
            _ => ErrorKind::Internal,
        }
    }

    /// Whether the failed call may be retried with identical input.
    ///
    /// Only [`Error::Unavailable`] qualifies; every other error is terminal
    /// for the call that produced it.
    ///
    /// # Examples
    ///
    /// ```
    /// use staybook::Error;
    ///
    /// let err = Error::Unavailable { reason: "timeout".to_string() };
    /// assert!(err.is_retryable());
    ///
    /// let err = Error::NotFound { resource: "reservation R-000001".to_string() };
    /// assert!(!err.is_retryable());
    /// ```
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Unavailable { .. })
    }

    pub(crate) fn reservation_not_found(id: ReservationId) -> Self {
        Self::NotFound {
            resource: format!("reservation {id}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_invalid_range_error() {
        let err = Error::InvalidRange {
            check_in: date(2024, 3, 4),
            check_out: date(2024, 3, 1),
            reason: "check-out must be after check-in".to_string(),
        };
        let display = format!("{err}");
        assert!(display.contains("invalid date range"));
        assert!(display.contains("2024-03-04..2024-03-01"));
        assert_eq!(err.kind(), ErrorKind::InvalidRange);
    }

    #[test]
    fn test_capacity_exceeded_error() {
        let err = Error::CapacityExceeded {
            property: PropertyId::new("cabin").unwrap(),
            requested: 5,
            max: 4,
        };
        let display = format!("{err}");
        assert!(display.contains("at most 4"));
        assert!(display.contains("5 requested"));
    }

    #[test]
    fn test_date_conflict_lists_reservations() {
        let err = Error::DateConflict {
            property: PropertyId::new("cabin").unwrap(),
            conflicts: vec![ReservationId::new(1), ReservationId::new(7)],
        };
        let display = format!("{err}");
        assert!(display.contains("R-000001, R-000007"));
        assert_eq!(err.kind(), ErrorKind::DateConflict);
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_invalid_transition_error() {
        let err = Error::InvalidTransition {
            reservation: ReservationId::new(3),
            from: BookingStatus::Cancelled,
            to: BookingStatus::Confirmed,
        };
        let display = format!("{err}");
        assert!(display.contains("cancelled"));
        assert!(display.contains("confirmed"));
    }

    #[test]
    fn test_busy_database_maps_to_unavailable() {
        let busy = rusqlite::Error::SqliteFailure(
            rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_BUSY),
            None,
        );
        let err: Error = busy.into();
        assert!(err.is_retryable());
        assert_eq!(err.kind(), ErrorKind::Unavailable);
    }

    #[test]
    fn test_other_database_errors_stay_terminal() {
        let err: Error = rusqlite::Error::QueryReturnedNoRows.into();
        assert!(matches!(err, Error::Database(_)));
        assert_eq!(err.kind(), ErrorKind::Internal);
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(format!("{err}").contains("I/O error"));
    }
}
