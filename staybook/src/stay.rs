//! Stay date ranges.
//!
//! A stay is a half-open range of calendar dates `[check_in, check_out)`:
//! the guest occupies the property on the night of `check_in` and leaves on
//! `check_out`. Two stays sharing a turnover day therefore never overlap.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Date format accepted on the command line and in stored records.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A non-empty, half-open range of calendar dates.
///
/// # Examples
///
/// ```
/// use staybook::DateRange;
///
/// let first = DateRange::parse("2024-03-01", "2024-03-04").unwrap();
/// let second = DateRange::parse("2024-03-04", "2024-03-06").unwrap();
///
/// assert_eq!(first.nights(), 3);
/// // Same-day turnover is not a conflict.
/// assert!(!first.overlaps(&second));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawDateRange")]
pub struct DateRange {
    check_in: NaiveDate,
    check_out: NaiveDate,
}

#[derive(Deserialize)]
struct RawDateRange {
    check_in: NaiveDate,
    check_out: NaiveDate,
}

impl TryFrom<RawDateRange> for DateRange {
    type Error = Error;

    fn try_from(raw: RawDateRange) -> Result<Self> {
        Self::new(raw.check_in, raw.check_out)
    }
}

impl DateRange {
    /// Creates a range, rejecting empty or inverted ones.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRange`] unless `check_in < check_out`.
    pub fn new(check_in: NaiveDate, check_out: NaiveDate) -> Result<Self> {
        if check_out <= check_in {
            return Err(Error::InvalidRange {
                check_in,
                check_out,
                reason: "check-out must be at least one night after check-in".into(),
            });
        }
        Ok(Self {
            check_in,
            check_out,
        })
    }

    /// Parses a range from two `YYYY-MM-DD` strings.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if either date is not a valid calendar
    /// date, or [`Error::InvalidRange`] if the range is empty.
    pub fn parse(check_in: &str, check_out: &str) -> Result<Self> {
        Self::new(
            parse_date("check_in", check_in)?,
            parse_date("check_out", check_out)?,
        )
    }

    /// The arrival date (first occupied night).
    #[must_use]
    pub const fn check_in(&self) -> NaiveDate {
        self.check_in
    }

    /// The departure date (not occupied).
    #[must_use]
    pub const fn check_out(&self) -> NaiveDate {
        self.check_out
    }

    /// Number of nights in the stay, always at least one.
    #[must_use]
    pub fn nights(&self) -> u32 {
        // check_in < check_out is guaranteed by construction
        u32::try_from((self.check_out - self.check_in).num_days()).unwrap_or(u32::MAX)
    }

    /// Half-open overlap test: `[s, e)` and `[S, E)` overlap iff `S < e && E > s`.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        other.check_in < self.check_out && other.check_out > self.check_in
    }

    /// Whether the night starting on `date` belongs to the stay.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.check_in <= date && date < self.check_out
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}..{}",
            self.check_in.format(DATE_FORMAT),
            self.check_out.format(DATE_FORMAT)
        )
    }
}

/// Parses a single `YYYY-MM-DD` date, naming `field` on failure.
///
/// # Errors
///
/// Returns [`Error::Validation`] if `value` is not a valid calendar date.
pub fn parse_date(field: &str, value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|e| Error::Validation {
        field: field.into(),
        message: format!("'{value}' is not a valid YYYY-MM-DD date: {e}"),
    })
}

#[cfg(all(test, feature = "property-tests"))]
mod proptests;
