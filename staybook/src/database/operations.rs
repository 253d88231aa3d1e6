//! Reservation storage on `SQLite`.
//!
//! Inserts and status changes run inside `BEGIN IMMEDIATE` transactions, so
//! the overlap check and the compare-and-swap on status hold across
//! connections and processes sharing the database file.

use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::error::{Error, Result};
use crate::pricing::{Money, PriceBreakdown};
use crate::property::PropertyId;
use crate::reservation::{
    BookingStatus, ConfirmationCode, GuestDetails, NewReservation, PaymentStatus, RequesterId,
    Reservation, ReservationId,
};
use crate::stay::{DateRange, DATE_FORMAT};
use crate::store::{ReservationFilter, ReservationPatch, ReservationStore};

use super::connection::Database;
use super::schema::{
    INSERT_RESERVATION, RESERVATION_COLUMNS, SELECT_CONFLICTS, UPDATE_RESERVATION_STATE,
};

/// Attempts at drawing an unused confirmation code before giving up.
const CODE_ATTEMPTS: usize = 5;

fn conversion_error<E>(column: usize, err: E) -> rusqlite::Error
where
    E: std::error::Error + Send + Sync + 'static,
{
    rusqlite::Error::FromSqlConversionFailure(column, Type::Text, Box::new(err))
}

fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

fn parse_date(row: &Row<'_>, column: usize) -> rusqlite::Result<NaiveDate> {
    let value: String = row.get(column)?;
    NaiveDate::parse_from_str(&value, DATE_FORMAT).map_err(|e| conversion_error(column, e))
}

fn parse_timestamp(row: &Row<'_>, column: usize) -> rusqlite::Result<DateTime<Utc>> {
    let millis: i64 = row.get(column)?;
    DateTime::from_timestamp_millis(millis)
        .ok_or(rusqlite::Error::IntegralValueOutOfRange(column, millis))
}

fn money(row: &Row<'_>, column: usize) -> rusqlite::Result<Money> {
    row.get::<_, u64>(column).map(Money::from_minor)
}

fn id_to_sql(id: ReservationId) -> Result<i64> {
    i64::try_from(id.value()).map_err(|_| Error::reservation_not_found(id))
}

/// Maps a row selected with [`RESERVATION_COLUMNS`].
fn row_to_reservation(row: &Row<'_>) -> rusqlite::Result<Reservation> {
    let property_id =
        PropertyId::new(row.get::<_, String>(1)?).map_err(|e| conversion_error(1, e))?;
    let requester_id =
        RequesterId::new(row.get::<_, String>(2)?).map_err(|e| conversion_error(2, e))?;
    let stay = DateRange::new(parse_date(row, 3)?, parse_date(row, 4)?)
        .map_err(|e| conversion_error(3, e))?;
    let status = row
        .get::<_, String>(14)?
        .parse::<BookingStatus>()
        .map_err(|e| conversion_error(14, e))?;
    let payment_status = row
        .get::<_, String>(15)?
        .parse::<PaymentStatus>()
        .map_err(|e| conversion_error(15, e))?;
    let guest_details: GuestDetails = serde_json::from_str(&row.get::<_, String>(17)?)
        .map_err(|e| conversion_error(17, e))?;

    Ok(Reservation {
        id: ReservationId::new(row.get(0)?),
        property_id,
        requester_id,
        stay,
        guests: row.get(5)?,
        pets: row.get(6)?,
        price: PriceBreakdown {
            nightly_rate: money(row, 7)?,
            nights: row.get(8)?,
            base_subtotal: money(row, 9)?,
            service_fee: money(row, 10)?,
            pet_fee: money(row, 11)?,
            tax: money(row, 12)?,
            total: money(row, 13)?,
        },
        status,
        payment_status,
        confirmation_code: ConfirmationCode::from_stored(row.get::<_, String>(16)?),
        guest_details,
        special_requests: row.get(18)?,
        cancellation_reason: row.get(19)?,
        created_at: parse_timestamp(row, 20)?,
        updated_at: parse_timestamp(row, 21)?,
    })
}

fn select_by_id(conn: &Connection, id: ReservationId) -> Result<Option<Reservation>> {
    let sql = format!("SELECT {RESERVATION_COLUMNS} FROM reservations WHERE id = ?1");
    Ok(conn
        .query_row(&sql, params![id_to_sql(id)?], row_to_reservation)
        .optional()?)
}

fn select_conflicts(conn: &Connection, draft: &NewReservation) -> Result<Vec<ReservationId>> {
    let mut stmt = conn.prepare(SELECT_CONFLICTS)?;
    let ids = stmt
        .query_map(
            params![
                draft.property_id.as_str(),
                format_date(draft.stay.check_in()),
                format_date(draft.stay.check_out()),
            ],
            |row| row.get::<_, u64>(0).map(ReservationId::new),
        )?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(ids)
}

fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(failure, _)
            if failure.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
    )
}

fn insert_draft(
    conn: &Connection,
    draft: &NewReservation,
) -> Result<(ReservationId, ConfirmationCode)> {
    let guest_details = serde_json::to_string(&draft.guest_details)?;
    let created_at = draft.requested_at.timestamp_millis();

    for _ in 0..CODE_ATTEMPTS {
        let code = ConfirmationCode::generate();
        let result = conn.execute(
            INSERT_RESERVATION,
            params![
                draft.property_id.as_str(),
                draft.requester_id.as_str(),
                format_date(draft.stay.check_in()),
                format_date(draft.stay.check_out()),
                draft.guests,
                draft.pets,
                draft.price.nightly_rate.minor(),
                draft.price.nights,
                draft.price.base_subtotal.minor(),
                draft.price.service_fee.minor(),
                draft.price.pet_fee.minor(),
                draft.price.tax.minor(),
                draft.price.total.minor(),
                BookingStatus::Pending.as_str(),
                PaymentStatus::Pending.as_str(),
                code.as_str(),
                guest_details,
                draft.special_requests,
                created_at,
            ],
        );
        match result {
            Ok(_) => {
                let rowid = u64::try_from(conn.last_insert_rowid()).unwrap_or_default();
                return Ok((ReservationId::new(rowid), code));
            }
            Err(ref e) if is_unique_violation(e) => {
                log::debug!("confirmation code {code} already taken, drawing another");
            }
            Err(e) => return Err(e.into()),
        }
    }

    Err(Error::Unavailable {
        reason: "could not allocate a unique confirmation code".into(),
    })
}

impl ReservationStore for Database {
    fn list_active(&self, property: &PropertyId) -> Result<Vec<Reservation>> {
        let sql = format!(
            "SELECT {RESERVATION_COLUMNS} FROM reservations \
             WHERE property_id = ?1 AND status != 'cancelled' ORDER BY id"
        );
        let conn = self.connection();
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
            .query_map(params![property.as_str()], row_to_reservation)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
    }

    fn atomic_insert(&self, draft: NewReservation) -> Result<Reservation> {
        self.immediate(|tx| {
            let conflicts = select_conflicts(tx, &draft)?;
            if !conflicts.is_empty() {
                return Err(Error::DateConflict {
                    property: draft.property_id.clone(),
                    conflicts,
                });
            }
            insert_draft(tx, &draft)
        })
        .map(|(id, code)| draft.into_reservation(id, code))
    }

    fn get(&self, id: ReservationId) -> Result<Option<Reservation>> {
        select_by_id(&self.connection(), id)
    }

    fn update(&self, id: ReservationId, patch: &ReservationPatch) -> Result<Reservation> {
        self.immediate(|tx| {
            let mut reservation =
                select_by_id(tx, id)?.ok_or_else(|| Error::reservation_not_found(id))?;

            if patch.apply(&mut reservation)? {
                tx.execute(
                    UPDATE_RESERVATION_STATE,
                    params![
                        reservation.status.as_str(),
                        reservation.payment_status.as_str(),
                        reservation.cancellation_reason,
                        reservation.updated_at.timestamp_millis(),
                        id_to_sql(id)?,
                    ],
                )?;
            }
            Ok(reservation)
        })
    }

    fn list(&self, filter: &ReservationFilter) -> Result<Vec<Reservation>> {
        let sql = format!(
            "SELECT {RESERVATION_COLUMNS} FROM reservations \
             WHERE (?1 IS NULL OR property_id = ?1) \
               AND (?2 IS NULL OR status = ?2) \
               AND (?3 IS NULL OR requester_id = ?3) \
             ORDER BY id"
        );
        let conn = self.connection();
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
            .query_map(
                params![
                    filter.property.as_ref().map(PropertyId::as_str),
                    filter.status.map(BookingStatus::as_str),
                    filter.requester.as_ref().map(RequesterId::as_str),
                ],
                row_to_reservation,
            )?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
    }
}
