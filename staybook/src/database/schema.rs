//! Database schema definitions and SQL constants.

/// Current schema version, stored in the metadata table.
pub const CURRENT_SCHEMA_VERSION: u32 = 1;

/// Key/value table holding the schema version.
pub const CREATE_METADATA_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS metadata (
        key TEXT PRIMARY KEY NOT NULL,
        value TEXT NOT NULL
    )";

/// The reservations table.
///
/// Dates are ISO `YYYY-MM-DD` text, so lexical comparison is date order.
/// Amounts are minor units, timestamps epoch milliseconds.
pub const CREATE_RESERVATIONS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS reservations (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        property_id TEXT NOT NULL,
        requester_id TEXT NOT NULL,
        check_in TEXT NOT NULL,
        check_out TEXT NOT NULL,
        guests INTEGER NOT NULL CHECK (guests >= 1),
        pets INTEGER NOT NULL DEFAULT 0,
        nightly_rate INTEGER NOT NULL,
        nights INTEGER NOT NULL,
        base_subtotal INTEGER NOT NULL,
        service_fee INTEGER NOT NULL,
        pet_fee INTEGER NOT NULL,
        tax INTEGER NOT NULL,
        total INTEGER NOT NULL,
        status TEXT NOT NULL,
        payment_status TEXT NOT NULL,
        confirmation_code TEXT NOT NULL UNIQUE,
        guest_details TEXT NOT NULL DEFAULT '{}',
        special_requests TEXT,
        cancellation_reason TEXT,
        created_at INTEGER NOT NULL,
        updated_at INTEGER NOT NULL,
        CHECK (check_in < check_out)
    )";

/// Speeds up the per-property overlap query.
pub const CREATE_PROPERTY_DATES_INDEX: &str = "CREATE INDEX IF NOT EXISTS \
     idx_reservations_property_dates ON reservations(property_id, check_in, check_out)";

/// Speeds up status-filtered listings.
pub const CREATE_STATUS_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_reservations_status ON reservations(status)";

/// SQL statement to select the schema version from the metadata table.
pub const SELECT_SCHEMA_VERSION: &str = "SELECT value FROM metadata WHERE key = 'schema_version'";

/// SQL statement to insert or update the schema version in the metadata table.
pub const INSERT_SCHEMA_VERSION: &str =
    "INSERT OR REPLACE INTO metadata (key, value) VALUES ('schema_version', ?)";

/// Column list shared by every reservation query, in row-mapping order.
pub const RESERVATION_COLUMNS: &str = "id, property_id, requester_id, check_in, check_out, \
     guests, pets, nightly_rate, nights, base_subtotal, service_fee, pet_fee, tax, total, \
     status, payment_status, confirmation_code, guest_details, special_requests, \
     cancellation_reason, created_at, updated_at";

/// Inserts a new reservation; the id is assigned by `SQLite`.
pub const INSERT_RESERVATION: &str = r"
    INSERT INTO reservations
    (property_id, requester_id, check_in, check_out, guests, pets,
     nightly_rate, nights, base_subtotal, service_fee, pet_fee, tax, total,
     status, payment_status, confirmation_code, guest_details, special_requests,
     cancellation_reason, created_at, updated_at)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18,
            NULL, ?19, ?19)
";

/// Ids of active reservations of a property overlapping `[?2, ?3)`.
pub const SELECT_CONFLICTS: &str = r"
    SELECT id FROM reservations
    WHERE property_id = ?1
      AND status != 'cancelled'
      AND check_in < ?3
      AND check_out > ?2
    ORDER BY id
";

/// Writes back the mutable columns of a reservation.
pub const UPDATE_RESERVATION_STATE: &str = r"
    UPDATE reservations
    SET status = ?1, payment_status = ?2, cancellation_reason = ?3, updated_at = ?4
    WHERE id = ?5
";
