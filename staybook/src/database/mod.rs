//! `SQLite` storage for reservations.
//!
//! [`Database`] implements [`crate::ReservationStore`] on a single database
//! file shared by any number of connections and processes.
//!
//! # Examples
//!
//! ```no_run
//! use staybook::database::{Database, DatabaseConfig};
//! use staybook::{ReservationFilter, ReservationStore};
//!
//! let db = Database::open(DatabaseConfig::new("/tmp/staybook.db")).unwrap();
//! for reservation in db.list(&ReservationFilter::all()).unwrap() {
//!     println!("{} {}", reservation.id, reservation.stay);
//! }
//! ```

mod config;
mod connection;
mod init;
pub mod migrations;
mod operations;
mod schema;
#[cfg(test)]
pub(crate) mod test_util;
mod transaction;

pub use config::{
    default_data_dir, resolve_data_dir, resolve_database_path, DatabaseConfig, DATABASE_FILE_NAME,
    DATA_DIR_ENV,
};
pub use connection::Database;
pub use init::{init_data_dir, InitOptions, InitResult, DEFAULT_CONFIG_TEMPLATE};
pub use schema::CURRENT_SCHEMA_VERSION;
