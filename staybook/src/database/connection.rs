//! Database connection management.
//!
//! This module provides the main database connection type with proper
//! initialization and PRAGMA settings for concurrent `SQLite` access.

use std::path::Path;
use std::sync::{Mutex, MutexGuard, PoisonError};

use rusqlite::{Connection, OpenFlags};

use crate::error::{Error, Result};

use super::config::DatabaseConfig;

/// A `SQLite`-backed reservation store.
///
/// One `Database` owns one connection. Threads sharing a `Database` take
/// turns on it; separate `Database` values (or processes) opened on the same
/// file coordinate through `SQLite` locking, with writers serialized by
/// `BEGIN IMMEDIATE`.
///
/// # Examples
///
/// ```no_run
/// use staybook::database::{Database, DatabaseConfig};
///
/// let config = DatabaseConfig::new("/tmp/staybook.db");
/// let db = Database::open(config).unwrap();
/// ```
#[derive(Debug)]
pub struct Database {
    conn: Mutex<Connection>,
    config: DatabaseConfig,
}

impl Database {
    /// Opens a database connection with the given configuration.
    ///
    /// This function will:
    /// - Create the parent directory if `auto_create` is enabled
    /// - Set WAL mode for concurrent access
    /// - Configure the busy timeout
    /// - Initialize or verify the schema
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The database is missing and `auto_create` is disabled
    /// - The file or its parent directory cannot be created
    /// - PRAGMA settings cannot be applied
    /// - The schema version is not supported
    pub fn open(config: DatabaseConfig) -> Result<Self> {
        if !config.path.exists() {
            if !config.auto_create {
                return Err(Error::NotFound {
                    resource: format!("database {}", config.path.display()),
                });
            }
            if let Some(parent) = config.path.parent() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let flags = if config.read_only {
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX
        } else if config.auto_create {
            OpenFlags::SQLITE_OPEN_READ_WRITE
                | OpenFlags::SQLITE_OPEN_CREATE
                | OpenFlags::SQLITE_OPEN_NO_MUTEX
        } else {
            OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_NO_MUTEX
        };

        let conn = Connection::open_with_flags(&config.path, flags)?;
        conn.busy_timeout(config.busy_timeout)?;

        if !config.read_only {
            // PRAGMA journal_mode returns a row
            let _: String = conn.query_row("PRAGMA journal_mode = WAL", [], |row| row.get(0))?;
            conn.execute_batch("PRAGMA synchronous = NORMAL")?;
            super::migrations::check_schema_compatibility(&conn)?;
        }

        log::debug!("opened reservation database {}", config.path.display());
        Ok(Self {
            conn: Mutex::new(conn),
            config,
        })
    }

    /// Opens a private in-memory database, mainly for tests and benches.
    ///
    /// # Errors
    ///
    /// Returns an error if the schema cannot be created.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        super::migrations::check_schema_compatibility(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
            config: DatabaseConfig::new(":memory:"),
        })
    }

    /// Path of the database file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.config.path
    }

    /// Locks and returns the underlying connection.
    pub fn connection(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
