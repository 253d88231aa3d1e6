//! Shared database test utilities.

use std::path::{Path, PathBuf};

use staybook::database::{Database, DatabaseConfig};
use tempfile::TempDir;

/// Creates a database file in a fresh temporary directory.
///
/// The directory is removed when the returned `TempDir` is dropped, so keep
/// it alive for as long as the database is used.
#[allow(dead_code)]
pub fn create_test_database() -> (TempDir, Database) {
    let dir = tempfile::tempdir().unwrap();
    let db = open_at(&database_path(&dir));
    (dir, db)
}

/// Path of the database file inside `dir`.
#[allow(dead_code)]
pub fn database_path(dir: &TempDir) -> PathBuf {
    dir.path().join("staybook.db")
}

/// Opens another connection on an existing file.
#[allow(dead_code)]
pub fn open_at(path: &Path) -> Database {
    Database::open(DatabaseConfig::new(path)).unwrap()
}
