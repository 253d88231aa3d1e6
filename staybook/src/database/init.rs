//! Explicit initialization of a data directory.
//!
//! Opening a [`Database`] with auto-creation already builds the schema;
//! this is the deliberate version used by `staybook init`, which also
//! reports what it did and can seed a configuration file.

use std::fs;
use std::path::PathBuf;

use super::config::{DatabaseConfig, DATABASE_FILE_NAME};
use super::connection::Database;
use crate::config::USER_CONFIG_FILE;
use crate::error::Result;

/// Options for data directory initialization.
#[derive(Debug, Clone)]
pub struct InitOptions {
    /// Data directory to initialize.
    pub data_dir: PathBuf,
    /// Write a default `config.yaml` if none exists.
    pub create_config: bool,
}

impl InitOptions {
    /// Creates options for `data_dir` without a configuration file.
    #[must_use]
    pub fn new(data_dir: PathBuf) -> Self {
        Self {
            data_dir,
            create_config: false,
        }
    }

    /// Sets whether to create a default configuration file.
    #[must_use]
    pub const fn with_create_config(mut self, create_config: bool) -> Self {
        self.create_config = create_config;
        self
    }
}

/// What [`init_data_dir`] did.
#[derive(Debug)]
pub struct InitResult {
    /// Whether the data directory was created.
    pub data_dir_created: bool,
    /// Whether the database file was created; false if it already existed.
    pub database_created: bool,
    /// Whether a configuration file was written.
    pub config_created: bool,
    /// Path to the data directory.
    pub data_dir: PathBuf,
}

/// Configuration written by `--with-config`, spelling out the defaults.
pub const DEFAULT_CONFIG_TEMPLATE: &str = r"# staybook configuration
#
# Fee rates are basis points of the nightly subtotal (1200 = 12%).
# Amounts are minor currency units (2500 = 25.00).
pricing:
  service_fee_bps: 1200
  tax_bps: 0
  pet_fee: 2500

# Seconds a booking waits for a competing writer before giving up.
maximum_lock_wait_seconds: 5

# Bookable properties.
# properties:
#   - id: lakeside-cabin
#     name: Lakeside Cabin
#     nightly_rate: 5000
#     max_guests: 4
#     pet_friendly: true
";

/// Creates the data directory and database, and optionally a config file.
///
/// Existing reservations are never touched: an existing database is opened
/// and its schema verified, and an existing `config.yaml` is left alone.
///
/// # Errors
///
/// Returns an error if:
/// - The data directory cannot be created
/// - The database cannot be opened or has an unsupported schema
/// - The configuration file cannot be written
///
/// # Examples
///
/// ```no_run
/// use staybook::database::{init_data_dir, InitOptions};
/// use std::path::PathBuf;
///
/// let options = InitOptions::new(PathBuf::from("/tmp/staybook")).with_create_config(true);
/// let result = init_data_dir(&options).unwrap();
/// println!("database created: {}", result.database_created);
/// ```
pub fn init_data_dir(options: &InitOptions) -> Result<InitResult> {
    let mut result = InitResult {
        data_dir_created: false,
        database_created: false,
        config_created: false,
        data_dir: options.data_dir.clone(),
    };

    if !options.data_dir.exists() {
        fs::create_dir_all(&options.data_dir)?;
        result.data_dir_created = true;
    }

    let db_path = options.data_dir.join(DATABASE_FILE_NAME);
    result.database_created = !db_path.exists();
    Database::open(DatabaseConfig::new(&db_path))?;

    if options.create_config {
        let config_path = options.data_dir.join(USER_CONFIG_FILE);
        if !config_path.exists() {
            fs::write(&config_path, DEFAULT_CONFIG_TEMPLATE)?;
            result.config_created = true;
        }
    }

    log::info!("initialized data directory {}", options.data_dir.display());
    Ok(result)
}
