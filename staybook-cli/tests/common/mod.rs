//! Common test utilities for CLI integration tests.
//!
//! This module provides shared helpers for CLI testing, including:
//! - An isolated data directory seeded with a property catalog
//! - Command builders that never see the caller's `STAYBOOK_*` variables
//! - Booking helpers returning the printed reservation id

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Catalog and pricing written to every test data directory.
///
/// The cabin sleeps four and takes pets; the loft sleeps two and does not.
pub const TEST_CONFIG: &str = r"
pricing:
  service_fee_bps: 1200
  tax_bps: 0
  pet_fee: 500
properties:
  - id: lakeside-cabin
    name: Lakeside Cabin
    nightly_rate: 5000
    max_guests: 4
    pet_friendly: true
  - id: city-loft
    name: City Loft
    nightly_rate: 12000
    max_guests: 2
";

/// Environment variables the CLI reads; cleared so tests stay hermetic.
const STAYBOOK_VARS: [&str; 10] = [
    "STAYBOOK_DATA_DIR",
    "STAYBOOK_BUSY_TIMEOUT",
    "STAYBOOK_DISABLE_AUTOINIT",
    "STAYBOOK_OUTPUT_FORMAT",
    "STAYBOOK_REQUESTER",
    "STAYBOOK_SERVICE_FEE_BPS",
    "STAYBOOK_TAX_BPS",
    "STAYBOOK_PET_FEE",
    "STAYBOOK_MAXIMUM_LOCK_WAIT_SECONDS",
    "STAYBOOK_LOG_MODE",
];

/// Test environment with isolated data directory.
pub struct TestEnv {
    /// Temporary directory (kept alive for the duration of the test)
    #[allow(dead_code)]
    temp_dir: TempDir,
    /// Path to the temporary directory
    pub temp_path: PathBuf,
    /// Path to the staybook data directory
    pub data_dir: PathBuf,
}

#[allow(dead_code)]
impl TestEnv {
    /// Creates an environment whose data directory holds [`TEST_CONFIG`]
    /// but no database yet.
    pub fn new() -> Self {
        let env = Self::empty();
        std::fs::create_dir_all(&env.data_dir).expect("Failed to create data dir");
        std::fs::write(env.data_dir.join("config.yaml"), TEST_CONFIG)
            .expect("Failed to write config");
        env
    }

    /// Creates an environment whose data directory does not exist.
    pub fn empty() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let temp_path = temp_dir.path().to_path_buf();
        let data_dir = temp_path.join("staybook-data");

        Self {
            temp_dir,
            temp_path,
            data_dir,
        }
    }

    /// A command with no flags, run from the temp directory with a clean
    /// environment.
    pub fn command_bare(&self) -> Command {
        let mut cmd = Command::cargo_bin("staybook").expect("Failed to find staybook binary");
        for var in STAYBOOK_VARS {
            cmd.env_remove(var);
        }
        cmd.current_dir(&self.temp_path);
        cmd
    }

    /// A command with `--data-dir` pointing at this environment.
    pub fn command(&self) -> Command {
        let mut cmd = self.command_bare();
        cmd.arg("--data-dir").arg(&self.data_dir);
        cmd
    }

    /// Get the temp path.
    pub fn path(&self) -> &Path {
        &self.temp_path
    }

    /// Writes `contents` to `name` under the temp directory.
    pub fn write_file(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.temp_path.join(name);
        std::fs::write(&path, contents).expect("Failed to write test file");
        path
    }

    /// Books the cabin for `guests` and returns the printed reservation id.
    ///
    /// # Panics
    /// Panics if the booking fails.
    pub fn book_cabin(&self, check_in: &str, check_out: &str, guests: u32) -> String {
        let output = self
            .command()
            .args(["book", "--property", "lakeside-cabin", "--requester", "ada"])
            .args(["--check-in", check_in, "--check-out", check_out])
            .args(["--guests", &guests.to_string()])
            .output()
            .expect("Failed to run book command");

        assert!(
            output.status.success(),
            "Book failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );

        let stdout = String::from_utf8(output.stdout).expect("Invalid UTF-8 in output");
        parse_booking(&stdout).0
    }

    /// Runs `list --format json` and returns the parsed array.
    pub fn list_json(&self) -> Vec<serde_json::Value> {
        let output = self
            .command()
            .args(["list", "--format", "json"])
            .output()
            .expect("Failed to run list command");

        assert!(
            output.status.success(),
            "List failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );

        serde_json::from_slice(&output.stdout).expect("list output is not JSON")
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

/// Splits `book` output into reservation id and confirmation code.
#[allow(dead_code)]
pub fn parse_booking(output: &str) -> (String, String) {
    let mut parts = output.split_whitespace();
    let id = parts.next().expect("missing reservation id").to_string();
    let code = parts.next().expect("missing confirmation code").to_string();
    (id, code)
}
