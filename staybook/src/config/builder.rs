//! Layered configuration assembly.

use std::path::{Path, PathBuf};

use crate::config::environment::EnvironmentConfig;
use crate::config::loader::ConfigLoader;
use crate::config::merger::ConfigMerger;
use crate::config::schema::Config;
use crate::config::validator::ConfigValidator;
use crate::error::Result;

/// Builds the effective configuration from files, environment and
/// programmatic overrides.
///
/// # Examples
///
/// ```
/// use staybook::config::{Config, ConfigBuilder};
///
/// let config = ConfigBuilder::new()
///     .skip_files()
///     .skip_env()
///     .with_config(Config {
///         maximum_lock_wait_seconds: Some(10),
///         ..Default::default()
///     })
///     .build()
///     .unwrap();
/// assert_eq!(config.maximum_lock_wait_seconds, Some(10));
/// ```
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    working_dir: Option<PathBuf>,
    data_dir: Option<PathBuf>,
    skip_files: bool,
    skip_env: bool,
    overrides: Vec<Config>,
}

impl ConfigBuilder {
    /// Creates a builder that reads files from the current directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Directory where project file discovery starts.
    #[must_use]
    pub fn with_working_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.working_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Data directory holding the user `config.yaml`.
    #[must_use]
    pub fn with_data_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.data_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Skips all configuration files.
    #[must_use]
    pub const fn skip_files(mut self) -> Self {
        self.skip_files = true;
        self
    }

    /// Skips `STAYBOOK_*` environment overrides.
    #[must_use]
    pub const fn skip_env(mut self) -> Self {
        self.skip_env = true;
        self
    }

    /// Adds a programmatic layer above every other source.
    #[must_use]
    pub fn with_config(mut self, config: Config) -> Self {
        self.overrides.push(config);
        self
    }

    /// Loads, merges and validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if a file cannot be read or parsed, an environment
    /// variable is malformed, or the merged result fails validation.
    pub fn build(self) -> Result<Config> {
        let mut config = if self.skip_files {
            Config::default()
        } else {
            let working_dir = match self.working_dir {
                Some(dir) => dir,
                None => std::env::current_dir()?,
            };
            let sources = ConfigLoader::load_all(&working_dir, self.data_dir.as_deref())?;
            for source in &sources {
                ConfigValidator::validate(&source.config)?;
            }
            ConfigMerger::merge(sources)
        };

        if !self.skip_env {
            EnvironmentConfig::apply_overrides(&mut config)?;
        }

        for layer in &self.overrides {
            ConfigMerger::merge_into(&mut config, layer);
        }

        ConfigValidator::validate(&config)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::environment::TAX_BPS_ENV;
    use crate::config::loader::{LOCAL_CONFIG_FILE, PROJECT_CONFIG_FILE, USER_CONFIG_FILE};
    use crate::error::Error;
    use serial_test::serial;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_without_sources() {
        let config = ConfigBuilder::new().skip_files().skip_env().build().unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    #[serial]
    fn test_file_layers_in_precedence_order() {
        let data_dir = TempDir::new().unwrap();
        let project = TempDir::new().unwrap();
        fs::write(
            data_dir.path().join(USER_CONFIG_FILE),
            "pricing:\n  service_fee_bps: 900\n  tax_bps: 100\nmaximum_lock_wait_seconds: 7\n",
        )
        .unwrap();
        fs::write(
            project.path().join(PROJECT_CONFIG_FILE),
            "pricing:\n  tax_bps: 300\n",
        )
        .unwrap();
        fs::write(
            project.path().join(LOCAL_CONFIG_FILE),
            "maximum_lock_wait_seconds: 12\n",
        )
        .unwrap();

        let config = ConfigBuilder::new()
            .with_working_dir(project.path())
            .with_data_dir(data_dir.path())
            .skip_env()
            .build()
            .unwrap();

        let policy = config.pricing_policy();
        assert_eq!(policy.service_fee_bps, 900);
        assert_eq!(policy.tax_bps, 300);
        assert_eq!(config.maximum_lock_wait_seconds, Some(12));
    }

    #[test]
    #[serial]
    fn test_env_overrides_files_and_programmatic_overrides_env() {
        let project = TempDir::new().unwrap();
        let data_dir = TempDir::new().unwrap();
        fs::write(
            project.path().join(PROJECT_CONFIG_FILE),
            "pricing:\n  tax_bps: 300\n",
        )
        .unwrap();

        std::env::set_var(TAX_BPS_ENV, "400");
        let from_env = ConfigBuilder::new()
            .with_working_dir(project.path())
            .with_data_dir(data_dir.path())
            .build();
        let overridden = ConfigBuilder::new()
            .with_working_dir(project.path())
            .with_data_dir(data_dir.path())
            .with_config(Config {
                maximum_lock_wait_seconds: Some(1),
                ..Default::default()
            })
            .build();
        std::env::remove_var(TAX_BPS_ENV);

        assert_eq!(from_env.unwrap().pricing_policy().tax_bps, 400);
        let overridden = overridden.unwrap();
        assert_eq!(overridden.pricing_policy().tax_bps, 400);
        assert_eq!(overridden.maximum_lock_wait_seconds, Some(1));
    }

    #[test]
    fn test_invalid_file_is_rejected() {
        let project = TempDir::new().unwrap();
        let data_dir = TempDir::new().unwrap();
        fs::write(
            project.path().join(PROJECT_CONFIG_FILE),
            "maximum_lock_wait_seconds: 0\n",
        )
        .unwrap();

        let err = ConfigBuilder::new()
            .with_working_dir(project.path())
            .with_data_dir(data_dir.path())
            .skip_env()
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::Validation { .. }));
    }

    #[test]
    fn test_invalid_override_is_rejected() {
        let result = ConfigBuilder::new()
            .skip_files()
            .skip_env()
            .with_config(Config {
                maximum_lock_wait_seconds: Some(0),
                ..Default::default()
            })
            .build();
        assert!(result.is_err());
    }
}
