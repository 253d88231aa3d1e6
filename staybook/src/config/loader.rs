//! Configuration file discovery and loading.
//!
//! This module handles discovering and loading staybook configuration files
//! from various locations with proper precedence.

use crate::config::schema::Config;
use crate::error::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// File name of the shared project configuration.
pub const PROJECT_CONFIG_FILE: &str = "staybook.yaml";

/// File name of the private, uncommitted project configuration.
pub const LOCAL_CONFIG_FILE: &str = "staybook.local.yaml";

/// File name of the user configuration inside the data directory.
pub const USER_CONFIG_FILE: &str = "config.yaml";

/// Configuration source with its precedence level.
///
/// Lower precedence values are overridden by higher ones.
///
/// # Examples
///
/// ```
/// use staybook::config::ConfigSource;
/// use std::path::PathBuf;
///
/// let user_config = ConfigSource {
///     path: PathBuf::from("~/.staybook/config.yaml"),
///     precedence: 1,
///     config: Default::default(),
/// };
/// ```
#[derive(Debug, Clone)]
pub struct ConfigSource {
    /// Path to the configuration file.
    pub path: PathBuf,
    /// Precedence level (higher values take priority).
    pub precedence: u8,
    /// Parsed configuration.
    pub config: Config,
}

/// Loads configuration from various sources.
///
/// # Examples
///
/// ```no_run
/// use staybook::config::ConfigLoader;
/// use std::path::Path;
///
/// let sources = ConfigLoader::load_all(Path::new("."), None).unwrap();
/// println!("Found {} configuration sources", sources.len());
/// ```
pub struct ConfigLoader;

impl ConfigLoader {
    /// Discover and load all configuration files.
    ///
    /// Searches for:
    /// 1. User config at `<data-dir>/config.yaml` (precedence 1)
    /// 2. `staybook.yaml` walking up from `working_dir` (precedence 2)
    /// 3. `staybook.local.yaml` next to it (precedence 3)
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration file exists but cannot be read
    /// or parsed.
    pub fn load_all(working_dir: &Path, data_dir: Option<&Path>) -> Result<Vec<ConfigSource>> {
        let mut sources = Vec::new();

        if let Some(user_config) = Self::load_user_config(data_dir)? {
            sources.push(user_config);
        }

        sources.extend(Self::discover_project_configs(working_dir)?);
        sources.sort_by_key(|s| s.precedence);

        Ok(sources)
    }

    fn load_user_config(data_dir: Option<&Path>) -> Result<Option<ConfigSource>> {
        let data_dir = match data_dir {
            Some(dir) => dir.to_path_buf(),
            None => crate::database::resolve_data_dir()?,
        };
        let config_path = data_dir.join(USER_CONFIG_FILE);

        if !config_path.exists() {
            return Ok(None);
        }

        let config = Self::load_file(&config_path)?;
        Ok(Some(ConfigSource {
            path: config_path,
            precedence: 1,
            config,
        }))
    }

    /// Discover project configurations by walking up directories.
    ///
    /// Stops at the first directory containing either project file.
    ///
    /// # Errors
    ///
    /// Returns an error if any discovered file cannot be read or parsed.
    pub fn discover_project_configs(start_dir: &Path) -> Result<Vec<ConfigSource>> {
        let mut configs = Vec::new();
        let mut current = start_dir.to_path_buf();

        loop {
            for (name, precedence) in [(PROJECT_CONFIG_FILE, 2), (LOCAL_CONFIG_FILE, 3)] {
                let path = current.join(name);
                if path.exists() {
                    let config = Self::load_file(&path)?;
                    configs.push(ConfigSource {
                        path,
                        precedence,
                        config,
                    });
                }
            }

            if !configs.is_empty() || !current.pop() {
                break;
            }
        }

        Ok(configs)
    }

    /// Load and parse a YAML configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be read and
    /// [`Error::Configuration`] if the YAML is invalid.
    pub fn load_file(path: &Path) -> Result<Config> {
        let contents = fs::read_to_string(path)?;
        if is_blank_document(&contents) {
            log::debug!("configuration {} is empty", path.display());
            return Ok(Config::default());
        }
        let config = serde_yaml::from_str(&contents).map_err(Error::Configuration)?;
        log::debug!("loaded configuration from {}", path.display());
        Ok(config)
    }
}

/// True when a YAML file holds nothing but whitespace and comments.
fn is_blank_document(contents: &str) -> bool {
    contents
        .lines()
        .map(str::trim)
        .all(|line| line.is_empty() || line.starts_with('#') || line == "---")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_load_nonexistent_file() {
        let result = ConfigLoader::load_file(Path::new("/nonexistent/path/config.yaml"));
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[test]
    fn test_load_comment_only_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("staybook.yaml");
        fs::write(&config_path, "# nothing yet\n\n---\n").unwrap();

        let config = ConfigLoader::load_file(&config_path).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_invalid_yaml() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("bad.yaml");
        fs::write(&config_path, "invalid: yaml: syntax:").unwrap();

        let result = ConfigLoader::load_file(&config_path);
        assert!(matches!(result, Err(Error::Configuration(_))));
    }

    #[test]
    fn test_load_valid_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");
        fs::write(&config_path, "maximum_lock_wait_seconds: 3\n").unwrap();

        let config = ConfigLoader::load_file(&config_path).unwrap();
        assert_eq!(config.maximum_lock_wait_seconds, Some(3));
    }

    #[test]
    fn test_discover_no_configs() {
        let temp_dir = TempDir::new().unwrap();
        let configs = ConfigLoader::discover_project_configs(temp_dir.path()).unwrap();
        assert!(configs.is_empty());
    }

    #[test]
    fn test_discover_both_project_files() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join(PROJECT_CONFIG_FILE),
            "pricing:\n  tax_bps: 100\n",
        )
        .unwrap();
        fs::write(
            temp_dir.path().join(LOCAL_CONFIG_FILE),
            "pricing:\n  tax_bps: 200\n",
        )
        .unwrap();

        let configs = ConfigLoader::discover_project_configs(temp_dir.path()).unwrap();
        assert_eq!(configs.len(), 2);

        let shared = configs.iter().find(|c| c.precedence == 2).unwrap();
        let local = configs.iter().find(|c| c.precedence == 3).unwrap();
        assert_eq!(shared.config.pricing_policy().tax_bps, 100);
        assert_eq!(local.config.pricing_policy().tax_bps, 200);
    }

    #[test]
    fn test_discover_stops_at_first_config() {
        let temp_dir = TempDir::new().unwrap();
        let child = temp_dir.path().join("child");
        fs::create_dir(&child).unwrap();
        fs::write(
            temp_dir.path().join(PROJECT_CONFIG_FILE),
            "output_format: csv\n",
        )
        .unwrap();

        let configs = ConfigLoader::discover_project_configs(&child).unwrap();
        assert_eq!(configs.len(), 1);
        assert_eq!(configs[0].path, temp_dir.path().join(PROJECT_CONFIG_FILE));
    }

    #[test]
    fn test_load_all_includes_user_config() {
        let data_dir = TempDir::new().unwrap();
        let project = TempDir::new().unwrap();
        fs::write(data_dir.path().join(USER_CONFIG_FILE), "disable_autoinit: true\n").unwrap();
        fs::write(project.path().join(LOCAL_CONFIG_FILE), "output_format: tsv\n").unwrap();

        let sources = ConfigLoader::load_all(project.path(), Some(data_dir.path())).unwrap();
        assert_eq!(sources.len(), 2);
        assert_eq!(sources[0].precedence, 1);
        assert_eq!(sources[1].precedence, 3);
    }
}
