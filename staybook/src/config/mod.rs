//! Configuration system for staybook.
//!
//! This module provides hierarchical configuration with support for:
//! - YAML configuration files (user config and project files)
//! - Environment variable overrides
//! - Programmatic configuration via builder pattern
//! - Validation of rates, properties and timeouts
//!
//! # Configuration Precedence
//!
//! Configuration is merged from multiple sources with the following precedence
//! (highest to lowest):
//!
//! 1. Programmatic overrides (via `ConfigBuilder::with_config`)
//! 2. Environment variables (`STAYBOOK_*`)
//! 3. Private project config (`staybook.local.yaml`)
//! 4. Project config (`staybook.yaml`)
//! 5. User config (`<data-dir>/config.yaml`)
//! 6. Built-in defaults
//!
//! # Examples
//!
//! Loading from a specific directory:
//!
//! ```no_run
//! use staybook::config::ConfigBuilder;
//! use std::path::Path;
//!
//! let config = ConfigBuilder::new()
//!     .with_working_dir(Path::new("/path/to/project"))
//!     .build()
//!     .unwrap();
//! println!("service fee: {} bp", config.pricing_policy().service_fee_bps);
//! ```
//!
//! Programmatic configuration:
//!
//! ```
//! use staybook::config::{Config, ConfigBuilder, PricingConfig};
//!
//! let custom = Config {
//!     pricing: Some(PricingConfig {
//!         tax_bps: Some(800),
//!         ..Default::default()
//!     }),
//!     ..Default::default()
//! };
//!
//! let config = ConfigBuilder::new()
//!     .skip_files()
//!     .skip_env()
//!     .with_config(custom)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.pricing_policy().tax_bps, 800);
//! ```

pub mod builder;
pub mod environment;
pub mod loader;
pub mod merger;
pub mod schema;
pub mod validator;

#[cfg(all(test, feature = "property-tests"))]
mod proptests;

pub use builder::ConfigBuilder;
pub use environment::EnvironmentConfig;
pub use loader::{
    ConfigLoader, ConfigSource, LOCAL_CONFIG_FILE, PROJECT_CONFIG_FILE, USER_CONFIG_FILE,
};
pub use merger::ConfigMerger;
pub use schema::{Config, OutputFormat, PricingConfig};
pub use validator::ConfigValidator;
