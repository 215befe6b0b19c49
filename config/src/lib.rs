//! # Configuration Management for pagehelper
//!
//! This crate provides the configuration structures for the page helper:
//! which dialect to rewrite for, and the paging defaults applied when a
//! caller leaves them out.
//!
//! ## Quick Start
//!
//! ### Programmatic Configuration
//! ```rust
//! use config::{AppConfig, HelperConfig, PagingConfig};
//!
//! let config = AppConfig {
//!     helper: HelperConfig::new("mysql".to_string()),
//!     paging: PagingConfig::new(20, 500, String::new(), true),
//! };
//! ```
//!
//! ### TOML File Configuration
//! ```toml
//! [helper]
//! dialect = "mysql"
//!
//! [paging]
//! default_page_size = 20
//! max_page_size = 500
//! count_column = ""
//! count_by_default = true
//! ```
//!
//! Load configuration:
//! ```rust,no_run
//! use config::AppConfig;
//!
//! // Load from pagehelper.toml
//! let config = AppConfig::load()?;
//!
//! // Or load from custom path
//! let config = AppConfig::from_file("config/production.toml")?;
//! # Ok::<(), config::ConfigError>(())
//! ```

use serde::{Deserialize, Serialize};
use std::{env, path::Path};
use thiserror::Error;

const DEFAULT_CONFIG_PATH: &str = "./pagehelper.toml";
const CONFIG_PATH_VAR: &str = "PAGEHELPER_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Environment variable error: {0}")]
    Env(#[from] env::VarError),
    #[error("Dotenvy error: {0}")]
    Dotenvy(#[from] dotenvy::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Complete application configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub helper: HelperConfig,
    #[serde(default)]
    pub paging: PagingConfig,
}

/// Dialect selection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HelperConfig {
    /// Driver identifier resolved against the modifier registry
    pub dialect: String,
}

/// Paging defaults
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PagingConfig {
    pub default_page_size: u64,
    pub max_page_size: u64,
    /// Column counted by the count query; empty counts rows
    pub count_column: String,
    pub count_by_default: bool,
}

impl AppConfig {
    /// Load configuration from the TOML file named in .env or the default path
    pub fn load() -> Result<Self, ConfigError> {
        // A missing .env file is fine; a malformed one is not.
        match dotenvy::dotenv() {
            Ok(_) => {}
            Err(e) if e.not_found() => {}
            Err(e) => return Err(e.into()),
        }

        if let Ok(config_path) = env::var(CONFIG_PATH_VAR) {
            Self::from_file(&config_path)
        } else if Path::new(DEFAULT_CONFIG_PATH).exists() {
            Self::from_file(DEFAULT_CONFIG_PATH)
        } else {
            Err(ConfigError::Invalid(format!(
                "Config path must be specified in .env file as {} or in {} file",
                CONFIG_PATH_VAR, DEFAULT_CONFIG_PATH
            )))
        }
    }

    /// Load configuration from TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.helper.dialect.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "Helper dialect cannot be empty".to_string(),
            ));
        }
        if self.paging.default_page_size == 0 {
            return Err(ConfigError::Invalid(
                "Paging default_page_size must be greater than 0".to_string(),
            ));
        }
        if self.paging.max_page_size == 0 {
            return Err(ConfigError::Invalid(
                "Paging max_page_size must be greater than 0".to_string(),
            ));
        }
        if self.paging.default_page_size > self.paging.max_page_size {
            return Err(ConfigError::Invalid(
                "Paging default_page_size cannot be greater than max_page_size".to_string(),
            ));
        }

        Ok(())
    }
}

impl HelperConfig {
    /// Create a new helper configuration
    pub fn new(dialect: String) -> Self {
        Self { dialect }
    }
}

impl Default for HelperConfig {
    fn default() -> Self {
        Self {
            dialect: "default".to_string(),
        }
    }
}

impl PagingConfig {
    /// Create a new paging configuration
    pub fn new(
        default_page_size: u64,
        max_page_size: u64,
        count_column: String,
        count_by_default: bool,
    ) -> Self {
        Self {
            default_page_size,
            max_page_size,
            count_column,
            count_by_default,
        }
    }
}

impl Default for PagingConfig {
    fn default() -> Self {
        Self {
            default_page_size: 10,
            max_page_size: 1000,
            count_column: String::new(),
            count_by_default: true,
        }
    }
}
