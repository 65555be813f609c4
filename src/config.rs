//! Configuration System
//!
//! Layered configuration: built-in defaults, then the global config file, then
//! the workspace `.intake/config.toml`, then `INTAKE_`-prefixed environment
//! variables (`__` separates sections, e.g. `INTAKE_SCAN__PAGE_SIZE=50`).

use crate::error::IntakeError;
use crate::logging::LoggingConfig;
use crate::tree::filter::TypeFilter;
use crate::tree::local::DEFAULT_PAGE_SIZE;
use crate::tree::scanner::ScanOptions;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

mod sources;

pub use sources::global_file::global_config_path;
pub use sources::workspace_file::workspace_config_path;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IntakeConfig {
    /// Scan settings
    #[serde(default)]
    pub scan: ScanConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Scan settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Default accepted types, `accept`-attribute syntax (empty = everything)
    #[serde(default)]
    pub accept: TypeFilter,

    /// Keep dot-files and dot-directories
    #[serde(default)]
    pub include_hidden: bool,

    /// Directory levels to descend (unset = unlimited)
    #[serde(default)]
    pub max_depth: Option<usize>,

    /// Entries per directory read on the local filesystem
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            accept: TypeFilter::default(),
            include_hidden: false,
            max_depth: None,
            page_size: default_page_size(),
        }
    }
}

impl ScanConfig {
    pub fn scan_options(&self) -> ScanOptions {
        ScanOptions {
            include_hidden: self.include_hidden,
            max_depth: self.max_depth,
        }
    }

    /// Validate scan settings
    pub fn validate(&self) -> Result<(), String> {
        if self.page_size == 0 {
            return Err("page_size must be at least 1".to_string());
        }
        Ok(())
    }
}

impl IntakeConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), IntakeError> {
        self.scan
            .validate()
            .map_err(|e| IntakeError::ConfigError(format!("scan: {}", e)))?;

        let format = self.logging.format.as_str();
        if format != "text" && format != "json" {
            return Err(IntakeError::ConfigError(format!(
                "logging: invalid format '{}' (must be 'json' or 'text')",
                format
            )));
        }
        Ok(())
    }
}

fn environment() -> Environment {
    Environment::with_prefix("INTAKE")
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

/// Loads [`IntakeConfig`] from its layered sources.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration for a workspace: global file, workspace file, environment.
    pub fn load(workspace_root: &Path) -> Result<IntakeConfig, IntakeError> {
        let builder = Config::builder();
        let builder = sources::global_file::add_to_builder(builder)?;
        let builder = sources::workspace_file::add_to_builder(builder, workspace_root)?;
        let config: IntakeConfig = builder
            .add_source(environment())
            .build()?
            .try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from one explicit file, then environment overrides.
    pub fn load_from_file(path: &Path) -> Result<IntakeConfig, IntakeError> {
        if !path.is_file() {
            return Err(IntakeError::ConfigError(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }
        let config: IntakeConfig = Config::builder()
            .add_source(File::from(path))
            .add_source(environment())
            .build()?
            .try_deserialize()?;
        config.validate()?;
        Ok(config)
    }
}
