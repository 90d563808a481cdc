//! Converter configuration using Figment
//!
//! Configuration is layered, highest precedence last:
//! 1. Built-in defaults
//! 2. `config/envision_asm.toml` (or a path given on the command line)
//! 3. Environment variables (prefixed with `ENVISION_ASM_`)
//!
//! # Environment Variable Overrides
//!
//! Nested keys are separated by a double underscore:
//!
//! ```text
//! ENVISION_ASM_APPLICATION__LOG_LEVEL=debug
//! ENVISION_ASM_TIME__DEFAULT_UTC_OFFSET=-05:00
//! ENVISION_ASM_OUTPUT__PRETTY=true
//! ```
//!
//! # Example
//!
//! ```no_run
//! use envision_asm::config::Settings;
//!
//! fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     println!("Log level: {}", settings.application.log_level);
//!     println!("Offset for naive timestamps: {}", settings.default_utc_offset()?);
//!     Ok(())
//! }
//! ```

use chrono::FixedOffset;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default location of the configuration file, relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "config/envision_asm.toml";

/// Prefix for environment variable overrides.
pub const ENV_PREFIX: &str = "ENVISION_ASM_";

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Sources could not be merged or extracted
    #[error("Configuration load error: {0}")]
    LoadError(#[from] Box<figment::Error>),
    /// A loaded value is out of range
    #[error("Configuration validation error: {0}")]
    ValidationError(String),
    /// Settings could not be rendered as TOML
    #[error("Configuration render error: {0}")]
    RenderError(#[from] toml::ser::Error),
}

/// Top-level converter configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Application settings
    #[serde(default)]
    pub application: ApplicationSettings,
    /// Timestamp interpretation
    #[serde(default)]
    pub time: TimeSettings,
    /// Output document rendering
    #[serde(default)]
    pub output: OutputSettings,
}

/// Application-level configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationSettings {
    /// Logging level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// How instrument timestamps without an offset are interpreted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSettings {
    /// Offset applied to naive export timestamps, as `+HH:MM` or `-HH:MM`
    #[serde(default = "default_utc_offset")]
    pub default_utc_offset: String,
}

/// Output rendering configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutputSettings {
    /// Pretty-print the JSON document
    #[serde(default)]
    pub pretty: bool,
    /// Directory converted documents are written to when no output path is given
    #[serde(default)]
    pub output_dir: Option<PathBuf>,
}

// ============================================================================
// Default value functions
// ============================================================================

fn default_log_level() -> String {
    "info".to_string()
}

fn default_utc_offset() -> String {
    "+00:00".to_string()
}

impl Default for ApplicationSettings {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl Default for TimeSettings {
    fn default() -> Self {
        Self {
            default_utc_offset: default_utc_offset(),
        }
    }
}

// ============================================================================
// Configuration Loading and Validation
// ============================================================================

impl Settings {
    /// Load configuration from the default file location and environment variables.
    ///
    /// A missing file is not an error; the defaults apply.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(DEFAULT_CONFIG_PATH)
    }

    /// Load configuration from a specific file path
    ///
    /// # Errors
    ///
    /// Returns a ConfigError if the file is malformed or validation fails.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings: Self = Figment::from(Serialized::defaults(Settings::default()))
            .merge(Toml::file(path.as_ref()))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .map_err(|e| ConfigError::LoadError(Box::new(e)))?;

        settings.validate()?;
        Ok(settings)
    }

    /// Validate configuration after loading
    ///
    /// Checks:
    /// - Log level is valid (trace, debug, info, warn, error)
    /// - Default UTC offset is a valid `±HH:MM` offset
    pub fn validate(&self) -> Result<(), ConfigError> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.application.log_level.as_str()) {
            return Err(ConfigError::ValidationError(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.application.log_level,
                valid_levels.join(", ")
            )));
        }

        self.default_utc_offset()?;
        Ok(())
    }

    /// The parsed offset for naive timestamps.
    pub fn default_utc_offset(&self) -> Result<FixedOffset, ConfigError> {
        self.time.default_utc_offset.parse().map_err(|_| {
            ConfigError::ValidationError(format!(
                "Invalid default_utc_offset '{}'. Expected +HH:MM or -HH:MM",
                self.time.default_utc_offset
            ))
        })
    }

    /// Render the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}
