//! Configuration schema types
//!
//! Every section and key is optional; an empty file yields the defaults.

use crate::core::flatten::FlowVolumePolicy;
use serde::{Deserialize, Serialize};

/// Log levels accepted by `[application] log_level`
pub const VALID_LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Rotation strategies accepted by `[logging] local_rotation`
pub const VALID_ROTATIONS: [&str; 3] = ["daily", "hourly", "never"];

/// Main configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PftConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Input discovery and extraction behavior
    #[serde(default)]
    pub extraction: ExtractionConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl PftConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.extraction.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        if !VALID_LOG_LEVELS.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                VALID_LOG_LEVELS.join(", ")
            ));
        }
        Ok(())
    }
}

/// Extraction configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionConfig {
    /// Directory scanned by `batch`
    #[serde(default = "default_input_dir")]
    pub input_dir: String,

    /// Directory receiving `<base>_extracted.{json,csv}`
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    /// File extension of input documents, without the dot
    #[serde(default = "default_input_extension")]
    pub input_extension: String,

    /// Which matching graph fills `FlowVolumeLoop` (first, last)
    #[serde(default)]
    pub flow_volume_policy: FlowVolumePolicy,

    /// Keep processing remaining files after a failure
    #[serde(default)]
    pub continue_on_error: bool,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            input_dir: default_input_dir(),
            output_dir: default_output_dir(),
            input_extension: default_input_extension(),
            flow_volume_policy: FlowVolumePolicy::default(),
            continue_on_error: false,
        }
    }
}

impl ExtractionConfig {
    fn validate(&self) -> Result<(), String> {
        if self.input_dir.trim().is_empty() {
            return Err("extraction.input_dir cannot be empty".to_string());
        }
        if self.output_dir.trim().is_empty() {
            return Err("extraction.output_dir cannot be empty".to_string());
        }
        if self.input_extension.trim_start_matches('.').trim().is_empty() {
            return Err("extraction.input_extension cannot be empty".to_string());
        }
        Ok(())
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local JSON file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Local log directory
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy (daily, hourly, never)
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        if !VALID_ROTATIONS.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                VALID_ROTATIONS.join(", ")
            ));
        }
        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err(
                "logging.local_path cannot be empty when local logging is enabled".to_string(),
            );
        }
        Ok(())
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_input_dir() -> String {
    "input".to_string()
}

fn default_output_dir() -> String {
    "output".to_string()
}

fn default_input_extension() -> String {
    "xml".to_string()
}

fn default_local_path() -> String {
    "logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}
