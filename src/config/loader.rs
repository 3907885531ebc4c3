//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::PftConfig;
use crate::core::flatten::FlowVolumePolicy;
use crate::domain::errors::PftError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Configuration file looked up in the working directory when none is given
pub const DEFAULT_CONFIG_FILE: &str = "pft.toml";

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into PftConfig
/// 4. Applies environment variable overrides (PFT_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns [`PftError::Configuration`] if the file is missing or unreadable,
/// a referenced variable is unset, the TOML is malformed, or validation fails.
///
/// # Examples
///
/// ```no_run
/// use pft_extract::config::loader::load_config;
///
/// let config = load_config("pft.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<PftConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(PftError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        PftError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let mut config: PftConfig = toml::from_str(&contents)
        .map_err(|e| PftError::Configuration(format!("Failed to parse TOML: {}", e)))?;

    apply_env_overrides(&mut config)?;

    config.validate().map_err(|e| {
        PftError::Configuration(format!("Configuration validation failed: {}", e))
    })?;

    Ok(config)
}

/// Loads configuration from `path`, or falls back to defaults
///
/// With no explicit path, `pft.toml` in the working directory is used when it
/// exists. Otherwise the defaults are taken, with `PFT_*` overrides applied.
///
/// # Errors
///
/// An explicit path that does not exist is an error; see [`load_config`].
pub fn load_config_or_default(path: Option<&Path>) -> Result<PftConfig> {
    if let Some(path) = path {
        return load_config(path);
    }

    let default_path = Path::new(DEFAULT_CONFIG_FILE);
    if default_path.exists() {
        return load_config(default_path);
    }

    tracing::debug!("No configuration file found, using defaults");
    let mut config = PftConfig::default();
    apply_env_overrides(&mut config)?;
    config.validate().map_err(|e| {
        PftError::Configuration(format!("Configuration validation failed: {}", e))
    })?;
    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are copied unchanged.
///
/// # Errors
///
/// Returns an error naming every referenced variable that is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| PftError::Configuration(format!("Invalid substitution pattern: {e}")))?;
    let mut lines = Vec::new();
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            lines.push(line.to_string());
            continue;
        }

        let processed = re.replace_all(line, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| {
                if !missing_vars.iter().any(|v| v == var_name) {
                    missing_vars.push(var_name.to_string());
                }
                String::new()
            })
        });
        lines.push(processed.into_owned());
    }

    if !missing_vars.is_empty() {
        return Err(PftError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(lines.join("\n"))
}

/// Applies environment variable overrides using PFT_* prefix
///
/// Environment variables follow the pattern: PFT_<SECTION>_<KEY>
/// For example: PFT_EXTRACTION_OUTPUT_DIR, PFT_LOGGING_LOCAL_ENABLED
fn apply_env_overrides(config: &mut PftConfig) -> Result<()> {
    if let Ok(val) = std::env::var("PFT_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    if let Ok(val) = std::env::var("PFT_EXTRACTION_INPUT_DIR") {
        config.extraction.input_dir = val;
    }
    if let Ok(val) = std::env::var("PFT_EXTRACTION_OUTPUT_DIR") {
        config.extraction.output_dir = val;
    }
    if let Ok(val) = std::env::var("PFT_EXTRACTION_INPUT_EXTENSION") {
        config.extraction.input_extension = val;
    }
    if let Ok(val) = std::env::var("PFT_EXTRACTION_FLOW_VOLUME_POLICY") {
        config.extraction.flow_volume_policy = val.parse::<FlowVolumePolicy>()?;
    }
    if let Ok(val) = std::env::var("PFT_EXTRACTION_CONTINUE_ON_ERROR") {
        config.extraction.continue_on_error =
            parse_bool_override("PFT_EXTRACTION_CONTINUE_ON_ERROR", &val)?;
    }

    if let Ok(val) = std::env::var("PFT_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = parse_bool_override("PFT_LOGGING_LOCAL_ENABLED", &val)?;
    }
    if let Ok(val) = std::env::var("PFT_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
    if let Ok(val) = std::env::var("PFT_LOGGING_LOCAL_ROTATION") {
        config.logging.local_rotation = val;
    }

    Ok(())
}

fn parse_bool_override(name: &str, value: &str) -> Result<bool> {
    value.trim().parse::<bool>().map_err(|_| {
        PftError::Configuration(format!(
            "Invalid value for {name}: '{value}'. Expected 'true' or 'false'"
        ))
    })
}
