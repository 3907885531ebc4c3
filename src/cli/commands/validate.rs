//! Validate config command implementation
//!
//! This module implements the `validate-config` command.

use super::{EXIT_CONFIG_ERROR, EXIT_SUCCESS};
use crate::config::{load_config_or_default, DEFAULT_CONFIG_FILE};
use clap::Args;
use std::path::Path;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub fn execute(&self, config_path: Option<&str>) -> anyhow::Result<i32> {
        let shown_path = config_path.unwrap_or(DEFAULT_CONFIG_FILE);
        tracing::info!(config_path = %shown_path, "Validating configuration");

        println!("🔍 Validating configuration file: {shown_path}");
        if config_path.is_none() && !Path::new(DEFAULT_CONFIG_FILE).exists() {
            println!("   (not found, checking defaults)");
        }
        println!();

        let config = match load_config_or_default(config_path.map(Path::new)) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Configuration validation failed");
                println!("   Error: {e}");
                return Ok(EXIT_CONFIG_ERROR);
            }
        };

        println!("✅ Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!("  Input Directory: {}", config.extraction.input_dir);
        println!("  Output Directory: {}", config.extraction.output_dir);
        println!("  Input Extension: {}", config.extraction.input_extension);
        println!(
            "  Flow-Volume Policy: {}",
            config.extraction.flow_volume_policy
        );
        println!(
            "  Continue On Error: {}",
            config.extraction.continue_on_error
        );
        if config.logging.local_enabled {
            println!(
                "  Log Files: {} ({})",
                config.logging.local_path, config.logging.local_rotation
            );
        } else {
            println!("  Log Files: disabled");
        }
        println!();
        Ok(EXIT_SUCCESS)
    }
}
