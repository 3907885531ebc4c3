//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use super::{EXIT_CONFIG_ERROR, EXIT_FATAL, EXIT_SUCCESS};
use crate::config::DEFAULT_CONFIG_FILE;
use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    pub output: String,

    /// Include explanations for every setting
    #[arg(long)]
    pub with_examples: bool,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing PFT Extract configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(EXIT_CONFIG_ERROR);
        }

        let config_content = if self.with_examples {
            Self::generate_config_with_examples()
        } else {
            Self::generate_minimal_config()
        };

        match fs::write(&self.output, config_content) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your directories", self.output);
                println!("  2. Validate configuration: pft-extract validate-config");
                println!("  3. Run extraction: pft-extract batch");
                println!();
                Ok(EXIT_SUCCESS)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {}", e);
                Ok(EXIT_FATAL)
            }
        }
    }

    /// Generate minimal configuration
    fn generate_minimal_config() -> String {
        r#"# PFT Extract Configuration File

[application]
log_level = "info"

[extraction]
input_dir = "input"
output_dir = "output"
input_extension = "xml"
flow_volume_policy = "first"
continue_on_error = false

[logging]
local_enabled = false
local_path = "logs"
local_rotation = "daily"
"#
        .to_string()
    }

    /// Generate configuration with examples and comments
    fn generate_config_with_examples() -> String {
        r#"# PFT Extract Configuration File
#
# Converts pulmonary function test XML exports into a nested JSON record
# and a single-row CSV per file.
#
# Every value can also be set through PFT_<SECTION>_<KEY> environment
# variables, e.g. PFT_EXTRACTION_OUTPUT_DIR. Values may reference other
# variables with ${VAR_NAME}, e.g. input_dir = "${PFT_DATA}/exports".

# ============================================================================
# Application Settings
# ============================================================================
[application]
# Log level (trace, debug, info, warn, error)
# RUST_LOG takes precedence when set
log_level = "info"

# ============================================================================
# Extraction Settings
# ============================================================================
[extraction]
# Directory scanned by `pft-extract batch`
input_dir = "input"

# Directory receiving <name>_extracted.json and <name>_extracted.csv
output_dir = "output"

# Extension of input files (matched case-insensitively)
input_extension = "xml"

# Which graph fills the FlowVolumeLoop column when several tests carry one
# - first: the first matching graph in document order
# - last: the matching graph of the last test that has one
flow_volume_policy = "first"

# Keep processing remaining files when one fails (exit code 1)
continue_on_error = false

# ============================================================================
# Logging Configuration
# ============================================================================
[logging]
# Write JSON log lines to rolling files in addition to the console
local_enabled = false

# Log directory
local_path = "logs"

# Rotation: daily, hourly or never
local_rotation = "daily"
"#
        .to_string()
    }
}
