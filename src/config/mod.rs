//! Configuration management.
//!
//! TOML-based configuration with environment variable substitution, `PFT_*`
//! overrides and validation. The file is optional: without one, every
//! setting takes its default.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use pft_extract::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("pft.toml")?;
//!
//! println!("Input directory: {}", config.extraction.input_dir);
//! println!("Flow-volume policy: {}", config.extraction.flow_volume_policy);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - Log level
//! - [`ExtractionConfig`] - Input discovery, output directory and extraction behavior
//! - [`LoggingConfig`] - Optional rolling JSON log files
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [extraction]
//! input_dir = "${PFT_DATA}/exports"
//! output_dir = "output"
//! input_extension = "xml"
//! flow_volume_policy = "first"
//! continue_on_error = false
//!
//! [logging]
//! local_enabled = true
//! local_path = "logs"
//! local_rotation = "daily"
//! ```
//!
//! # Environment Variables
//!
//! `${VAR_NAME}` placeholders are substituted before parsing, and any key can
//! be overridden with `PFT_<SECTION>_<KEY>`:
//!
//! ```bash
//! export PFT_EXTRACTION_OUTPUT_DIR=/tmp/extracted
//! export PFT_EXTRACTION_FLOW_VOLUME_POLICY=last
//! ```

pub mod loader;
pub mod schema;

pub use loader::{load_config, load_config_or_default, DEFAULT_CONFIG_FILE};
pub use schema::{ApplicationConfig, ExtractionConfig, LoggingConfig, PftConfig};
