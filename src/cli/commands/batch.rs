//! Batch command implementation
//!
//! Scans a directory for exports and processes each one in path order.

use super::{
    load_command_config, resolve_options, run_extraction, EXIT_CONFIG_ERROR, EXIT_FATAL,
    EXIT_SUCCESS,
};
use crate::core::flatten::FlowVolumePolicy;
use crate::core::pipeline::discover_inputs;
use clap::Args;
use std::path::PathBuf;

/// Arguments for the batch command
#[derive(Args, Debug)]
pub struct BatchArgs {
    /// Directory containing XML exports (overrides extraction.input_dir)
    #[arg(short, long, value_name = "DIR")]
    pub input_dir: Option<PathBuf>,

    /// Output directory (overrides extraction.output_dir)
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Input file extension (overrides extraction.input_extension)
    #[arg(long, value_name = "EXT")]
    pub extension: Option<String>,

    /// Which matching graph fills FlowVolumeLoop (first or last)
    #[arg(long, value_name = "POLICY")]
    pub flow_volume: Option<FlowVolumePolicy>,

    /// Keep going after a file fails
    #[arg(long)]
    pub continue_on_error: bool,
}

impl BatchArgs {
    /// Execute the batch command
    pub fn execute(&self, config_path: Option<&str>) -> anyhow::Result<i32> {
        tracing::info!("Starting batch command");

        let Some(config) = load_command_config(config_path) else {
            return Ok(EXIT_CONFIG_ERROR);
        };
        let options = resolve_options(&config, self.flow_volume, self.continue_on_error);

        let input_dir = self
            .input_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(&config.extraction.input_dir));
        let output_dir = self
            .output_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(&config.extraction.output_dir));
        let extension = self
            .extension
            .as_deref()
            .unwrap_or(&config.extraction.input_extension);

        let inputs = match discover_inputs(&input_dir, extension) {
            Ok(inputs) => inputs,
            Err(e) => {
                tracing::error!(error = %e, "Input discovery failed");
                eprintln!("Input discovery failed: {e}");
                return Ok(EXIT_FATAL);
            }
        };

        if inputs.is_empty() {
            println!(
                "No .{} files found in {}",
                extension.trim_start_matches('.'),
                input_dir.display()
            );
            return Ok(EXIT_SUCCESS);
        }

        println!(
            "🚀 Found {} file(s) in {}",
            inputs.len(),
            input_dir.display()
        );
        println!();

        Ok(run_extraction(&inputs, &output_dir, &options))
    }
}
