//! Extract command implementation
//!
//! Processes the files named on the command line.

use super::{load_command_config, resolve_options, run_extraction, EXIT_CONFIG_ERROR};
use crate::core::flatten::FlowVolumePolicy;
use clap::Args;
use std::path::PathBuf;

/// Arguments for the extract command
#[derive(Args, Debug)]
pub struct ExtractArgs {
    /// XML export files to process
    #[arg(required = true, value_name = "FILES")]
    pub files: Vec<PathBuf>,

    /// Output directory (defaults to the current directory)
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Which matching graph fills FlowVolumeLoop (first or last)
    #[arg(long, value_name = "POLICY")]
    pub flow_volume: Option<FlowVolumePolicy>,

    /// Keep going after a file fails
    #[arg(long)]
    pub continue_on_error: bool,
}

impl ExtractArgs {
    /// Execute the extract command
    pub fn execute(&self, config_path: Option<&str>) -> anyhow::Result<i32> {
        tracing::info!(files = self.files.len(), "Starting extract command");

        let Some(config) = load_command_config(config_path) else {
            return Ok(EXIT_CONFIG_ERROR);
        };
        let options = resolve_options(&config, self.flow_volume, self.continue_on_error);
        let output_dir = self.output.clone().unwrap_or_else(|| PathBuf::from("."));

        Ok(run_extraction(&self.files, &output_dir, &options))
    }
}
