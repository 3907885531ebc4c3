// PFT Extract - Pulmonary Function Test XML Extraction Tool
// Copyright (c) 2025 PFT Extract Contributors
// Licensed under the MIT License

use clap::Parser;
use pft_extract::cli::{Cli, Commands};
use pft_extract::config::{load_config_or_default, LoggingConfig};
use pft_extract::logging::init_logging;
use std::path::Path;
use std::process;

fn main() {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Logging settings come from the config when it loads; commands report
    // configuration errors themselves
    let (log_level, logging_config) =
        match load_config_or_default(cli.config.as_deref().map(Path::new)) {
            Ok(config) => (
                cli.log_level
                    .clone()
                    .unwrap_or(config.application.log_level),
                config.logging,
            ),
            Err(_) => (
                cli.log_level.clone().unwrap_or_else(|| "info".to_string()),
                LoggingConfig::default(),
            ),
        };
    let guard = match init_logging(&log_level, &logging_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            process::exit(5);
        }
    };

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "PFT Extract - Pulmonary Function Test XML Extraction Tool"
    );

    let exit_code = match execute_command(&cli) {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "Command execution failed");
            eprintln!("Error: {e}");
            5
        }
    };

    // process::exit skips destructors, so flush file logs first
    drop(guard);
    process::exit(exit_code);
}

/// Execute the CLI command
fn execute_command(cli: &Cli) -> anyhow::Result<i32> {
    let config_path = cli.config.as_deref();
    match &cli.command {
        Commands::Extract(args) => args.execute(config_path),
        Commands::Batch(args) => args.execute(config_path),
        Commands::ValidateConfig(args) => args.execute(config_path),
        Commands::Init(args) => args.execute(),
    }
}
