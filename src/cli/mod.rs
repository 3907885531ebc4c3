//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for PFT Extract using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// PFT Extract - pulmonary function test XML to JSON and CSV
#[derive(Parser, Debug)]
#[command(name = "pft-extract")]
#[command(version, about, long_about = None)]
#[command(author = "PFT Extract Contributors")]
pub struct Cli {
    /// Path to configuration file (defaults to pft.toml when present)
    #[arg(short, long, env = "PFT_CONFIG")]
    pub config: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "PFT_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Extract one or more XML exports
    Extract(commands::extract::ExtractArgs),

    /// Extract every matching file in a directory
    Batch(commands::batch::BatchArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::flatten::FlowVolumePolicy;
    use std::path::PathBuf;

    #[test]
    fn test_cli_parse_extract() {
        let cli = Cli::parse_from(["pft-extract", "extract", "a.xml", "b c.xml"]);
        assert!(cli.config.is_none());
        match cli.command {
            Commands::Extract(args) => {
                assert_eq!(
                    args.files,
                    [PathBuf::from("a.xml"), PathBuf::from("b c.xml")]
                );
                assert!(args.output.is_none());
                assert!(args.flow_volume.is_none());
                assert!(!args.continue_on_error);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_extract_requires_files() {
        assert!(Cli::try_parse_from(["pft-extract", "extract"]).is_err());
    }

    #[test]
    fn test_cli_parse_extract_with_options() {
        let cli = Cli::parse_from([
            "pft-extract",
            "extract",
            "a.xml",
            "-o",
            "out",
            "--flow-volume",
            "last",
            "--continue-on-error",
        ]);
        let Commands::Extract(args) = cli.command else {
            panic!("expected extract");
        };
        assert_eq!(args.output, Some(PathBuf::from("out")));
        assert_eq!(args.flow_volume, Some(FlowVolumePolicy::Last));
        assert!(args.continue_on_error);
    }

    #[test]
    fn test_cli_rejects_unknown_policy() {
        let result =
            Cli::try_parse_from(["pft-extract", "extract", "a.xml", "--flow-volume", "middle"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_parse_batch() {
        let cli = Cli::parse_from([
            "pft-extract",
            "batch",
            "-i",
            "exports",
            "--output-dir",
            "out",
            "--extension",
            "XML",
        ]);
        let Commands::Batch(args) = cli.command else {
            panic!("expected batch");
        };
        assert_eq!(args.input_dir, Some(PathBuf::from("exports")));
        assert_eq!(args.output_dir, Some(PathBuf::from("out")));
        assert_eq!(args.extension.as_deref(), Some("XML"));
    }

    #[test]
    fn test_cli_parse_with_config() {
        let cli = Cli::parse_from(["pft-extract", "--config", "custom.toml", "batch"]);
        assert_eq!(cli.config.as_deref(), Some("custom.toml"));
    }

    #[test]
    fn test_cli_parse_with_log_level() {
        let cli = Cli::parse_from(["pft-extract", "-l", "debug", "batch"]);
        assert_eq!(cli.log_level, Some("debug".to_string()));
    }

    #[test]
    fn test_cli_parse_validate_config() {
        let cli = Cli::parse_from(["pft-extract", "validate-config"]);
        assert!(matches!(cli.command, Commands::ValidateConfig(_)));
    }

    #[test]
    fn test_cli_parse_init() {
        let cli = Cli::parse_from(["pft-extract", "init", "--force"]);
        let Commands::Init(args) = cli.command else {
            panic!("expected init");
        };
        assert_eq!(args.output, "pft.toml");
        assert!(args.force);
    }
}
