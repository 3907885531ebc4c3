//! CLI command implementations
//!
//! Commands return the process exit code:
//! 0 success, 1 some files failed, 2 configuration error, 5 fatal error.

pub mod batch;
pub mod extract;
pub mod init;
pub mod validate;

use crate::config::{load_config_or_default, PftConfig};
use crate::core::flatten::FlowVolumePolicy;
use crate::core::pipeline::{process_files, ExtractionOptions, RunSummary};
use std::path::{Path, PathBuf};

/// Exit code for a fully successful run
pub const EXIT_SUCCESS: i32 = 0;
/// Exit code when some files failed under continue-on-error
pub const EXIT_PARTIAL: i32 = 1;
/// Exit code for configuration errors
pub const EXIT_CONFIG_ERROR: i32 = 2;
/// Exit code for fatal errors
pub const EXIT_FATAL: i32 = 5;

/// Load configuration, printing the failure to stderr
fn load_command_config(config_path: Option<&str>) -> Option<PftConfig> {
    match load_config_or_default(config_path.map(Path::new)) {
        Ok(config) => Some(config),
        Err(e) => {
            tracing::error!(error = %e, "Failed to load configuration");
            eprintln!("❌ Failed to load configuration");
            eprintln!("   Error: {e}");
            None
        }
    }
}

/// Merge command-line flags over the `[extraction]` section
fn resolve_options(
    config: &PftConfig,
    flow_volume: Option<FlowVolumePolicy>,
    continue_on_error: bool,
) -> ExtractionOptions {
    let mut options = ExtractionOptions::from_config(&config.extraction);
    if let Some(policy) = flow_volume {
        tracing::info!(policy = %policy, "Overriding flow-volume policy from CLI");
        options.flow_volume_policy = policy;
    }
    if continue_on_error {
        options.continue_on_error = true;
    }
    options
}

/// Process `inputs`, print progress and a summary, and map the outcome to
/// an exit code
fn run_extraction(inputs: &[PathBuf], output_dir: &Path, options: &ExtractionOptions) -> i32 {
    let result = process_files(inputs, output_dir, options, |path| {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());
        println!("Processing {name}");
    });

    match result {
        Ok(summary) => {
            print_summary(&summary, output_dir);
            if summary.is_successful() {
                EXIT_SUCCESS
            } else {
                EXIT_PARTIAL
            }
        }
        Err(e) => {
            tracing::error!(error = %e, "Extraction failed");
            eprintln!("Extraction failed: {e}");
            EXIT_FATAL
        }
    }
}

fn print_summary(summary: &RunSummary, output_dir: &Path) {
    println!();
    println!("📊 Extraction Summary:");
    println!(
        "  Started: {}",
        summary.started_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    println!("  Output Directory: {}", output_dir.display());
    println!("  Total Files: {}", summary.total_files);
    println!("  Successful: {}", summary.successful);
    println!("  Failed: {}", summary.failed);
    println!("  Duration: {:.2}s", summary.duration.as_secs_f64());
    println!("  Success Rate: {:.2}%", summary.success_rate());
    println!();

    if !summary.errors.is_empty() {
        println!("⚠️  Errors encountered:");
        for error in &summary.errors {
            println!("  - {}: {}", error.path, error.message);
        }
        println!();
    }

    if summary.is_successful() {
        println!("✅ Extraction completed successfully!");
    } else {
        println!("⚠️  Extraction completed with failures");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_resolve_options_prefers_flags() {
        let mut config = PftConfig::default();
        config.extraction.flow_volume_policy = FlowVolumePolicy::Last;

        let options = resolve_options(&config, None, false);
        assert_eq!(options.flow_volume_policy, FlowVolumePolicy::Last);
        assert!(!options.continue_on_error);

        let options = resolve_options(&config, Some(FlowVolumePolicy::First), true);
        assert_eq!(options.flow_volume_policy, FlowVolumePolicy::First);
        assert!(options.continue_on_error);
    }

    #[test]
    fn test_run_extraction_exit_codes() {
        let temp_dir = TempDir::new().unwrap();
        let good = temp_dir.path().join("good.xml");
        let bad = temp_dir.path().join("bad.xml");
        fs::write(&good, "<Root><Subject><Visit/></Subject></Root>").unwrap();
        fs::write(&bad, "<Root/>").unwrap();
        let output_dir = temp_dir.path().join("out");

        let options = ExtractionOptions::default();
        assert_eq!(
            run_extraction(&[good.clone()], &output_dir, &options),
            EXIT_SUCCESS
        );
        assert_eq!(
            run_extraction(&[bad.clone(), good.clone()], &output_dir, &options),
            EXIT_FATAL
        );

        let options = ExtractionOptions {
            continue_on_error: true,
            ..ExtractionOptions::default()
        };
        assert_eq!(
            run_extraction(&[bad, good], &output_dir, &options),
            EXIT_PARTIAL
        );
    }
}
