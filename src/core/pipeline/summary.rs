//! Run summary and reporting
//!
//! This module defines structures for tracking and reporting extraction results.

use crate::domain::FileErrorDetail;
use chrono::{DateTime, Utc};
use std::path::PathBuf;
use std::time::Duration;

/// Result of processing one input file
#[derive(Debug, Clone)]
pub struct ProcessedFile {
    /// Input document
    pub input: PathBuf,

    /// Written JSON record
    pub json_path: PathBuf,

    /// Written CSV row
    pub csv_path: PathBuf,

    /// Number of tests in the record
    pub tests: usize,

    /// Number of columns in the flat row
    pub columns: usize,
}

/// Summary of an extraction run
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// When the run started
    pub started_at: DateTime<Utc>,

    /// Number of input files considered
    pub total_files: usize,

    /// Number of files fully written
    pub successful: usize,

    /// Number of files that failed
    pub failed: usize,

    /// Duration of the run
    pub duration: Duration,

    /// Per-file results for successful files
    pub outputs: Vec<ProcessedFile>,

    /// Per-file failures (only recorded when errors are isolated)
    pub errors: Vec<FileErrorDetail>,
}

impl RunSummary {
    /// Create a new empty summary starting now
    pub fn new() -> Self {
        Self {
            started_at: Utc::now(),
            total_files: 0,
            successful: 0,
            failed: 0,
            duration: Duration::from_secs(0),
            outputs: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// Set the duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Record a successfully processed file
    pub fn add_output(&mut self, output: ProcessedFile) {
        self.successful += 1;
        self.outputs.push(output);
    }

    /// Record a failed file
    pub fn add_error(&mut self, error: FileErrorDetail) {
        self.failed += 1;
        self.errors.push(error);
    }

    /// Check if the run was successful (no failures)
    pub fn is_successful(&self) -> bool {
        self.failed == 0 && self.errors.is_empty()
    }

    /// Get success rate as a percentage
    pub fn success_rate(&self) -> f64 {
        if self.total_files == 0 {
            return 100.0;
        }
        (self.successful as f64 / self.total_files as f64) * 100.0
    }
}

impl Default for RunSummary {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn processed(name: &str) -> ProcessedFile {
        ProcessedFile {
            input: PathBuf::from(format!("{name}.xml")),
            json_path: PathBuf::from(format!("{name}_extracted.json")),
            csv_path: PathBuf::from(format!("{name}_extracted.csv")),
            tests: 1,
            columns: 23,
        }
    }

    #[test]
    fn test_summary_new() {
        let before = Utc::now();
        let summary = RunSummary::new();
        assert!(summary.started_at >= before && summary.started_at <= Utc::now());
        assert_eq!(summary.total_files, 0);
        assert!(summary.is_successful());
        assert_eq!(summary.success_rate(), 100.0);
    }

    #[test]
    fn test_summary_counts() {
        let mut summary = RunSummary::new();
        summary.total_files = 4;
        summary.add_output(processed("a"));
        summary.add_output(processed("b"));
        summary.add_output(processed("c"));
        summary.add_error(FileErrorDetail::new("d.xml", "Missing required element: Subject"));

        assert_eq!(summary.successful, 3);
        assert_eq!(summary.failed, 1);
        assert!(!summary.is_successful());
        assert_eq!(summary.success_rate(), 75.0);
    }

    #[test]
    fn test_summary_with_duration() {
        let summary = RunSummary::new().with_duration(Duration::from_millis(1500));
        assert_eq!(summary.duration.as_millis(), 1500);
    }
}
