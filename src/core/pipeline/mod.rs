//! Extraction pipeline
//!
//! Runs each input document through extract, flatten and write:
//!
//! 1. **Parse**: read the XML export into an element tree
//! 2. **Extract**: build the nested [`PftRecord`](crate::domain::PftRecord)
//! 3. **Write JSON**: `<base>_extracted.json`
//! 4. **Flatten**: build the single [`FlatRow`](crate::domain::FlatRow)
//! 5. **Write CSV**: `<base>_extracted.csv`
//!
//! Files are processed one after another. By default the first failure
//! aborts the batch; with `continue_on_error` the failure is recorded in the
//! [`RunSummary`] and the next file is processed.

pub mod summary;

pub use summary::{ProcessedFile, RunSummary};

use crate::adapters::xml::read_document;
use crate::config::ExtractionConfig;
use crate::core::extract::extract_record;
use crate::core::flatten::{flatten_record, FlowVolumePolicy};
use crate::core::output::{ensure_output_dir, write_csv, write_json, OutputPaths};
use crate::domain::{FileErrorDetail, PftError, Result};
use crate::{log_error_with_context, log_file_processing};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Options that shape how each document is processed
#[derive(Debug, Clone, Default)]
pub struct ExtractionOptions {
    /// Which matching graph fills `FlowVolumeLoop`
    pub flow_volume_policy: FlowVolumePolicy,

    /// Record per-file failures and keep going instead of aborting
    pub continue_on_error: bool,
}

impl ExtractionOptions {
    /// Build options from the `[extraction]` configuration section
    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self {
            flow_volume_policy: config.flow_volume_policy,
            continue_on_error: config.continue_on_error,
        }
    }
}

/// Process one XML export and write its two output files
///
/// The output directory is created if it does not exist.
///
/// # Errors
///
/// Returns the first error from parsing, extraction or writing. Nothing is
/// rolled back; a JSON file may exist when writing the CSV fails.
///
/// # Examples
///
/// ```no_run
/// use pft_extract::core::pipeline::{process_file, ExtractionOptions};
/// use std::path::Path;
///
/// # fn example() -> pft_extract::domain::Result<()> {
/// let processed = process_file(
///     Path::new("input/sample.xml"),
///     Path::new("output"),
///     &ExtractionOptions::default(),
/// )?;
/// println!("Wrote {}", processed.csv_path.display());
/// # Ok(())
/// # }
/// ```
pub fn process_file(
    input: &Path,
    output_dir: &Path,
    options: &ExtractionOptions,
) -> Result<ProcessedFile> {
    ensure_output_dir(output_dir)?;

    let root = read_document(input)?;
    let record = extract_record(&root)?;

    let paths = OutputPaths::for_input(input, output_dir);
    write_json(&record, &paths.json)?;

    let row = flatten_record(&record, options.flow_volume_policy);
    write_csv(&row, &paths.csv)?;

    tracing::info!(
        input = %input.display(),
        json = %paths.json.display(),
        csv = %paths.csv.display(),
        tests = record.visit.tests.len(),
        columns = row.len(),
        "Extracted file"
    );

    Ok(ProcessedFile {
        input: input.to_path_buf(),
        json_path: paths.json,
        csv_path: paths.csv,
        tests: record.visit.tests.len(),
        columns: row.len(),
    })
}

/// Process a list of inputs sequentially
///
/// `on_file` is called with each input before it is processed, which lets the
/// caller print progress.
///
/// # Errors
///
/// Without `continue_on_error` the first per-file error is returned and the
/// remaining files are not processed. Failure to create the output directory
/// is always returned.
pub fn process_files<P, F>(
    inputs: &[P],
    output_dir: &Path,
    options: &ExtractionOptions,
    mut on_file: F,
) -> Result<RunSummary>
where
    P: AsRef<Path>,
    F: FnMut(&Path),
{
    let start = Instant::now();
    let mut summary = RunSummary::new();
    summary.total_files = inputs.len();

    ensure_output_dir(output_dir)?;

    for (index, input) in inputs.iter().enumerate() {
        let input = input.as_ref();
        log_file_processing!(input.display(), index + 1, inputs.len());
        on_file(input);

        match process_file(input, output_dir, options) {
            Ok(processed) => summary.add_output(processed),
            Err(e) => {
                log_error_with_context!(&e, input.display().to_string());
                if !options.continue_on_error {
                    return Err(e);
                }
                summary.add_error(FileErrorDetail::new(
                    input.display().to_string(),
                    e.to_string(),
                ));
            }
        }
    }

    let summary = summary.with_duration(start.elapsed());
    tracing::info!(
        total = summary.total_files,
        successful = summary.successful,
        failed = summary.failed,
        duration_ms = summary.duration.as_millis(),
        "Extraction run completed"
    );

    Ok(summary)
}

/// List the files in `dir` whose extension matches `extension`
///
/// The match ignores ASCII case and a leading dot in `extension`. Only
/// regular files directly inside `dir` are returned, sorted by path.
///
/// # Errors
///
/// Returns [`PftError::Io`] if the directory cannot be read.
pub fn discover_inputs(dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    let extension = extension.trim_start_matches('.');
    let entries = fs::read_dir(dir).map_err(|e| {
        PftError::Io(format!(
            "Failed to read input directory {}: {e}",
            dir.display()
        ))
    })?;

    let mut inputs = Vec::new();
    for entry in entries {
        let path = entry?.path();
        let matches = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case(extension));
        if matches && path.is_file() {
            inputs.push(path);
        }
    }
    inputs.sort();

    tracing::debug!(
        dir = %dir.display(),
        extension = %extension,
        found = inputs.len(),
        "Discovered input files"
    );
    Ok(inputs)
}
