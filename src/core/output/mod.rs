//! Output writers
//!
//! Each input document produces two files in the output directory, named
//! after the input's base name with spaces replaced by underscores:
//!
//! - `<base>_extracted.json` - the nested record, pretty-printed
//! - `<base>_extracted.csv` - header plus one data row of the flat row

use crate::domain::{FlatRow, FlatValue, PftError, PftRecord, Result};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Suffix appended to the base name of every output file
pub const OUTPUT_SUFFIX: &str = "_extracted";

/// Locations of the two artifacts for one input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    /// Nested record as JSON
    pub json: PathBuf,
    /// Flat row as CSV
    pub csv: PathBuf,
}

impl OutputPaths {
    /// Derive output paths for `input` inside `output_dir`
    ///
    /// # Examples
    ///
    /// ```
    /// use pft_extract::core::output::OutputPaths;
    /// use std::path::Path;
    ///
    /// let paths = OutputPaths::for_input(Path::new("in/Patient 01.xml"), Path::new("out"));
    /// assert_eq!(paths.json, Path::new("out/Patient_01_extracted.json"));
    /// assert_eq!(paths.csv, Path::new("out/Patient_01_extracted.csv"));
    /// ```
    pub fn for_input(input: &Path, output_dir: &Path) -> Self {
        let base = output_base_name(input);
        Self {
            json: output_dir.join(format!("{base}{OUTPUT_SUFFIX}.json")),
            csv: output_dir.join(format!("{base}{OUTPUT_SUFFIX}.csv")),
        }
    }
}

/// File stem of `input` with spaces replaced by underscores
pub fn output_base_name(input: &Path) -> String {
    input
        .file_stem()
        .map(|stem| stem.to_string_lossy().replace(' ', "_"))
        .unwrap_or_default()
}

/// Create the output directory and any missing parents
pub fn ensure_output_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).map_err(|e| {
        PftError::Io(format!(
            "Failed to create output directory {}: {e}",
            dir.display()
        ))
    })
}

/// Write the nested record as pretty-printed UTF-8 JSON
pub fn write_json(record: &PftRecord, path: &Path) -> Result<()> {
    let file = File::create(path)
        .map_err(|e| PftError::Io(format!("Failed to create {}: {e}", path.display())))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, record)?;
    writer.flush()?;

    tracing::debug!(path = %path.display(), "Wrote JSON record");
    Ok(())
}

/// Write the flat row as a header line and a single data line
pub fn write_csv(row: &FlatRow, path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;

    writer.write_record(row.keys())?;
    let cells = row.values().map(render_cell).collect::<Result<Vec<_>>>()?;
    writer.write_record(&cells)?;
    writer.flush()?;

    tracing::debug!(path = %path.display(), columns = row.len(), "Wrote CSV row");
    Ok(())
}

/// Text of one CSV cell
///
/// Missing values become empty cells; point series are embedded as compact
/// JSON arrays.
pub fn render_cell(value: &FlatValue) -> Result<String> {
    match value {
        FlatValue::Missing => Ok(String::new()),
        FlatValue::Text(text) => Ok(text.clone()),
        FlatValue::Points(points) => Ok(serde_json::to_string(points)?),
    }
}
