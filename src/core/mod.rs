//! Core extraction logic.
//!
//! # Modules
//!
//! - [`extract`] - Build the nested record from a parsed export
//! - [`flatten`] - Flatten the record into a single-row column map
//! - [`output`] - Write the JSON and CSV artifacts
//! - [`pipeline`] - Per-file and batch orchestration
//!
//! # Extraction Workflow
//!
//! 1. **Parse**: Read the XML export into an element tree
//! 2. **Extract**: Walk `Subject`, `Visit` and each `Test` once
//! 3. **Write JSON**: Persist the nested record
//! 4. **Flatten**: Derive the fixed columns, parameter columns and the
//!    flow-volume loop
//! 5. **Write CSV**: Persist the header and the single data row
//! 6. **Report**: Collect a run summary
//!
//! # Example
//!
//! ```rust,no_run
//! use pft_extract::core::pipeline::{discover_inputs, process_files, ExtractionOptions};
//! use std::path::Path;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let inputs = discover_inputs(Path::new("input"), "xml")?;
//! let summary = process_files(
//!     &inputs,
//!     Path::new("output"),
//!     &ExtractionOptions::default(),
//!     |path| println!("Processing {}", path.display()),
//! )?;
//!
//! println!("Successful: {}", summary.successful);
//! println!("Failed: {}", summary.failed);
//! # Ok(())
//! # }
//! ```

pub mod extract;
pub mod flatten;
pub mod output;
pub mod pipeline;
