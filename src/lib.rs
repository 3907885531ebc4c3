// PFT Extract - Pulmonary Function Test XML Extraction Tool
// Copyright (c) 2025 PFT Extract Contributors
// Licensed under the MIT License

//! # PFT Extract - Pulmonary Function Test XML to JSON and CSV
//!
//! PFT Extract converts the XML export of a pulmonary function test system
//! into two artifacts per input document:
//!
//! - a nested JSON record: subject demographics, visit metadata and each test
//!   with its parameters and sampled graphs
//! - a single-row CSV: one column per demographic field, one column per
//!   measured parameter attribute, and a `FlowVolumeLoop` column holding the
//!   flow-volume curve
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Extraction, flattening, output writers and the pipeline
//! - [`adapters`] - XML reader producing an owned element tree
//! - [`domain`] - Record types, the flat row and errors
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging and observability
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pft_extract::core::pipeline::{process_file, ExtractionOptions};
//! use std::path::Path;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let processed = process_file(
//!         Path::new("input/Patient 01.xml"),
//!         Path::new("output"),
//!         &ExtractionOptions::default(),
//!     )?;
//!
//!     // output/Patient_01_extracted.json and output/Patient_01_extracted.csv
//!     println!("{} tests, {} columns", processed.tests, processed.columns);
//!     Ok(())
//! }
//! ```
//!
//! ## Working in Memory
//!
//! Each stage can be used on its own:
//!
//! ```rust
//! use pft_extract::adapters::xml::parse_document;
//! use pft_extract::core::extract::extract_record;
//! use pft_extract::core::flatten::{flatten_record, FlowVolumePolicy};
//! use pft_extract::domain::FlatValue;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let root = parse_document(
//!     r#"<Root><Subject><ID>123</ID><Visit>
//!          <Test><TestType ExtendedInfo="Spirometry">1</TestType>
//!            <AdditionalData><Parameter Name="FEV1" Value="3.1"/></AdditionalData>
//!          </Test>
//!        </Visit></Subject></Root>"#,
//! )?;
//! let record = extract_record(&root)?;
//! let row = flatten_record(&record, FlowVolumePolicy::First);
//!
//! assert_eq!(
//!     row.get("Spirometry_FEV1_Value"),
//!     Some(&FlatValue::Text("3.1".to_string()))
//! );
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```
//!
//! ## Error Handling
//!
//! All library operations return [`domain::Result`], whose error type is
//! [`domain::PftError`]. A missing `Subject` or `Visit`, malformed XML and
//! malformed graph numbers fail the document; every other missing element
//! yields an absent field.
//!
//! ## Logging
//!
//! Diagnostics are emitted through `tracing`; see [`logging::init_logging`].

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
