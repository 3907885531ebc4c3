//! End-to-end tests for the extraction pipeline

use pft_extract::adapters::xml::read_document;
use pft_extract::core::extract::extract_record;
use pft_extract::core::flatten::{flatten_record, FlowVolumePolicy};
use pft_extract::core::pipeline::{discover_inputs, process_file, process_files, ExtractionOptions};
use pft_extract::domain::{FlatValue, PftRecord};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const FIXED_COLUMNS: [&str; 21] = [
    "SubjectID",
    "FirstName",
    "LastName",
    "DOB",
    "Gender",
    "Ethnicity",
    "VisitRecordID",
    "VisitDate",
    "Smoker",
    "CigarettesPerDay",
    "SmokeYears",
    "SmokeWhat",
    "NonSmokeYears",
    "Height_cm",
    "Weight_kg",
    "HRMax",
    "Technician",
    "Physician",
    "ReferringPhysician",
    "VisitReason",
    "Diabetes",
];

fn fixture() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("sample.xml")
}

fn read_csv(path: &Path) -> (Vec<String>, Vec<Vec<String>>) {
    let mut reader = csv::Reader::from_path(path).unwrap();
    let header = reader
        .headers()
        .unwrap()
        .iter()
        .map(str::to_string)
        .collect();
    let rows = reader
        .records()
        .map(|r| r.unwrap().iter().map(str::to_string).collect())
        .collect();
    (header, rows)
}

fn cell<'a>(header: &[String], row: &'a [String], column: &str) -> &'a str {
    let index = header
        .iter()
        .position(|h| h == column)
        .unwrap_or_else(|| panic!("missing column {column}"));
    &row[index]
}

#[test]
fn test_sample_document_end_to_end() {
    let temp_dir = TempDir::new().unwrap();
    let processed = process_file(&fixture(), temp_dir.path(), &ExtractionOptions::default())
        .expect("sample should extract");

    assert_eq!(processed.json_path, temp_dir.path().join("sample_extracted.json"));
    assert_eq!(processed.csv_path, temp_dir.path().join("sample_extracted.csv"));
    assert_eq!(processed.tests, 1);
    assert_eq!(processed.columns, 24);

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&processed.json_path).unwrap()).unwrap();
    assert_eq!(json["Subject"]["SubjectID"], "123");
    assert_eq!(json["Subject"]["DOB"], "1990-01-01");
    assert_eq!(json["Subject"]["Gender"], "M");
    assert_eq!(json["Subject"]["Ethnicity"], "Other");
    assert_eq!(json["Visit"]["CreatedOn"], "2025-01-01");
    assert_eq!(json["Visit"]["Height_cm"], "180");

    let test = &json["Visit"]["Tests"][0];
    assert_eq!(test["TestType"], "Spirometry");
    assert_eq!(test["TestID"], "1");
    assert_eq!(test["Parameters"][0]["Name"], "FEV1");
    assert_eq!(test["Parameters"][0]["Units"], "L");
    assert_eq!(test["Graphs"]["Graph1"]["Count"], 2);
    assert_eq!(test["Graphs"]["Graph1"]["SamplingInterval"], 1.0);
    assert_eq!(
        test["Graphs"]["Graph1"]["Points"],
        serde_json::json!([[0.0, 0.0], [1.0, 2.0]])
    );

    let (header, rows) = read_csv(&processed.csv_path);
    assert_eq!(rows.len(), 1);
    assert_eq!(&header[..21], FIXED_COLUMNS);
    assert_eq!(
        &header[21..],
        ["Spirometry_FEV1_Value", "Spirometry_FEV1_Units", "FlowVolumeLoop"]
    );

    let row = &rows[0];
    assert_eq!(cell(&header, row, "SubjectID"), "123");
    assert_eq!(cell(&header, row, "VisitRecordID"), "rec1");
    assert_eq!(cell(&header, row, "VisitDate"), "2025-01-01");
    assert_eq!(cell(&header, row, "Spirometry_FEV1_Value"), "3.1");
    assert_eq!(cell(&header, row, "Spirometry_FEV1_Units"), "L");
    assert_eq!(cell(&header, row, "FlowVolumeLoop"), "[[0.0,0.0],[1.0,2.0]]");
}

#[test]
fn test_json_round_trip_matches_in_memory_record() {
    let temp_dir = TempDir::new().unwrap();
    let record = extract_record(&read_document(&fixture()).unwrap()).unwrap();

    let processed =
        process_file(&fixture(), temp_dir.path(), &ExtractionOptions::default()).unwrap();
    let written: PftRecord =
        serde_json::from_str(&fs::read_to_string(processed.json_path).unwrap()).unwrap();

    assert_eq!(written, record);
}

#[test]
fn test_pipeline_is_idempotent() {
    let temp_dir = TempDir::new().unwrap();
    let options = ExtractionOptions::default();

    let first = process_file(&fixture(), temp_dir.path(), &options).unwrap();
    let json_first = fs::read(&first.json_path).unwrap();
    let csv_first = fs::read(&first.csv_path).unwrap();

    let second = process_file(&fixture(), temp_dir.path(), &options).unwrap();
    assert_eq!(fs::read(&second.json_path).unwrap(), json_first);
    assert_eq!(fs::read(&second.csv_path).unwrap(), csv_first);

    let record = extract_record(&read_document(&fixture()).unwrap()).unwrap();
    assert_eq!(
        flatten_record(&record, FlowVolumePolicy::First),
        flatten_record(&record, FlowVolumePolicy::First)
    );
}

#[test]
fn test_zero_tests_yields_only_fixed_columns() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("empty visit.xml");
    fs::write(
        &input,
        "<Root><Subject><ID>9</ID><Visit><RecordID>r</RecordID></Visit></Subject></Root>",
    )
    .unwrap();

    let processed = process_file(&input, &temp_dir.path().join("out"), &ExtractionOptions::default())
        .unwrap();
    assert!(processed.csv_path.ends_with("empty_visit_extracted.csv"));

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&processed.json_path).unwrap()).unwrap();
    assert_eq!(json["Visit"]["Tests"], serde_json::json!([]));
    assert_eq!(json["Subject"]["FirstName"], serde_json::Value::Null);

    let (header, rows) = read_csv(&processed.csv_path);
    assert_eq!(header, FIXED_COLUMNS);
    assert_eq!(cell(&header, &rows[0], "SubjectID"), "9");
    assert_eq!(cell(&header, &rows[0], "FirstName"), "");
}

#[test]
fn test_batch_over_directory() {
    let temp_dir = TempDir::new().unwrap();
    let input_dir = temp_dir.path().join("exports");
    fs::create_dir(&input_dir).unwrap();
    fs::copy(fixture(), input_dir.join("Patient B.xml")).unwrap();
    fs::copy(fixture(), input_dir.join("Patient A.xml")).unwrap();
    fs::write(input_dir.join("notes.txt"), "ignored").unwrap();

    let inputs = discover_inputs(&input_dir, "xml").unwrap();
    assert_eq!(
        inputs,
        [input_dir.join("Patient A.xml"), input_dir.join("Patient B.xml")]
    );

    let output_dir = temp_dir.path().join("out");
    let mut seen = Vec::new();
    let summary = process_files(&inputs, &output_dir, &ExtractionOptions::default(), |p| {
        seen.push(p.file_name().unwrap().to_string_lossy().to_string())
    })
    .unwrap();

    assert_eq!(seen, ["Patient A.xml", "Patient B.xml"]);
    assert!(summary.is_successful());
    assert_eq!(summary.successful, 2);
    assert!(output_dir.join("Patient_A_extracted.json").exists());
    assert!(output_dir.join("Patient_B_extracted.csv").exists());
}

#[test]
fn test_batch_continue_on_error_keeps_good_outputs() {
    let temp_dir = TempDir::new().unwrap();
    let bad = temp_dir.path().join("a_bad.xml");
    fs::write(&bad, "<Root><Visit/></Root>").unwrap();
    let good = temp_dir.path().join("b_good.xml");
    fs::copy(fixture(), &good).unwrap();
    let output_dir = temp_dir.path().join("out");

    let options = ExtractionOptions {
        continue_on_error: true,
        ..ExtractionOptions::default()
    };
    let summary = process_files(&[bad, good], &output_dir, &options, |_| {}).unwrap();

    assert_eq!(summary.failed, 1);
    assert_eq!(summary.successful, 1);
    assert!(summary.errors[0].message.contains("Subject"));
    assert!(!output_dir.join("a_bad_extracted.json").exists());
    assert!(output_dir.join("b_good_extracted.json").exists());
}

#[test]
fn test_flow_volume_policies_across_tests() {
    let xml = r#"<Root><Subject><Visit>
        <Test><TestType ExtendedInfo="Pre">1</TestType><AdditionalData>
          <Graph1 X="V (L)" Y="F (L/s)"><Point X="1" Y="1"/></Graph1>
        </AdditionalData></Test>
        <Test><TestType ExtendedInfo="Post">2</TestType><AdditionalData>
          <Graph1 X="V (L)" Y="F (L/s)"><Point X="2" Y="2"/></Graph1>
        </AdditionalData></Test>
      </Visit></Subject></Root>"#;
    let record = extract_record(&pft_extract::adapters::xml::parse_document(xml).unwrap()).unwrap();

    assert_eq!(
        flatten_record(&record, FlowVolumePolicy::First).get("FlowVolumeLoop"),
        Some(&FlatValue::Points(vec![[1.0, 1.0]]))
    );
    assert_eq!(
        flatten_record(&record, FlowVolumePolicy::Last).get("FlowVolumeLoop"),
        Some(&FlatValue::Points(vec![[2.0, 2.0]]))
    );
}
