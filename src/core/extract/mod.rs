//! Structured extraction
//!
//! Walks a parsed PFT export once and builds the nested [`PftRecord`].
//!
//! The export uses two conventions for values:
//!
//! - plain fields carry their value as element text (`<Smoker>0</Smoker>`)
//! - coded fields carry the code as text and the human label in an
//!   `ExtendedInfo` attribute (`<GenderID ExtendedInfo="M">1</GenderID>`)
//!
//! Only `Subject` under the root and `Visit` under `Subject` are required.
//! Any other element that is missing yields an absent field.

pub mod graph;

pub use graph::{extract_graph, is_graph_tag, GRAPH_TAG_PREFIX};

use crate::adapters::xml::Element;
use crate::domain::{Parameter, PftError, PftRecord, Result, Subject, Test, Visit};

/// Attribute carrying the human-readable label of a coded element
pub const EXTENDED_INFO: &str = "ExtendedInfo";

/// Extract the nested record from a document root
///
/// # Errors
///
/// - [`PftError::MissingElement`] if `Subject` or `Subject/Visit` is absent
/// - [`PftError::InvalidNumber`] if a graph carries a malformed number
///
/// # Examples
///
/// ```
/// use pft_extract::adapters::xml::parse_document;
/// use pft_extract::core::extract::extract_record;
///
/// let root = parse_document(
///     r#"<Root><Subject><ID>123</ID><Visit><RecordID>rec1</RecordID></Visit></Subject></Root>"#,
/// )
/// .unwrap();
///
/// let record = extract_record(&root).unwrap();
/// assert_eq!(record.subject.subject_id.as_deref(), Some("123"));
/// assert_eq!(record.visit.record_id.as_deref(), Some("rec1"));
/// assert!(record.visit.tests.is_empty());
/// ```
pub fn extract_record(root: &Element) -> Result<PftRecord> {
    let subject_elem = root
        .child("Subject")
        .ok_or_else(|| PftError::MissingElement("Subject".to_string()))?;
    let visit_elem = subject_elem
        .child("Visit")
        .ok_or_else(|| PftError::MissingElement("Subject/Visit".to_string()))?;

    let subject = extract_subject(subject_elem);
    let visit = extract_visit(visit_elem)?;

    tracing::debug!(
        subject_id = subject.subject_id.as_deref().unwrap_or("<none>"),
        tests = visit.tests.len(),
        "Extracted record"
    );

    Ok(PftRecord { subject, visit })
}

/// Extract subject identity and demographics
pub fn extract_subject(subject: &Element) -> Subject {
    Subject {
        subject_id: subject.child_text("ID"),
        first_name: subject.child_text("FirstName"),
        last_name: subject.child_text("LastName"),
        dob: subject.child_attribute("DayOfBirth", EXTENDED_INFO),
        gender: subject.child_attribute("GenderID", EXTENDED_INFO),
        ethnicity: subject.child_attribute("ethnicID", EXTENDED_INFO),
    }
}

/// Extract visit metadata and all of its tests
pub fn extract_visit(visit: &Element) -> Result<Visit> {
    let tests = visit
        .children_named("Test")
        .map(extract_test)
        .collect::<Result<Vec<_>>>()?;

    Ok(Visit {
        record_id: visit.child_text("RecordID"),
        created_on: visit.child_attribute("CreatedOn", EXTENDED_INFO),
        smoker: visit.child_text("Smoker"),
        cigarettes_per_day: visit.child_text("CigDie"),
        smoke_years: visit.child_text("SmokeYears"),
        smoke_what: visit.child_text("SmokeWhat"),
        non_smoke_years: visit.child_text("NonSmokeYears"),
        height_cm: visit.child_text("Height"),
        weight_kg: visit.child_text("Weight"),
        hr_max: visit.child_text("HRMax"),
        technician: visit.child_text("Technician"),
        physician: visit.child_text("Physician"),
        referring_physician: visit.child_text("ReferringPhysician"),
        visit_reason: visit.child_text("VisitReason"),
        diabetes: visit.child_text("Diabetes"),
        tests,
    })
}

/// Extract one `Test` element
///
/// Parameters are every `Parameter` element beneath `AdditionalData`; graphs
/// are the direct children of `AdditionalData` whose tag starts with `Graph`,
/// keyed by their full tag.
pub fn extract_test(test: &Element) -> Result<Test> {
    let type_elem = test.child("TestType");
    let mut record = Test::new(
        type_elem
            .and_then(|t| t.attribute(EXTENDED_INFO))
            .map(str::to_string),
        type_elem.and_then(Element::text).map(str::to_string),
    );

    let Some(additional_data) = test.child("AdditionalData") else {
        return Ok(record);
    };

    record.parameters = additional_data
        .descendants("Parameter")
        .into_iter()
        .map(|param| Parameter(param.attributes().clone()))
        .collect();

    for child in additional_data.children() {
        if is_graph_tag(child.tag()) {
            record.graphs.insert(child.tag(), extract_graph(child)?);
        }
    }

    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::xml::parse_document;

    fn record(xml: &str) -> Result<PftRecord> {
        extract_record(&parse_document(xml).unwrap())
    }

    #[test]
    fn test_missing_subject_is_fatal() {
        let err = record("<Root><Other/></Root>").unwrap_err();
        assert!(matches!(err, PftError::MissingElement(ref e) if e == "Subject"));
    }

    #[test]
    fn test_subject_must_be_direct_child() {
        let err = record("<Root><Wrapper><Subject><Visit/></Subject></Wrapper></Root>").unwrap_err();
        assert!(matches!(err, PftError::MissingElement(_)));
    }

    #[test]
    fn test_missing_visit_is_fatal() {
        let err = record("<Root><Subject><ID>1</ID></Subject></Root>").unwrap_err();
        assert!(matches!(err, PftError::MissingElement(ref e) if e == "Subject/Visit"));
    }

    #[test]
    fn test_missing_coded_elements_yield_absent() {
        let rec = record("<Root><Subject><ID>1</ID><Visit/></Subject></Root>").unwrap();
        assert_eq!(rec.subject.subject_id.as_deref(), Some("1"));
        assert_eq!(rec.subject.dob, None);
        assert_eq!(rec.subject.gender, None);
        assert_eq!(rec.subject.ethnicity, None);
        assert_eq!(rec.visit.created_on, None);
    }

    #[test]
    fn test_coded_element_without_attribute() {
        let rec = record("<Root><Subject><GenderID>1</GenderID><Visit/></Subject></Root>").unwrap();
        assert_eq!(rec.subject.gender, None);
    }

    #[test]
    fn test_empty_text_element_is_empty_string() {
        let rec = record("<Root><Subject><FirstName/><Visit><Smoker></Smoker></Visit></Subject></Root>")
            .unwrap();
        assert_eq!(rec.subject.first_name.as_deref(), Some(""));
        assert_eq!(rec.visit.smoker.as_deref(), Some(""));
        assert_eq!(rec.subject.last_name, None);
    }

    #[test]
    fn test_first_match_wins_for_duplicate_fields() {
        let rec = record("<Root><Subject><ID>first</ID><ID>second</ID><Visit/><Visit><RecordID>x</RecordID></Visit></Subject></Root>")
            .unwrap();
        assert_eq!(rec.subject.subject_id.as_deref(), Some("first"));
        assert_eq!(rec.visit.record_id, None);
    }

    #[test]
    fn test_visit_fields_map_to_export_names() {
        let rec = record(
            r#"<Root><Subject><Visit>
                 <CreatedOn ExtendedInfo="2025-01-01">45000</CreatedOn>
                 <CigDie>10</CigDie><Height>180</Height><Weight>70</Weight>
               </Visit></Subject></Root>"#,
        )
        .unwrap();

        assert_eq!(rec.visit.created_on.as_deref(), Some("2025-01-01"));
        assert_eq!(rec.visit.cigarettes_per_day.as_deref(), Some("10"));
        assert_eq!(rec.visit.height_cm.as_deref(), Some("180"));
        assert_eq!(rec.visit.weight_kg.as_deref(), Some("70"));
    }

    #[test]
    fn test_tests_in_document_order() {
        let rec = record(
            r#"<Root><Subject><Visit>
                 <Test><TestType ExtendedInfo="Spirometry">1</TestType></Test>
                 <Other><Test><TestType ExtendedInfo="Ignored">9</TestType></Test></Other>
                 <Test><TestType ExtendedInfo="Lung Volumes">2</TestType></Test>
                 <Test/>
               </Visit></Subject></Root>"#,
        )
        .unwrap();

        let types: Vec<Option<&str>> = rec
            .visit
            .tests
            .iter()
            .map(|t| t.test_type.as_deref())
            .collect();
        assert_eq!(types, [Some("Spirometry"), Some("Lung Volumes"), None]);
        assert_eq!(rec.visit.tests[1].test_id.as_deref(), Some("2"));
        assert_eq!(rec.visit.tests[2].test_id, None);
    }

    #[test]
    fn test_parameters_collected_from_any_depth() {
        let rec = record(
            r#"<Root><Subject><Visit><Test><AdditionalData>
                 <Parameter Name="FEV1" Value="3.1" Units="L"/>
                 <Group><Parameter Name="FVC" Value="4.0"/></Group>
                 <Parameter Value="7"/>
               </AdditionalData></Test></Visit></Subject></Root>"#,
        )
        .unwrap();

        let params = &rec.visit.tests[0].parameters;
        assert_eq!(params.len(), 3);
        assert_eq!(params[0].name(), Some("FEV1"));
        assert_eq!(params[0].get("Units"), Some("L"));
        assert_eq!(params[1].name(), Some("FVC"));
        assert_eq!(params[2].name(), None);
        assert_eq!(params[2].get("Value"), Some("7"));
    }

    #[test]
    fn test_graphs_only_direct_children_with_prefix() {
        let rec = record(
            r#"<Root><Subject><Visit><Test><AdditionalData>
                 <Graph1 X="t (s)" Y="V (L)"/>
                 <GraphFlowVolume X="V (L)" Y="F (L/s)"><Point X="0" Y="0"/></GraphFlowVolume>
                 <Wrapper><Graph3/></Wrapper>
                 <Chart/>
               </AdditionalData></Test></Visit></Subject></Root>"#,
        )
        .unwrap();

        let graphs = &rec.visit.tests[0].graphs;
        let keys: Vec<&str> = graphs.keys().collect();
        assert_eq!(keys, ["Graph1", "GraphFlowVolume"]);
        assert_eq!(graphs.get("GraphFlowVolume").unwrap().points.len(), 1);
    }

    #[test]
    fn test_test_without_additional_data() {
        let rec = record(
            r#"<Root><Subject><Visit><Test><TestType ExtendedInfo="DLCO">3</TestType></Test></Visit></Subject></Root>"#,
        )
        .unwrap();

        let test = &rec.visit.tests[0];
        assert!(test.parameters.is_empty());
        assert!(test.graphs.is_empty());
    }

    #[test]
    fn test_malformed_point_aborts_document() {
        let err = record(
            r#"<Root><Subject><Visit><Test><AdditionalData>
                 <Graph1><Point X="1" Y="bad"/></Graph1>
               </AdditionalData></Test></Visit></Subject></Root>"#,
        )
        .unwrap_err();
        assert!(matches!(err, PftError::InvalidNumber { .. }));
    }
}
