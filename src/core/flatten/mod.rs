//! Flattening of a nested record into a single table row
//!
//! The row has a fixed block of subject and visit columns followed by
//! columns discovered from the tests in the document:
//!
//! - `"{TestType}_{Name}_{Attribute}"` for every non-`Name` attribute of
//!   every parameter, e.g. `Spirometry_FEV1_Value`
//! - `FlowVolumeLoop` holding the points of the flow-volume loop graph
//!
//! Spaces in any part of a generated column name become underscores.

use crate::domain::{FlatRow, FlatValue, Graph, PftError, PftRecord, Result, Test};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Column holding the selected flow-volume loop
pub const FLOW_VOLUME_LOOP_COLUMN: &str = "FlowVolumeLoop";

/// X-axis label of a flow-volume loop
pub const FLOW_VOLUME_X_LABEL: &str = "V (L)";

/// Y-axis label of a flow-volume loop
pub const FLOW_VOLUME_Y_LABEL: &str = "F (L/s)";

/// Prefix used when a test has no type label
pub const UNKNOWN_TEST_PREFIX: &str = "Unknown";

/// Name used when a parameter has no `Name` attribute
pub const UNNAMED_PARAMETER: &str = "Unnamed";

/// Which matching graph fills `FlowVolumeLoop`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlowVolumePolicy {
    /// First matching graph in document order; scanning stops there
    #[default]
    First,
    /// First matching graph of each test, later tests overwrite earlier ones
    Last,
}

impl FromStr for FlowVolumePolicy {
    type Err = PftError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "first" => Ok(Self::First),
            "last" => Ok(Self::Last),
            _ => Err(PftError::Configuration(format!(
                "Invalid flow volume policy: {s}. Expected 'first' or 'last'"
            ))),
        }
    }
}

impl fmt::Display for FlowVolumePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::First => write!(f, "first"),
            Self::Last => write!(f, "last"),
        }
    }
}

/// Flatten a record into one row
///
/// # Examples
///
/// ```
/// use pft_extract::core::flatten::{flatten_record, FlowVolumePolicy};
/// use pft_extract::domain::{FlatValue, PftRecord, Test};
///
/// let mut record = PftRecord::default();
/// let mut test = Test::new(Some("Lung Volumes".to_string()), None);
/// test.parameters.push([("Name", "TLC"), ("Value", "6.2")].into_iter().collect());
/// record.visit.tests.push(test);
///
/// let row = flatten_record(&record, FlowVolumePolicy::First);
/// assert_eq!(
///     row.get("Lung_Volumes_TLC_Value"),
///     Some(&FlatValue::Text("6.2".to_string()))
/// );
/// assert_eq!(row.get("SubjectID"), Some(&FlatValue::Missing));
/// ```
pub fn flatten_record(record: &PftRecord, policy: FlowVolumePolicy) -> FlatRow {
    let mut row = fixed_columns(record);

    let mut loop_selected = false;
    for test in &record.visit.tests {
        flatten_parameters(test, &mut row);

        if policy == FlowVolumePolicy::First && loop_selected {
            continue;
        }
        if let Some((name, graph)) = find_flow_volume_loop(test) {
            tracing::debug!(
                test_type = test.test_type.as_deref().unwrap_or(UNKNOWN_TEST_PREFIX),
                graph = %name,
                points = graph.points.len(),
                "Selected flow-volume loop"
            );
            row.insert(
                FLOW_VOLUME_LOOP_COLUMN,
                FlatValue::Points(graph.points.clone()),
            );
            loop_selected = true;
        }
    }

    row
}

/// The fixed subject and visit block, in canonical order
fn fixed_columns(record: &PftRecord) -> FlatRow {
    let subject = &record.subject;
    let visit = &record.visit;

    [
        ("SubjectID", &subject.subject_id),
        ("FirstName", &subject.first_name),
        ("LastName", &subject.last_name),
        ("DOB", &subject.dob),
        ("Gender", &subject.gender),
        ("Ethnicity", &subject.ethnicity),
        ("VisitRecordID", &visit.record_id),
        ("VisitDate", &visit.created_on),
        ("Smoker", &visit.smoker),
        ("CigarettesPerDay", &visit.cigarettes_per_day),
        ("SmokeYears", &visit.smoke_years),
        ("SmokeWhat", &visit.smoke_what),
        ("NonSmokeYears", &visit.non_smoke_years),
        ("Height_cm", &visit.height_cm),
        ("Weight_kg", &visit.weight_kg),
        ("HRMax", &visit.hr_max),
        ("Technician", &visit.technician),
        ("Physician", &visit.physician),
        ("ReferringPhysician", &visit.referring_physician),
        ("VisitReason", &visit.visit_reason),
        ("Diabetes", &visit.diabetes),
    ]
    .into_iter()
    .map(|(column, value)| (column, FlatValue::from(value.as_ref())))
    .collect()
}

/// Emit one column per non-`Name` attribute of every parameter
///
/// A column produced twice keeps its first position and takes the later value.
fn flatten_parameters(test: &Test, row: &mut FlatRow) {
    let prefix = test_prefix(test);

    for param in &test.parameters {
        let name = underscored(param.name().unwrap_or(UNNAMED_PARAMETER));
        for (key, value) in param.attributes() {
            if key == "Name" {
                continue;
            }
            let column = column_name(&prefix, &name, key);
            if row.insert(column.as_str(), FlatValue::Text(value.to_string())).is_some() {
                tracing::debug!(column = %column, "Overwriting duplicate parameter column");
            }
        }
    }
}

/// First graph of a test that qualifies as a flow-volume loop
fn find_flow_volume_loop(test: &Test) -> Option<(&str, &Graph)> {
    test.graphs.iter().find(|(_, graph)| is_flow_volume_loop(graph))
}

/// Column prefix for a test: its type label, or `Unknown`
pub fn test_prefix(test: &Test) -> String {
    underscored(test.test_type.as_deref().unwrap_or(UNKNOWN_TEST_PREFIX))
}

/// Build a dynamic parameter column name
///
/// The column is `{label}_{name}_{key}` with every space replaced by an
/// underscore.
///
/// ```
/// use pft_extract::core::flatten::column_name;
///
/// assert_eq!(column_name("Spirometry", "FEV1", "Value"), "Spirometry_FEV1_Value");
/// assert_eq!(column_name("Lung Volumes", "RV TLC", "Pred"), "Lung_Volumes_RV_TLC_Pred");
/// ```
pub fn column_name(test_label: &str, name: &str, key: &str) -> String {
    underscored(&format!("{test_label}_{name}_{key}"))
}

/// A graph is a flow-volume loop when its axes are volume/flow and it has points
pub fn is_flow_volume_loop(graph: &Graph) -> bool {
    graph.x.as_deref() == Some(FLOW_VOLUME_X_LABEL)
        && graph.y.as_deref() == Some(FLOW_VOLUME_Y_LABEL)
        && !graph.points.is_empty()
}

fn underscored(s: &str) -> String {
    s.replace(' ', "_")
}
