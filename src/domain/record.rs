//! Nested PFT record model
//!
//! This module defines the normalized record extracted from one PFT export:
//! a subject, their visit, and the tests performed during that visit. Field
//! names on the wire follow the export's column vocabulary so the JSON output
//! can be read back into the same structure.

use super::ordered_map::OrderedMap;
use serde::{Deserialize, Serialize};

/// One extracted PFT document
///
/// # Examples
///
/// ```
/// use pft_extract::domain::record::{PftRecord, Subject, Visit};
///
/// let record = PftRecord {
///     subject: Subject {
///         subject_id: Some("123".to_string()),
///         ..Subject::default()
///     },
///     visit: Visit::default(),
/// };
///
/// let json = serde_json::to_value(&record).unwrap();
/// assert_eq!(json["Subject"]["SubjectID"], "123");
/// assert!(json["Visit"]["Tests"].as_array().unwrap().is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PftRecord {
    /// Subject identity and demographics
    #[serde(rename = "Subject")]
    pub subject: Subject,

    /// The visit recorded for the subject
    #[serde(rename = "Visit")]
    pub visit: Visit,
}

/// Subject identity and demographics
///
/// Coded fields (`DOB`, `Gender`, `Ethnicity`) carry the human label taken
/// from the `ExtendedInfo` attribute, not the code in the element text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Subject {
    #[serde(rename = "SubjectID")]
    pub subject_id: Option<String>,

    #[serde(rename = "FirstName")]
    pub first_name: Option<String>,

    #[serde(rename = "LastName")]
    pub last_name: Option<String>,

    #[serde(rename = "DOB")]
    pub dob: Option<String>,

    #[serde(rename = "Gender")]
    pub gender: Option<String>,

    #[serde(rename = "Ethnicity")]
    pub ethnicity: Option<String>,
}

/// Visit metadata and the tests performed
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Visit {
    #[serde(rename = "RecordID")]
    pub record_id: Option<String>,

    /// Label of the `CreatedOn` element
    #[serde(rename = "CreatedOn")]
    pub created_on: Option<String>,

    #[serde(rename = "Smoker")]
    pub smoker: Option<String>,

    /// Source element `CigDie`
    #[serde(rename = "CigarettesPerDay")]
    pub cigarettes_per_day: Option<String>,

    #[serde(rename = "SmokeYears")]
    pub smoke_years: Option<String>,

    #[serde(rename = "SmokeWhat")]
    pub smoke_what: Option<String>,

    #[serde(rename = "NonSmokeYears")]
    pub non_smoke_years: Option<String>,

    /// Source element `Height`
    #[serde(rename = "Height_cm")]
    pub height_cm: Option<String>,

    /// Source element `Weight`
    #[serde(rename = "Weight_kg")]
    pub weight_kg: Option<String>,

    #[serde(rename = "HRMax")]
    pub hr_max: Option<String>,

    #[serde(rename = "Technician")]
    pub technician: Option<String>,

    #[serde(rename = "Physician")]
    pub physician: Option<String>,

    #[serde(rename = "ReferringPhysician")]
    pub referring_physician: Option<String>,

    #[serde(rename = "VisitReason")]
    pub visit_reason: Option<String>,

    #[serde(rename = "Diabetes")]
    pub diabetes: Option<String>,

    /// Tests in document order
    #[serde(rename = "Tests", default)]
    pub tests: Vec<Test>,
}

/// A single test performed during a visit
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Test {
    /// Human-readable type label (`TestType/@ExtendedInfo`)
    #[serde(rename = "TestType")]
    pub test_type: Option<String>,

    /// Type code (`TestType` text)
    #[serde(rename = "TestID")]
    pub test_id: Option<String>,

    #[serde(rename = "Parameters", default)]
    pub parameters: Vec<Parameter>,

    /// Graphs keyed by their source tag, in document order
    #[serde(rename = "Graphs", default)]
    pub graphs: OrderedMap<Graph>,
}

impl Test {
    /// Creates a test with the given label and code and no data
    pub fn new(test_type: Option<String>, test_id: Option<String>) -> Self {
        Self {
            test_type,
            test_id,
            ..Self::default()
        }
    }
}

/// Open attribute set of a `Parameter` element
///
/// Every attribute of the source element is kept verbatim. `Name`, `Value`
/// and `Units` are common but nothing is required.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Parameter(pub OrderedMap<String>);

impl Parameter {
    /// The `Name` attribute, if present
    pub fn name(&self) -> Option<&str> {
        self.get("Name")
    }

    /// Any attribute by name
    pub fn get(&self, attribute: &str) -> Option<&str> {
        self.0.get(attribute).map(String::as_str)
    }

    /// All attributes in source order
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k, v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Parameter {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Parameter(iter.into_iter().map(|(k, v)| (k, v.into())).collect())
    }
}

/// A sampled waveform or loop trace
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Graph {
    /// X-axis label
    #[serde(rename = "X")]
    pub x: Option<String>,

    /// Y-axis label
    #[serde(rename = "Y")]
    pub y: Option<String>,

    /// Declared point count; advisory, never checked against `points`
    #[serde(rename = "Count")]
    pub count: i64,

    #[serde(rename = "SamplingInterval")]
    pub sampling_interval: f64,

    /// `[x, y]` pairs in document order
    #[serde(rename = "Points", default)]
    pub points: Vec<[f64; 2]>,
}
