//! Flattened single-row representation of a record

use super::ordered_map::OrderedMap;
use serde::{Deserialize, Serialize};

/// A single cell of a [`FlatRow`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FlatValue {
    /// Source field was absent; rendered as an empty cell
    Missing,
    /// Scalar text copied through verbatim
    Text(String),
    /// Embedded point series (the flow-volume loop)
    Points(Vec<[f64; 2]>),
}

impl From<Option<String>> for FlatValue {
    fn from(value: Option<String>) -> Self {
        value.map_or(FlatValue::Missing, FlatValue::Text)
    }
}

impl From<Option<&String>> for FlatValue {
    fn from(value: Option<&String>) -> Self {
        value.cloned().into()
    }
}

/// Column name to cell mapping for one document
///
/// Header order is insertion order. The column set depends on the tests and
/// parameters present in the document.
pub type FlatRow = OrderedMap<FlatValue>;
