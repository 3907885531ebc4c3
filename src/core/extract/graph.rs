//! Graph extraction
//!
//! Converts `Graph*` elements into [`Graph`] records. Missing numeric
//! metadata falls back to zero; a value that is present but not a number
//! fails the document.

use crate::adapters::xml::Element;
use crate::domain::{Graph, PftError, Result};
use std::str::FromStr;

/// Prefix that marks a child of `AdditionalData` as a graph
pub const GRAPH_TAG_PREFIX: &str = "Graph";

/// Returns true for tags that denote a graph element (`Graph1`, `GraphFlowVolume`, ...)
pub fn is_graph_tag(tag: &str) -> bool {
    tag.starts_with(GRAPH_TAG_PREFIX)
}

/// Extract a [`Graph`] from a graph element
///
/// - `X` / `Y` axis labels are optional
/// - `Count` defaults to 0 and `SamplingInterval` to 0.0 when absent
/// - every `Point` beneath the element with both `X` and `Y` becomes a pair;
///   points missing either coordinate are skipped
///
/// # Errors
///
/// Returns [`PftError::InvalidNumber`] if `Count`, `SamplingInterval` or a
/// point coordinate is present but cannot be parsed.
///
/// # Examples
///
/// ```
/// use pft_extract::adapters::xml::parse_document;
/// use pft_extract::core::extract::extract_graph;
///
/// let element = parse_document(
///     r#"<Graph1 X="V (L)" Y="F (L/s)" Count="2"><Point X="0" Y="0"/><Point X="1"/></Graph1>"#,
/// )
/// .unwrap();
///
/// let graph = extract_graph(&element).unwrap();
/// assert_eq!(graph.count, 2);
/// assert_eq!(graph.points, vec![[0.0, 0.0]]);
/// ```
pub fn extract_graph(element: &Element) -> Result<Graph> {
    let tag = element.tag();

    let count = match element.attribute("Count") {
        Some(raw) => parse_number::<i64>(raw, &format!("{tag}/@Count"))?,
        None => 0,
    };
    let sampling_interval = match element.attribute("SamplingInterval") {
        Some(raw) => parse_float(raw, &format!("{tag}/@SamplingInterval"))?,
        None => 0.0,
    };

    let mut points = Vec::new();
    for point in element.descendants("Point") {
        let (Some(x), Some(y)) = (point.attribute("X"), point.attribute("Y")) else {
            tracing::trace!(graph = %tag, "Skipping point without both coordinates");
            continue;
        };
        points.push([
            parse_float(x, &format!("{tag}/Point/@X"))?,
            parse_float(y, &format!("{tag}/Point/@Y"))?,
        ]);
    }

    if usize::try_from(count).map_or(true, |c| c != points.len()) {
        tracing::debug!(
            graph = %tag,
            declared = count,
            actual = points.len(),
            "Graph point count differs from declared Count"
        );
    }

    Ok(Graph {
        x: element.attribute("X").map(str::to_string),
        y: element.attribute("Y").map(str::to_string),
        count,
        sampling_interval,
        points,
    })
}

/// Parse a numeric attribute, tolerating surrounding whitespace
fn parse_number<T: FromStr>(raw: &str, field: &str) -> Result<T> {
    raw.trim()
        .parse::<T>()
        .map_err(|_| PftError::invalid_number(field, raw))
}

/// Parse a float attribute; `NaN` and infinities are rejected
fn parse_float(raw: &str, field: &str) -> Result<f64> {
    let value = parse_number::<f64>(raw, field)?;
    if !value.is_finite() {
        return Err(PftError::invalid_number(field, raw));
    }
    Ok(value)
}
