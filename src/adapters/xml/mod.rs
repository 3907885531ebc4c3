//! XML input adapter
//!
//! Parses PFT export documents with `quick-xml` into a small element tree
//! that the extractor queries by tag and attribute.

pub mod element;
pub mod reader;

pub use element::Element;
pub use reader::{parse_document, read_document};
