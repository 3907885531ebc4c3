//! Input format adapters.
//!
//! - [`xml`] - Event-driven reader that turns a PFT XML export into an
//!   owned element tree
//!
//! The rest of the crate works on [`xml::Element`] and never touches the
//! parser directly, so extraction can be tested from XML string literals:
//!
//! ```rust
//! use pft_extract::adapters::xml::parse_document;
//!
//! let root = parse_document(r#"<Root><Subject><ID>42</ID></Subject></Root>"#).unwrap();
//! let subject = root.child("Subject").unwrap();
//! assert_eq!(subject.child_text("ID").as_deref(), Some("42"));
//! ```

pub mod xml;
