//! quick-xml event reader that builds an [`Element`] tree

use super::element::Element;
use crate::domain::{PftError, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::fs;
use std::path::Path;

/// Reads and parses an XML document from disk
///
/// # Errors
///
/// Returns [`PftError::Io`] if the file cannot be read and
/// [`PftError::Xml`] if the content is not well-formed.
pub fn read_document(path: impl AsRef<Path>) -> Result<Element> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)
        .map_err(|e| PftError::Io(format!("Failed to read {}: {e}", path.display())))?;

    tracing::debug!(path = %path.display(), bytes = contents.len(), "Read XML document");
    parse_document(&contents)
}

/// Parses an XML document and returns its root element
///
/// # Examples
///
/// ```
/// use pft_extract::adapters::xml::parse_document;
///
/// let root = parse_document(r#"<Root><Subject><ID>123</ID></Subject></Root>"#).unwrap();
/// let subject = root.child("Subject").unwrap();
/// assert_eq!(subject.child_text("ID").as_deref(), Some("123"));
/// ```
pub fn parse_document(xml: &str) -> Result<Element> {
    let mut reader = Reader::from_str(xml.trim_start_matches('\u{feff}'));

    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(start)) => {
                stack.push(start_element(&reader, &start)?);
            }
            Ok(Event::Empty(start)) => {
                let element = start_element(&reader, &start)?;
                attach(&mut stack, &mut root, element)?;
            }
            Ok(Event::End(_)) => {
                let element = stack
                    .pop()
                    .ok_or_else(|| PftError::Xml("Unexpected closing tag".to_string()))?;
                attach(&mut stack, &mut root, element)?;
            }
            Ok(Event::Text(text)) => {
                if let Some(current) = stack.last_mut() {
                    let text = text.unescape().map_err(|e| xml_error(&reader, e))?;
                    current.push_text(&text);
                }
            }
            Ok(Event::CData(data)) => {
                if let Some(current) = stack.last_mut() {
                    let text = reader
                        .decoder()
                        .decode(&data)
                        .map_err(|e| xml_error(&reader, e))?;
                    current.push_text(&text);
                }
            }
            Ok(Event::Comment(_)) | Ok(Event::PI(_)) => {
                if let Some(current) = stack.last_mut() {
                    current.close_text();
                }
            }
            Ok(Event::Eof) => break,
            // Declarations, doctype
            Ok(_) => {}
            Err(e) => return Err(xml_error(&reader, e)),
        }
    }

    if let Some(open) = stack.last() {
        return Err(PftError::Xml(format!(
            "Unexpected end of document: <{}> is not closed",
            open.tag()
        )));
    }

    root.ok_or_else(|| PftError::Xml("Document has no root element".to_string()))
}

fn start_element(reader: &Reader<&[u8]>, start: &BytesStart) -> Result<Element> {
    let decoder = reader.decoder();
    let tag = decoder
        .decode(start.name().as_ref())
        .map_err(|e| xml_error(reader, e))?
        .into_owned();
    let mut element = Element::new(tag);

    for attribute in start.attributes() {
        let attribute = attribute.map_err(|e| xml_error(reader, e))?;
        let key = decoder
            .decode(attribute.key.as_ref())
            .map_err(|e| xml_error(reader, e))?
            .into_owned();
        let value = attribute
            .unescape_value()
            .map_err(|e| xml_error(reader, e))?
            .into_owned();
        element.set_attribute(key, value);
    }

    Ok(element)
}

fn attach(stack: &mut [Element], root: &mut Option<Element>, element: Element) -> Result<()> {
    if let Some(parent) = stack.last_mut() {
        parent.push_child(element);
        return Ok(());
    }
    if root.is_some() {
        return Err(PftError::Xml(format!(
            "Extra content at the end of the document: <{}>",
            element.tag()
        )));
    }
    *root = Some(element);
    Ok(())
}

fn xml_error(reader: &Reader<&[u8]>, err: impl std::fmt::Display) -> PftError {
    PftError::Xml(format!("{err} (at byte {})", reader.buffer_position()))
}
