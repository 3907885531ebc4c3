//! In-memory XML element tree
//!
//! A deliberately small tree: element tag, ordered attributes, leading text,
//! and child elements. Comments and processing instructions are not kept,
//! but they end the leading text of the element that contains them.

use crate::domain::OrderedMap;

/// An XML element with its attributes, leading text and child elements
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Element {
    tag: String,
    attributes: OrderedMap<String>,
    text: Option<String>,
    text_closed: bool,
    children: Vec<Element>,
}

impl Element {
    /// Creates an element with no attributes, text or children
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    /// Adds an attribute, builder style
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name, value.into());
        self
    }

    /// Sets the leading text, builder style
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Appends a child element, builder style
    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    pub(crate) fn set_attribute(&mut self, name: String, value: String) {
        self.attributes.insert(name, value);
    }

    /// Appends character data that precedes the first child element
    ///
    /// Text after the first child, comment or processing instruction is not
    /// part of the element text.
    pub(crate) fn push_text(&mut self, chunk: &str) {
        if self.children.is_empty() && !self.text_closed {
            self.text.get_or_insert_with(String::new).push_str(chunk);
        }
    }

    /// Ends the leading text at a comment or processing instruction
    pub(crate) fn close_text(&mut self) {
        self.text_closed = true;
    }

    pub(crate) fn push_child(&mut self, child: Element) {
        self.children.push(child);
    }

    /// Element tag as written in the document
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Character data before the first child, `None` when there is none
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Attribute value by name
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// All attributes in document order
    pub fn attributes(&self) -> &OrderedMap<String> {
        &self.attributes
    }

    /// Direct child elements in document order
    pub fn children(&self) -> &[Element] {
        &self.children
    }

    /// First direct child with the given tag
    pub fn child(&self, tag: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.tag == tag)
    }

    /// Direct children with the given tag, in document order
    pub fn children_named<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.children.iter().filter(move |c| c.tag == tag)
    }

    /// Text of the first direct child with the given tag
    ///
    /// Returns `None` if the child is absent and an empty string if the child
    /// is present without text.
    pub fn child_text(&self, tag: &str) -> Option<String> {
        self.child(tag)
            .map(|c| c.text.clone().unwrap_or_default())
    }

    /// Attribute of the first direct child with the given tag
    ///
    /// Returns `None` when either the child or the attribute is absent.
    pub fn child_attribute(&self, tag: &str, attribute: &str) -> Option<String> {
        self.child(tag)
            .and_then(|c| c.attribute(attribute))
            .map(str::to_string)
    }

    /// All descendants with the given tag in document order, excluding `self`
    pub fn descendants(&self, tag: &str) -> Vec<&Element> {
        let mut found = Vec::new();
        collect_descendants(self, tag, &mut found);
        found
    }
}

fn collect_descendants<'a>(element: &'a Element, tag: &str, found: &mut Vec<&'a Element>) {
    for child in &element.children {
        if child.tag == tag {
            found.push(child);
        }
        collect_descendants(child, tag, found);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Element {
        Element::new("Subject")
            .with_child(Element::new("ID").with_text("123"))
            .with_child(Element::new("Smoker"))
            .with_child(Element::new("GenderID").with_attribute("ExtendedInfo", "M").with_text("1"))
            .with_child(
                Element::new("Visit").with_child(
                    Element::new("Test").with_child(Element::new("ID").with_text("nested")),
                ),
            )
    }

    #[test]
    fn test_child_text_semantics() {
        let subject = sample();
        assert_eq!(subject.child_text("ID"), Some("123".to_string()));
        assert_eq!(subject.child_text("Smoker"), Some(String::new()));
        assert_eq!(subject.child_text("FirstName"), None);
    }

    #[test]
    fn test_child_attribute() {
        let subject = sample();
        assert_eq!(
            subject.child_attribute("GenderID", "ExtendedInfo"),
            Some("M".to_string())
        );
        assert_eq!(subject.child_attribute("GenderID", "Other"), None);
        assert_eq!(subject.child_attribute("DayOfBirth", "ExtendedInfo"), None);
    }

    #[test]
    fn test_child_is_direct_only() {
        let subject = sample();
        assert!(subject.child("Test").is_none());
        assert_eq!(subject.descendants("Test").len(), 1);
    }

    #[test]
    fn test_descendants_document_order() {
        let subject = sample();
        let ids: Vec<&str> = subject
            .descendants("ID")
            .iter()
            .filter_map(|e| e.text())
            .collect();
        assert_eq!(ids, ["123", "nested"]);
    }

    #[test]
    fn test_push_text_ignores_tail_text() {
        let mut element = Element::new("TestType");
        element.push_text("1");
        element.push_child(Element::new("Inner"));
        element.push_text("tail");
        assert_eq!(element.text(), Some("1"));
    }
}
