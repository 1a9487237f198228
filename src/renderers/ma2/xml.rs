//! Typed XML element tree and its serializer
//!
//! Builders assemble an `XmlElement` tree using the names in `defaults`;
//! `write_document` turns it into a UTF-8 document with quick-xml.

use quick_xml::escape::partial_escape;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use super::defaults::{self, element};
use crate::converters::midi_to_ma2::{MaError, Result};

/// One element with ordered attributes, children and optional text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlElement {
    name: &'static str,
    attributes: Vec<(&'static str, String)>,
    children: Vec<XmlElement>,
    text: Option<String>,
}

impl XmlElement {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            attributes: Vec::new(),
            children: Vec::new(),
            text: None,
        }
    }

    /// Add an attribute; attributes are written in insertion order
    pub fn attr(mut self, key: &'static str, value: impl ToString) -> Self {
        self.attributes.push((key, value.to_string()));
        self
    }

    pub fn child(mut self, child: XmlElement) -> Self {
        self.children.push(child);
        self
    }

    pub fn push(&mut self, child: XmlElement) {
        self.children.push(child);
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn name(&self) -> &str {
        self.name
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn children(&self) -> &[XmlElement] {
        &self.children
    }

    pub fn text_content(&self) -> Option<&str> {
        self.text.as_deref()
    }
}

/// `<No>` reference element holding one number
pub fn no(value: impl ToString) -> XmlElement {
    XmlElement::new(element::NO).text(value.to_string())
}

/// Wrap a body element in the `<MA>` root with namespaces and schema version
pub fn ma_root(body: XmlElement) -> XmlElement {
    XmlElement::new(element::MA)
        .attr("xmlns:xsi", defaults::XSI_NAMESPACE)
        .attr("xmlns", defaults::MA_NAMESPACE)
        .attr("xsi:schemaLocation", defaults::MA_SCHEMA_LOCATION)
        .attr("major_vers", defaults::MAJOR_VERS)
        .attr("minor_vers", defaults::MINOR_VERS)
        .attr("stream_vers", defaults::STREAM_VERS)
        .child(body)
}

/// Serialize a root element as a complete XML document
pub fn write_document(root: &XmlElement) -> Result<String> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
        .map_err(|e| MaError::Xml(e.to_string()))?;
    write_element(&mut writer, root)?;

    let mut bytes = writer.into_inner();
    bytes.push(b'\n');
    String::from_utf8(bytes).map_err(|e| MaError::Xml(e.to_string()))
}

fn write_element(writer: &mut Writer<Vec<u8>>, el: &XmlElement) -> Result<()> {
    let mut start = BytesStart::new(el.name);
    for (key, value) in &el.attributes {
        start.push_attribute((*key, value.as_str()));
    }

    if el.children.is_empty() && el.text.is_none() {
        return writer
            .write_event(Event::Empty(start))
            .map_err(|e| MaError::Xml(e.to_string()));
    }

    writer
        .write_event(Event::Start(start))
        .map_err(|e| MaError::Xml(e.to_string()))?;

    if let Some(text) = &el.text {
        // Quotes stay literal inside command text; only markup characters are escaped
        writer
            .write_event(Event::Text(BytesText::from_escaped(partial_escape(text))))
            .map_err(|e| MaError::Xml(e.to_string()))?;
    }
    for child in &el.children {
        write_element(writer, child)?;
    }

    writer
        .write_event(Event::End(BytesEnd::new(el.name)))
        .map_err(|e| MaError::Xml(e.to_string()))
}
