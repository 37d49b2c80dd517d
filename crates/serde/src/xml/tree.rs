//! Generic element tree built from quick-xml events.

use std::borrow::Cow;

use quick_xml::Reader;
use quick_xml::escape::{resolve_predefined_entity, unescape};
use quick_xml::events::{BytesRef, BytesStart, Event};
use serde_json::{Map, Value};

use crate::error::{CodecError, Result};
use crate::format::WireFormat;
use crate::xml::utils;

/// Deepest element nesting accepted on decode, the same limit serde_json
/// applies to nested JSON.
pub(crate) const MAX_DEPTH: usize = 128;

/// One parsed element: name, attributes in document order, child elements in
/// document order and the concatenation of its direct text content.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct XmlElement {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<XmlElement>,
    pub text: String,
}

impl XmlElement {
    fn from_start(start: &BytesStart) -> Result<Self> {
        let name = utf8(start.name().as_ref())?.to_string();
        let mut attributes = Vec::new();
        for attr in start.attributes() {
            let attr = attr.map_err(malformed)?;
            let key = utf8(attr.key.as_ref())?.to_string();
            let raw = utf8(&attr.value)?;
            let value = unescape(raw).map_err(malformed)?.into_owned();
            attributes.push((key, value));
        }
        Ok(Self {
            name,
            attributes,
            children: Vec::new(),
            text: String::new(),
        })
    }

    /// Attributes that carry data, i.e. everything except namespace declarations.
    pub fn data_attributes(&self) -> impl Iterator<Item = &(String, String)> {
        self.attributes
            .iter()
            .filter(|(key, _)| !utils::is_namespace_declaration(key))
    }

    /// Whether the element holds nothing but text.
    pub fn is_text_only(&self) -> bool {
        self.children.is_empty() && self.data_attributes().next().is_none()
    }

    /// Converts an element with no declared meaning into an extension value.
    ///
    /// Text-only elements become strings. Anything else becomes an object of
    /// attributes and children, where repeated child names collect into an array
    /// and non-blank text is stored under the empty key.
    pub fn into_value(self) -> Value {
        if self.is_text_only() {
            return Value::String(self.text);
        }

        let mut object = Map::new();
        for (key, value) in self.attributes {
            if !utils::is_namespace_declaration(&key) {
                object.insert(key, Value::String(value));
            }
        }
        for child in self.children {
            let name = child.name.clone();
            let value = child.into_value();
            match object.get_mut(&name) {
                Some(Value::Array(items)) => items.push(value),
                Some(existing) => {
                    let first = existing.take();
                    *existing = Value::Array(vec![first, value]);
                }
                None => {
                    object.insert(name, value);
                }
            }
        }
        if !utils::is_blank(&self.text) {
            object.insert(String::new(), Value::String(self.text.trim().to_string()));
        }
        Value::Object(object)
    }
}

/// Parses a complete document into its root element.
///
/// The declaration, comments, processing instructions and doctype are skipped.
/// Entity and character references are resolved into the surrounding text.
/// Nesting deeper than [`MAX_DEPTH`] elements is rejected.
pub(crate) fn parse_document(input: &str) -> Result<XmlElement> {
    let mut reader = Reader::from_str(input);
    let mut stack: Vec<XmlElement> = Vec::new();
    let mut root: Option<XmlElement> = None;

    loop {
        match reader.read_event().map_err(malformed)? {
            Event::Start(start) => {
                ensure_single_root(&root, &stack)?;
                ensure_depth(&stack)?;
                stack.push(XmlElement::from_start(&start)?);
            }
            Event::Empty(start) => {
                ensure_single_root(&root, &stack)?;
                ensure_depth(&stack)?;
                let element = XmlElement::from_start(&start)?;
                attach(element, &mut stack, &mut root);
            }
            Event::End(_) => {
                let element = stack
                    .pop()
                    .ok_or_else(|| malformed("closing tag without a matching opening tag"))?;
                attach(element, &mut stack, &mut root);
            }
            Event::Text(text) => push_text(&mut stack, utf8(&text)?)?,
            Event::CData(data) => push_text(&mut stack, utf8(&data)?)?,
            Event::GeneralRef(reference) => {
                let resolved = resolve_reference(&reference)?;
                push_text(&mut stack, &resolved)?;
            }
            Event::Decl(_) | Event::Comment(_) | Event::PI(_) | Event::DocType(_) => {}
            Event::Eof => break,
        }
    }

    if let Some(open) = stack.last() {
        return Err(malformed(format!("unclosed element <{}>", open.name)));
    }
    root.ok_or_else(|| malformed("document has no root element"))
}

fn ensure_single_root(root: &Option<XmlElement>, stack: &[XmlElement]) -> Result<()> {
    if root.is_some() && stack.is_empty() {
        return Err(malformed("content after the root element"));
    }
    Ok(())
}

fn ensure_depth(stack: &[XmlElement]) -> Result<()> {
    if stack.len() >= MAX_DEPTH {
        return Err(malformed(format!(
            "elements nested deeper than {MAX_DEPTH} levels"
        )));
    }
    Ok(())
}

fn attach(element: XmlElement, stack: &mut [XmlElement], root: &mut Option<XmlElement>) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        None => *root = Some(element),
    }
}

fn push_text(stack: &mut [XmlElement], text: &str) -> Result<()> {
    match stack.last_mut() {
        Some(current) => current.text.push_str(text),
        None if utils::is_blank(text) => {}
        None => return Err(malformed("text outside the root element")),
    }
    Ok(())
}

fn resolve_reference(reference: &BytesRef) -> Result<Cow<'static, str>> {
    if let Some(ch) = reference.resolve_char_ref().map_err(malformed)? {
        return Ok(Cow::Owned(ch.to_string()));
    }
    let name = utf8(reference)?;
    resolve_predefined_entity(name)
        .map(Cow::Borrowed)
        .ok_or_else(|| malformed(format!("unknown entity `&{name};`")))
}

fn utf8(bytes: &[u8]) -> Result<&str> {
    std::str::from_utf8(bytes).map_err(malformed)
}

fn malformed(message: impl std::fmt::Display) -> CodecError {
    CodecError::malformed(WireFormat::TaggedElement, message)
}
