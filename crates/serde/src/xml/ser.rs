//! Tagged-element encoding.
//!
//! Output order for each record element:
//!
//! 1. attribute-placed fields on the record's own tag, in table order;
//! 2. element-placed fields as child tags, in table order;
//! 3. one sibling tag per member of each unwrapped sequence;
//! 4. extension entries, in insertion order.
//!
//! An extension entry named like a declared tag (an `address` key captured from
//! JSON) is skipped, since it would read back as that field.

use std::io::Write;

use quick_xml::Writer;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use serde_json::{Map, Value};
use tracing::debug;
use twinform_model::{FieldValue, Placement, Record, RecordFields};

use crate::error::{CodecError, Result};
use crate::format::{EncodeOptions, WireFormat};
use crate::xml::utils;

/// Encode a record to a compact XML string.
///
/// # Examples
///
/// ```
/// use twinform_model::{Address, Person};
/// use twinform_serde::xml::to_xml_string;
///
/// let person = Person {
///     version: Some("1.0".into()),
///     id: Some(1),
///     addresses: vec![Address { primary: true, ..Default::default() }],
///     ..Default::default()
/// };
/// assert_eq!(
///     to_xml_string(&person)?,
///     r#"<person version="1.0"><id>1</id><address primary="true"/></person>"#
/// );
/// # Ok::<(), twinform_serde::CodecError>(())
/// ```
pub fn to_xml_string<R: Record>(record: &R) -> Result<String> {
    into_string(to_xml_vec(record)?)
}

/// Encode a record to an XML string indented by two spaces per level.
pub fn to_xml_string_pretty<R: Record>(record: &R) -> Result<String> {
    into_string(to_xml_vec_with(record, EncodeOptions::pretty())?)
}

/// Encode a record to a compact XML byte vector.
pub fn to_xml_vec<R: Record>(record: &R) -> Result<Vec<u8>> {
    to_xml_vec_with(record, EncodeOptions::default())
}

/// Encode a record to an XML byte vector with the given options.
pub fn to_xml_vec_with<R: Record>(record: &R, options: EncodeOptions) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    to_xml_writer(record, &mut buffer, options)?;
    Ok(buffer)
}

/// Encode a record to an XML writer.
pub fn to_xml_writer<R, W>(record: &R, writer: W, options: EncodeOptions) -> Result<()>
where
    R: Record,
    W: Write,
{
    let fields = record.to_fields();
    let mut serializer = XmlSerializer::new(writer, options);
    serializer.write_record(R::SCHEMA.tag, &fields)
}

/// Extension entries whose key is not a declared tag of the record.
fn writable_extension(fields: &RecordFields) -> impl Iterator<Item = (&String, &Value)> {
    let schema = fields.schema();
    fields.extension().iter().filter(move |(key, _)| {
        let collides = schema.field_by_tag(key).is_some();
        if collides {
            debug!(record = schema.name, key = %key, "skipping extension entry named after a tag");
        }
        !collides
    })
}

fn into_string(buffer: Vec<u8>) -> Result<String> {
    String::from_utf8(buffer).map_err(|e| CodecError::write(WireFormat::TaggedElement, e))
}

/// Writes record projections as quick-xml events.
struct XmlSerializer<W: Write> {
    writer: Writer<W>,
}

impl<W: Write> XmlSerializer<W> {
    fn new(inner: W, options: EncodeOptions) -> Self {
        let writer = if options.pretty {
            Writer::new_with_indent(inner, b' ', 2)
        } else {
            Writer::new(inner)
        };
        Self { writer }
    }

    fn write_record(&mut self, tag: &str, fields: &RecordFields) -> Result<()> {
        let mut start = BytesStart::new(tag);
        for (field, value) in fields.iter() {
            if field.placement == Placement::Attribute {
                if let Some(text) = render_scalar(value) {
                    start.push_attribute((field.tag, text.as_str()));
                }
            }
        }

        let extension: Vec<_> = writable_extension(fields).collect();
        let has_children =
            fields.iter().any(|(field, _)| !field.is_attribute()) || !extension.is_empty();
        if !has_children {
            return self.emit(Event::Empty(start));
        }
        self.emit(Event::Start(start))?;

        for (field, value) in fields.iter() {
            if field.placement == Placement::Element {
                if let Some(text) = render_scalar(value) {
                    self.write_text_element(field.tag, &text)?;
                }
            }
        }

        for (field, value) in fields.iter() {
            if let (Placement::UnwrappedElement, FieldValue::Records(members)) =
                (field.placement, value)
            {
                for member in members {
                    self.write_record(field.tag, member)?;
                }
            }
        }

        for (key, value) in extension {
            self.write_extension(key, value)?;
        }

        self.emit(Event::End(BytesEnd::new(tag)))
    }

    fn write_text_element(&mut self, tag: &str, text: &str) -> Result<()> {
        if text.is_empty() {
            return self.emit(Event::Empty(BytesStart::new(tag)));
        }
        self.emit(Event::Start(BytesStart::new(tag)))?;
        self.emit(Event::Text(BytesText::new(text)))?;
        self.emit(Event::End(BytesEnd::new(tag)))
    }

    /// Writes one extension entry. Arrays become repeated siblings, objects
    /// become nested tags with the empty key as their text.
    fn write_extension(&mut self, key: &str, value: &Value) -> Result<()> {
        if !utils::is_valid_name(key) {
            return Err(CodecError::write(
                WireFormat::TaggedElement,
                format!("extension key `{key}` is not a valid element name"),
            ));
        }

        match value {
            Value::Array(items) => {
                for item in items {
                    self.write_extension(key, item)?;
                }
                Ok(())
            }
            Value::Object(object) => self.write_extension_object(key, object),
            scalar => {
                let text = scalar_text(scalar).unwrap_or_default();
                self.write_text_element(key, &text)
            }
        }
    }

    fn write_extension_object(&mut self, key: &str, object: &Map<String, Value>) -> Result<()> {
        let text = match object.get("") {
            Some(value) => scalar_text(value).ok_or_else(|| {
                CodecError::write(
                    WireFormat::TaggedElement,
                    format!("text content of `{key}` must be a scalar"),
                )
            })?,
            None => String::new(),
        };

        let mut children = object.iter().filter(|(name, _)| !name.is_empty()).peekable();
        if children.peek().is_none() {
            return self.write_text_element(key, &text);
        }

        self.emit(Event::Start(BytesStart::new(key)))?;
        if !text.is_empty() {
            self.emit(Event::Text(BytesText::new(&text)))?;
        }
        for (name, value) in children {
            self.write_extension(name, value)?;
        }
        self.emit(Event::End(BytesEnd::new(key)))
    }

    fn emit(&mut self, event: Event<'_>) -> Result<()> {
        self.writer
            .write_event(event)
            .map_err(|e| CodecError::write(WireFormat::TaggedElement, e))
    }
}

/// Text form of a declared scalar; `None` for sequences.
fn render_scalar(value: &FieldValue) -> Option<String> {
    match value {
        FieldValue::Text(text) => Some(text.clone()),
        FieldValue::Integer(n) => Some(n.to_string()),
        FieldValue::Boolean(flag) => Some(utils::bool_to_string(*flag).to_string()),
        FieldValue::DateTime(dt) => Some(dt.to_string()),
        FieldValue::Records(_) => None,
    }
}

/// Text form of a JSON scalar; `null` is empty, containers have none.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => Some(String::new()),
        Value::Bool(flag) => Some(utils::bool_to_string(*flag).to_string()),
        Value::Number(number) => Some(number.to_string()),
        Value::String(text) => Some(text.clone()),
        Value::Array(_) | Value::Object(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use twinform_model::{Address, LocalDateTime, Person};

    fn sample() -> Person {
        let mut person = Person {
            version: Some("1.0".into()),
            id: Some(1),
            name: Some("John Doe".into()),
            addresses: vec![
                Address {
                    primary: true,
                    city: Some("Springfield".into()),
                    ..Default::default()
                },
                Address {
                    city: Some("Shelbyville".into()),
                    created_at: LocalDateTime::new(2024, 1, 15, 10, 30, 0),
                    ..Default::default()
                },
            ],
            birth_date: LocalDateTime::new(1990, 5, 15, 8, 0, 0),
            ..Default::default()
        };
        person.extra.insert("unknownA".into(), json!("A"));
        person
    }

    #[test]
    fn test_element_order() -> Result<()> {
        assert_eq!(
            to_xml_string(&sample())?,
            concat!(
                r#"<person version="1.0">"#,
                "<id>1</id>",
                "<name>John Doe</name>",
                "<birthDate>1990-05-15T08:00:00</birthDate>",
                r#"<address primary="true"><city>Springfield</city></address>"#,
                r#"<address primary="false"><city>Shelbyville</city><createdAt>2024-01-15T10:30:00</createdAt></address>"#,
                "<unknownA>A</unknownA>",
                "</person>"
            )
        );
        Ok(())
    }

    #[test]
    fn test_empty_person_is_empty_element() -> Result<()> {
        assert_eq!(to_xml_string(&Person::default())?, "<person/>");
        Ok(())
    }

    #[test]
    fn test_special_characters_are_escaped() -> Result<()> {
        let person = Person {
            version: Some("1\"0".into()),
            name: Some("Tom & <Jerry>".into()),
            ..Default::default()
        };
        let xml = to_xml_string(&person)?;
        assert!(xml.contains("&amp;"));
        assert!(xml.contains("&lt;Jerry&gt;"));
        assert!(xml.contains("version=\"1&quot;0\""));

        let back: Person = crate::xml::from_xml_str(&xml)?;
        assert_eq!(back, person);
        Ok(())
    }

    #[test]
    fn test_extension_shapes() -> Result<()> {
        let mut person = Person::default();
        person.extra.insert("tags".into(), json!(["a", "b"]));
        person.extra.insert("score".into(), json!(4.5));
        person.extra.insert("flag".into(), json!(true));
        person.extra.insert("none".into(), Value::Null);
        person
            .extra
            .insert("meta".into(), json!({"": "note", "owner": "ops"}));

        assert_eq!(
            to_xml_string(&person)?,
            concat!(
                "<person>",
                "<tags>a</tags><tags>b</tags>",
                "<score>4.5</score>",
                "<flag>true</flag>",
                "<none/>",
                "<meta>note<owner>ops</owner></meta>",
                "</person>"
            )
        );
        Ok(())
    }

    #[test]
    fn test_invalid_extension_key_is_a_write_error() {
        let mut person = Person::default();
        person.extra.insert("1st place".into(), json!("gold"));
        let err = to_xml_string(&person).unwrap_err();
        assert!(matches!(err, CodecError::Write { .. }));
        assert!(!err.is_input_error());
    }

    #[test]
    fn test_extension_named_after_a_tag_is_not_written() -> Result<()> {
        let mut person = Person::default();
        person.extra.insert("address".into(), json!({"city": "Springfield"}));
        assert_eq!(to_xml_string(&person)?, "<person/>");

        person.extra.insert("addresses".into(), json!("kept"));
        assert_eq!(
            to_xml_string(&person)?,
            "<person><addresses>kept</addresses></person>"
        );
        Ok(())
    }

    #[test]
    fn test_pretty_output_round_trips() -> Result<()> {
        let person = sample();
        let xml = to_xml_string_pretty(&person)?;
        assert!(xml.contains("\n  <id>1</id>"));
        assert!(xml.contains("\n    <city>Springfield</city>"));

        let back: Person = crate::xml::from_xml_str(&xml)?;
        assert_eq!(back, person);
        Ok(())
    }

    #[test]
    fn test_empty_text_survives_pretty_printing() -> Result<()> {
        let person = Person {
            name: Some(String::new()),
            addresses: vec![Address::default()],
            ..Default::default()
        };
        let xml = to_xml_string_pretty(&person)?;
        let back: Person = crate::xml::from_xml_str(&xml)?;
        assert_eq!(back, person);
        Ok(())
    }
}
