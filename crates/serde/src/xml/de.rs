//! Tagged-element decoding.
//!
//! The document is parsed into an [`XmlElement`] tree first, then each record
//! element is walked against its mapping table: attributes feed attribute-placed
//! fields, child tags feed element-placed fields, and every child named after an
//! unwrapped sequence's tag becomes one more member of that sequence, in
//! document order. Names are matched by tag only, so `<addresses>` is
//! extension data like any other unknown child.

use tracing::trace;
use twinform_model::{FieldKind, Placement, Record, RecordFields, RecordSchema};

use crate::error::{CodecError, Result};
use crate::format::WireFormat;
use crate::mapping;
use crate::xml::tree::{XmlElement, parse_document};
use crate::xml::utils;

/// Decode a record from an XML string.
///
/// The root element's name is not checked; only its content is mapped.
///
/// # Examples
///
/// ```
/// use twinform_model::Person;
/// use twinform_serde::xml::from_xml_str;
///
/// let xml = r#"<person version="1.0">
///   <id>1</id>
///   <address primary="true"><city>Springfield</city></address>
///   <address><city>Shelbyville</city></address>
/// </person>"#;
/// let person: Person = from_xml_str(xml)?;
/// assert_eq!(person.version.as_deref(), Some("1.0"));
/// assert_eq!(person.addresses.len(), 2);
/// assert!(person.addresses[0].primary);
/// # Ok::<(), twinform_serde::CodecError>(())
/// ```
pub fn from_xml_str<R: Record>(xml: &str) -> Result<R> {
    let root = parse_document(xml)?;
    let fields = decode_element(R::SCHEMA, root, "")?;
    Ok(R::from_fields(fields))
}

/// Decode a record from XML bytes. The bytes must be UTF-8.
pub fn from_xml_slice<R: Record>(xml: &[u8]) -> Result<R> {
    let xml_str = std::str::from_utf8(xml)
        .map_err(|e| CodecError::malformed(WireFormat::TaggedElement, format!("invalid UTF-8: {e}")))?;
    from_xml_str(xml_str)
}

fn decode_element(
    schema: &'static RecordSchema,
    element: XmlElement,
    prefix: &str,
) -> Result<RecordFields> {
    let mut fields = RecordFields::new(schema);

    if !utils::is_blank(&element.text) {
        let path = match prefix.strip_suffix('.') {
            Some(member) => member.to_string(),
            None => element.name.clone(),
        };
        return Err(CodecError::field_format(
            path,
            element.text.trim(),
            format!("unexpected text inside <{}>", element.name),
        ));
    }

    for (key, value) in element.attributes {
        if utils::is_namespace_declaration(&key) {
            continue;
        }
        let path = mapping::field_path(prefix, &key);
        match schema.field_by_tag(&key) {
            Some(field) if field.placement == Placement::Attribute => {
                if let Some(decoded) = mapping::parse_scalar(field.kind, &path, value)? {
                    fields.set(field.name, decoded);
                }
            }
            Some(field) => {
                return Err(CodecError::field_format(
                    path,
                    value,
                    format!("`{}` must be a child element, not an attribute", field.tag),
                ));
            }
            None => mapping::capture_unknown(&mut fields, key, value.into(), &path)?,
        }
    }

    for child in element.children {
        let path = mapping::field_path(prefix, &child.name);
        match schema.field_by_tag(&child.name) {
            Some(field) => match (field.placement, field.kind) {
                (Placement::Attribute, _) => {
                    return Err(CodecError::field_format(
                        path,
                        child.text,
                        format!("`{}` must be an attribute, not a child element", field.tag),
                    ));
                }
                (Placement::UnwrappedElement, FieldKind::Sequence(member_schema)) => {
                    let index = fields.sequence_len(field.name);
                    let member_prefix = mapping::member_prefix(prefix, field.name, index);
                    let member = decode_element(member_schema, child, &member_prefix)?;
                    fields.push_record(field.name, member);
                }
                (_, kind) => {
                    if !child.is_text_only() {
                        return Err(CodecError::field_format(
                            path,
                            child.text.trim(),
                            format!("<{}> must contain text only", field.tag),
                        ));
                    }
                    // A repeated scalar element overwrites the earlier one.
                    match mapping::parse_scalar(kind, &path, child.text)? {
                        Some(decoded) => fields.set(field.name, decoded),
                        None => {
                            fields.take(field.name);
                        }
                    }
                }
            },
            None => {
                let key = child.name.clone();
                mapping::capture_unknown(&mut fields, key, child.into_value(), &path)?;
            }
        }
    }

    trace!(record = schema.name, path = prefix, "decoded XML element");
    Ok(fields)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use twinform_model::{Address, LocalDateTime, Person};

    #[test]
    fn test_attribute_and_element_fields() -> Result<()> {
        let person: Person = from_xml_str(
            r#"<person version="2.1"><id> 7 </id><name> John </name><birthDate>1990-05-15T08:00:00</birthDate></person>"#,
        )?;
        assert_eq!(person.version.as_deref(), Some("2.1"));
        assert_eq!(person.id, Some(7));
        assert_eq!(person.name.as_deref(), Some(" John "));
        assert_eq!(person.birth_date, LocalDateTime::new(1990, 5, 15, 8, 0, 0));
        Ok(())
    }

    #[test]
    fn test_addresses_in_document_order() -> Result<()> {
        let person: Person = from_xml_str(
            r#"<person>
                 <address><street>1 First</street></address>
                 <name>John</name>
                 <address primary="true"><street>2 Second</street></address>
                 <address><street>3 Third</street></address>
               </person>"#,
        )?;
        let streets: Vec<_> = person
            .addresses
            .iter()
            .map(|a| a.street.as_deref().unwrap_or_default())
            .collect();
        assert_eq!(streets, ["1 First", "2 Second", "3 Third"]);
        assert!(person.addresses[1].primary);
        Ok(())
    }

    #[test]
    fn test_empty_elements() -> Result<()> {
        let person: Person = from_xml_str("<person><id/><name/><email></email><address/></person>")?;
        assert_eq!(person.id, None);
        assert_eq!(person.name.as_deref(), Some(""));
        assert_eq!(person.email.as_deref(), Some(""));
        assert_eq!(person.addresses, vec![Address::default()]);
        Ok(())
    }

    #[test]
    fn test_repeated_scalar_last_wins() -> Result<()> {
        let person: Person = from_xml_str("<person><name>First</name><name>Second</name></person>")?;
        assert_eq!(person.name.as_deref(), Some("Second"));
        Ok(())
    }

    #[test]
    fn test_namespaces_and_root_name_are_ignored() -> Result<()> {
        let person: Person =
            from_xml_str(r#"<Person xmlns="urn:example" xmlns:x="urn:x"><id>3</id></Person>"#)?;
        assert_eq!(person.id, Some(3));
        assert!(person.extra.is_empty());
        Ok(())
    }

    #[test]
    fn test_unknown_attributes_and_elements_are_captured() -> Result<()> {
        let person: Person = from_xml_str(
            r#"<person source="crm"><unknownA>A</unknownA><meta><tag>x</tag><tag>y</tag></meta></person>"#,
        )?;
        assert_eq!(person.extra["source"], json!("crm"));
        assert_eq!(person.extra["unknownA"], json!("A"));
        assert_eq!(person.extra["meta"], json!({"tag": ["x", "y"]}));
        let keys: Vec<_> = person.extra.keys().collect();
        assert_eq!(keys, ["source", "unknownA", "meta"]);
        Ok(())
    }

    #[test]
    fn test_repeated_unknown_element_last_wins() -> Result<()> {
        let person: Person = from_xml_str("<person><note>one</note><note>two</note></person>")?;
        assert_eq!(person.extra["note"], json!("two"));
        Ok(())
    }

    #[test]
    fn test_misplaced_fields_are_rejected() {
        let cases = [
            r#"<person id="1"/>"#,
            "<person><version>1.0</version></person>",
            r#"<person><address><primary>true</primary></address></person>"#,
            r#"<person><address street="Main"/></person>"#,
            "<person><name><first>John</first></name></person>",
            "<person>stray</person>",
        ];
        for case in cases {
            let err = from_xml_str::<Person>(case).unwrap_err();
            assert!(matches!(err, CodecError::FieldFormat { .. }), "{case} gave {err:?}");
        }
    }

    #[test]
    fn test_json_field_name_is_an_extension_key() -> Result<()> {
        let xml = "<person><id>1</id><addresses><city>Springfield</city></addresses></person>";
        let person: Person = from_xml_str(xml)?;
        assert!(person.addresses.is_empty());
        assert_eq!(person.extra["addresses"], json!({"city": "Springfield"}));

        assert_eq!(crate::xml::to_xml_string(&person)?, xml);
        Ok(())
    }

    #[test]
    fn test_unknown_field_in_address_is_rejected() {
        let err = from_xml_str::<Person>("<person><address><floor>3</floor></address></person>")
            .unwrap_err();
        assert!(matches!(
            err,
            CodecError::UnknownField { record: "Address", ref field } if field == "addresses[0].floor"
        ));
    }

    #[test]
    fn test_error_path_points_into_sequence() {
        let err = from_xml_str::<Person>(
            "<person><address/><address><createdAt>2024-01-15</createdAt></address></person>",
        )
        .unwrap_err();
        match err {
            CodecError::FieldFormat { field, value, .. } => {
                assert_eq!(field, "addresses[1].createdAt");
                assert_eq!(value, "2024-01-15");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_invalid_utf8_is_malformed() {
        let err = from_xml_slice::<Person>(b"<person>\xff</person>").unwrap_err();
        assert!(matches!(err, CodecError::MalformedInput { .. }));
    }
}
