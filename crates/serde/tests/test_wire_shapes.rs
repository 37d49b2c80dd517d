use quick_xml::Reader;
use quick_xml::events::Event;
use twinform_model::{Address, LocalDateTime, Person};
use twinform_serde::{CodecError, Result, WireFormat, decode, encode};

fn busy_person() -> Person {
    let mut person = Person {
        version: Some("3".into()),
        id: Some(9),
        name: Some("Jane".into()),
        email: Some("jane@example.com".into()),
        addresses: (0..4)
            .map(|i| Address {
                primary: i == 2,
                street: Some(format!("{i} Elm St")),
                city: Some("Springfield".into()),
                zip_code: Some(format!("1000{i}")),
                created_at: LocalDateTime::new(2024, 1, 1 + i, 0, 0, 0),
                updated_at: None,
            })
            .collect(),
        birth_date: LocalDateTime::new(1985, 12, 31, 23, 59, 59),
        registered_at: LocalDateTime::new(2024, 2, 29, 0, 0, 0),
        ..Default::default()
    };
    person.extra.insert("nickname".into(), "JJ".into());
    person
}

/// Collects (element name, attribute names) for every element in document order.
fn elements(xml: &str) -> Vec<(String, Vec<String>)> {
    let mut reader = Reader::from_str(xml);
    let mut out = Vec::new();
    loop {
        match reader.read_event().unwrap() {
            Event::Start(e) | Event::Empty(e) => {
                let name = String::from_utf8(e.name().as_ref().to_vec()).unwrap();
                let attrs = e
                    .attributes()
                    .map(|a| String::from_utf8(a.unwrap().key.as_ref().to_vec()).unwrap())
                    .collect();
                out.push((name, attrs));
            }
            Event::Eof => break,
            _ => {}
        }
    }
    out
}

#[test]
fn test_attribute_element_invariant() -> Result<()> {
    let xml = String::from_utf8(encode(&busy_person(), WireFormat::TaggedElement)?).unwrap();

    for (name, attrs) in elements(&xml) {
        assert_ne!(name, "version");
        assert_ne!(name, "primary");
        match name.as_str() {
            "person" => assert_eq!(attrs, ["version"]),
            "address" => assert_eq!(attrs, ["primary"]),
            other => assert!(attrs.is_empty(), "<{other}> has attributes {attrs:?}"),
        }
    }
    Ok(())
}

#[test]
fn test_sequence_is_unwrapped() -> Result<()> {
    let person = busy_person();
    let xml = String::from_utf8(encode(&person, WireFormat::TaggedElement)?).unwrap();

    let names: Vec<_> = elements(&xml).into_iter().map(|(name, _)| name).collect();
    assert_eq!(names.iter().filter(|n| *n == "address").count(), 4);
    assert!(!names.iter().any(|n| n == "addresses"));

    let back = decode(xml.as_bytes(), WireFormat::TaggedElement)?;
    let streets: Vec<_> = back
        .addresses
        .iter()
        .map(|a| a.street.clone().unwrap_or_default())
        .collect();
    assert_eq!(streets, ["0 Elm St", "1 Elm St", "2 Elm St", "3 Elm St"]);
    assert_eq!(back, person);
    Ok(())
}

#[test]
fn test_json_shape() -> Result<()> {
    let json: serde_json::Value =
        serde_json::from_slice(&encode(&busy_person(), WireFormat::NestedObject)?).unwrap();
    let keys: Vec<_> = json.as_object().unwrap().keys().cloned().collect();
    assert_eq!(
        keys,
        [
            "version",
            "id",
            "name",
            "email",
            "addresses",
            "birthDate",
            "registeredAt",
            "nickname"
        ]
    );
    assert_eq!(json["addresses"].as_array().unwrap().len(), 4);
    assert_eq!(json["addresses"][2]["primary"], true);
    assert_eq!(json["registeredAt"], "2024-02-29T00:00:00");
    Ok(())
}

#[test]
fn test_malformed_json() {
    let err = decode(b"{ invalid json }", WireFormat::NestedObject).unwrap_err();
    assert!(matches!(err, CodecError::MalformedInput { .. }), "{err}");

    let err = decode(br#"{"id": 1"#, WireFormat::NestedObject).unwrap_err();
    assert!(matches!(err, CodecError::MalformedInput { .. }), "{err}");
}

#[test]
fn test_malformed_xml() {
    let err = decode(b"<person><invalid>", WireFormat::TaggedElement).unwrap_err();
    assert!(matches!(err, CodecError::MalformedInput { .. }), "{err}");

    let err = decode(b"<person><id>1</name></person>", WireFormat::TaggedElement).unwrap_err();
    assert!(matches!(err, CodecError::MalformedInput { .. }), "{err}");
}

#[test]
fn test_deep_nesting_is_malformed() {
    let json = format!(r#"{{"deep":{}{}}}"#, "[".repeat(200), "]".repeat(200));
    let err = decode(json.as_bytes(), WireFormat::NestedObject).unwrap_err();
    assert!(matches!(err, CodecError::MalformedInput { .. }), "{err}");

    let xml = format!("<person>{}{}</person>", "<x>".repeat(200), "</x>".repeat(200));
    let err = decode(xml.as_bytes(), WireFormat::TaggedElement).unwrap_err();
    assert!(matches!(err, CodecError::MalformedInput { .. }), "{err}");
}

#[test]
fn test_moderate_nesting_is_captured() -> Result<()> {
    let xml = format!("<person>{}{}</person>", "<x>".repeat(20), "</x>".repeat(20));
    let person = decode(xml.as_bytes(), WireFormat::TaggedElement)?;
    assert!(person.extra.contains_key("x"));
    Ok(())
}

#[test]
fn test_field_format_errors_in_both_formats() {
    let cases: [(&[u8], WireFormat); 4] = [
        (br#"{"id": "abc"}"#, WireFormat::NestedObject),
        (b"<person><id>abc</id></person>", WireFormat::TaggedElement),
        (br#"{"birthDate": "1990-05-15 08:00:00"}"#, WireFormat::NestedObject),
        (br#"<person><address primary="maybe"/></person>"#, WireFormat::TaggedElement),
    ];
    for (input, format) in cases {
        let err = decode(input, format).unwrap_err();
        assert!(matches!(err, CodecError::FieldFormat { .. }), "{format}: {err}");
    }
}
