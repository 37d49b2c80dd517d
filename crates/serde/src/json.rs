//! Nested-object (JSON) engine.
//!
//! Decoding parses the payload into a `serde_json::Value` tree and walks it
//! against the record's mapping table. Declared keys are converted to their
//! typed values; any other key of an open record is stored verbatim in the
//! extension map, including `address`, which only names the sequence in XML.
//! Encoding emits declared fields in table order followed by extension entries
//! in insertion order.
use serde_json::{Map, Value};
use tracing::{debug, trace};
use twinform_model::{FieldKind, FieldMapping, FieldValue, Record, RecordFields, RecordSchema};

use crate::error::{CodecError, Result};
use crate::format::{EncodeOptions, WireFormat};
use crate::mapping;

/// Decode a record from a JSON string.
///
/// # Examples
///
/// ```
/// use twinform_model::Person;
/// use twinform_serde::json::from_json_str;
///
/// let json = r#"{"id": 1, "name": "John Doe", "unknownA": "A"}"#;
/// let person: Person = from_json_str(json)?;
/// assert_eq!(person.id, Some(1));
/// assert_eq!(person.extra["unknownA"], "A");
/// # Ok::<(), twinform_serde::CodecError>(())
/// ```
pub fn from_json_str<R: Record>(s: &str) -> Result<R> {
    from_json_slice(s.as_bytes())
}

/// Decode a record from JSON bytes.
pub fn from_json_slice<R: Record>(v: &[u8]) -> Result<R> {
    let value: Value = serde_json::from_slice(v)
        .map_err(|e| CodecError::malformed(WireFormat::NestedObject, e))?;
    from_json_value(value)
}

/// Decode a record from an already parsed `serde_json::Value`.
///
/// The value must be an object.
pub fn from_json_value<R: Record>(value: Value) -> Result<R> {
    let object = match value {
        Value::Object(object) => object,
        other => {
            return Err(CodecError::malformed(
                WireFormat::NestedObject,
                format!("expected a JSON object, found {}", kind_of(&other)),
            ));
        }
    };
    let fields = decode_object(R::SCHEMA, object, "")?;
    Ok(R::from_fields(fields))
}

/// Encode a record to a compact JSON string.
///
/// # Examples
///
/// ```
/// use twinform_model::Person;
/// use twinform_serde::json::to_json_string;
///
/// let person = Person { id: Some(1), name: Some("John Doe".into()), ..Default::default() };
/// assert_eq!(to_json_string(&person)?, r#"{"id":1,"name":"John Doe"}"#);
/// # Ok::<(), twinform_serde::CodecError>(())
/// ```
pub fn to_json_string<R: Record>(record: &R) -> Result<String> {
    serde_json::to_string(&to_json_value(record))
        .map_err(|e| CodecError::write(WireFormat::NestedObject, e))
}

/// Encode a record to a pretty-printed JSON string (two-space indent).
pub fn to_json_string_pretty<R: Record>(record: &R) -> Result<String> {
    serde_json::to_string_pretty(&to_json_value(record))
        .map_err(|e| CodecError::write(WireFormat::NestedObject, e))
}

/// Encode a record to a compact JSON byte vector.
pub fn to_json_vec<R: Record>(record: &R) -> Result<Vec<u8>> {
    to_json_vec_with(record, EncodeOptions::default())
}

/// Encode a record to a JSON byte vector with the given options.
pub fn to_json_vec_with<R: Record>(record: &R, options: EncodeOptions) -> Result<Vec<u8>> {
    let value = to_json_value(record);
    let bytes = if options.pretty {
        serde_json::to_vec_pretty(&value)
    } else {
        serde_json::to_vec(&value)
    };
    bytes.map_err(|e| CodecError::write(WireFormat::NestedObject, e))
}

/// Encode a record to a `serde_json::Value`.
pub fn to_json_value<R: Record>(record: &R) -> Value {
    Value::Object(encode_object(&record.to_fields()))
}

fn decode_object(
    schema: &'static RecordSchema,
    object: Map<String, Value>,
    prefix: &str,
) -> Result<RecordFields> {
    let mut fields = RecordFields::new(schema);

    for (key, value) in object {
        let path = mapping::field_path(prefix, &key);
        match schema.field(&key) {
            Some(field) => {
                if let Some(decoded) = decode_field(field, value, &path)? {
                    fields.set(field.name, decoded);
                }
            }
            None => mapping::capture_unknown(&mut fields, key, value, &path)?,
        }
    }

    trace!(record = schema.name, path = prefix, "decoded JSON object");
    Ok(fields)
}

/// Converts one declared field. `null` means absent.
fn decode_field(field: &FieldMapping, value: Value, path: &str) -> Result<Option<FieldValue>> {
    match (field.kind, value) {
        (_, Value::Null) => Ok(None),
        (FieldKind::Sequence(schema), Value::Array(items)) => {
            let mut records = Vec::with_capacity(items.len());
            for (index, item) in items.into_iter().enumerate() {
                let prefix = mapping::member_prefix("", path, index);
                let object = match item {
                    Value::Object(object) => object,
                    other => {
                        return Err(CodecError::field_format(
                            format!("{path}[{index}]"),
                            other.to_string(),
                            format!("expected a {} object", schema.name),
                        ));
                    }
                };
                records.push(decode_object(schema, object, &prefix)?);
            }
            Ok(Some(FieldValue::Records(records)))
        }
        (FieldKind::Integer, Value::Number(number)) => number
            .as_i64()
            .map(|n| Some(FieldValue::Integer(n)))
            .ok_or_else(|| CodecError::field_format(path, number.to_string(), mapping::expected(field.kind))),
        (FieldKind::Boolean, Value::Bool(flag)) => Ok(Some(FieldValue::Boolean(flag))),
        (FieldKind::Text, Value::Number(number)) => Ok(Some(FieldValue::Text(number.to_string()))),
        (FieldKind::Text, Value::Bool(flag)) => Ok(Some(FieldValue::Text(flag.to_string()))),
        (FieldKind::Sequence(_), other) => Err(CodecError::field_format(
            path,
            other.to_string(),
            mapping::expected(field.kind),
        )),
        (kind, Value::String(text)) => mapping::parse_scalar(kind, path, text),
        (kind, other) => Err(CodecError::field_format(path, other.to_string(), mapping::expected(kind))),
    }
}

fn encode_object(fields: &RecordFields) -> Map<String, Value> {
    let mut object = Map::new();
    for (field, value) in fields.iter() {
        object.insert(field.name.to_string(), encode_value(value));
    }
    let schema = fields.schema();
    for (key, value) in fields.extension() {
        // An entry spelled like a declared key would decode as that field.
        if schema.field(key).is_some() {
            debug!(record = schema.name, key = %key, "skipping extension entry named after a field");
            continue;
        }
        object.insert(key.clone(), value.clone());
    }
    object
}

fn encode_value(value: &FieldValue) -> Value {
    match value {
        FieldValue::Text(text) => Value::String(text.clone()),
        FieldValue::Integer(n) => Value::from(*n),
        FieldValue::Boolean(flag) => Value::Bool(*flag),
        FieldValue::DateTime(dt) => Value::String(dt.to_string()),
        FieldValue::Records(records) => Value::Array(
            records
                .iter()
                .map(|record| Value::Object(encode_object(record)))
                .collect(),
        ),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
