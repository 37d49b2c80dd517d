//! Field-level rules applied identically by both engines.

use serde_json::Value;
use twinform_model::{FieldKind, FieldValue, LocalDateTime, RecordFields};

use crate::error::{CodecError, Result};

/// Path of a field below `prefix`, e.g. `addresses[1].` + `city`.
pub(crate) fn field_path(prefix: &str, name: &str) -> String {
    format!("{prefix}{name}")
}

/// Prefix for the fields of the `index`-th member of a sequence.
pub(crate) fn member_prefix(prefix: &str, name: &str, index: usize) -> String {
    format!("{prefix}{name}[{index}].")
}

/// Parses the textual form of a scalar field.
///
/// Text is kept verbatim. Typed values are trimmed first, and a blank typed
/// value means the field is absent.
pub(crate) fn parse_scalar(kind: FieldKind, path: &str, text: String) -> Result<Option<FieldValue>> {
    let trimmed = match kind {
        FieldKind::Text => return Ok(Some(FieldValue::Text(text))),
        _ => text.trim(),
    };
    if trimmed.is_empty() {
        return Ok(None);
    }

    let value = match kind {
        FieldKind::Integer => trimmed
            .parse::<i64>()
            .map(FieldValue::Integer)
            .map_err(|_| CodecError::field_format(path, trimmed, "expected a 64-bit integer"))?,
        FieldKind::Boolean => match trimmed {
            "true" => FieldValue::Boolean(true),
            "false" => FieldValue::Boolean(false),
            _ => {
                return Err(CodecError::field_format(
                    path,
                    trimmed,
                    "expected `true` or `false`",
                ));
            }
        },
        FieldKind::DateTime => LocalDateTime::parse(trimmed)
            .map(FieldValue::DateTime)
            .map_err(|_| {
                CodecError::field_format(
                    path,
                    trimmed,
                    "expected a date-time formatted as yyyy-MM-dd'T'HH:mm:ss",
                )
            })?,
        FieldKind::Text | FieldKind::Sequence(_) => {
            return Err(CodecError::field_format(path, trimmed, expected(kind)));
        }
    };
    Ok(Some(value))
}

/// Human readable description of what a field of `kind` holds.
pub(crate) fn expected(kind: FieldKind) -> String {
    match kind {
        FieldKind::Text => "expected text".to_string(),
        FieldKind::Integer => "expected a 64-bit integer".to_string(),
        FieldKind::Boolean => "expected `true` or `false`".to_string(),
        FieldKind::DateTime => "expected a date-time string".to_string(),
        FieldKind::Sequence(schema) => format!("expected a sequence of {} records", schema.name),
    }
}

/// Stores an undeclared field, or rejects it when the record is closed.
pub(crate) fn capture_unknown(
    fields: &mut RecordFields,
    key: String,
    value: Value,
    path: &str,
) -> Result<()> {
    let schema = fields.schema();
    if !schema.open {
        return Err(CodecError::UnknownField {
            record: schema.name,
            field: path.to_string(),
        });
    }
    fields.insert_extension(key, value);
    Ok(())
}
