use std::fmt::Display;

use thiserror::Error;

use crate::format::WireFormat;

/// Error types for record decoding and encoding.
#[derive(Debug, Error)]
pub enum CodecError {
    /// The input does not parse in the declared format's grammar.
    #[error("malformed {format} input: {message}")]
    MalformedInput { format: WireFormat, message: String },

    /// A value parses structurally but breaks a field's typed contract.
    #[error("invalid value `{value}` for field `{field}`: {reason}")]
    FieldFormat {
        /// Path of the field, e.g. `addresses[1].createdAt`.
        field: String,
        value: String,
        reason: String,
    },

    /// An undeclared field inside a record that has no extension map.
    #[error("unknown field `{field}` in {record}")]
    UnknownField { record: &'static str, field: String },

    /// The output could not be written.
    #[error("failed to write {format} output: {message}")]
    Write { format: WireFormat, message: String },
}

impl CodecError {
    pub(crate) fn malformed(format: WireFormat, message: impl Display) -> Self {
        CodecError::MalformedInput {
            format,
            message: message.to_string(),
        }
    }

    pub(crate) fn field_format(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        CodecError::FieldFormat {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn write(format: WireFormat, message: impl Display) -> Self {
        CodecError::Write {
            format,
            message: message.to_string(),
        }
    }

    /// Returns `true` when the error was caused by the input rather than by the codec.
    pub fn is_input_error(&self) -> bool {
        !matches!(self, CodecError::Write { .. })
    }
}

/// Result type alias for codec operations
pub type Result<T> = std::result::Result<T, CodecError>;
