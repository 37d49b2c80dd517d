//! # Twinform Serialization Module
//!
//! Dual-format codec for twinform records.
//!
//! ## Features
//!
//! - **JSON (nested-object)**: records as key-value trees, built on `serde_json`.
//! - **XML (tagged-element)**: records as tags with attributes and ordered
//!   children, built on `quick-xml`.
//! - **One schema**: both engines walk the static mapping tables of
//!   `twinform-model`, so they agree on which fields exist, how they are typed
//!   and where they live.
//!
//! ## JSON ↔ XML Mapping
//!
//! | JSON | XML |
//! |------|-----|
//! | `{"version": "1.0"}` | `<person version="1.0"/>` |
//! | `{"id": 1}` | `<person><id>1</id></person>` |
//! | `{"addresses": [{"primary": true}, {}]}` | `<address primary="true"/><address primary="false"/>` |
//! | `{"unknownA": "A"}` | `<unknownA>A</unknownA>` |
//!
//! ## Examples
//!
//! ```
//! use twinform_serde::{WireFormat, decode, encode};
//!
//! let person = decode(br#"{"id": 1, "name": "John Doe", "unknownA": "A"}"#, WireFormat::NestedObject)?;
//! let xml = encode(&person, WireFormat::TaggedElement)?;
//! assert_eq!(
//!     String::from_utf8(xml).unwrap(),
//!     "<person><id>1</id><name>John Doe</name><unknownA>A</unknownA></person>"
//! );
//! # Ok::<(), twinform_serde::CodecError>(())
//! ```

pub mod error;
pub mod format;
pub mod json;
mod mapping;
pub mod xml;

use tracing::debug;
use twinform_model::{Person, Record};

pub use error::{CodecError, Result};
pub use format::{EncodeOptions, WireFormat};

pub use json::{
    from_json_slice, from_json_str, from_json_value, to_json_string, to_json_string_pretty,
    to_json_value, to_json_vec,
};
pub use xml::{from_xml_slice, from_xml_str, to_xml_string, to_xml_string_pretty, to_xml_vec};

/// Decode a `Person` from `bytes` in the given format.
pub fn decode(bytes: &[u8], format: WireFormat) -> Result<Person> {
    decode_record(bytes, format)
}

/// Encode a `Person` in the given format, compactly.
pub fn encode(person: &Person, format: WireFormat) -> Result<Vec<u8>> {
    encode_record(person, format, EncodeOptions::default())
}

/// Decode any [`Record`] from `bytes` in the given format.
pub fn decode_record<R: Record>(bytes: &[u8], format: WireFormat) -> Result<R> {
    debug!(%format, record = R::SCHEMA.name, bytes = bytes.len(), "decoding record");
    let result = match format {
        WireFormat::NestedObject => json::from_json_slice(bytes),
        WireFormat::TaggedElement => xml::from_xml_slice(bytes),
    };
    if let Err(err) = &result {
        debug!(%format, error = %err, "decode failed");
    }
    result
}

/// Encode any [`Record`] in the given format.
pub fn encode_record<R: Record>(
    record: &R,
    format: WireFormat,
    options: EncodeOptions,
) -> Result<Vec<u8>> {
    let bytes = match format {
        WireFormat::NestedObject => json::to_json_vec_with(record, options)?,
        WireFormat::TaggedElement => xml::to_xml_vec_with(record, options)?,
    };
    debug!(%format, record = R::SCHEMA.name, bytes = bytes.len(), pretty = options.pretty, "encoded record");
    Ok(bytes)
}
