//! Tagged-element (XML) engine.
//!
//! ## Mapping
//!
//! Placement comes from the mapping table, never from the payload:
//!
//! | Field | XML |
//! |-------|-----|
//! | `version`, `primary` | attributes of `<person>` / `<address>` |
//! | `id`, `name`, `email`, `birthDate`, `registeredAt` | child elements with text content |
//! | `addresses` | repeated `<address>` siblings, no container |
//! | extension entries | child elements named after their key |
//!
//! ```xml
//! <person version="1.0">
//!   <id>1</id>
//!   <name>John Doe</name>
//!   <birthDate>1990-05-15T08:00:00</birthDate>
//!   <address primary="true">
//!     <street>123 Main St</street>
//!   </address>
//!   <address primary="false">
//!     <street>456 Oak Ave</street>
//!   </address>
//!   <unknownA>A</unknownA>
//! </person>
//! ```
//!
//! ## Unknown content
//!
//! Undeclared attributes and text-only elements of a `person` are kept as
//! strings. Structured unknown elements become objects: attributes and
//! children by name, repeated children as arrays, and text under the empty
//! key. On encode, arrays are written as repeated sibling tags and objects as
//! nested tags. Numbers and booleans taken from JSON come back as strings, and
//! an attribute captured on decode is written back as a child element.
//!
//! `xmlns` declarations are ignored and the root element's name is not checked
//! on decode; encode always writes `person`.

pub mod de;
pub mod ser;
mod tree;
mod utils;

pub use de::{from_xml_slice, from_xml_str};
pub use ser::{
    to_xml_string, to_xml_string_pretty, to_xml_vec, to_xml_vec_with, to_xml_writer,
};
