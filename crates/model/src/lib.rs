//! # Twinform Record Model
//!
//! The typed `Person`/`Address` records and the single, static mapping table
//! that every wire-format engine consults.
//!
//! ## Overview
//!
//! - [`Person`] and [`Address`] are plain structs. `Person` carries an open
//!   [`Extension`] map for fields the table does not declare.
//! - [`PERSON_SCHEMA`] and [`ADDRESS_SCHEMA`] list each field once, with its
//!   wire name, value kind and placement in the tagged-element format.
//! - [`RecordFields`] is the engine-neutral projection of a record. The
//!   [`Record`] trait converts between the structs and that projection, so a
//!   codec can be written against the table alone.
//! - [`LocalDateTime`] fixes the textual date-time contract
//!   (`yyyy-MM-dd'T'HH:mm:ss`, no offset).
//!
//! ```
//! use twinform_model::{Person, Record, PERSON_SCHEMA};
//!
//! let person = Person { id: Some(1), ..Default::default() };
//! let fields = person.to_fields();
//! assert_eq!(fields.schema().name, PERSON_SCHEMA.name);
//! assert_eq!(Person::from_fields(fields), person);
//! ```

pub mod address;
pub mod datetime;
pub mod fields;
pub mod person;
pub mod schema;

pub use address::Address;
pub use datetime::{DATE_TIME_PATTERN, DateTimeParseError, LocalDateTime};
pub use fields::{FieldValue, RecordFields};
pub use person::Person;
pub use schema::{
    ADDRESS_SCHEMA, FieldKind, FieldMapping, PERSON_SCHEMA, Placement, RecordSchema,
};

/// Ordered map of undeclared fields, keyed by their wire name.
///
/// Insertion order is preserved; inserting an existing key replaces its value.
pub type Extension = serde_json::Map<String, serde_json::Value>;

/// A record type described by a static [`RecordSchema`].
pub trait Record: Sized {
    /// The mapping table for this record.
    const SCHEMA: &'static RecordSchema;

    /// Projects the record onto its schema.
    fn to_fields(&self) -> RecordFields;

    /// Rebuilds the record from a projection produced by a decoder.
    ///
    /// Values of the wrong kind are treated as absent.
    fn from_fields(fields: RecordFields) -> Self;
}
