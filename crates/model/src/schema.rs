//! The mapping table shared by both wire-format engines.
//!
//! Every record type is described once by a [`RecordSchema`]: an ordered list of
//! [`FieldMapping`] entries, each naming the field, its structural kind, and where it
//! lives in the tagged-element format. The nested-object engine and the tagged-element
//! engine both walk these tables, so a field can never exist in one format and be
//! missing from the other.
//!
//! | Field | Kind | Nested-object | Tagged-element |
//! |-------|------|---------------|----------------|
//! | `version` | text | `"version": "1.0"` | `<person version="1.0">` |
//! | `id` | integer | `"id": 1` | `<id>1</id>` |
//! | `addresses` | sequence | `"addresses": [{..}, {..}]` | `<address/><address/>` |
//! | `birthDate` | date-time | `"birthDate": "1990-05-15T08:00:00"` | `<birthDate>1990-05-15T08:00:00</birthDate>` |
//!
//! The tables are plain `static` data, built at compile time and never mutated, so
//! any number of concurrent decode/encode calls may read them without locking.

/// The structural role of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Free-form text.
    Text,
    /// A signed 64-bit integer.
    Integer,
    /// `true` or `false`.
    Boolean,
    /// A local date-time rendered as `yyyy-MM-dd'T'HH:mm:ss`.
    DateTime,
    /// An ordered sequence of nested records described by another schema.
    Sequence(&'static RecordSchema),
}

/// Where a field is placed in the tagged-element format.
///
/// The nested-object format has no such distinction: every field is a plain key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// An attribute on the record's own tag.
    Attribute,
    /// A child element holding the value as text content.
    Element,
    /// One sibling child element per sequence member, with no wrapping container.
    UnwrappedElement,
}

/// One row of a mapping table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldMapping {
    /// Field name, also the key used in the nested-object format.
    pub name: &'static str,
    /// Attribute or tag name used in the tagged-element format.
    pub tag: &'static str,
    /// Structural role.
    pub kind: FieldKind,
    /// Tagged-element placement.
    pub placement: Placement,
}

impl FieldMapping {
    /// A scalar field placed as an attribute.
    pub const fn attribute(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            tag: name,
            kind,
            placement: Placement::Attribute,
        }
    }

    /// A scalar field placed as a child element.
    pub const fn element(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            tag: name,
            kind,
            placement: Placement::Element,
        }
    }

    /// A sequence of nested records emitted as repeated `tag` siblings.
    pub const fn unwrapped(
        name: &'static str,
        tag: &'static str,
        schema: &'static RecordSchema,
    ) -> Self {
        Self {
            name,
            tag,
            kind: FieldKind::Sequence(schema),
            placement: Placement::UnwrappedElement,
        }
    }

    /// Returns `true` when the field is written as an attribute.
    pub fn is_attribute(&self) -> bool {
        self.placement == Placement::Attribute
    }
}

/// The complete mapping table of one record type.
#[derive(Debug, PartialEq, Eq)]
pub struct RecordSchema {
    /// Human readable record name, used in error messages.
    pub name: &'static str,
    /// Tag name of the record in the tagged-element format.
    pub tag: &'static str,
    /// Declared fields, in wire order.
    pub fields: &'static [FieldMapping],
    /// Whether undeclared input fields are captured into an extension map.
    ///
    /// Closed records reject them instead.
    pub open: bool,
}

impl RecordSchema {
    /// Looks up a declared field by its name (the nested-object key).
    pub fn field(&'static self, name: &str) -> Option<&'static FieldMapping> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Looks up a declared field by its tagged-element attribute or tag name.
    pub fn field_by_tag(&'static self, tag: &str) -> Option<&'static FieldMapping> {
        self.fields.iter().find(|f| f.tag == tag)
    }

    /// Position of the named field in the table.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    /// Returns `true` when `key` is a declared name in both wire formats.
    ///
    /// Only such keys are kept out of the extension map. A key declared in one
    /// format alone (`addresses` in JSON, `address` in XML) is ordinary
    /// extension data in the other, and the encoders skip it where it collides.
    pub fn is_reserved(&'static self, key: &str) -> bool {
        self.field(key).is_some() && self.field_by_tag(key).is_some()
    }

    /// Attribute-placed fields, in table order.
    pub fn attributes(&'static self) -> impl Iterator<Item = &'static FieldMapping> {
        self.fields.iter().filter(|f| f.is_attribute())
    }

    /// Element-placed fields (single and unwrapped), in table order.
    pub fn elements(&'static self) -> impl Iterator<Item = &'static FieldMapping> {
        self.fields.iter().filter(|f| !f.is_attribute())
    }
}

/// Mapping table of [`Address`](crate::Address).
pub static ADDRESS_SCHEMA: RecordSchema = RecordSchema {
    name: "Address",
    tag: "address",
    fields: &[
        FieldMapping::attribute("primary", FieldKind::Boolean),
        FieldMapping::element("street", FieldKind::Text),
        FieldMapping::element("city", FieldKind::Text),
        FieldMapping::element("zipCode", FieldKind::Text),
        FieldMapping::element("createdAt", FieldKind::DateTime),
        FieldMapping::element("updatedAt", FieldKind::DateTime),
    ],
    open: false,
};

/// Mapping table of [`Person`](crate::Person).
pub static PERSON_SCHEMA: RecordSchema = RecordSchema {
    name: "Person",
    tag: "person",
    fields: &[
        FieldMapping::attribute("version", FieldKind::Text),
        FieldMapping::element("id", FieldKind::Integer),
        FieldMapping::element("name", FieldKind::Text),
        FieldMapping::element("email", FieldKind::Text),
        FieldMapping::unwrapped("addresses", "address", &ADDRESS_SCHEMA),
        FieldMapping::element("birthDate", FieldKind::DateTime),
        FieldMapping::element("registeredAt", FieldKind::DateTime),
    ],
    open: true,
};
