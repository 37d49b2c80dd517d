//! The root `Person` record.

use crate::address::Address;
use crate::datetime::LocalDateTime;
use crate::fields::{FieldValue, RecordFields};
use crate::schema::{PERSON_SCHEMA, RecordSchema};
use crate::{Extension, Record};

/// A person, the single record type exchanged over the wire.
///
/// Any input field that is not declared in [`PERSON_SCHEMA`] is kept in
/// [`extra`](Self::extra) and written back on encode, in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Person {
    pub version: Option<String>,
    pub id: Option<i64>,
    pub name: Option<String>,
    pub email: Option<String>,
    /// Ordered addresses. Order is significant and preserved across formats.
    pub addresses: Vec<Address>,
    pub birth_date: Option<LocalDateTime>,
    pub registered_at: Option<LocalDateTime>,
    /// Undeclared fields captured on decode.
    pub extra: Extension,
}

impl Person {
    /// Returns the primary address, if one is flagged.
    pub fn primary_address(&self) -> Option<&Address> {
        self.addresses.iter().find(|a| a.primary)
    }
}

impl Record for Person {
    const SCHEMA: &'static RecordSchema = &PERSON_SCHEMA;

    fn to_fields(&self) -> RecordFields {
        let mut fields = RecordFields::new(Self::SCHEMA);
        fields.set_opt("version", self.version.clone());
        fields.set_opt("id", self.id);
        fields.set_opt("name", self.name.clone());
        fields.set_opt("email", self.email.clone());
        if !self.addresses.is_empty() {
            let records: Vec<_> = self.addresses.iter().map(Record::to_fields).collect();
            fields.set("addresses", FieldValue::Records(records));
        }
        fields.set_opt("birthDate", self.birth_date);
        fields.set_opt("registeredAt", self.registered_at);
        fields.set_extension(self.extra.clone());
        fields
    }

    fn from_fields(mut fields: RecordFields) -> Self {
        Self {
            version: fields.take_text("version"),
            id: fields.take_integer("id"),
            name: fields.take_text("name"),
            email: fields.take_text("email"),
            addresses: fields
                .take_records("addresses")
                .into_iter()
                .map(Address::from_fields)
                .collect(),
            birth_date: fields.take_date_time("birthDate"),
            registered_at: fields.take_date_time("registeredAt"),
            extra: fields.take_extension(),
        }
    }
}
