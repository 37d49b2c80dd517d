//! Engine-neutral projection of a record.
//!
//! The wire-format engines never touch [`Person`](crate::Person) or
//! [`Address`](crate::Address) directly. They read and write [`RecordFields`], a
//! schema-indexed bag of typed [`FieldValue`]s plus the extension map, and the
//! [`Record`](crate::Record) trait converts between the two.

use crate::datetime::LocalDateTime;
use crate::schema::{FieldMapping, RecordSchema};
use crate::Extension;

/// A decoded field value, typed according to its [`FieldKind`](crate::FieldKind).
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Value of a `Text` field.
    Text(String),
    /// Value of an `Integer` field.
    Integer(i64),
    /// Value of a `Boolean` field.
    Boolean(bool),
    /// Value of a `DateTime` field.
    DateTime(LocalDateTime),
    /// Members of a `Sequence` field, in order.
    Records(Vec<RecordFields>),
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Integer(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Boolean(value)
    }
}

impl From<LocalDateTime> for FieldValue {
    fn from(value: LocalDateTime) -> Self {
        FieldValue::DateTime(value)
    }
}

impl From<Vec<RecordFields>> for FieldValue {
    fn from(value: Vec<RecordFields>) -> Self {
        FieldValue::Records(value)
    }
}

/// The field values of one record, indexed by its schema.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordFields {
    schema: &'static RecordSchema,
    values: Vec<Option<FieldValue>>,
    extension: Extension,
}

impl RecordFields {
    /// Creates an empty projection for `schema`.
    pub fn new(schema: &'static RecordSchema) -> Self {
        Self {
            schema,
            values: vec![None; schema.fields.len()],
            extension: Extension::new(),
        }
    }

    /// The schema this projection follows.
    pub fn schema(&self) -> &'static RecordSchema {
        self.schema
    }

    /// Stores a value for a declared field, replacing any previous value.
    ///
    /// Names outside the schema are ignored; undeclared data belongs in the
    /// extension map.
    pub fn set(&mut self, name: &str, value: impl Into<FieldValue>) {
        if let Some(index) = self.schema.position(name) {
            self.values[index] = Some(value.into());
        }
    }

    /// Like [`set`](Self::set), but leaves the field absent for `None`.
    pub fn set_opt<T: Into<FieldValue>>(&mut self, name: &str, value: Option<T>) {
        if let Some(value) = value {
            self.set(name, value);
        }
    }

    /// Appends a nested record to a sequence field, creating the sequence if needed.
    pub fn push_record(&mut self, name: &str, record: RecordFields) {
        let Some(index) = self.schema.position(name) else {
            return;
        };
        match &mut self.values[index] {
            Some(FieldValue::Records(records)) => records.push(record),
            slot => *slot = Some(FieldValue::Records(vec![record])),
        }
    }

    /// Number of members currently held by a sequence field.
    pub fn sequence_len(&self, name: &str) -> usize {
        match self.get(name) {
            Some(FieldValue::Records(records)) => records.len(),
            _ => 0,
        }
    }

    /// Returns the value of a declared field, if present.
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        let index = self.schema.position(name)?;
        self.values[index].as_ref()
    }

    /// Removes and returns the value of a declared field.
    pub fn take(&mut self, name: &str) -> Option<FieldValue> {
        let index = self.schema.position(name)?;
        self.values[index].take()
    }

    /// Removes a `Text` value.
    pub fn take_text(&mut self, name: &str) -> Option<String> {
        match self.take(name)? {
            FieldValue::Text(value) => Some(value),
            _ => None,
        }
    }

    /// Removes an `Integer` value.
    pub fn take_integer(&mut self, name: &str) -> Option<i64> {
        match self.take(name)? {
            FieldValue::Integer(value) => Some(value),
            _ => None,
        }
    }

    /// Removes a `Boolean` value.
    pub fn take_boolean(&mut self, name: &str) -> Option<bool> {
        match self.take(name)? {
            FieldValue::Boolean(value) => Some(value),
            _ => None,
        }
    }

    /// Removes a `DateTime` value.
    pub fn take_date_time(&mut self, name: &str) -> Option<LocalDateTime> {
        match self.take(name)? {
            FieldValue::DateTime(value) => Some(value),
            _ => None,
        }
    }

    /// Removes the members of a `Sequence` field; an absent sequence is empty.
    pub fn take_records(&mut self, name: &str) -> Vec<RecordFields> {
        match self.take(name) {
            Some(FieldValue::Records(records)) => records,
            _ => Vec::new(),
        }
    }

    /// Present fields with their mapping, in table order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static FieldMapping, &FieldValue)> {
        self.schema
            .fields
            .iter()
            .zip(&self.values)
            .filter_map(|(field, value)| value.as_ref().map(|v| (field, v)))
    }

    /// Returns `true` when no declared field is present and the extension map is empty.
    pub fn is_empty(&self) -> bool {
        self.values.iter().all(Option::is_none) && self.extension.is_empty()
    }

    /// Undeclared fields captured on decode.
    pub fn extension(&self) -> &Extension {
        &self.extension
    }

    /// Records an undeclared field. Last write wins for a repeated key.
    ///
    /// Returns `false`, storing nothing, when the record is closed or the key
    /// is [reserved](RecordSchema::is_reserved) by a declared field.
    pub fn insert_extension(&mut self, key: String, value: serde_json::Value) -> bool {
        if !self.schema.open || self.schema.is_reserved(&key) {
            return false;
        }
        self.extension.insert(key, value);
        true
    }

    /// Replaces the extension map, dropping keys [`insert_extension`](Self::insert_extension) would refuse.
    pub fn set_extension(&mut self, extension: Extension) {
        self.extension.clear();
        for (key, value) in extension {
            self.insert_extension(key, value);
        }
    }

    /// Removes and returns the extension map.
    pub fn take_extension(&mut self) -> Extension {
        std::mem::take(&mut self.extension)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{ADDRESS_SCHEMA, PERSON_SCHEMA};
    use serde_json::json;

    #[test]
    fn test_iter_follows_table_order() {
        let mut fields = RecordFields::new(&PERSON_SCHEMA);
        fields.set("registeredAt", LocalDateTime::new(2024, 1, 1, 12, 0, 0).unwrap());
        fields.set("name", "John Doe".to_string());
        fields.set("id", 1_i64);

        let names: Vec<_> = fields.iter().map(|(f, _)| f.name).collect();
        assert_eq!(names, ["id", "name", "registeredAt"]);
    }

    #[test]
    fn test_undeclared_names_are_ignored_by_set() {
        let mut fields = RecordFields::new(&PERSON_SCHEMA);
        fields.set("nickname", "JD".to_string());
        assert!(fields.is_empty());
    }

    #[test]
    fn test_push_record_keeps_order() {
        let mut fields = RecordFields::new(&PERSON_SCHEMA);
        for street in ["123 Main St", "456 Oak Ave"] {
            let mut address = RecordFields::new(&ADDRESS_SCHEMA);
            address.set("street", street.to_string());
            fields.push_record("addresses", address);
        }
        assert_eq!(fields.sequence_len("addresses"), 2);

        let streets: Vec<_> = fields
            .take_records("addresses")
            .into_iter()
            .map(|mut a| a.take_text("street").unwrap())
            .collect();
        assert_eq!(streets, ["123 Main St", "456 Oak Ave"]);
    }

    #[test]
    fn test_extension_last_write_wins() {
        let mut fields = RecordFields::new(&PERSON_SCHEMA);
        assert!(fields.insert_extension("unknownA".into(), json!("first")));
        assert!(fields.insert_extension("unknownB".into(), json!("B")));
        assert!(fields.insert_extension("unknownA".into(), json!("A")));

        let entries: Vec<_> = fields.extension().iter().collect();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0], (&"unknownA".to_string(), &json!("A")));
        assert_eq!(entries[1], (&"unknownB".to_string(), &json!("B")));
    }

    #[test]
    fn test_extension_refuses_reserved_keys() {
        let mut fields = RecordFields::new(&PERSON_SCHEMA);
        assert!(!fields.insert_extension("name".into(), json!("shadow")));
        assert!(!fields.insert_extension("version".into(), json!("shadow")));
        assert!(fields.extension().is_empty());
    }

    #[test]
    fn test_single_format_names_are_extension_keys() {
        let mut fields = RecordFields::new(&PERSON_SCHEMA);
        assert!(fields.insert_extension("address".into(), json!("from JSON")));
        assert!(fields.insert_extension("addresses".into(), json!("from XML")));
        assert_eq!(fields.extension().len(), 2);
    }

    #[test]
    fn test_closed_record_has_no_extension() {
        let mut fields = RecordFields::new(&ADDRESS_SCHEMA);
        assert!(!fields.insert_extension("floor".into(), json!(3)));
        assert!(fields.extension().is_empty());
    }

    #[test]
    fn test_typed_take_rejects_other_kinds() {
        let mut fields = RecordFields::new(&PERSON_SCHEMA);
        fields.set("name", "John Doe".to_string());
        assert_eq!(fields.take_integer("name"), None);
    }
}
