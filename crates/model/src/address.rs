//! The nested `Address` record.

use crate::datetime::LocalDateTime;
use crate::fields::RecordFields;
use crate::schema::{ADDRESS_SCHEMA, RecordSchema};
use crate::Record;

/// A postal address attached to a [`Person`](crate::Person).
///
/// Addresses are closed records: an undeclared field inside an address is a
/// decode error rather than extension data.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Address {
    /// Whether this is the person's primary address. Absent input means `false`.
    pub primary: bool,
    pub street: Option<String>,
    pub city: Option<String>,
    pub zip_code: Option<String>,
    pub created_at: Option<LocalDateTime>,
    pub updated_at: Option<LocalDateTime>,
}

impl Record for Address {
    const SCHEMA: &'static RecordSchema = &ADDRESS_SCHEMA;

    fn to_fields(&self) -> RecordFields {
        let mut fields = RecordFields::new(Self::SCHEMA);
        fields.set("primary", self.primary);
        fields.set_opt("street", self.street.clone());
        fields.set_opt("city", self.city.clone());
        fields.set_opt("zipCode", self.zip_code.clone());
        fields.set_opt("createdAt", self.created_at);
        fields.set_opt("updatedAt", self.updated_at);
        fields
    }

    fn from_fields(mut fields: RecordFields) -> Self {
        Self {
            primary: fields.take_boolean("primary").unwrap_or(false),
            street: fields.take_text("street"),
            city: fields.take_text("city"),
            zip_code: fields.take_text("zipCode"),
            created_at: fields.take_date_time("createdAt"),
            updated_at: fields.take_date_time("updatedAt"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::FieldValue;

    #[test]
    fn test_primary_is_always_projected() {
        let fields = Address::default().to_fields();
        assert_eq!(fields.get("primary"), Some(&FieldValue::Boolean(false)));
        assert_eq!(fields.iter().count(), 1);
    }

    #[test]
    fn test_missing_primary_defaults_to_false() {
        let mut fields = RecordFields::new(&ADDRESS_SCHEMA);
        fields.set("city", "Springfield".to_string());
        let address = Address::from_fields(fields);
        assert!(!address.primary);
        assert_eq!(address.city.as_deref(), Some("Springfield"));
    }

    #[test]
    fn test_projection_round_trip() {
        let address = Address {
            primary: true,
            street: Some("123 Main St".into()),
            city: Some("Springfield".into()),
            zip_code: Some("12345".into()),
            created_at: LocalDateTime::new(2024, 1, 15, 10, 30, 0),
            updated_at: LocalDateTime::new(2024, 1, 20, 14, 45, 0),
        };
        assert_eq!(Address::from_fields(address.to_fields()), address);
    }
}
