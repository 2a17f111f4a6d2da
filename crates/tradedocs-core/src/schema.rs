//! Reference schema - where the lookup data lives in a workbook
//!
//! The sheet and column names are a fixed, case-sensitive contract with the
//! people who maintain the reference workbook. They are kept in one value so
//! the contract can be inspected, tested and replaced from a JSON file.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Attribute resolved for a looked-up name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Attribute {
    /// Postal address
    Address,
    /// Company registration number
    RegistrationId,
}

/// A column holding one attribute of the key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeColumn {
    pub attribute: Attribute,
    pub column: String,
}

/// One lookup sheet: the key column and the attribute columns keyed by it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupSheet {
    pub sheet: String,
    pub key_column: String,
    #[serde(default)]
    pub attributes: Vec<AttributeColumn>,
}

impl LookupSheet {
    /// Create a lookup with no attribute columns
    pub fn new(sheet: impl Into<String>, key_column: impl Into<String>) -> Self {
        Self {
            sheet: sheet.into(),
            key_column: key_column.into(),
            attributes: Vec::new(),
        }
    }

    /// Add an attribute column
    pub fn with_attribute(mut self, attribute: Attribute, column: impl Into<String>) -> Self {
        self.attributes.push(AttributeColumn {
            attribute,
            column: column.into(),
        });
        self
    }

    /// Column name of an attribute, if the lookup carries it
    pub fn attribute_column(&self, attribute: Attribute) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.attribute == attribute)
            .map(|a| a.column.as_str())
    }
}

/// Sheet/column layout of the reference workbook
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceSchema {
    /// Sending companies
    pub sender: LookupSheet,
    /// Receivers, also used for carriers
    pub receiver: LookupSheet,
    /// Delivery terms
    pub incoterms: LookupSheet,
}

impl Default for ReferenceSchema {
    fn default() -> Self {
        Self {
            sender: LookupSheet::new("Sender", "Company name")
                .with_attribute(Attribute::Address, "Company address"),
            receiver: LookupSheet::new("Receiver", "Name")
                .with_attribute(Attribute::Address, "Address")
                .with_attribute(Attribute::RegistrationId, "Registration ID"),
            incoterms: LookupSheet::new("Extra data", "Delivery terms"),
        }
    }
}

impl ReferenceSchema {
    /// Parse a schema from JSON
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a schema from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// The three lookups in a fixed order
    pub fn lookups(&self) -> [&LookupSheet; 3] {
        [&self.sender, &self.receiver, &self.incoterms]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn test_default_contract() {
        let schema = ReferenceSchema::default();

        assert_eq!(schema.sender.sheet, "Sender");
        assert_eq!(schema.sender.key_column, "Company name");
        assert_eq!(
            schema.sender.attribute_column(Attribute::Address),
            Some("Company address")
        );
        assert_eq!(schema.sender.attribute_column(Attribute::RegistrationId), None);

        assert_eq!(schema.receiver.sheet, "Receiver");
        assert_eq!(schema.receiver.key_column, "Name");
        assert_eq!(schema.receiver.attribute_column(Attribute::Address), Some("Address"));
        assert_eq!(
            schema.receiver.attribute_column(Attribute::RegistrationId),
            Some("Registration ID")
        );

        assert_eq!(schema.incoterms.sheet, "Extra data");
        assert_eq!(schema.incoterms.key_column, "Delivery terms");
        assert!(schema.incoterms.attributes.is_empty());
    }

    #[test]
    fn test_json_roundtrip_of_default() {
        let schema = ReferenceSchema::default();
        let json = serde_json::to_string(&schema).unwrap();
        assert_eq!(ReferenceSchema::from_json_str(&json).unwrap(), schema);
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "sender": {{"sheet": "Отправитель", "key_column": "Компания",
                            "attributes": [{{"attribute": "address", "column": "Адрес"}}]}},
                "receiver": {{"sheet": "Получатель", "key_column": "Имя"}},
                "incoterms": {{"sheet": "Доп", "key_column": "Инкотермс"}}
            }}"#
        )
        .unwrap();

        let schema = ReferenceSchema::from_file(file.path()).unwrap();
        assert_eq!(schema.sender.sheet, "Отправитель");
        assert_eq!(schema.sender.attribute_column(Attribute::Address), Some("Адрес"));
        assert!(schema.receiver.attributes.is_empty());
    }

    #[test]
    fn test_invalid_json() {
        assert!(ReferenceSchema::from_json_str("{\"sender\": 1}").is_err());
    }
}
