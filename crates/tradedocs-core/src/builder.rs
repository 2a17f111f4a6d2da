//! Row builder - turns submitted form values into a [`DocumentRecord`]

use ahash::AHashMap;
use chrono::NaiveDate;

use crate::document::{DocumentType, FieldKind};
use crate::record::{DocumentRecord, FieldValue};
use crate::reference::ReferenceLists;

/// Submitted form values keyed by field key
///
/// Missing keys read as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormValues(AHashMap<String, String>);

impl FormValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a value
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    /// Get a value, empty when absent
    pub fn get(&self, key: &str) -> &str {
        self.0.get(key).map(String::as_str).unwrap_or("")
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FormValues {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Assemble one record from form values and the reference lookups.
///
/// Nothing is rejected: empty or unknown values pass through, an
/// unresolvable attribute becomes an empty string and an unparsable date
/// stays text.
pub fn build(
    document_type: DocumentType,
    form: &FormValues,
    refs: &ReferenceLists,
) -> DocumentRecord {
    let mut fields: Vec<(&'static str, FieldValue)> = Vec::new();

    for spec in document_type.fields() {
        let raw = form.get(spec.key);
        match spec.kind {
            FieldKind::Text => fields.push((spec.column, FieldValue::from(raw))),
            FieldKind::Date => fields.push((spec.column, parse_date(raw))),
            FieldKind::Choice { attach, .. } => {
                fields.push((spec.column, FieldValue::from(raw)));
                for (column, lookup) in attach {
                    let resolved = refs.resolve(*lookup, raw).unwrap_or("");
                    fields.push((*column, FieldValue::from(resolved)));
                }
            }
        }
    }

    DocumentRecord::new(document_type, fields)
}

fn parse_date(raw: &str) -> FieldValue {
    match NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d") {
        Ok(date) => FieldValue::Date(date),
        Err(_) => FieldValue::from(raw),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::ReferenceLists;
    use pretty_assertions::assert_eq;

    fn refs() -> ReferenceLists {
        let mut refs = ReferenceLists {
            senders: vec!["Acme".into()],
            receivers: vec!["Beta".into(), "Gamma".into()],
            incoterms: vec!["FOB".into()],
            ..Default::default()
        };
        refs.sender_address.insert("Acme".into(), "123 Rd".into());
        refs.receiver_address.insert("Beta".into(), "2 St".into());
        refs.receiver_address.insert("Gamma".into(), "3 Ave".into());
        refs.receiver_registration_id
            .insert("Beta".into(), "RB-1".into());
        refs
    }

    #[test]
    fn test_cmr_resolves_addresses() {
        let form: FormValues = [
            ("number", "7"),
            ("sender", "Acme"),
            ("receiver", "Beta"),
            ("carrier", "Gamma"),
        ]
        .into_iter()
        .collect();

        let r = build(DocumentType::Cmr, &form, &refs());
        assert_eq!(r.document_type(), DocumentType::Cmr);
        assert_eq!(r.text("Sender address"), Some("123 Rd"));
        assert_eq!(r.text("Receiver address"), Some("2 St"));
        assert_eq!(r.text("Carrier"), Some("Gamma"));
        assert_eq!(r.text("Carrier address"), Some("3 Ave"));
        assert_eq!(r.text("Goods"), Some(""));
        assert_eq!(r.columns().collect::<Vec<_>>(), DocumentType::Cmr.columns());
    }

    #[test]
    fn test_unknown_choice_gives_empty_attributes() {
        let form: FormValues = [("buyer", "Nobody")].into_iter().collect();
        let r = build(DocumentType::Specification, &form, &refs());
        assert_eq!(r.text("Buyer"), Some("Nobody"));
        assert_eq!(r.text("Buyer address"), Some(""));
        assert_eq!(r.text("Buyer registration ID"), Some(""));
    }

    #[test]
    fn test_invoice_date() {
        let form: FormValues = [("date", "2024-05-17"), ("buyer", "Beta")]
            .into_iter()
            .collect();
        let r = build(DocumentType::Invoice, &form, &refs());
        assert_eq!(
            r.get("Invoice date").and_then(FieldValue::as_date),
            NaiveDate::from_ymd_opt(2024, 5, 17)
        );
        assert_eq!(r.text("Buyer registration ID"), Some("RB-1"));
    }

    #[test]
    fn test_bad_date_stays_text() {
        let form: FormValues = [("date", "17.05.2024")].into_iter().collect();
        let r = build(DocumentType::Invoice, &form, &refs());
        assert_eq!(r.text("Invoice date"), Some("17.05.2024"));

        let r = build(DocumentType::Invoice, &FormValues::new(), &refs());
        assert_eq!(r.text("Invoice date"), Some(""));
    }

    #[test]
    fn test_build_with_empty_references() {
        let form: FormValues = [("sender", "Acme")].into_iter().collect();
        let r = build(DocumentType::Cmr, &form, &ReferenceLists::default());
        assert_eq!(r.text("Sender"), Some("Acme"));
        assert_eq!(r.text("Sender address"), Some(""));
    }
}
