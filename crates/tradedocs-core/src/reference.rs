//! Reference extraction - lookup lists derived from the reference sheets
//!
//! Extraction never fails. A missing sheet or column leaves the affected
//! lists empty and is reported as an [`ExtractionWarning`] instead.

use ahash::AHashMap;
use thiserror::Error;

use crate::schema::{Attribute, LookupSheet, ReferenceSchema};
use crate::workbook::Workbook;

/// Degraded-lookup condition met while extracting
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractionWarning {
    /// The lookup sheet is not in the workbook
    #[error("Sheet '{sheet}' not found; its lists are empty")]
    MissingSheet { sheet: String },

    /// The sheet exists but lacks an expected column
    #[error("Sheet '{sheet}' has no column '{column}'")]
    MissingColumn { sheet: String, column: String },
}

/// Attribute lookups used by the row builder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lookup {
    /// Sender name -> address
    SenderAddress,
    /// Receiver name -> address
    ReceiverAddress,
    /// Receiver name -> registration id
    ReceiverRegistrationId,
}

/// Lookup lists and attribute maps for one loaded workbook
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReferenceLists {
    /// Distinct sender company names, first-seen order
    pub senders: Vec<String>,
    /// Sender name -> address of its first row
    pub sender_address: AHashMap<String, String>,
    /// Distinct receiver (and carrier) names, first-seen order
    pub receivers: Vec<String>,
    /// Receiver name -> address of its first row
    pub receiver_address: AHashMap<String, String>,
    /// Receiver name -> registration id of its first row
    pub receiver_registration_id: AHashMap<String, String>,
    /// Distinct delivery terms codes, first-seen order
    pub incoterms: Vec<String>,
    /// Conditions that left some of the above empty
    pub warnings: Vec<ExtractionWarning>,
}

impl ReferenceLists {
    /// Resolve an attribute for a chosen name
    pub fn resolve(&self, lookup: Lookup, name: &str) -> Option<&str> {
        let map = match lookup {
            Lookup::SenderAddress => &self.sender_address,
            Lookup::ReceiverAddress => &self.receiver_address,
            Lookup::ReceiverRegistrationId => &self.receiver_registration_id,
        };
        map.get(name).map(String::as_str)
    }

    /// Check whether any lookup degraded
    pub fn is_degraded(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Keys of one lookup sheet plus the attribute maps keyed by them
#[derive(Debug, Default)]
struct LookupTable {
    keys: Vec<String>,
    attributes: AHashMap<Attribute, AHashMap<String, String>>,
}

impl LookupTable {
    fn take(&mut self, attribute: Attribute) -> AHashMap<String, String> {
        self.attributes.remove(&attribute).unwrap_or_default()
    }
}

/// Extract the reference lists described by `schema` from a workbook
pub fn extract(workbook: &Workbook, schema: &ReferenceSchema) -> ReferenceLists {
    let mut warnings = Vec::new();

    let mut senders = extract_lookup(workbook, &schema.sender, &mut warnings);
    let mut receivers = extract_lookup(workbook, &schema.receiver, &mut warnings);
    let incoterms = extract_lookup(workbook, &schema.incoterms, &mut warnings);

    ReferenceLists {
        sender_address: senders.take(Attribute::Address),
        senders: senders.keys,
        receiver_address: receivers.take(Attribute::Address),
        receiver_registration_id: receivers.take(Attribute::RegistrationId),
        receivers: receivers.keys,
        incoterms: incoterms.keys,
        warnings,
    }
}

/// Extract using [`ReferenceSchema::default`]
pub fn extract_default(workbook: &Workbook) -> ReferenceLists {
    extract(workbook, &ReferenceSchema::default())
}

fn extract_lookup(
    workbook: &Workbook,
    lookup: &LookupSheet,
    warnings: &mut Vec<ExtractionWarning>,
) -> LookupTable {
    let mut out = LookupTable::default();

    let Some(table) = workbook.table(&lookup.sheet) else {
        tracing::warn!("Reference sheet '{}' not found", lookup.sheet);
        warnings.push(ExtractionWarning::MissingSheet {
            sheet: lookup.sheet.clone(),
        });
        return out;
    };

    let Some(key_idx) = table.column_index(&lookup.key_column) else {
        tracing::warn!(
            "Reference sheet '{}' has no key column '{}'",
            lookup.sheet,
            lookup.key_column
        );
        warnings.push(ExtractionWarning::MissingColumn {
            sheet: lookup.sheet.clone(),
            column: lookup.key_column.clone(),
        });
        return out;
    };

    let mut attribute_columns = Vec::with_capacity(lookup.attributes.len());
    for attr in &lookup.attributes {
        match table.column_index(&attr.column) {
            Some(idx) => {
                attribute_columns.push((attr.attribute, idx));
                out.attributes.insert(attr.attribute, AHashMap::new());
            }
            None => {
                tracing::warn!(
                    "Reference sheet '{}' has no column '{}'",
                    lookup.sheet,
                    attr.column
                );
                warnings.push(ExtractionWarning::MissingColumn {
                    sheet: lookup.sheet.clone(),
                    column: attr.column.clone(),
                });
            }
        }
    }

    let mut seen: ahash::AHashSet<String> = ahash::AHashSet::new();
    for row in table.rows() {
        let key_cell = &row[key_idx];
        if key_cell.is_empty() {
            continue;
        }
        let key = key_cell.to_text();
        if !seen.insert(key.clone()) {
            continue;
        }

        for (attribute, idx) in &attribute_columns {
            let cell = &row[*idx];
            if cell.is_empty() {
                continue;
            }
            if let Some(map) = out.attributes.get_mut(attribute) {
                map.insert(key.clone(), cell.to_text());
            }
        }
        out.keys.push(key);
    }

    tracing::debug!(
        "Extracted {} keys from sheet '{}'",
        out.keys.len(),
        lookup.sheet
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::CellValue;
    use crate::table::Table;
    use pretty_assertions::assert_eq;

    fn sender_sheet(rows: &[(&str, &str)]) -> Table {
        let mut t = Table::new("Sender", ["Company name", "Company address"]);
        for (name, addr) in rows {
            t.push_row(vec![CellValue::from(*name), CellValue::from(*addr)])
                .unwrap();
        }
        t
    }

    fn workbook(tables: Vec<Table>) -> Workbook {
        let mut wb = Workbook::new();
        for t in tables {
            wb.add_table(t).unwrap();
        }
        wb
    }

    #[test]
    fn test_first_occurrence_wins() {
        let wb = workbook(vec![sender_sheet(&[("Acme", "123 Rd"), ("Acme", "999 Rd")])]);
        let refs = extract_default(&wb);

        assert_eq!(refs.senders, vec!["Acme".to_string()]);
        assert_eq!(refs.sender_address.get("Acme").map(String::as_str), Some("123 Rd"));
    }

    #[test]
    fn test_missing_sheets_degrade() {
        let refs = extract_default(&Workbook::new());

        assert!(refs.senders.is_empty());
        assert!(refs.sender_address.is_empty());
        assert!(refs.receivers.is_empty());
        assert!(refs.incoterms.is_empty());
        assert_eq!(refs.warnings.len(), 3);
        assert_eq!(
            refs.warnings[0],
            ExtractionWarning::MissingSheet {
                sheet: "Sender".into()
            }
        );
    }

    #[test]
    fn test_missing_key_column_degrades() {
        let mut t = Table::new("Sender", ["Title", "Company address"]);
        t.push_row(vec!["Acme".into(), "1 Rd".into()]).unwrap();
        let refs = extract_default(&workbook(vec![t]));

        assert!(refs.senders.is_empty());
        assert!(refs.sender_address.is_empty());
        assert!(refs.warnings.contains(&ExtractionWarning::MissingColumn {
            sheet: "Sender".into(),
            column: "Company name".into(),
        }));
    }

    #[test]
    fn test_missing_attribute_column_keeps_keys() {
        let mut t = Table::new("Receiver", ["Name", "Address"]);
        t.push_row(vec!["Beta".into(), "2 St".into()]).unwrap();
        let refs = extract_default(&workbook(vec![t]));

        assert_eq!(refs.receivers, vec!["Beta".to_string()]);
        assert_eq!(refs.resolve(Lookup::ReceiverAddress, "Beta"), Some("2 St"));
        assert!(refs.receiver_registration_id.is_empty());
        assert!(refs.warnings.contains(&ExtractionWarning::MissingColumn {
            sheet: "Receiver".into(),
            column: "Registration ID".into(),
        }));
    }

    #[test]
    fn test_distinct_order_and_blank_keys() {
        let mut t = Table::new("Extra data", ["Delivery terms"]);
        for v in ["FOB", "", "CIF", "  ", "FOB", "DAP", "CIF"] {
            t.push_row(vec![CellValue::from(v)]).unwrap();
        }
        t.push_row(vec![CellValue::Empty]).unwrap();

        let refs = extract_default(&workbook(vec![t]));
        assert_eq!(refs.incoterms, vec!["FOB", "CIF", "DAP"]);
    }

    #[test]
    fn test_blank_first_attribute_is_not_filled_later() {
        let wb = workbook(vec![sender_sheet(&[("Acme", ""), ("Acme", "999 Rd")])]);
        let refs = extract_default(&wb);

        assert_eq!(refs.senders, vec!["Acme".to_string()]);
        assert_eq!(refs.resolve(Lookup::SenderAddress, "Acme"), None);
    }

    #[test]
    fn test_numeric_keys_render_as_text() {
        let mut t = Table::new("Receiver", ["Name", "Address", "Registration ID"]);
        t.push_row(vec![CellValue::Number(1001.0), "Depot".into(), CellValue::Number(77.0)])
            .unwrap();
        let refs = extract_default(&workbook(vec![t]));

        assert_eq!(refs.receivers, vec!["1001".to_string()]);
        assert_eq!(refs.resolve(Lookup::ReceiverRegistrationId, "1001"), Some("77"));
    }

    #[test]
    fn test_extract_is_idempotent() {
        let wb = workbook(vec![sender_sheet(&[("Acme", "1"), ("Beta", "2")])]);
        assert_eq!(extract_default(&wb), extract_default(&wb));
    }
}
