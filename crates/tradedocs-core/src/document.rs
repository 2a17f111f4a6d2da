//! Document types and their form field tables
//!
//! Each document type is described by a static list of [`FieldSpec`]s. The
//! list drives both the rendered form and the record assembly, so the three
//! document flows share one code path.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;
use crate::reference::{Lookup, ReferenceLists};

/// Which reference list a choice field offers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionList {
    Senders,
    Receivers,
    Incoterms,
}

impl OptionList {
    /// The options themselves
    pub fn options<'a>(&self, refs: &'a ReferenceLists) -> &'a [String] {
        match self {
            OptionList::Senders => &refs.senders,
            OptionList::Receivers => &refs.receivers,
            OptionList::Incoterms => &refs.incoterms,
        }
    }
}

/// How a field's submitted value becomes record columns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Free text, copied as-is
    Text,
    /// `YYYY-MM-DD` date
    Date,
    /// A name picked from a reference list; every `attach` entry adds a
    /// column holding the resolved attribute of that name
    Choice {
        options: OptionList,
        attach: &'static [(&'static str, Lookup)],
    },
}

/// One form field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Form input name
    pub key: &'static str,
    /// Record column name
    pub column: &'static str,
    pub kind: FieldKind,
}

impl FieldSpec {
    const fn text(key: &'static str, column: &'static str) -> Self {
        Self {
            key,
            column,
            kind: FieldKind::Text,
        }
    }

    const fn date(key: &'static str, column: &'static str) -> Self {
        Self {
            key,
            column,
            kind: FieldKind::Date,
        }
    }

    const fn choice(
        key: &'static str,
        column: &'static str,
        options: OptionList,
        attach: &'static [(&'static str, Lookup)],
    ) -> Self {
        Self {
            key,
            column,
            kind: FieldKind::Choice { options, attach },
        }
    }
}

const CMR_FIELDS: &[FieldSpec] = &[
    FieldSpec::text("number", "CMR No."),
    FieldSpec::choice(
        "sender",
        "Sender",
        OptionList::Senders,
        &[("Sender address", Lookup::SenderAddress)],
    ),
    FieldSpec::choice(
        "receiver",
        "Receiver",
        OptionList::Receivers,
        &[("Receiver address", Lookup::ReceiverAddress)],
    ),
    // Carriers share the receiver sheet.
    FieldSpec::choice(
        "carrier",
        "Carrier",
        OptionList::Receivers,
        &[("Carrier address", Lookup::ReceiverAddress)],
    ),
    FieldSpec::text("loading_place", "Place of loading"),
    FieldSpec::text("delivery_place", "Place of delivery"),
    FieldSpec::text("goods", "Goods"),
    FieldSpec::text("packages", "Packages"),
    FieldSpec::text("gross_weight", "Gross weight, kg"),
    FieldSpec::text("vehicle", "Vehicle"),
];

const SPECIFICATION_FIELDS: &[FieldSpec] = &[
    FieldSpec::text("number", "Specification No."),
    FieldSpec::choice(
        "seller",
        "Seller",
        OptionList::Senders,
        &[("Seller address", Lookup::SenderAddress)],
    ),
    FieldSpec::choice(
        "buyer",
        "Buyer",
        OptionList::Receivers,
        &[
            ("Buyer address", Lookup::ReceiverAddress),
            ("Buyer registration ID", Lookup::ReceiverRegistrationId),
        ],
    ),
    FieldSpec::choice("incoterms", "Delivery terms", OptionList::Incoterms, &[]),
    FieldSpec::text("goods", "Goods"),
    FieldSpec::text("quantity", "Quantity"),
    FieldSpec::text("unit", "Unit"),
    FieldSpec::text("price", "Price"),
    FieldSpec::text("amount", "Amount"),
];

const INVOICE_FIELDS: &[FieldSpec] = &[
    FieldSpec::text("number", "Invoice No."),
    FieldSpec::date("date", "Invoice date"),
    FieldSpec::choice(
        "seller",
        "Seller",
        OptionList::Senders,
        &[("Seller address", Lookup::SenderAddress)],
    ),
    FieldSpec::choice(
        "buyer",
        "Buyer",
        OptionList::Receivers,
        &[
            ("Buyer address", Lookup::ReceiverAddress),
            ("Buyer registration ID", Lookup::ReceiverRegistrationId),
        ],
    ),
    FieldSpec::choice("incoterms", "Delivery terms", OptionList::Incoterms, &[]),
    FieldSpec::text("goods", "Goods"),
    FieldSpec::text("quantity", "Quantity"),
    FieldSpec::text("price", "Unit price"),
    FieldSpec::text("amount", "Total"),
    FieldSpec::text("currency", "Currency"),
];

/// The three document types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentType {
    /// CMR road consignment note
    Cmr,
    Specification,
    Invoice,
}

impl DocumentType {
    /// All document types in display order
    pub const ALL: [DocumentType; 3] = [
        DocumentType::Cmr,
        DocumentType::Specification,
        DocumentType::Invoice,
    ];

    /// URL/form identifier
    pub fn slug(&self) -> &'static str {
        match self {
            DocumentType::Cmr => "cmr",
            DocumentType::Specification => "specification",
            DocumentType::Invoice => "invoice",
        }
    }

    /// Human-readable title
    pub fn title(&self) -> &'static str {
        match self {
            DocumentType::Cmr => "CMR",
            DocumentType::Specification => "Specification",
            DocumentType::Invoice => "Invoice",
        }
    }

    /// Sheet name used on export
    pub fn sheet_name(&self) -> &'static str {
        self.title()
    }

    /// Download file name
    pub fn file_name(&self) -> &'static str {
        match self {
            DocumentType::Cmr => "cmr.xlsx",
            DocumentType::Specification => "specifications.xlsx",
            DocumentType::Invoice => "invoices.xlsx",
        }
    }

    /// Form fields in display order
    pub fn fields(&self) -> &'static [FieldSpec] {
        match self {
            DocumentType::Cmr => CMR_FIELDS,
            DocumentType::Specification => SPECIFICATION_FIELDS,
            DocumentType::Invoice => INVOICE_FIELDS,
        }
    }

    /// Record columns in the order the builder emits them
    pub fn columns(&self) -> Vec<&'static str> {
        let mut columns = Vec::new();
        for field in self.fields() {
            columns.push(field.column);
            if let FieldKind::Choice { attach, .. } = field.kind {
                columns.extend(attach.iter().map(|(column, _)| *column));
            }
        }
        columns
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

impl FromStr for DocumentType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DocumentType::ALL
            .into_iter()
            .find(|dt| dt.slug() == s)
            .ok_or_else(|| Error::UnknownDocumentType(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_slug_roundtrip() {
        for dt in DocumentType::ALL {
            assert_eq!(dt.slug().parse::<DocumentType>().unwrap(), dt);
        }
        assert!("waybill".parse::<DocumentType>().is_err());
    }

    #[test]
    fn test_file_names() {
        assert_eq!(DocumentType::Cmr.file_name(), "cmr.xlsx");
        assert_eq!(DocumentType::Specification.file_name(), "specifications.xlsx");
        assert_eq!(DocumentType::Invoice.file_name(), "invoices.xlsx");
    }

    #[test]
    fn test_carrier_uses_receiver_lookup() {
        let carrier = DocumentType::Cmr
            .fields()
            .iter()
            .find(|f| f.key == "carrier")
            .unwrap();
        assert_eq!(
            carrier.kind,
            FieldKind::Choice {
                options: OptionList::Receivers,
                attach: &[("Carrier address", Lookup::ReceiverAddress)],
            }
        );
    }

    #[test]
    fn test_columns_are_unique_per_document() {
        for dt in DocumentType::ALL {
            let columns = dt.columns();
            let mut sorted = columns.clone();
            sorted.sort_unstable();
            sorted.dedup();
            assert_eq!(sorted.len(), columns.len(), "{dt} has duplicate columns");
        }
    }

    #[test]
    fn test_field_keys_are_unique_per_document() {
        for dt in DocumentType::ALL {
            let mut keys: Vec<_> = dt.fields().iter().map(|f| f.key).collect();
            let count = keys.len();
            keys.sort_unstable();
            keys.dedup();
            assert_eq!(keys.len(), count, "{dt} has duplicate form keys");
        }
    }
}
