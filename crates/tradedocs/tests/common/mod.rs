//! Common fixtures for session tests.

use tradedocs::{write_tables, CellValue, Table};

/// Sender sheet rows (company, address)
pub fn sender_sheet(rows: &[(&str, &str)]) -> Table {
    let mut t = Table::new("Sender", ["Company name", "Company address"]);
    for (name, address) in rows {
        t.push_row(vec![CellValue::from(*name), CellValue::from(*address)])
            .unwrap();
    }
    t
}

/// Receiver sheet rows (name, address, registration id)
pub fn receiver_sheet(rows: &[(&str, &str, &str)]) -> Table {
    let mut t = Table::new("Receiver", ["Name", "Address", "Registration ID"]);
    for (name, address, reg) in rows {
        t.push_row(vec![
            CellValue::from(*name),
            CellValue::from(*address),
            CellValue::from(*reg),
        ])
        .unwrap();
    }
    t
}

/// Extra-data sheet with delivery terms
pub fn extra_sheet(terms: &[&str]) -> Table {
    let mut t = Table::new("Extra data", ["Delivery terms"]);
    for term in terms {
        t.push_row(vec![CellValue::from(*term)]).unwrap();
    }
    t
}

/// A complete reference workbook as xlsx bytes
pub fn reference_workbook() -> Vec<u8> {
    write_tables(&[
        sender_sheet(&[("Acme", "123 Rd"), ("Acme", "999 Rd"), ("Northwind", "5 Dock St")]),
        receiver_sheet(&[
            ("Beta GmbH", "Hafenstr. 1, Hamburg", "DE123"),
            ("Gamma Freight", "Depot 9, Riga", "LV777"),
        ]),
        extra_sheet(&["FOB", "CIF", "FOB", "DAP"]),
    ])
    .unwrap()
}
