//! Workbook type - the loaded spreadsheet as named tables

use crate::error::{Error, Result};
use crate::table::Table;

/// A loaded workbook
///
/// Holds one [`Table`] per sheet, in sheet order. Once loaded a workbook is
/// only read, never edited.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Workbook {
    tables: Vec<Table>,
}

impl Workbook {
    /// Create a workbook with no sheets
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of sheets
    pub fn sheet_count(&self) -> usize {
        self.tables.len()
    }

    /// Check if the workbook has no sheets
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Sheet names in workbook order
    pub fn sheet_names(&self) -> Vec<&str> {
        self.tables.iter().map(Table::name).collect()
    }

    /// Get a table by sheet name (case-sensitive)
    pub fn table(&self, name: &str) -> Option<&Table> {
        self.tables.iter().find(|t| t.name() == name)
    }

    /// Get a table by index
    pub fn table_at(&self, index: usize) -> Option<&Table> {
        self.tables.get(index)
    }

    /// Iterate over all tables
    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.tables.iter()
    }

    /// Add a sheet
    pub fn add_table(&mut self, table: Table) -> Result<usize> {
        if self.table(table.name()).is_some() {
            return Err(Error::DuplicateSheetName(table.name().to_string()));
        }
        let index = self.tables.len();
        self.tables.push(table);
        Ok(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_lookup() {
        let mut wb = Workbook::new();
        assert!(wb.is_empty());

        assert_eq!(wb.add_table(Table::new("Sender", ["Name"])).unwrap(), 0);
        assert_eq!(wb.add_table(Table::new("Receiver", ["Name"])).unwrap(), 1);

        assert_eq!(wb.sheet_names(), vec!["Sender", "Receiver"]);
        assert_eq!(wb.table_at(1).map(Table::name), Some("Receiver"));
        assert!(wb.table("sender").is_none());
    }

    #[test]
    fn test_duplicate_sheet_name() {
        let mut wb = Workbook::new();
        wb.add_table(Table::new("Sender", ["Name"])).unwrap();
        let err = wb.add_table(Table::new("Sender", ["Other"])).unwrap_err();
        assert!(matches!(err, Error::DuplicateSheetName(name) if name == "Sender"));
    }
}
