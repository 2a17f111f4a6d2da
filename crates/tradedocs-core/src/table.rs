//! Column tables - one named sheet viewed as a header row plus data rows

use ahash::AHashMap;

use crate::cell::CellValue;
use crate::error::{Error, Result};

/// A named grid of rows with named columns
///
/// Every row holds exactly one cell per column; short rows are padded with
/// [`CellValue::Empty`] when pushed.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    name: String,
    columns: Vec<String>,
    rows: Vec<Vec<CellValue>>,
}

impl Table {
    /// Create an empty table with the given columns
    pub fn new<I, S>(name: impl Into<String>, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Build a table from a raw cell grid whose first row is the header.
    ///
    /// Blank header cells are named `Unnamed: <index>` and repeated names
    /// get a `.1`, `.2`, ... suffix so every column name is unique.
    pub fn from_grid(name: impl Into<String>, grid: Vec<Vec<CellValue>>) -> Self {
        let name = name.into();
        let mut grid = grid.into_iter();

        let header = match grid.next() {
            Some(header) => header,
            None => return Self::new(name, Vec::<String>::new()),
        };

        let columns = unique_column_names(&header);
        let width = columns.len();

        let rows = grid
            .map(|mut row| {
                row.truncate(width);
                row.resize(width, CellValue::Empty);
                row
            })
            .collect();

        Self {
            name,
            columns,
            rows,
        }
    }

    /// Sheet name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Column names in sheet order
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Data rows (header excluded)
    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    /// Number of data rows
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Check if the table has neither columns nor rows
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty() && self.rows.is_empty()
    }

    /// Append a row, padding it to the column count
    pub fn push_row(&mut self, mut row: Vec<CellValue>) -> Result<()> {
        if row.len() > self.columns.len() {
            return Err(Error::RowTooWide {
                sheet: self.name.clone(),
                width: row.len(),
                columns: self.columns.len(),
            });
        }
        row.resize(self.columns.len(), CellValue::Empty);
        self.rows.push(row);
        Ok(())
    }

    /// Position of a column by exact (case-sensitive) name
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Check if a column exists
    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Iterate over the cells of one column
    pub fn column(&self, name: &str) -> Option<impl Iterator<Item = &CellValue> + '_> {
        let idx = self.column_index(name)?;
        Some(self.rows.iter().map(move |row| &row[idx]))
    }

    /// Get a single cell by row index and column name
    pub fn cell(&self, row: usize, column: &str) -> Option<&CellValue> {
        let idx = self.column_index(column)?;
        self.rows.get(row).map(|r| &r[idx])
    }

    /// Column name / value pairs of one row
    pub fn row_map(&self, row: usize) -> Option<Vec<(&str, &CellValue)>> {
        let cells = self.rows.get(row)?;
        Some(
            self.columns
                .iter()
                .map(String::as_str)
                .zip(cells.iter())
                .collect(),
        )
    }

    /// The first `n` rows
    pub fn head(&self, n: usize) -> &[Vec<CellValue>] {
        &self.rows[..n.min(self.rows.len())]
    }
}

fn unique_column_names(header: &[CellValue]) -> Vec<String> {
    let mut seen: AHashMap<String, usize> = AHashMap::new();
    let mut columns = Vec::with_capacity(header.len());

    for (idx, cell) in header.iter().enumerate() {
        let base = if cell.is_empty() {
            format!("Unnamed: {idx}")
        } else {
            cell.to_text()
        };

        let name = match seen.get(&base).copied() {
            None => base,
            Some(mut count) => {
                // Skip suffixes already taken by a header further left.
                let mut candidate;
                loop {
                    count += 1;
                    candidate = format!("{base}.{count}");
                    if !seen.contains_key(&candidate) {
                        break;
                    }
                }
                seen.insert(base, count);
                candidate
            }
        };
        seen.insert(name.clone(), 0);
        columns.push(name);
    }

    columns
}
