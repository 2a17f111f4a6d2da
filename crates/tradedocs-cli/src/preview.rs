//! Delimited-text preview of one sheet

use std::io::Write;

use tradedocs::Table;

/// Options for previewing a sheet
#[derive(Debug, Clone)]
pub struct PreviewOptions {
    /// Data rows to print after the header (default: 50)
    pub max_rows: usize,
    /// Field delimiter (default: comma)
    pub delimiter: u8,
}

impl Default for PreviewOptions {
    fn default() -> Self {
        Self {
            max_rows: 50,
            delimiter: b',',
        }
    }
}

/// Write the header and the first rows of `table`; returns the data rows written
pub fn write_preview<W: Write>(
    table: &Table,
    writer: W,
    options: &PreviewOptions,
) -> csv::Result<usize> {
    let mut csv_writer = csv::WriterBuilder::new()
        .delimiter(options.delimiter)
        .flexible(true)
        .from_writer(writer);

    if !table.columns().is_empty() {
        csv_writer.write_record(table.columns())?;
    }

    let rows = table.head(options.max_rows);
    for row in rows {
        csv_writer.write_record(row.iter().map(|cell| cell.to_text()))?;
    }

    csv_writer.flush()?;
    Ok(rows.len())
}
