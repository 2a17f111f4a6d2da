//! Record export built on rust_xlsxwriter

use chrono::{Datelike, NaiveDateTime, Timelike};
use rust_xlsxwriter::{ExcelDateTime, Format, Workbook, Worksheet};
use tradedocs_core::{CellValue, DocumentRecord, Table};

use crate::error::{ExportError, ExportResult};

/// MIME type of the exported files
pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

const MAX_ROWS: usize = 1_048_576;
const MAX_COLS: usize = 16_384;

/// Union of the record columns in first-seen order.
///
/// The first record's columns come first in its own order; columns that
/// only later records carry are appended as they appear.
pub fn export_columns(records: &[DocumentRecord]) -> Vec<String> {
    let mut columns: Vec<String> = Vec::new();
    for record in records {
        for column in record.columns() {
            if !columns.iter().any(|c| c == column) {
                columns.push(column.to_string());
            }
        }
    }
    columns
}

/// Export records to a single-sheet workbook.
///
/// Row 1 holds the column names, every record becomes one row below it and
/// columns a record lacks stay empty. An empty record list yields a sheet
/// without cells.
pub fn export(sheet_name: &str, records: &[DocumentRecord]) -> ExportResult<Vec<u8>> {
    let columns = export_columns(records);
    let mut table = Table::new(sheet_name, columns.iter().map(String::as_str));

    for record in records {
        let row = columns
            .iter()
            .map(|c| record.get(c).map(|v| v.to_cell()).unwrap_or_default())
            .collect();
        // Width always matches: the row is built from the table's own columns.
        table
            .push_row(row)
            .map_err(|_| ExportError::TooManyColumns(columns.len()))?;
    }

    let bytes = write_tables(&[table])?;
    tracing::info!(
        "Exported {} records ({} columns) to sheet '{}'",
        records.len(),
        columns.len(),
        sheet_name
    );
    Ok(bytes)
}

/// Cell formats shared by every sheet of one export
struct CellFormats {
    header: Format,
    date: Format,
    datetime: Format,
    blank: Format,
}

impl CellFormats {
    fn new() -> Self {
        Self {
            header: Format::new().set_bold(),
            date: Format::new().set_num_format("yyyy-mm-dd"),
            datetime: Format::new().set_num_format("yyyy-mm-dd hh:mm:ss"),
            blank: Format::new().set_num_format("@"),
        }
    }
}

/// Write tables as sheets of one workbook, each with a bold header row.
///
/// Empty cells are written as formatted blanks so that a row without any
/// value still counts toward the sheet's used area. Dates Excel cannot
/// represent (before 1900 or after 9999) are written as ISO text.
pub fn write_tables(tables: &[Table]) -> ExportResult<Vec<u8>> {
    let mut workbook = Workbook::new();
    let formats = CellFormats::new();

    for table in tables {
        if table.column_count() > MAX_COLS {
            return Err(ExportError::TooManyColumns(table.column_count()));
        }
        if table.row_count() + 1 > MAX_ROWS {
            return Err(ExportError::TooManyRows(table.row_count()));
        }

        let worksheet = workbook.add_worksheet();
        worksheet.set_name(table.name())?;

        for (col, name) in table.columns().iter().enumerate() {
            worksheet.write_string_with_format(0, col as u16, name, &formats.header)?;
        }

        for (idx, row) in table.rows().iter().enumerate() {
            let row_num = (idx + 1) as u32;
            for (col, cell) in row.iter().enumerate() {
                write_cell(worksheet, row_num, col as u16, cell, &formats)?;
            }
        }
    }

    Ok(workbook.save_to_buffer()?)
}

fn write_cell(
    worksheet: &mut Worksheet,
    row: u32,
    col: u16,
    cell: &CellValue,
    formats: &CellFormats,
) -> ExportResult<()> {
    match cell {
        CellValue::Empty => {
            worksheet.write_blank(row, col, &formats.blank)?;
        }
        CellValue::Boolean(b) => {
            worksheet.write_boolean(row, col, *b)?;
        }
        CellValue::Number(n) => {
            worksheet.write_number(row, col, *n)?;
        }
        CellValue::String(s) => {
            worksheet.write_string(row, col, s)?;
        }
        CellValue::Error(e) => {
            worksheet.write_string(row, col, e)?;
        }
        CellValue::DateTime(dt) => match excel_datetime(dt) {
            Some(value) if dt.num_seconds_from_midnight() == 0 => {
                worksheet.write_datetime_with_format(row, col, &value, &formats.date)?;
            }
            Some(value) => {
                worksheet.write_datetime_with_format(row, col, &value, &formats.datetime)?;
            }
            None => {
                tracing::debug!("Writing {dt} at ({row}, {col}) as text");
                worksheet.write_string(row, col, cell.to_text())?;
            }
        },
    }
    Ok(())
}

/// `None` outside the 1900..=9999 range Excel serials cover
fn excel_datetime(dt: &NaiveDateTime) -> Option<ExcelDateTime> {
    let year = u16::try_from(dt.year()).ok()?;
    if !(1900..=9999).contains(&year) {
        return None;
    }

    let date = ExcelDateTime::from_ymd(year, dt.month() as u8, dt.day() as u8).ok()?;
    if dt.num_seconds_from_midnight() == 0 {
        return Some(date);
    }
    date.and_hms(dt.hour() as u16, dt.minute() as u8, dt.second()).ok()
}
