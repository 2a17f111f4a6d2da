//! Workbook reader built on calamine

use std::io::{Cursor, Read, Seek};
use std::path::Path;

use calamine::{Data, Dimensions, Reader, Sheets, Xlsb, Xlsx};
use chrono::{Duration, NaiveDate, NaiveDateTime};
use tradedocs_core::{CellValue, Table, Workbook};

use crate::error::{LoadError, LoadResult};
use crate::source::{Engine, WorkbookSource};

/// Most blank rows appended after the last used row of a sheet
const MAX_TRAILING_BLANK_ROWS: usize = 10_000;

/// Reads spreadsheet sources into the column-table model
pub struct WorkbookReader;

impl WorkbookReader {
    /// Load any source
    pub fn load(source: &WorkbookSource) -> LoadResult<Workbook> {
        match source {
            WorkbookSource::Path(path) => Self::read_file(path),
            WorkbookSource::Bytes { name, data } => Self::read_bytes(name, data.to_vec()),
        }
    }

    /// Read a workbook file; the parser is chosen from its extension
    pub fn read_file<P: AsRef<Path>>(path: P) -> LoadResult<Workbook> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(LoadError::NotFound(path.to_path_buf()));
        }

        let data = std::fs::read(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self::read_bytes(&name, data)
    }

    /// Read workbook bytes; `name` only selects the parser
    pub fn read_bytes(name: &str, data: Vec<u8>) -> LoadResult<Workbook> {
        let engine = Engine::from_name(name);
        let cursor = Cursor::new(data);
        let parse_err = |message: String| LoadError::Parse {
            name: name.to_string(),
            message,
        };

        let sheets = match engine {
            Engine::Xlsx => Xlsx::new(cursor)
                .map(Sheets::Xlsx)
                .map_err(|e| parse_err(e.to_string()))?,
            Engine::Xlsb => Xlsb::new(cursor)
                .map(Sheets::Xlsb)
                .map_err(|e| parse_err(e.to_string()))?,
        };

        let workbook = Self::read_sheets(sheets).map_err(|e| parse_err(e.to_string()))?;
        tracing::info!(
            "Loaded '{}' ({:?}) with {} sheets",
            name,
            engine,
            workbook.sheet_count()
        );
        Ok(workbook)
    }

    fn read_sheets<RS: Read + Seek>(mut sheets: Sheets<RS>) -> Result<Workbook, calamine::Error> {
        let mut workbook = Workbook::new();

        for sheet_name in sheets.sheet_names() {
            let range = sheets.worksheet_range(&sheet_name)?;
            let mut grid: Vec<Vec<CellValue>> = range
                .rows()
                .map(|row| row.iter().map(cell_from_data).collect())
                .collect();

            // The used range stops at the last non-blank cell; blank rows
            // written below it are only visible in the declared dimension.
            if let (Some((first_row, _)), Some(dim)) =
                (range.start(), declared_dimensions(&mut sheets, &sheet_name))
            {
                pad_trailing_rows(&mut grid, first_row, dim, &sheet_name);
            }

            let table = Table::from_grid(sheet_name.as_str(), grid);
            tracing::debug!(
                "Sheet '{}': {} columns, {} rows",
                sheet_name,
                table.column_count(),
                table.row_count()
            );

            // Sheet names are unique inside a valid workbook.
            if let Err(e) = workbook.add_table(table) {
                tracing::warn!("Skipping sheet: {e}");
            }
        }

        Ok(workbook)
    }
}

/// The `<dimension>` a sheet declares, which includes formatted blanks
fn declared_dimensions<RS: Read + Seek>(
    sheets: &mut Sheets<RS>,
    name: &str,
) -> Option<Dimensions> {
    match sheets {
        Sheets::Xlsx(xlsx) => xlsx
            .worksheet_cells_reader(name)
            .ok()
            .map(|r| r.dimensions()),
        Sheets::Xlsb(xlsb) => xlsb
            .worksheet_cells_reader(name)
            .ok()
            .map(|r| r.dimensions()),
        _ => None,
    }
}

/// Extend `grid` with empty rows up to the declared last row
fn pad_trailing_rows(
    grid: &mut Vec<Vec<CellValue>>,
    first_row: u32,
    dim: Dimensions,
    sheet: &str,
) {
    if grid.is_empty() || dim.end.0 < first_row {
        return;
    }

    let declared = (dim.end.0 - first_row) as usize + 1;
    let missing = declared.saturating_sub(grid.len());
    if missing == 0 {
        return;
    }
    if missing > MAX_TRAILING_BLANK_ROWS {
        tracing::debug!("Sheet '{sheet}': ignoring {missing} trailing blank rows");
        return;
    }

    grid.resize_with(grid.len() + missing, Vec::new);
}

/// Convert a calamine cell into a [`CellValue`]
fn cell_from_data(data: &Data) -> CellValue {
    match data {
        Data::Empty => CellValue::Empty,
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Float(f) => CellValue::Number(*f),
        Data::String(s) => CellValue::String(s.clone()),
        Data::Bool(b) => CellValue::Boolean(*b),
        Data::DateTime(dt) if dt.is_duration() => dt
            .as_duration()
            .map(|d| CellValue::String(format_duration(d)))
            .unwrap_or(CellValue::Number(dt.as_f64())),
        Data::DateTime(dt) => dt
            .as_datetime()
            .map(CellValue::DateTime)
            .unwrap_or(CellValue::Number(dt.as_f64())),
        Data::DateTimeIso(s) => parse_iso_datetime(s)
            .map(CellValue::DateTime)
            .unwrap_or_else(|| CellValue::String(s.clone())),
        Data::DurationIso(s) => CellValue::String(s.clone()),
        Data::Error(e) => CellValue::Error(e.to_string()),
    }
}

/// `[h]:mm:ss`, the way Excel shows elapsed time
fn format_duration(d: Duration) -> String {
    let secs = d.num_seconds();
    let sign = if secs < 0 { "-" } else { "" };
    let secs = secs.unsigned_abs();
    format!("{sign}{}:{:02}:{:02}", secs / 3600, secs / 60 % 60, secs % 60)
}

fn parse_iso_datetime(s: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}
