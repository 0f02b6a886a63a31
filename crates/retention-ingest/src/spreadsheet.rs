//! First-worksheet decoding for xlsx/xls/xlsb/ods workbooks.

use std::io::Cursor;

use calamine::{Data, Reader, open_workbook_auto_from_rs};

use crate::error::AttemptError;
use crate::frame::{RawCell, RawRows, normalize_header};
use crate::polars_utils::format_numeric;

/// Reads the first worksheet, using row 0 as the header row.
pub(crate) fn read_first_worksheet(bytes: &[u8]) -> Result<RawRows, AttemptError> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or(AttemptError::NoWorksheet)??;

    let mut rows = range
        .rows()
        .filter(|row| row.iter().any(|cell| !matches!(cell, Data::Empty)));
    let headers: Vec<String> = match rows.next() {
        Some(row) => row.iter().map(|cell| normalize_header(&cell_text(cell))).collect(),
        None => return Err(AttemptError::NoColumns),
    };
    let rows = rows
        .map(|row| row.iter().map(raw_cell).collect())
        .collect();
    Ok(RawRows { headers, rows })
}

fn raw_cell(cell: &Data) -> RawCell {
    match cell {
        Data::Empty => RawCell::Empty,
        Data::Float(value) => RawCell::Number(*value),
        Data::Int(value) => RawCell::Number(*value as f64),
        Data::String(text) => RawCell::from_text(text),
        other => RawCell::from_text(&cell_text(other)),
    }
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::Float(value) => format_numeric(*value),
        Data::Int(value) => value.to_string(),
        Data::String(text) => text.clone(),
        other => other.to_string(),
    }
}
