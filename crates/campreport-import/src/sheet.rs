//! Spreadsheet importer backed by calamine.
//!
//! The primary reader is the XLSX parser; if it cannot open the file (some
//! tracker exports carry an `.xlsx` name but a different container), the
//! fallback lets calamine sniff the actual format before giving up.

use std::io::{Read, Seek};
use std::path::Path;

use calamine::{open_workbook, open_workbook_auto, Data, Range, Reader, Xlsx};
use campreport_core::{CellValue, Dataset};
use chrono::{NaiveDate, NaiveDateTime};

use crate::ImportError;

pub(crate) fn import(path: &Path) -> Result<Dataset, ImportError> {
    let range = match open_workbook::<Xlsx<_>, _>(path) {
        Ok(mut workbook) => first_sheet_range(&mut workbook)?,
        Err(primary) => {
            tracing::debug!(
                path = %path.display(),
                error = %primary,
                "xlsx reader failed, retrying with format auto-detection"
            );
            let mut workbook = open_workbook_auto(path).map_err(|fallback| {
                ImportError::Spreadsheet(format!("{primary}; auto-detection failed: {fallback}"))
            })?;
            first_sheet_range(&mut workbook)?
        }
    };

    range_to_dataset(&range)
}

/// Data range of the first worksheet
fn first_sheet_range<RS, R>(workbook: &mut R) -> Result<Range<Data>, ImportError>
where
    RS: Read + Seek,
    R: Reader<RS>,
    R::Error: std::fmt::Display,
{
    workbook
        .worksheet_range_at(0)
        .ok_or(ImportError::NoWorksheet)?
        .map_err(|e| ImportError::Spreadsheet(e.to_string()))
}

/// First row becomes the header; the rest become data rows
fn range_to_dataset(range: &Range<Data>) -> Result<Dataset, ImportError> {
    let mut rows_iter = range.rows();
    let header = rows_iter.next().ok_or(ImportError::EmptyTable)?;

    let columns: Vec<String> = header
        .iter()
        .map(|cell| convert_cell(cell).display_string())
        .collect();
    if columns.iter().all(String::is_empty) {
        return Err(ImportError::EmptyTable);
    }

    let rows: Vec<Vec<CellValue>> = rows_iter
        .map(|row| row.iter().map(convert_cell).collect())
        .collect();

    Ok(Dataset::from_rows(columns, rows))
}

/// Map one calamine cell onto the domain value.
///
/// Error cells become `Empty` (the report pipeline has no error kind), and
/// a serial datetime that cannot convert keeps its raw serial number.
fn convert_cell(data: &Data) -> CellValue {
    match data {
        Data::Empty => CellValue::Empty,
        Data::String(s) if s.is_empty() => CellValue::Empty,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Float(f) => CellValue::Number(*f),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(ndt) => CellValue::Date(ndt.date()),
            None => CellValue::Number(dt.as_f64()),
        },
        Data::DateTimeIso(s) => parse_iso(s),
        Data::DurationIso(s) => CellValue::Text(s.clone()),
        Data::Error(_) => CellValue::Empty,
    }
}

fn parse_iso(s: &str) -> CellValue {
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return CellValue::Date(dt.date());
    }
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return CellValue::Date(d);
    }
    CellValue::Text(s.to_string())
}
