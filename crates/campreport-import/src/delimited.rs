//! Delimited-text (CSV) importer.
//!
//! Cell kinds are inferred per value: blank → empty, numeric parse →
//! number, then a small set of date layouts seen in tracker exports,
//! otherwise text.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use campreport_core::{CellValue, Dataset};
use chrono::{NaiveDate, NaiveDateTime};

use crate::ImportError;

/// Date-only layouts tried after numeric parsing fails
const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%d/%b/%Y", "%m/%d/%Y"];

/// Date-time layouts; the time of day is dropped on import
const DATETIME_FORMATS: [&str; 3] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%d/%b/%y %I:%M %p",
];

pub(crate) fn import(path: &Path) -> Result<Dataset, ImportError> {
    let file = File::open(path)?;
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(BufReader::new(file));

    let columns: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    if columns.is_empty() {
        return Err(ImportError::EmptyTable);
    }

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(infer_cell).collect());
    }

    Ok(Dataset::from_rows(columns, rows))
}

/// Infer the kind of one raw CSV field
fn infer_cell(raw: &str) -> CellValue {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return CellValue::Empty;
    }

    if let Ok(n) = trimmed.parse::<f64>() {
        if n.is_finite() {
            return CellValue::Number(n);
        }
    }

    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, format) {
            return CellValue::Date(dt.date());
        }
    }
    for format in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(trimmed, format) {
            return CellValue::Date(d);
        }
    }

    CellValue::Text(raw.to_string())
}
