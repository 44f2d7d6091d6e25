//! # campreport-import
//!
//! Importers that load a tabular export file into a
//! [`Dataset`](campreport_core::Dataset).
//!
//! This crate provides:
//! - Delimited-text (CSV) import via the `csv` crate
//! - Spreadsheet import via `calamine`, with a fallback reader when the
//!   primary XLSX parser cannot open the file
//! - Extension-based format detection
//!
//! ## Example
//!
//! ```rust,no_run
//! use campreport_import::import_file;
//!
//! let dataset = import_file(std::path::Path::new("jira_export.csv"))?;
//! println!("{} rows, {} columns", dataset.len(), dataset.columns.len());
//! # Ok::<(), campreport_import::ImportError>(())
//! ```

mod delimited;
mod sheet;

use std::path::Path;

use campreport_core::Dataset;
use thiserror::Error;

/// Import error
///
/// Every variant is fatal: the pipeline never continues on a partially
/// loaded dataset.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("failed to read input file: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed delimited text: {0}")]
    Csv(#[from] csv::Error),

    #[error("unreadable spreadsheet: {0}")]
    Spreadsheet(String),

    #[error("workbook contains no worksheets")]
    NoWorksheet,

    #[error("input has no header row")]
    EmptyTable,
}

/// Supported input formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    /// Comma-separated values (.csv)
    Csv,
    /// Spreadsheet workbook (anything else)
    Spreadsheet,
}

/// Detect the input format from the file extension
pub fn detect_format(path: &Path) -> FileFormat {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("csv") => FileFormat::Csv,
        _ => FileFormat::Spreadsheet,
    }
}

/// Load a tabular file into a dataset.
///
/// The first row is the header; column order is preserved as discovered.
/// Per-cell kinds (number, date, text, empty) are inferred once here and
/// carried as tags on every [`campreport_core::CellValue`].
pub fn import_file(path: &Path) -> Result<Dataset, ImportError> {
    match detect_format(path) {
        FileFormat::Csv => delimited::import(path),
        FileFormat::Spreadsheet => sheet::import(path),
    }
}
