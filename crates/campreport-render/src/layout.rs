//! Shared sheet layout helpers.
//!
//! Every data sheet gets the same chrome: a styled header row, auto-sized
//! columns, a frozen header, and a filter control spanning the populated
//! range. The helpers here are used by each sheet builder in `report`.

use campreport_core::{CellValue, RenderError};
use rust_xlsxwriter::{Format, Worksheet};

/// Width used when a column has no measurable cell at all
pub const DEFAULT_COLUMN_WIDTH: f64 = 10.0;

/// Breathing room added to the longest rendered value
const WIDTH_PADDING: f64 = 2.0;

/// Per-column widths: longest rendered value (header included) plus padding,
/// capped at `cap`.
///
/// Cells that cannot be measured (blanks, non-finite numbers) are skipped;
/// a column where nothing measures falls back to [`DEFAULT_COLUMN_WIDTH`]
/// rather than collapsing to zero.
pub fn column_widths(columns: &[String], rows: &[Vec<CellValue>], cap: f64) -> Vec<f64> {
    columns
        .iter()
        .enumerate()
        .map(|(idx, name)| {
            let cells = rows
                .iter()
                .filter_map(|row| row.get(idx))
                .filter_map(measured_width);
            match cells.chain(text_width(name)).max() {
                Some(longest) => (longest as f64 + WIDTH_PADDING).min(cap),
                None => DEFAULT_COLUMN_WIDTH,
            }
        })
        .collect()
}

fn text_width(s: &str) -> Option<usize> {
    let chars = s.chars().count();
    (chars > 0).then_some(chars)
}

fn measured_width(cell: &CellValue) -> Option<usize> {
    match cell {
        CellValue::Empty => None,
        CellValue::Number(n) if !n.is_finite() => None,
        other => text_width(&other.display_string()),
    }
}

/// Apply computed widths to a sheet. Sizing is cosmetic, so failures are
/// ignored rather than allowed to abort the run.
pub fn apply_column_widths(sheet: &mut Worksheet, widths: &[f64]) {
    for (idx, width) in widths.iter().enumerate() {
        sheet.set_column_width(idx as u16, *width).ok();
    }
}

/// Write the styled header row across row 0
pub fn write_header_row(
    sheet: &mut Worksheet,
    labels: &[String],
    format: &Format,
) -> Result<(), RenderError> {
    for (col, label) in labels.iter().enumerate() {
        sheet
            .write_with_format(0, col as u16, label.as_str(), format)
            .map_err(|e| RenderError::Workbook(e.to_string()))?;
    }
    Ok(())
}

/// Freeze the header row and span the filter control over header plus data
pub fn freeze_and_filter(
    sheet: &mut Worksheet,
    data_rows: u32,
    columns: u16,
) -> Result<(), RenderError> {
    if columns == 0 {
        return Ok(());
    }
    sheet.set_freeze_panes(1, 0).ok();
    sheet
        .autofilter(0, 0, data_rows, columns - 1)
        .map_err(|e| RenderError::Workbook(e.to_string()))?;
    Ok(())
}
