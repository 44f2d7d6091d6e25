//! Multi-sheet campaign report builder.
//!
//! Assembles the report workbook in a fixed sheet order:
//! - Summary: key/value overview with the status breakdown
//! - Raw Data: the full import minus internal project columns
//! - Relevant Details: the campaign subset with status fills
//! - Timeline: campaign rows sorted by the first date-like column,
//!   present only when such a column exists
//!
//! All styling is deterministic; the only run-dependent value is the
//! generation timestamp, which callers can pin for reproducible output.

use campreport_core::{display_label, CellValue, Dataset, RenderError, SummaryStats};
use chrono::NaiveDateTime;
use rust_xlsxwriter::{Format, FormatAlign, FormatBorder, Workbook, Worksheet};

use crate::layout;

/// Fill colors keyed by lowercase status substring.
///
/// Keys are evaluated in declaration order; the first key contained in the
/// lowercased cell value wins, and no match leaves the cell unstyled.
pub const STATUS_COLORS: [(&str, u32); 4] = [
    ("done", 0xC6EFCE),
    ("in progress", 0xFFF2CC),
    ("todo", 0xFCE4D6),
    ("blocked", 0xF8CBAD),
];

/// Columns stripped from the Raw Data sheet, matched case-insensitively
/// against the raw (pre-rename) column names
pub const RAW_DATA_EXCLUDED_COLUMNS: [&str; 2] = ["project id", "project url"];

pub const SUMMARY_SHEET: &str = "Summary";
pub const RAW_DATA_SHEET: &str = "Raw Data";
pub const DETAILS_SHEET: &str = "Relevant Details";
pub const TIMELINE_SHEET: &str = "Timeline";

const HEADER_BACKGROUND: u32 = 0x1E3A2F;
const SUMMARY_KEY_WIDTH: f64 = 25.0;
const SUMMARY_VALUE_WIDTH: f64 = 15.0;

/// The fill color a status value would receive, if any
pub fn status_color_for(value: &str) -> Option<u32> {
    let lowered = value.to_lowercase();
    STATUS_COLORS
        .iter()
        .find(|(key, _)| lowered.contains(key))
        .map(|(_, color)| *color)
}

/// Campaign report renderer
#[derive(Clone, Debug)]
pub struct ReportRenderer {
    /// Title written to the Summary sheet
    pub title: String,
    /// Upper bound for auto-sized column widths
    pub max_column_width: f64,
    /// Timestamp written to the Summary sheet
    pub generated_at: NaiveDateTime,
}

impl Default for ReportRenderer {
    fn default() -> Self {
        Self {
            title: "Campaign Update Report".into(),
            max_column_width: 50.0,
            generated_at: chrono::Local::now().naive_local(),
        }
    }
}

impl ReportRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the report title
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the column width cap
    pub fn max_column_width(mut self, width: f64) -> Self {
        self.max_column_width = width;
        self
    }

    /// Pin the generation timestamp (reports are otherwise stamped with the
    /// local time at construction)
    pub fn generated_at(mut self, at: NaiveDateTime) -> Self {
        self.generated_at = at;
        self
    }

    /// Assemble the report workbook and return its bytes.
    ///
    /// The workbook is built fully in memory; nothing touches disk here, so
    /// a failed assembly cannot leave a partial file behind.
    pub fn render_to_bytes(
        &self,
        dataset: &Dataset,
        campaigns: &Dataset,
        stats: &SummaryStats,
    ) -> Result<Vec<u8>, RenderError> {
        let mut workbook = Workbook::new();
        let formats = self.create_formats();

        self.add_summary_sheet(&mut workbook, &formats, stats)?;

        let raw = dataset
            .without_columns(&RAW_DATA_EXCLUDED_COLUMNS)
            .renamed(display_label);
        self.add_data_sheet(&mut workbook, RAW_DATA_SHEET, &raw, false, &formats)?;

        let details = campaigns.renamed(display_label);
        self.add_data_sheet(&mut workbook, DETAILS_SHEET, &details, true, &formats)?;

        if let Some(timeline) = timeline_table(&details) {
            self.add_data_sheet(&mut workbook, TIMELINE_SHEET, &timeline, false, &formats)?;
        }

        workbook
            .save_to_buffer()
            .map_err(|e| RenderError::Workbook(e.to_string()))
    }

    /// Create the reusable cell formats
    fn create_formats(&self) -> ReportFormats {
        let title = Format::new().set_bold().set_font_size(14);

        let header = Format::new()
            .set_bold()
            .set_font_size(11)
            .set_font_color(0xFFFFFF)
            .set_background_color(HEADER_BACKGROUND)
            .set_align(FormatAlign::Center)
            .set_align(FormatAlign::VerticalCenter)
            .set_text_wrap()
            .set_border(FormatBorder::Thin);

        let cell = Format::new()
            .set_border(FormatBorder::Thin)
            .set_align(FormatAlign::Top)
            .set_text_wrap();

        let status = STATUS_COLORS
            .iter()
            .map(|(key, color)| (*key, cell.clone().set_background_color(*color)))
            .collect();

        ReportFormats {
            title,
            header,
            cell,
            status,
        }
    }

    /// Add the key/value Summary sheet
    fn add_summary_sheet(
        &self,
        workbook: &mut Workbook,
        formats: &ReportFormats,
        stats: &SummaryStats,
    ) -> Result<(), RenderError> {
        let sheet = workbook.add_worksheet();
        sheet
            .set_name(SUMMARY_SHEET)
            .map_err(|e| RenderError::Workbook(e.to_string()))?;

        sheet
            .write_with_format(0, 0, self.title.as_str(), &formats.title)
            .map_err(|e| RenderError::Workbook(e.to_string()))?;

        let timestamp = self.generated_at.format("%Y-%m-%d %H:%M:%S").to_string();
        write_key_value(sheet, 1, "Generated", &CellValue::Text(timestamp))?;

        // Row 2 stays blank
        write_key_value(
            sheet,
            3,
            "Total Rows",
            &CellValue::Number(stats.total_rows as f64),
        )?;
        write_key_value(
            sheet,
            4,
            "Total Campaigns",
            &CellValue::Number(stats.campaign_rows as f64),
        )?;

        if let Some(breakdown) = &stats.status_breakdown {
            let mut row = 6u32;
            sheet
                .write(row, 0, "Status Breakdown")
                .map_err(|e| RenderError::Workbook(e.to_string()))?;
            for (status, count) in breakdown {
                row += 1;
                write_key_value(sheet, row, status, &CellValue::Number(*count as f64))?;
            }
        }

        sheet.set_column_width(0, SUMMARY_KEY_WIDTH).ok();
        sheet.set_column_width(1, SUMMARY_VALUE_WIDTH).ok();

        Ok(())
    }

    /// Add one data sheet: styled header, bordered cells, sized columns,
    /// frozen header row, filter over the populated range. Status fills are
    /// applied only where `style_status` is set (the Relevant Details sheet).
    fn add_data_sheet(
        &self,
        workbook: &mut Workbook,
        name: &str,
        table: &Dataset,
        style_status: bool,
        formats: &ReportFormats,
    ) -> Result<(), RenderError> {
        let sheet = workbook.add_worksheet();
        sheet
            .set_name(name)
            .map_err(|e| RenderError::Workbook(e.to_string()))?;

        if table.columns.is_empty() {
            return Ok(());
        }

        layout::write_header_row(sheet, &table.columns, &formats.header)?;

        let status_columns: Vec<bool> = table
            .columns
            .iter()
            .map(|c| c.to_lowercase().contains("status"))
            .collect();

        for (r, row) in table.rows.iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                let format = if style_status && status_columns[c] {
                    status_format(cell, formats).unwrap_or(&formats.cell)
                } else {
                    &formats.cell
                };
                write_cell(sheet, r as u32 + 1, c as u16, cell, format)?;
            }
        }

        let widths = layout::column_widths(&table.columns, &table.rows, self.max_column_width);
        layout::apply_column_widths(sheet, &widths);
        layout::freeze_and_filter(sheet, table.len() as u32, table.columns.len() as u16)?;

        Ok(())
    }
}

/// Formats shared across all sheets of one report
struct ReportFormats {
    title: Format,
    header: Format,
    cell: Format,
    status: Vec<(&'static str, Format)>,
}

/// First status format whose key the lowercased value contains
fn status_format<'a>(cell: &CellValue, formats: &'a ReportFormats) -> Option<&'a Format> {
    let lowered = cell.display_string().to_lowercase();
    formats
        .status
        .iter()
        .find(|(key, _)| lowered.contains(key))
        .map(|(_, format)| format)
}

/// Write one cell with its natural Excel type; dates render as ISO strings
/// and non-finite numbers degrade to their text form rather than failing.
fn write_cell(
    sheet: &mut Worksheet,
    row: u32,
    col: u16,
    cell: &CellValue,
    format: &Format,
) -> Result<(), RenderError> {
    let result = match cell {
        CellValue::Empty => sheet.write_with_format(row, col, "", format),
        CellValue::Text(s) => sheet.write_with_format(row, col, s.as_str(), format),
        CellValue::Number(n) if n.is_finite() => sheet.write_with_format(row, col, *n, format),
        CellValue::Bool(b) => sheet.write_with_format(row, col, *b, format),
        other => sheet.write_with_format(row, col, other.display_string(), format),
    };
    result
        .map(|_| ())
        .map_err(|e| RenderError::Workbook(e.to_string()))
}

/// Unformatted key/value pair on the Summary sheet
fn write_key_value(
    sheet: &mut Worksheet,
    row: u32,
    key: &str,
    value: &CellValue,
) -> Result<(), RenderError> {
    sheet
        .write(row, 0, key)
        .map_err(|e| RenderError::Workbook(e.to_string()))?;
    match value {
        CellValue::Number(n) => sheet.write(row, 1, *n),
        other => sheet.write(row, 1, other.display_string()),
    }
    .map_err(|e| RenderError::Workbook(e.to_string()))?;
    Ok(())
}

/// Timeline rows, or `None` when no date-like column exists.
///
/// The first renamed column containing "date" or "created" (in declared
/// column order) drives an ascending sort; a column that cannot be ordered
/// keeps the original row order instead of aborting the report.
fn timeline_table(details: &Dataset) -> Option<Dataset> {
    let index = details.columns.iter().position(|c| {
        let lowered = c.to_lowercase();
        lowered.contains("date") || lowered.contains("created")
    })?;

    match details.sorted_by_column(index) {
        Ok(sorted) => Some(sorted),
        Err(err) => {
            tracing::debug!(%err, "timeline sort fell back to original row order");
            Some(details.clone())
        }
    }
}
