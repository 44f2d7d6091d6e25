//! Integration tests for report rendering
//!
//! Each test renders a workbook to a buffer and reads it back with calamine
//! to verify sheet order and cell values. Styling metadata is not read back;
//! the color-matching policy is covered by unit tests in the crate.

use std::io::Cursor;

use calamine::{Data, Range, Reader, Xlsx};
use campreport_core::{classify_campaigns, CellValue, Dataset, SummaryStats};
use campreport_render::{ReportRenderer, DETAILS_SHEET, RAW_DATA_SHEET, SUMMARY_SHEET, TIMELINE_SHEET};
use chrono::{NaiveDate, NaiveDateTime};

fn generated_at() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 3, 1)
        .unwrap()
        .and_hms_opt(9, 30, 0)
        .unwrap()
}

/// Five tracker rows; three campaigns with statuses Done, Done, In Progress
fn sample_dataset() -> Dataset {
    let date = |day| CellValue::Date(NaiveDate::from_ymd_opt(2026, 1, day).unwrap());
    Dataset::from_rows(
        vec![
            "Key".into(),
            "Issue Type".into(),
            "Status".into(),
            "created_date".into(),
            "Project ID".into(),
        ],
        vec![
            vec![
                CellValue::text("C-1"),
                CellValue::text("Campaign"),
                CellValue::text("Done"),
                date(20),
                CellValue::Number(10.0),
            ],
            vec![
                CellValue::text("B-1"),
                CellValue::text("Bug"),
                CellValue::text("Todo"),
                date(2),
                CellValue::Number(10.0),
            ],
            vec![
                CellValue::text("C-2"),
                CellValue::text("Campaign"),
                CellValue::text("Done"),
                date(5),
                CellValue::Number(10.0),
            ],
            vec![
                CellValue::text("T-1"),
                CellValue::text("Task"),
                CellValue::text("Blocked"),
                date(9),
                CellValue::Number(10.0),
            ],
            vec![
                CellValue::text("C-3"),
                CellValue::text("Campaign"),
                CellValue::text("In Progress"),
                date(11),
                CellValue::Number(10.0),
            ],
        ],
    )
}

fn render(dataset: &Dataset) -> Vec<u8> {
    let campaigns = classify_campaigns(dataset);
    let stats = SummaryStats::compute(dataset, &campaigns);
    ReportRenderer::new()
        .generated_at(generated_at())
        .render_to_bytes(dataset, &campaigns, &stats)
        .unwrap()
}

fn open(bytes: &[u8]) -> Xlsx<Cursor<Vec<u8>>> {
    Xlsx::new(Cursor::new(bytes.to_vec())).unwrap()
}

fn cell_str(range: &Range<Data>, row: u32, col: u32) -> String {
    match range.get_value((row, col)) {
        Some(value) => value.to_string(),
        None => String::new(),
    }
}

fn cell_num(range: &Range<Data>, row: u32, col: u32) -> f64 {
    match range.get_value((row, col)) {
        Some(Data::Float(f)) => *f,
        Some(Data::Int(i)) => *i as f64,
        other => panic!("expected number at ({row},{col}), got {other:?}"),
    }
}

#[test]
fn workbook_is_valid_xlsx() {
    let bytes = render(&sample_dataset());
    assert!(bytes.len() > 100);
    assert_eq!(&bytes[0..2], b"PK");
}

#[test]
fn sheet_order_is_fixed() {
    let bytes = render(&sample_dataset());
    let workbook = open(&bytes);
    assert_eq!(
        workbook.sheet_names(),
        vec![SUMMARY_SHEET, RAW_DATA_SHEET, DETAILS_SHEET, TIMELINE_SHEET]
    );
}

#[test]
fn timeline_absent_without_date_like_column() {
    let dataset = Dataset::from_rows(
        vec!["Key".into(), "Issue Type".into(), "Status".into()],
        vec![vec![
            CellValue::text("C-1"),
            CellValue::text("Campaign"),
            CellValue::text("Done"),
        ]],
    );
    let bytes = render(&dataset);
    let workbook = open(&bytes);
    assert_eq!(
        workbook.sheet_names(),
        vec![SUMMARY_SHEET, RAW_DATA_SHEET, DETAILS_SHEET]
    );
}

#[test]
fn summary_sheet_reports_counts_and_breakdown() {
    let bytes = render(&sample_dataset());
    let mut workbook = open(&bytes);
    let range = workbook.worksheet_range(SUMMARY_SHEET).unwrap();

    assert_eq!(cell_str(&range, 0, 0), "Campaign Update Report");
    assert_eq!(cell_str(&range, 1, 0), "Generated");
    assert_eq!(cell_str(&range, 1, 1), "2026-03-01 09:30:00");
    assert_eq!(cell_str(&range, 3, 0), "Total Rows");
    assert_eq!(cell_num(&range, 3, 1), 5.0);
    assert_eq!(cell_str(&range, 4, 0), "Total Campaigns");
    assert_eq!(cell_num(&range, 4, 1), 3.0);

    assert_eq!(cell_str(&range, 6, 0), "Status Breakdown");
    assert_eq!(cell_str(&range, 7, 0), "Done");
    assert_eq!(cell_num(&range, 7, 1), 2.0);
    assert_eq!(cell_str(&range, 8, 0), "In Progress");
    assert_eq!(cell_num(&range, 8, 1), 1.0);
}

#[test]
fn raw_data_drops_project_columns_and_renames() {
    let bytes = render(&sample_dataset());
    let mut workbook = open(&bytes);
    let range = workbook.worksheet_range(RAW_DATA_SHEET).unwrap();

    assert_eq!(cell_str(&range, 0, 0), "Key");
    assert_eq!(cell_str(&range, 0, 1), "Issue Type");
    assert_eq!(cell_str(&range, 0, 2), "Status");
    assert_eq!(cell_str(&range, 0, 3), "Created Date");
    // "Project ID" is excluded, so the sheet is four columns wide
    assert_eq!(range.get_size().1, 4);
    // All five rows survive, campaigns and non-campaigns alike
    assert_eq!(range.get_size().0, 6);
    assert_eq!(cell_str(&range, 2, 0), "B-1");
}

#[test]
fn details_sheet_holds_only_campaign_rows() {
    let bytes = render(&sample_dataset());
    let mut workbook = open(&bytes);
    let range = workbook.worksheet_range(DETAILS_SHEET).unwrap();

    // Header plus three campaign rows; all columns kept, renamed
    assert_eq!(range.get_size().0, 4);
    assert_eq!(cell_str(&range, 0, 4), "Project Id");
    assert_eq!(cell_str(&range, 1, 0), "C-1");
    assert_eq!(cell_str(&range, 2, 0), "C-2");
    assert_eq!(cell_str(&range, 3, 0), "C-3");
    assert_eq!(cell_str(&range, 3, 2), "In Progress");
}

#[test]
fn timeline_sorts_campaigns_by_created_date() {
    let bytes = render(&sample_dataset());
    let mut workbook = open(&bytes);
    let range = workbook.worksheet_range(TIMELINE_SHEET).unwrap();

    // Campaign created dates: C-1 = Jan 20, C-2 = Jan 5, C-3 = Jan 11
    assert_eq!(cell_str(&range, 1, 0), "C-2");
    assert_eq!(cell_str(&range, 2, 0), "C-3");
    assert_eq!(cell_str(&range, 3, 0), "C-1");
    // Dates render as ISO strings
    assert_eq!(cell_str(&range, 1, 3), "2026-01-05");
}

#[test]
fn empty_campaign_subset_still_renders_header_only_details() {
    let dataset = Dataset::from_rows(
        vec!["Key".into(), "Issue Type".into()],
        vec![vec![CellValue::text("B-1"), CellValue::text("Bug")]],
    );
    let bytes = render(&dataset);
    let mut workbook = open(&bytes);
    let range = workbook.worksheet_range(DETAILS_SHEET).unwrap();

    assert_eq!(range.get_size().0, 1);
    assert_eq!(cell_str(&range, 0, 0), "Key");
}

#[test]
fn rendering_is_idempotent_for_a_pinned_timestamp() {
    let dataset = sample_dataset();
    let first = render(&dataset);
    let second = render(&dataset);

    let mut a = open(&first);
    let mut b = open(&second);
    assert_eq!(a.sheet_names(), b.sheet_names());
    for name in a.sheet_names() {
        let ra = a.worksheet_range(&name).unwrap();
        let rb = b.worksheet_range(&name).unwrap();
        assert_eq!(ra.cells().collect::<Vec<_>>(), rb.cells().collect::<Vec<_>>());
    }
}
