//! # campreport-render
//!
//! Formatted XLSX rendering for campaign reports.
//!
//! This crate provides:
//! - The multi-sheet report builder (`ReportRenderer`)
//! - Deterministic styling rules: header chrome, borders, status fills,
//!   column sizing, frozen header rows, filter ranges
//! - Report persistence with parent-directory creation
//!
//! ## Example
//!
//! ```rust,no_run
//! use campreport_core::{classify_campaigns, SummaryStats};
//! use campreport_render::{write_report, ReportRenderer};
//!
//! # fn demo(dataset: campreport_core::Dataset) -> Result<(), Box<dyn std::error::Error>> {
//! let campaigns = classify_campaigns(&dataset);
//! let stats = SummaryStats::compute(&dataset, &campaigns);
//!
//! let renderer = ReportRenderer::new();
//! let bytes = renderer.render_to_bytes(&dataset, &campaigns, &stats)?;
//! write_report(&bytes, std::path::Path::new("reports/campaign_update.xlsx"))?;
//! # Ok(())
//! # }
//! ```

pub mod layout;
pub mod report;
pub mod writer;

pub use report::{
    status_color_for, ReportRenderer, DETAILS_SHEET, RAW_DATA_EXCLUDED_COLUMNS, RAW_DATA_SHEET,
    STATUS_COLORS, SUMMARY_SHEET, TIMELINE_SHEET,
};
pub use writer::write_report;
