//! # campreport-core
//!
//! Core domain model for the campreport report generator.
//!
//! This crate provides:
//! - Domain types: `Dataset`, `CellValue`, `SummaryStats`
//! - Classification of imported rows into the campaign subset
//! - The column display transform shared by every sheet
//! - Error types for rendering and persistence
//!
//! ## Example
//!
//! ```rust
//! use campreport_core::{classify_campaigns, CellValue, Dataset, SummaryStats};
//!
//! let dataset = Dataset::from_rows(
//!     vec!["Issue Type".into(), "Status".into()],
//!     vec![
//!         vec![CellValue::text("Campaign"), CellValue::text("Done")],
//!         vec![CellValue::text("Bug"), CellValue::text("Todo")],
//!     ],
//! );
//!
//! let campaigns = classify_campaigns(&dataset);
//! let stats = SummaryStats::compute(&dataset, &campaigns);
//! assert_eq!(stats.total_rows, 2);
//! assert_eq!(stats.campaign_rows, 1);
//! ```

mod stats;
mod value;

pub use stats::{status_breakdown, SummaryStats};
pub use value::{CellValue, SortKey};

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// Classification constants
// ============================================================================

/// Column names recognized as the issue-type column, in lookup order.
///
/// The first alias that matches a column (case-insensitively) wins.
pub const ISSUE_TYPE_ALIASES: [&str; 3] = ["issue type", "issuetype", "type"];

/// Issue-type value that marks a row as a campaign (compared lowercased)
pub const CAMPAIGN_ISSUE_TYPE: &str = "campaign";

// ============================================================================
// Dataset
// ============================================================================

/// An imported table: ordered column names plus rows of loose values.
///
/// Columns are discovered from the input header and preserved in original
/// order. Every row holds exactly `columns.len()` cells — `from_rows`
/// normalizes ragged input so the invariant holds structurally.
///
/// Datasets are never mutated once constructed; every transform returns a
/// new value, so the raw table and anything derived from it can coexist.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    /// Column names in discovery order
    pub columns: Vec<String>,
    /// Data rows, each aligned to `columns`
    pub rows: Vec<Vec<CellValue>>,
}

impl Dataset {
    /// Build a dataset, padding or truncating each row to the column count
    pub fn from_rows(columns: Vec<String>, rows: Vec<Vec<CellValue>>) -> Self {
        let width = columns.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, CellValue::Empty);
                row
            })
            .collect();
        Self { columns, rows }
    }

    /// Number of data rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Find the first column matching any of the given lowercase aliases.
    ///
    /// Aliases are tried in their declared order; within one alias, columns
    /// are scanned in dataset order. Matching is case-insensitive.
    pub fn find_column(&self, aliases: &[&str]) -> Option<usize> {
        for alias in aliases {
            if let Some(idx) = self
                .columns
                .iter()
                .position(|c| c.to_lowercase() == *alias)
            {
                return Some(idx);
            }
        }
        None
    }

    /// Rows for which the predicate holds, as a new dataset
    pub fn filter_rows<P>(&self, mut predicate: P) -> Self
    where
        P: FnMut(&[CellValue]) -> bool,
    {
        Self {
            columns: self.columns.clone(),
            rows: self
                .rows
                .iter()
                .filter(|row| predicate(row))
                .cloned()
                .collect(),
        }
    }

    /// Drop every column whose name appears in `excluded` (case-insensitive)
    pub fn without_columns(&self, excluded: &[&str]) -> Self {
        let keep: Vec<usize> = self
            .columns
            .iter()
            .enumerate()
            .filter(|(_, name)| {
                let lowered = name.to_lowercase();
                !excluded.iter().any(|e| lowered == *e)
            })
            .map(|(i, _)| i)
            .collect();

        Self {
            columns: keep.iter().map(|&i| self.columns[i].clone()).collect(),
            rows: self
                .rows
                .iter()
                .map(|row| keep.iter().map(|&i| row[i].clone()).collect())
                .collect(),
        }
    }

    /// Rename every column through the given transform
    pub fn renamed<F>(&self, transform: F) -> Self
    where
        F: Fn(&str) -> String,
    {
        Self {
            columns: self.columns.iter().map(|c| transform(c)).collect(),
            rows: self.rows.clone(),
        }
    }

    /// Rows sorted ascending by the given column, as a new dataset.
    ///
    /// Blank cells sort after every value. All non-blank cells in the column
    /// must share one sort kind (number, date, or text); otherwise the column
    /// is not orderable and `NotComparable` is returned so the caller can
    /// fall back to the original row order.
    pub fn sorted_by_column(&self, index: usize) -> Result<Self, NotComparable> {
        let not_comparable = || NotComparable {
            column: self.columns.get(index).cloned().unwrap_or_default(),
        };

        let mut keys: Vec<Option<SortKey>> = Vec::with_capacity(self.rows.len());
        for row in &self.rows {
            let cell = row.get(index).ok_or_else(not_comparable)?;
            if cell.is_empty() {
                keys.push(None);
            } else {
                keys.push(Some(cell.sort_key().ok_or_else(not_comparable)?));
            }
        }

        if let Some(first) = keys.iter().flatten().next() {
            if !keys.iter().flatten().all(|k| k.same_kind(first)) {
                return Err(not_comparable());
            }
        }

        let mut order: Vec<usize> = (0..self.rows.len()).collect();
        order.sort_by(|&a, &b| match (&keys[a], &keys[b]) {
            (Some(ka), Some(kb)) => ka.cmp_same_kind(kb),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => std::cmp::Ordering::Equal,
        });

        Ok(Self {
            columns: self.columns.clone(),
            rows: order.iter().map(|&i| self.rows[i].clone()).collect(),
        })
    }
}

// ============================================================================
// Classifier
// ============================================================================

/// Partition a dataset into its campaign subset.
///
/// The issue-type column is located through `ISSUE_TYPE_ALIASES`; rows whose
/// value lowercases to exactly `"campaign"` are kept. When no alias matches
/// any column, the whole dataset is treated as relevant (fail-open) — an
/// export without a recognized type column must not silently drop all data.
///
/// The source dataset is untouched; an empty result is valid and is the
/// caller's cue to report a no-op rather than an error.
pub fn classify_campaigns(dataset: &Dataset) -> Dataset {
    match dataset.find_column(&ISSUE_TYPE_ALIASES) {
        Some(idx) => dataset.filter_rows(|row| {
            row[idx]
                .as_text()
                .is_some_and(|s| s.to_lowercase() == CAMPAIGN_ISSUE_TYPE)
        }),
        None => dataset.clone(),
    }
}

// ============================================================================
// Display transform
// ============================================================================

/// Column name as shown in sheet headers: underscores become spaces, then
/// each word is title-cased (word boundaries at non-alphabetic characters).
pub fn display_label(column: &str) -> String {
    let mut out = String::with_capacity(column.len());
    let mut prev_alpha = false;
    for ch in column.chars() {
        if ch == '_' {
            out.push(' ');
            prev_alpha = false;
        } else if ch.is_alphabetic() {
            if prev_alpha {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(ch);
            prev_alpha = false;
        }
    }
    out
}

// ============================================================================
// Errors
// ============================================================================

/// Workbook assembly error
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("workbook error: {0}")]
    Workbook(String),
}

/// Report persistence error
#[derive(Debug, Error)]
pub enum WriteError {
    #[error("failed to create output directory {}: {source}", .path.display())]
    CreateDirs {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write report to {}: {source}", .path.display())]
    Save {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// A column could not be ordered (mixed or unorderable value kinds)
#[derive(Debug, Error)]
#[error("column {column:?} mixes value kinds and cannot be ordered")]
pub struct NotComparable {
    pub column: String,
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn sample() -> Dataset {
        Dataset::from_rows(
            vec![
                "Key".into(),
                "Issue Type".into(),
                "Status".into(),
                "due_date".into(),
            ],
            vec![
                vec![
                    CellValue::text("C-1"),
                    CellValue::text("Campaign"),
                    CellValue::text("Done"),
                    CellValue::Date(NaiveDate::from_ymd_opt(2026, 2, 1).unwrap()),
                ],
                vec![
                    CellValue::text("B-7"),
                    CellValue::text("Bug"),
                    CellValue::text("Todo"),
                    CellValue::Date(NaiveDate::from_ymd_opt(2026, 1, 15).unwrap()),
                ],
                vec![
                    CellValue::text("C-2"),
                    CellValue::text("CAMPAIGN"),
                    CellValue::text("In Progress"),
                    CellValue::Empty,
                ],
            ],
        )
    }

    #[test]
    fn classify_keeps_campaign_rows_case_insensitively() {
        let dataset = sample();
        let campaigns = classify_campaigns(&dataset);
        assert_eq!(campaigns.len(), 2);
        assert_eq!(campaigns.rows[0][0], CellValue::text("C-1"));
        assert_eq!(campaigns.rows[1][0], CellValue::text("C-2"));
        // Source stays intact
        assert_eq!(dataset.len(), 3);
    }

    #[test]
    fn classify_fails_open_without_type_column() {
        let dataset = Dataset::from_rows(
            vec!["Key".into(), "Status".into()],
            vec![
                vec![CellValue::text("X-1"), CellValue::text("Done")],
                vec![CellValue::text("X-2"), CellValue::text("Todo")],
            ],
        );
        let campaigns = classify_campaigns(&dataset);
        assert_eq!(campaigns, dataset);
    }

    #[test]
    fn classify_ignores_non_text_type_cells() {
        let dataset = Dataset::from_rows(
            vec!["Type".into()],
            vec![
                vec![CellValue::Number(1.0)],
                vec![CellValue::text("Campaign")],
            ],
        );
        assert_eq!(classify_campaigns(&dataset).len(), 1);
    }

    #[test]
    fn classify_no_matches_yields_empty_subset() {
        let dataset = Dataset::from_rows(
            vec!["Issue Type".into()],
            vec![vec![CellValue::text("Bug")], vec![CellValue::text("Task")]],
        );
        let campaigns = classify_campaigns(&dataset);
        assert!(campaigns.is_empty());
        assert_eq!(campaigns.columns, dataset.columns);
    }

    #[test]
    fn alias_order_wins_over_column_order() {
        // "type" appears first in the file, but "issue type" is the first alias
        let dataset = Dataset::from_rows(
            vec!["Type".into(), "Issue Type".into()],
            vec![vec![
                CellValue::text("Campaign"),
                CellValue::text("Bug"),
            ]],
        );
        assert_eq!(dataset.find_column(&ISSUE_TYPE_ALIASES), Some(1));
        assert!(classify_campaigns(&dataset).is_empty());
    }

    #[test]
    fn from_rows_pads_ragged_rows() {
        let dataset = Dataset::from_rows(
            vec!["A".into(), "B".into(), "C".into()],
            vec![vec![CellValue::text("x")]],
        );
        assert_eq!(dataset.rows[0].len(), 3);
        assert_eq!(dataset.rows[0][2], CellValue::Empty);
    }

    #[test]
    fn without_columns_is_case_insensitive() {
        let dataset = Dataset::from_rows(
            vec!["Key".into(), "Project ID".into(), "Project URL".into()],
            vec![vec![
                CellValue::text("C-1"),
                CellValue::Number(10.0),
                CellValue::text("https://example"),
            ]],
        );
        let trimmed = dataset.without_columns(&["project id", "project url"]);
        assert_eq!(trimmed.columns, vec!["Key".to_string()]);
        assert_eq!(trimmed.rows[0], vec![CellValue::text("C-1")]);
    }

    #[test]
    fn renamed_applies_display_transform() {
        let dataset = sample();
        let renamed = dataset.renamed(display_label);
        assert_eq!(renamed.columns[3], "Due Date");
        assert_eq!(renamed.rows, dataset.rows);
    }

    #[test]
    fn sorted_by_date_column_puts_blanks_last() {
        let dataset = sample();
        let sorted = dataset.sorted_by_column(3).unwrap();
        assert_eq!(sorted.rows[0][0], CellValue::text("B-7"));
        assert_eq!(sorted.rows[1][0], CellValue::text("C-1"));
        assert_eq!(sorted.rows[2][0], CellValue::text("C-2"));
    }

    #[test]
    fn sorted_by_mixed_column_is_not_comparable() {
        let dataset = Dataset::from_rows(
            vec!["When".into()],
            vec![
                vec![CellValue::text("yesterday")],
                vec![CellValue::Number(42.0)],
            ],
        );
        let err = dataset.sorted_by_column(0).unwrap_err();
        assert_eq!(err.column, "When");
    }

    #[test]
    fn sort_is_stable_for_equal_keys() {
        let dataset = Dataset::from_rows(
            vec!["N".into(), "Tag".into()],
            vec![
                vec![CellValue::Number(1.0), CellValue::text("first")],
                vec![CellValue::Number(1.0), CellValue::text("second")],
                vec![CellValue::Number(0.0), CellValue::text("third")],
            ],
        );
        let sorted = dataset.sorted_by_column(0).unwrap();
        assert_eq!(sorted.rows[0][1], CellValue::text("third"));
        assert_eq!(sorted.rows[1][1], CellValue::text("first"));
        assert_eq!(sorted.rows[2][1], CellValue::text("second"));
    }

    #[test]
    fn display_label_title_cases_words() {
        assert_eq!(display_label("due_date"), "Due Date");
        assert_eq!(display_label("ISSUE TYPE"), "Issue Type");
        assert_eq!(display_label("project_url"), "Project Url");
        assert_eq!(display_label("created"), "Created");
        assert_eq!(display_label("sprint-2_end"), "Sprint-2 End");
    }
}
