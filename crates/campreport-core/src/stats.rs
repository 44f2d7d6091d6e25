//! Summary statistics over a classified dataset.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::{CellValue, Dataset};

/// Column name that carries ticket status, matched case-insensitively
const STATUS_COLUMN: &str = "status";

/// Row counts and status frequencies for one report run
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SummaryStats {
    /// Rows in the full imported dataset
    pub total_rows: usize,
    /// Rows in the campaign subset
    pub campaign_rows: usize,
    /// Status value → occurrence count, descending by count.
    ///
    /// `None` when the campaign subset has no status column; the Summary
    /// sheet omits the breakdown section entirely in that case.
    pub status_breakdown: Option<Vec<(String, u64)>>,
}

impl SummaryStats {
    /// Compute statistics for a dataset and its campaign subset.
    ///
    /// Counts are pure row counts with no missing-value filtering. The
    /// breakdown orders by descending count; equal counts keep the order in
    /// which distinct status values were first seen in the subset.
    pub fn compute(dataset: &Dataset, campaigns: &Dataset) -> Self {
        Self {
            total_rows: dataset.len(),
            campaign_rows: campaigns.len(),
            status_breakdown: status_breakdown(campaigns),
        }
    }
}

/// Frequency table of the status column, or `None` if the column is absent.
///
/// Blank cells are skipped, matching how the original export tooling counted
/// values. Non-text cells count under their rendered form.
pub fn status_breakdown(campaigns: &Dataset) -> Option<Vec<(String, u64)>> {
    let status_idx = campaigns.find_column(&[STATUS_COLUMN])?;

    let mut counts: Vec<(String, u64)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for row in &campaigns.rows {
        let cell = &row[status_idx];
        if matches!(cell, CellValue::Empty) {
            continue;
        }
        let status = cell.display_string();
        match index.get(&status) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(status.clone(), counts.len());
                counts.push((status, 1));
            }
        }
    }

    // Stable sort keeps first-seen order among equal counts
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    Some(counts)
}
