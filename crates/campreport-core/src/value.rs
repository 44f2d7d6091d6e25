//! Loosely-typed cell values.
//!
//! Input files carry an open schema, so a cell can be text, a number, a
//! boolean, a date, or nothing at all. The kind is decided once, at import
//! time, and carried as a tag; downstream code uses the typed accessors
//! instead of probing at each use site.

use std::cmp::Ordering;
use std::mem;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single cell value with its kind discovered at import time.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum CellValue {
    /// Missing or blank cell
    Empty,
    /// Free-form text
    Text(String),
    /// Numeric value (integers included)
    Number(f64),
    /// Boolean value
    Bool(bool),
    /// Calendar date
    Date(NaiveDate),
}

impl CellValue {
    /// Convenience constructor for text cells
    pub fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// The text content, for kinds that have one.
    ///
    /// Classification matches on text cells only; numbers and dates never
    /// equal a type name.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Rendered form of the value, as it appears in a sheet cell.
    ///
    /// Integral numbers render without a trailing `.0`; dates render as
    /// ISO `YYYY-MM-DD`. `Empty` renders as the empty string.
    pub fn display_string(&self) -> String {
        match self {
            Self::Empty => String::new(),
            Self::Text(s) => s.clone(),
            Self::Number(n) => {
                if n.fract() == 0.0 && n.is_finite() && n.abs() < 1e15 {
                    format!("{}", *n as i64)
                } else {
                    format!("{n}")
                }
            }
            Self::Bool(b) => {
                if *b {
                    "TRUE".to_string()
                } else {
                    "FALSE".to_string()
                }
            }
            Self::Date(d) => d.format("%Y-%m-%d").to_string(),
        }
    }

    /// Comparable projection of this value, if one exists.
    ///
    /// `Empty` and `Bool` cells have no ordering; non-finite numbers are
    /// also excluded so a stray NaN cannot poison a sort.
    pub fn sort_key(&self) -> Option<SortKey> {
        match self {
            Self::Number(n) if n.is_finite() => Some(SortKey::Number(*n)),
            Self::Date(d) => Some(SortKey::Date(*d)),
            Self::Text(s) => Some(SortKey::Text(s.clone())),
            _ => None,
        }
    }
}

/// Comparable projection of a cell value.
///
/// Keys of different kinds do not compare; a column mixing kinds is treated
/// as unsortable by the caller rather than ordered arbitrarily.
#[derive(Clone, Debug, PartialEq)]
pub enum SortKey {
    Number(f64),
    Date(NaiveDate),
    Text(String),
}

impl SortKey {
    /// Whether two keys share a kind and may be ordered against each other
    pub fn same_kind(&self, other: &Self) -> bool {
        mem::discriminant(self) == mem::discriminant(other)
    }

    /// Total order within a single kind.
    ///
    /// Callers must check `same_kind` first; mixed kinds compare equal here,
    /// which a stable sort turns into "keep original order".
    pub fn cmp_same_kind(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Number(a), Self::Number(b)) => a.partial_cmp(b).unwrap_or(Ordering::Equal),
            (Self::Date(a), Self::Date(b)) => a.cmp(b),
            (Self::Text(a), Self::Text(b)) => a.cmp(b),
            _ => Ordering::Equal,
        }
    }
}
