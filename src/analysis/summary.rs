//! Dataset-wide rainfall averages for the summary cards.
//!
//! District files come from more than one export template, so each
//! quantity is located by trying an ordered list of column spellings,
//! English and Devanagari. The first key present in a row wins.

use serde::Serialize;

use crate::coerce::to_number;
use crate::model::{Dataset, Row};

/// Column spellings for actual (observed) seasonal rainfall.
pub const ACTUAL_KEYS: &[&str] = &[
    "Actual Rainfall (mm)",
    "Actual (mm)",
    "Actual",
    "Rainfall (mm)",
    "वास्तविक वर्षा (मिमी)",
    "वास्तविक",
];

/// Column spellings for normal (long-period average) rainfall.
pub const NORMAL_KEYS: &[&str] = &[
    "Normal Rainfall (mm)",
    "Normal (mm)",
    "Normal",
    "सामान्य वर्षा (मिमी)",
    "सामान्य",
];

/// Column spellings for percent departure from normal.
pub const DEPARTURE_KEYS: &[&str] = &[
    "% Departure",
    "Departure (%)",
    "Departure",
    "% विचलन",
    "विचलन (%)",
    "विचलन",
];

/// Averages over a dataset. `Summary::default()` is the empty aggregate.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Summary {
    pub row_count: usize,
    pub avg_actual: f64,
    pub avg_normal: f64,
    pub avg_departure: f64,
}

impl Summary {
    pub fn is_empty(&self) -> bool {
        self.row_count == 0
    }
}

/// Returns the value of the first candidate key present in `row`.
pub fn lookup<'a>(row: &'a Row, candidates: &[&str]) -> Option<&'a str> {
    candidates.iter().find_map(|key| row.get(key))
}

/// Computes averages of actual, normal and departure across all rows.
///
/// Each average divides by the total row count, so rows where a quantity
/// could not be found contribute zero rather than being skipped.
pub fn summarize(dataset: &Dataset) -> Summary {
    if dataset.is_empty() {
        return Summary::default();
    }

    let (mut actual, mut normal, mut departure) = (0.0, 0.0, 0.0);
    for row in &dataset.rows {
        actual += lookup(row, ACTUAL_KEYS).map(to_number).unwrap_or(0.0);
        normal += lookup(row, NORMAL_KEYS).map(to_number).unwrap_or(0.0);
        departure += lookup(row, DEPARTURE_KEYS).map(to_number).unwrap_or(0.0);
    }

    let n = dataset.len() as f64;
    Summary {
        row_count: dataset.len(),
        avg_actual: actual / n,
        avg_normal: normal / n,
        avg_departure: departure / n,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
