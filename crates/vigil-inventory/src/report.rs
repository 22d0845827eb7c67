//! Comparison summary generation.
//!
//! Aggregates a reconciliation run's rows into the counts dashboard
//! headers and exports lead with.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::comparator::{ComparatorRow, DiffField, RowStatus};

/// Summary of one reconciliation run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ComparisonSummary {
    /// Total rows produced.
    pub total: u32,
    /// Rows broken down by status.
    pub by_status: HashMap<String, u32>,
    /// Conflict rows broken down by disagreeing field. A row with several
    /// diffs counts once per field.
    pub by_conflict_field: HashMap<String, u32>,
    /// Matched pairs (match + conflict rows).
    pub matched_pairs: u32,
}

impl ComparisonSummary {
    /// Get the count for a specific row status.
    #[must_use]
    pub fn status_count(&self, status: RowStatus) -> u32 {
        self.by_status.get(status.as_str()).copied().unwrap_or(0)
    }

    /// Get the conflict count for a specific field.
    #[must_use]
    pub fn conflict_field_count(&self, field: DiffField) -> u32 {
        self.by_conflict_field
            .get(field.as_str())
            .copied()
            .unwrap_or(0)
    }
}

/// Aggregate comparison rows into a summary.
#[must_use]
pub fn summarize(rows: &[ComparatorRow]) -> ComparisonSummary {
    let mut summary = ComparisonSummary {
        total: rows.len() as u32,
        ..ComparisonSummary::default()
    };

    for row in rows {
        *summary.by_status.entry(row.status.to_string()).or_insert(0) += 1;

        if matches!(row.status, RowStatus::Match | RowStatus::Conflict) {
            summary.matched_pairs += 1;
        }

        if let Some(diffs) = &row.diffs {
            for diff in diffs {
                *summary
                    .by_conflict_field
                    .entry(diff.field.to_string())
                    .or_insert(0) += 1;
            }
        }
    }

    summary
}
