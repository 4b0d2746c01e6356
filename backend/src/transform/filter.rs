//! Blocklist filter over normalized carrier labels.

use std::collections::BTreeSet;

use crate::models::{CellValue, Table};
use crate::transform::normalize::normalize_label;

/// Set of carrier labels to exclude, stored case-folded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Blocklist {
    labels: BTreeSet<String>,
}

impl Blocklist {
    pub fn new<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            labels: labels
                .into_iter()
                .map(|l| normalize_label(l.as_ref()))
                .collect(),
        }
    }

    /// Exact match against an already-normalized label.
    pub fn contains(&self, normalized: &str) -> bool {
        self.labels.contains(normalized)
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Result of filtering: surviving rows plus counts for operator feedback.
#[derive(Debug, Clone)]
pub struct FilterOutcome {
    pub table: Table,
    pub removed: usize,
    pub remaining: usize,
}

/// Drop rows whose carrier (already normalized) is on the blocklist.
///
/// Row order is preserved.
pub fn filter_blocklisted(
    mut table: Table,
    carrier_idx: usize,
    blocklist: &Blocklist,
) -> FilterOutcome {
    let n_before = table.len();

    table.retain_rows(|row| match row.get(carrier_idx) {
        Some(CellValue::Text(label)) => !blocklist.contains(label),
        Some(other) => !blocklist.contains(&normalize_label(&other.to_text())),
        None => true,
    });

    let remaining = table.len();
    FilterOutcome {
        table,
        removed: n_before - remaining,
        remaining,
    }
}
