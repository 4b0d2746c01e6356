//! Carrier normalization: every carrier cell becomes lowercase text.

use crate::models::{CellValue, Table};

/// Case-fold one carrier label.
pub fn normalize_label(label: &str) -> String {
    label.to_lowercase()
}

/// Coerce every cell in `carrier_idx` to lowercase text.
///
/// Non-text cells (numbers, booleans, blanks) are converted to their
/// textual form first. Out-of-range indices leave the table unchanged.
pub fn normalize_carriers(mut table: Table, carrier_idx: usize) -> Table {
    table.map_column(carrier_idx, |cell| {
        CellValue::Text(normalize_label(&cell.to_text()))
    });
    table
}
