//! Column resolution for the identifier and carrier fields.
//!
//! Named lookup is the normal path. The positional heuristic reproduces the
//! old lookup-export layout (numbers in A, carriers in I or J) and is only
//! used when explicitly selected.

use crate::config::{ColumnRef, ColumnSelection};
use crate::error::ColumnError;
use crate::models::Table;

/// Legacy identifier position (column A).
pub const LEGACY_NUMBER_COLUMN: usize = 0;

/// Legacy carrier candidates: column I, then column J.
pub const LEGACY_CARRIER_PRIMARY: usize = 8;
pub const LEGACY_CARRIER_FALLBACK: usize = 9;

/// Carrier-name fragments that mark a sample value as a carrier label.
pub const KNOWN_CARRIER_FRAGMENTS: [&str; 4] = ["telia", "telenor", "tele2", "tre"];

/// Resolved column positions for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedColumns {
    pub number_idx: usize,
    pub carrier_idx: usize,
}

impl ResolvedColumns {
    pub fn number_name<'t>(&self, table: &'t Table) -> &'t str {
        &table.headers()[self.number_idx]
    }

    pub fn carrier_name<'t>(&self, table: &'t Table) -> &'t str {
        &table.headers()[self.carrier_idx]
    }
}

/// Find a column by exact header name or zero-based position.
pub fn resolve_column(table: &Table, column: &ColumnRef) -> Result<usize, ColumnError> {
    let found = match column {
        ColumnRef::Name(name) => table.headers().iter().position(|h| h == name),
        ColumnRef::Index(idx) => (*idx < table.width()).then_some(*idx),
    };
    found.ok_or_else(|| ColumnError::FieldNotFound(column.to_string()))
}

/// Guess the carrier column of a legacy lookup export.
///
/// Header I or J containing "carrier" (case-insensitive) wins, I first.
/// Otherwise the first value in I is sniffed for a known carrier name; if
/// none matches, J is used.
pub fn detect_legacy_carrier_column(table: &Table) -> Result<usize, ColumnError> {
    let n_needed = LEGACY_CARRIER_FALLBACK + 1;
    if table.width() < n_needed {
        return Err(ColumnError::NotEnoughColumns {
            needed: n_needed,
            found: table.width(),
        });
    }

    let header_says_carrier =
        |idx: usize| table.headers()[idx].to_lowercase().contains("carrier");

    if header_says_carrier(LEGACY_CARRIER_PRIMARY) {
        return Ok(LEGACY_CARRIER_PRIMARY);
    }
    if header_says_carrier(LEGACY_CARRIER_FALLBACK) {
        return Ok(LEGACY_CARRIER_FALLBACK);
    }

    let sample = table
        .cell(0, LEGACY_CARRIER_PRIMARY)
        .map(|c| c.to_text().to_lowercase())
        .unwrap_or_default();
    if KNOWN_CARRIER_FRAGMENTS.iter().any(|frag| sample.contains(frag)) {
        Ok(LEGACY_CARRIER_PRIMARY)
    } else {
        Ok(LEGACY_CARRIER_FALLBACK)
    }
}

/// Resolve both columns according to the selection policy.
pub fn resolve_columns(
    table: &Table,
    selection: &ColumnSelection,
) -> Result<ResolvedColumns, ColumnError> {
    match selection {
        ColumnSelection::Named { number, carrier } => Ok(ResolvedColumns {
            number_idx: resolve_column(table, number)?,
            carrier_idx: resolve_column(table, carrier)?,
        }),
        ColumnSelection::Legacy => Ok(ResolvedColumns {
            number_idx: LEGACY_NUMBER_COLUMN,
            carrier_idx: detect_legacy_carrier_column(table)?,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CellValue;

    fn wide_table(header_i: &str, header_j: &str, sample_i: &str) -> Table {
        let mut headers: Vec<String> = (0..10).map(|i| format!("col{}", i)).collect();
        headers[8] = header_i.to_string();
        headers[9] = header_j.to_string();
        let mut row = vec![CellValue::Int(46701234567); 10];
        row[8] = CellValue::from(sample_i);
        row[9] = CellValue::from("Other");
        Table::new(headers, vec![row])
    }

    #[test]
    fn test_resolve_by_name_and_index() {
        let table = Table::new(vec!["Number".into(), "networkname".into()], vec![]);

        assert_eq!(resolve_column(&table, &ColumnRef::Name("networkname".into())).unwrap(), 1);
        assert_eq!(resolve_column(&table, &ColumnRef::Index(0)).unwrap(), 0);
    }

    #[test]
    fn test_missing_column_is_field_not_found() {
        let table = Table::new(vec!["Number".into()], vec![]);

        let err = resolve_column(&table, &ColumnRef::Name("networkname".into())).unwrap_err();
        assert!(matches!(err, ColumnError::FieldNotFound(ref c) if c == "'networkname'"));

        let err = resolve_column(&table, &ColumnRef::Index(4)).unwrap_err();
        assert!(matches!(err, ColumnError::FieldNotFound(ref c) if c == "#4"));
    }

    #[test]
    fn test_name_match_is_exact() {
        let table = Table::new(vec!["NetworkName".into()], vec![]);
        assert!(resolve_column(&table, &ColumnRef::Name("networkname".into())).is_err());
    }

    #[test]
    fn test_legacy_prefers_carrier_header_in_i() {
        let table = wide_table("Carrier", "Carrier name", "x");
        assert_eq!(detect_legacy_carrier_column(&table).unwrap(), 8);
    }

    #[test]
    fn test_legacy_carrier_header_in_j() {
        let table = wide_table("status", "CARRIER", "x");
        assert_eq!(detect_legacy_carrier_column(&table).unwrap(), 9);
    }

    #[test]
    fn test_legacy_sniffs_sample_value() {
        let table = wide_table("network", "ported", "Tele2 Sverige AB");
        assert_eq!(detect_legacy_carrier_column(&table).unwrap(), 8);

        let table = wide_table("network", "ported", "unknown");
        assert_eq!(detect_legacy_carrier_column(&table).unwrap(), 9);
    }

    #[test]
    fn test_legacy_without_rows_falls_back_to_j() {
        let headers: Vec<String> = (0..10).map(|i| format!("col{}", i)).collect();
        let table = Table::new(headers, vec![]);
        assert_eq!(detect_legacy_carrier_column(&table).unwrap(), 9);
    }

    #[test]
    fn test_legacy_needs_ten_columns() {
        let table = Table::new(vec!["a".into(); 5], vec![]);
        let err = detect_legacy_carrier_column(&table).unwrap_err();
        assert!(matches!(err, ColumnError::NotEnoughColumns { needed: 10, found: 5 }));
    }

    #[test]
    fn test_resolve_columns_legacy_uses_column_a() {
        let table = wide_table("Carrier", "x", "x");
        let resolved = resolve_columns(&table, &ColumnSelection::Legacy).unwrap();
        assert_eq!(resolved, ResolvedColumns { number_idx: 0, carrier_idx: 8 });
        assert_eq!(resolved.number_name(&table), "col0");
        assert_eq!(resolved.carrier_name(&table), "Carrier");
    }
}
