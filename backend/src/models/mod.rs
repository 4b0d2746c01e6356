//! Domain models for the filter-and-batch pipeline.
//!
//! - [`CellValue`] - One typed spreadsheet cell
//! - [`Table`] - Header names plus ordered rows, loaded once
//! - [`Batch`] - A numbered, order-preserving slice of identifiers

// =============================================================================
// Cell Value
// =============================================================================

/// A single typed cell as read from a spreadsheet or CSV file.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// Blank cell.
    Empty,
    /// Text cell.
    Text(String),
    /// Integer cell.
    Int(i64),
    /// Floating point cell.
    Float(f64),
    /// Boolean cell.
    Bool(bool),
}

impl CellValue {
    /// Textual representation used for carrier comparison and CSV output.
    pub fn to_text(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Text(s) => s.clone(),
            CellValue::Int(i) => i.to_string(),
            CellValue::Float(f) => f.to_string(),
            CellValue::Bool(b) => b.to_string(),
        }
    }

    /// Type a raw text field from a CSV/text source.
    ///
    /// Plain integers become [`CellValue::Int`], unless they carry a leading
    /// `0` or `+` (phone numbers in national or international form stay text).
    pub fn infer(raw: &str) -> Self {
        let s = raw.trim();
        if s.is_empty() {
            return CellValue::Empty;
        }
        let looks_numeric = s.bytes().enumerate().all(|(i, b)| {
            b.is_ascii_digit() || (i == 0 && b == b'-' && s.len() > 1)
        });
        let digits = s.trim_start_matches('-');
        if looks_numeric && (digits == "0" || !digits.starts_with('0')) {
            if let Ok(i) = s.parse::<i64>() {
                return CellValue::Int(i);
            }
        }
        CellValue::Text(raw.to_string())
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }
}

impl std::fmt::Display for CellValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_text())
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<i64> for CellValue {
    fn from(i: i64) -> Self {
        CellValue::Int(i)
    }
}

// =============================================================================
// Table
// =============================================================================

/// An ordered table of records with named columns.
///
/// Every row has exactly `headers.len()` cells.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<CellValue>>,
}

impl Table {
    /// Build a table, padding short rows with [`CellValue::Empty`] and
    /// naming blank headers `Unnamed: <index>`.
    ///
    /// Rows longer than the header are extended with unnamed columns.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<CellValue>>) -> Self {
        let n_width = rows
            .iter()
            .map(Vec::len)
            .max()
            .unwrap_or(0)
            .max(headers.len());

        let mut headers = headers;
        headers.resize(n_width, String::new());
        let headers = headers
            .into_iter()
            .enumerate()
            .map(|(i, h)| {
                if h.trim().is_empty() {
                    format!("Unnamed: {}", i)
                } else {
                    h
                }
            })
            .collect();

        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(n_width, CellValue::Empty);
                row
            })
            .collect();

        Self { headers, rows }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.headers.len()
    }

    /// Cell at (`row`, `col`), if both are in range.
    pub fn cell(&self, row: usize, col: usize) -> Option<&CellValue> {
        self.rows.get(row).and_then(|r| r.get(col))
    }

    /// Clone out one column in row order.
    pub fn column_values(&self, col: usize) -> Vec<CellValue> {
        self.rows
            .iter()
            .map(|r| r.get(col).cloned().unwrap_or(CellValue::Empty))
            .collect()
    }

    /// Rewrite every cell of one column in place.
    pub fn map_column<F>(&mut self, col: usize, mut f: F)
    where
        F: FnMut(&CellValue) -> CellValue,
    {
        for row in &mut self.rows {
            if let Some(cell) = row.get_mut(col) {
                *cell = f(cell);
            }
        }
    }

    /// Keep only the rows for which `keep` returns true, preserving order.
    pub fn retain_rows<F>(&mut self, keep: F)
    where
        F: FnMut(&Vec<CellValue>) -> bool,
    {
        self.rows.retain(keep);
    }
}

// =============================================================================
// Batch
// =============================================================================

/// A contiguous group of filtered identifiers, numbered from 1.
#[derive(Debug, Clone, PartialEq)]
pub struct Batch<'a> {
    /// 1-based batch number.
    pub index: usize,
    /// Identifiers in original relative order.
    pub items: &'a [CellValue],
}

impl Batch<'_> {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_text() {
        assert_eq!(CellValue::Empty.to_text(), "");
        assert_eq!(CellValue::Int(46701234567).to_text(), "46701234567");
        assert_eq!(CellValue::Float(1.0).to_text(), "1");
        assert_eq!(CellValue::Float(2.5).to_text(), "2.5");
        assert_eq!(CellValue::Bool(true).to_text(), "true");
        assert_eq!(CellValue::from("Telia").to_text(), "Telia");
    }

    #[test]
    fn test_infer_keeps_phone_formats_as_text() {
        assert_eq!(CellValue::infer("46701234567"), CellValue::Int(46701234567));
        assert_eq!(CellValue::infer("0"), CellValue::Int(0));
        assert_eq!(CellValue::infer("-12"), CellValue::Int(-12));
        assert_eq!(
            CellValue::infer("0701234567"),
            CellValue::Text("0701234567".into())
        );
        assert_eq!(
            CellValue::infer("+46701234567"),
            CellValue::Text("+46701234567".into())
        );
        assert_eq!(CellValue::infer("Tele2"), CellValue::Text("Tele2".into()));
        assert_eq!(CellValue::infer("   "), CellValue::Empty);
        assert_eq!(CellValue::infer("-"), CellValue::Text("-".into()));
    }

    #[test]
    fn test_table_pads_rows_and_names_blank_headers() {
        let table = Table::new(
            vec!["Number".into(), "".into()],
            vec![
                vec![CellValue::Int(1)],
                vec![CellValue::Int(1), CellValue::Int(2), CellValue::Int(3)],
            ],
        );

        assert_eq!(table.width(), 3);
        assert_eq!(table.headers(), &["Number", "Unnamed: 1", "Unnamed: 2"]);
        assert_eq!(table.cell(0, 2), Some(&CellValue::Empty));
        assert_eq!(table.cell(1, 2), Some(&CellValue::Int(3)));
        assert_eq!(table.cell(2, 0), None);
    }

    #[test]
    fn test_map_and_retain() {
        let mut table = Table::new(
            vec!["n".into(), "c".into()],
            vec![
                vec![CellValue::Int(1), "A".into()],
                vec![CellValue::Int(2), "B".into()],
                vec![CellValue::Int(3), "A".into()],
            ],
        );

        table.map_column(1, |c| CellValue::Text(c.to_text().to_lowercase()));
        table.retain_rows(|r| r[1] != CellValue::from("b"));

        assert_eq!(table.len(), 2);
        assert_eq!(table.column_values(0), vec![CellValue::Int(1), CellValue::Int(3)]);
        assert_eq!(table.column_values(1), vec![CellValue::from("a"), CellValue::from("a")]);
    }
}
