//! Spreadsheet reader (first worksheet) backed by `calamine`.

use std::path::Path;

use calamine::{open_workbook_auto, Data, Range, Reader};

use crate::error::{LoadError, LoadResult};
use crate::models::{CellValue, Table};

/// Read the first worksheet of a workbook into a [`Table`].
///
/// The first used row becomes the header. When the used range does not
/// start in column A, leading columns are padded so that positions match
/// the sheet's own column letters.
pub fn read_spreadsheet(path: &Path) -> LoadResult<Table> {
    let format_err = |message: String| LoadError::Format {
        path: path.to_path_buf(),
        message,
    };

    let mut workbook = open_workbook_auto(path).map_err(|e| format_err(e.to_string()))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| format_err("workbook has no worksheets".to_string()))?
        .map_err(|e| format_err(e.to_string()))?;

    table_from_range(&range).ok_or_else(|| format_err("worksheet is empty, no header row".to_string()))
}

/// Convert a cell range to a table; `None` when the range has no rows.
fn table_from_range(range: &Range<Data>) -> Option<Table> {
    let n_col_offset = range.start().map(|(_, c)| c as usize).unwrap_or(0);
    let mut rows = range.rows();

    let header_row = rows.next()?;
    let mut headers = vec![String::new(); n_col_offset];
    headers.extend(header_row.iter().map(|c| convert_cell(c).to_text().trim().to_string()));

    let body = rows
        .map(|row| {
            let mut cells = vec![CellValue::Empty; n_col_offset];
            cells.extend(row.iter().map(convert_cell));
            cells
        })
        .collect();

    Some(Table::new(headers, body))
}

fn convert_cell(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Empty,
        Data::String(s) if s.is_empty() => CellValue::Empty,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Int(i) => CellValue::Int(*i),
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 9.0e15 => CellValue::Int(*f as i64),
        Data::Float(f) => CellValue::Float(*f),
        Data::Bool(b) => CellValue::Bool(*b),
        other => CellValue::Text(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_xlsxwriter::Workbook;
    use tempfile::TempDir;

    #[test]
    fn test_read_first_sheet() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("lookup.xlsx");

        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.write_string(0, 0, "Number").unwrap();
        sheet.write_string(0, 1, "networkname").unwrap();
        sheet.write_number(1, 0, 46701234567.0).unwrap();
        sheet.write_string(1, 1, "Telia").unwrap();
        sheet.write_number(2, 0, 46731234567.0).unwrap();
        sheet.write_boolean(2, 1, true).unwrap();
        workbook.save(&path).unwrap();

        let table = read_spreadsheet(&path).unwrap();
        assert_eq!(table.headers(), &["Number", "networkname"]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.cell(0, 0), Some(&CellValue::Int(46701234567)));
        assert_eq!(table.cell(0, 1), Some(&CellValue::from("Telia")));
        assert_eq!(table.cell(1, 1), Some(&CellValue::Bool(true)));
    }

    #[test]
    fn test_leading_empty_column_is_padded() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("offset.xlsx");

        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.write_string(0, 2, "networkname").unwrap();
        sheet.write_string(1, 2, "Tre").unwrap();
        workbook.save(&path).unwrap();

        let table = read_spreadsheet(&path).unwrap();
        assert_eq!(table.width(), 3);
        assert_eq!(table.headers()[2], "networkname");
        assert_eq!(table.cell(0, 2), Some(&CellValue::from("Tre")));
    }

    #[test]
    fn test_empty_sheet_is_format_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("blank.xlsx");

        let mut workbook = Workbook::new();
        workbook.add_worksheet();
        workbook.save(&path).unwrap();

        assert!(matches!(read_spreadsheet(&path), Err(LoadError::Format { .. })));
    }
}
