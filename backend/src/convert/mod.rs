//! Small standalone helpers around the batch transform.
//!
//! - [`text_to_xlsx`] - one number per line → single-column workbook, no header
//! - [`text_to_csv`] - one number per line → single-column CSV with a header
//! - [`inspect_columns`] - list a table's headers with index and column letter

use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::error::{ConvertError, LoadError};
use crate::models::CellValue;
use crate::parser::{load_table, read_text_lines};
use crate::writer::{write_column_csv, write_column_xlsx};

/// Default CSV header for converted number lists.
pub const DEFAULT_CSV_HEADER: &str = "Telefonnummer";

/// Outcome of a text conversion.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ConvertReport {
    pub input: PathBuf,
    pub output: PathBuf,
    /// Number of lines written (blank lines included)
    pub rows: usize,
}

fn read_lines(input: &Path) -> Result<Vec<CellValue>, LoadError> {
    if !input.exists() {
        return Err(LoadError::NotFound(input.to_path_buf()));
    }
    let bytes = std::fs::read(input)?;
    // Values stay text so leading zeros survive.
    Ok(read_text_lines(&bytes)
        .into_iter()
        .map(|line| {
            if line.is_empty() {
                CellValue::Empty
            } else {
                CellValue::Text(line)
            }
        })
        .collect())
}

/// `input` with its extension replaced, used when no output path is given.
pub fn sibling_with_extension(input: &Path, extension: &str) -> PathBuf {
    input.with_extension(extension)
}

/// Convert a one-per-line text file into a headerless single-column workbook.
pub fn text_to_xlsx(input: &Path, output: &Path) -> Result<ConvertReport, ConvertError> {
    let values = read_lines(input)?;
    write_column_xlsx(output, &values)?;
    Ok(ConvertReport {
        input: input.to_path_buf(),
        output: output.to_path_buf(),
        rows: values.len(),
    })
}

/// Convert a one-per-line text file into a single-column CSV under `header`.
pub fn text_to_csv(input: &Path, output: &Path, header: &str) -> Result<ConvertReport, ConvertError> {
    let values = read_lines(input)?;
    write_column_csv(output, &values, Some(header))?;
    Ok(ConvertReport {
        input: input.to_path_buf(),
        output: output.to_path_buf(),
        rows: values.len(),
    })
}

/// One header of an inspected table.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ColumnInfo {
    /// Zero-based position.
    pub index: usize,
    /// Spreadsheet column letter (A, B, ..., Z, AA, ...).
    pub letter: String,
    pub name: String,
}

impl std::fmt::Display for ColumnInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Column {} ({}): '{}'", self.index, self.letter, self.name)
    }
}

/// Spreadsheet letter for a zero-based column index.
pub fn column_letter(index: usize) -> String {
    let mut n = index + 1;
    let mut letters = Vec::new();
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push(char::from(b'A' + rem as u8));
        n = (n - 1) / 26;
    }
    letters.iter().rev().collect()
}

/// List the headers of a spreadsheet or CSV file.
pub fn inspect_columns(input: &Path) -> Result<Vec<ColumnInfo>, LoadError> {
    let table = load_table(input)?;
    Ok(table
        .headers()
        .iter()
        .enumerate()
        .map(|(index, name)| ColumnInfo {
            index,
            letter: column_letter(index),
            name: name.clone(),
        })
        .collect())
}
