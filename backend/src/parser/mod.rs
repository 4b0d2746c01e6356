//! Table loading with format dispatch on file extension.
//!
//! - [`spreadsheet`] - xlsx / xlsm / xlsb / xls / ods via `calamine`
//! - [`delimited`] - CSV-like text with encoding and delimiter auto-detection
//!
//! The first row of the source is always the header row.

pub mod delimited;
pub mod spreadsheet;

use std::path::Path;

use crate::error::{LoadError, LoadResult};
use crate::models::Table;

pub use delimited::{
    decode_content, detect_delimiter, detect_encoding, parse_bytes_auto, parse_delimited,
    read_text_lines, ParseResult,
};
pub use spreadsheet::read_spreadsheet;

/// Source format, derived from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Spreadsheet,
    Delimited,
}

impl SourceKind {
    /// Classify a path by extension (case-insensitive).
    pub fn from_path(path: &Path) -> LoadResult<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => Ok(SourceKind::Spreadsheet),
            "csv" | "tsv" | "txt" => Ok(SourceKind::Delimited),
            _ => Err(LoadError::UnsupportedFormat {
                path: path.to_path_buf(),
                extension,
            }),
        }
    }
}

/// Load a table from a spreadsheet or CSV file.
///
/// Fails with [`LoadError::NotFound`] when the path does not exist and with
/// [`LoadError::Format`] when the content cannot be read as a table.
pub fn load_table<P: AsRef<Path>>(path: P) -> LoadResult<Table> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(LoadError::NotFound(path.to_path_buf()));
    }

    match SourceKind::from_path(path)? {
        SourceKind::Spreadsheet => read_spreadsheet(path),
        SourceKind::Delimited => {
            let bytes = std::fs::read(path)?;
            parse_bytes_auto(&bytes)
                .map(|parsed| parsed.table)
                .map_err(|message| LoadError::Format {
                    path: path.to_path_buf(),
                    message,
                })
        }
    }
}
