//! Batch writer: one single-column file per batch, no header row.
//!
//! Every file is first written to a temporary file inside the output
//! directory and then renamed over `batch_<i>.<ext>`, so an interrupted
//! write never leaves a truncated batch behind. Batches are independent of
//! each other: a failure on batch k leaves batches 1..k-1 in place.

use std::io::Write;
use std::path::{Path, PathBuf};

use rust_xlsxwriter::{DocProperties, ExcelDateTime, Workbook, XlsxError};
use tempfile::NamedTempFile;

use crate::config::OutputFormat;
use crate::error::{WriteError, WriteResult};
use crate::models::{Batch, CellValue};

/// `batch_<index>.<ext>`, 1-based, no zero padding.
pub fn batch_file_name(index: usize, format: OutputFormat) -> String {
    format!("batch_{}.{}", index, format.extension())
}

/// Writes batches into one output directory.
#[derive(Debug, Clone)]
pub struct BatchWriter {
    output_dir: PathBuf,
    format: OutputFormat,
}

impl BatchWriter {
    pub fn new(output_dir: impl AsRef<Path>, format: OutputFormat) -> Self {
        Self {
            output_dir: output_dir.as_ref().to_path_buf(),
            format,
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Create the output directory (and parents) if missing.
    pub fn prepare(&self) -> WriteResult<()> {
        std::fs::create_dir_all(&self.output_dir).map_err(|source| WriteError::CreateDir {
            path: self.output_dir.clone(),
            source,
        })
    }

    /// Destination path for a batch index.
    pub fn path_for(&self, index: usize) -> PathBuf {
        self.output_dir.join(batch_file_name(index, self.format))
    }

    /// Persist one batch, replacing any file of the same name.
    pub fn write(&self, batch: &Batch<'_>) -> WriteResult<PathBuf> {
        let path = self.path_for(batch.index);
        match self.format {
            OutputFormat::Xlsx => write_column_xlsx(&path, batch.items)?,
            OutputFormat::Csv => write_column_csv(&path, batch.items, None)?,
        }
        Ok(path)
    }
}

// =============================================================================
// Single-column writers
// =============================================================================

/// Write `values` into column A of a fresh workbook, no header.
pub fn write_column_xlsx(path: &Path, values: &[CellValue]) -> WriteResult<()> {
    let buffer = build_column_workbook(values).map_err(|e| WriteError::Xlsx {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    persist_bytes(path, &buffer)
}

/// Write `values` one per line as CSV, optionally below a header.
pub fn write_column_csv(
    path: &Path,
    values: &[CellValue],
    header: Option<&str>,
) -> WriteResult<()> {
    let csv_err = |message: String| WriteError::Csv {
        path: path.to_path_buf(),
        message,
    };

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    if let Some(header) = header {
        writer.write_record([header]).map_err(|e| csv_err(e.to_string()))?;
    }
    for value in values {
        writer
            .write_record([value.to_text()])
            .map_err(|e| csv_err(e.to_string()))?;
    }
    let buffer = writer.into_inner().map_err(|e| csv_err(e.error().to_string()))?;

    persist_bytes(path, &buffer)
}

fn build_column_workbook(values: &[CellValue]) -> Result<Vec<u8>, XlsxError> {
    let mut workbook = Workbook::new();

    // Pin the creation timestamp so identical input gives identical bytes.
    let created = ExcelDateTime::from_ymd(2000, 1, 1)?;
    let properties = DocProperties::new().set_creation_datetime(&created);
    workbook.set_properties(&properties);

    let worksheet = workbook.add_worksheet();
    for (i, value) in values.iter().enumerate() {
        let row = u32::try_from(i).map_err(|_| XlsxError::RowColumnLimitError)?;
        match value {
            CellValue::Empty => {}
            CellValue::Text(s) => {
                worksheet.write_string(row, 0, s)?;
            }
            CellValue::Int(n) => {
                worksheet.write_number(row, 0, *n as f64)?;
            }
            CellValue::Float(f) => {
                worksheet.write_number(row, 0, *f)?;
            }
            CellValue::Bool(b) => {
                worksheet.write_boolean(row, 0, *b)?;
            }
        }
    }

    workbook.save_to_buffer()
}

/// Write bytes to a temp file next to `path`, then rename it into place.
fn persist_bytes(path: &Path, bytes: &[u8]) -> WriteResult<()> {
    let io_err = |source: std::io::Error| WriteError::Io {
        path: path.to_path_buf(),
        source,
    };

    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let mut temp = NamedTempFile::new_in(parent).map_err(io_err)?;
    temp.write_all(bytes).map_err(io_err)?;
    temp.as_file().sync_all().map_err(io_err)?;
    temp.persist(path).map_err(|e| WriteError::Persist {
        path: path.to_path_buf(),
        source: e.error,
    })?;
    Ok(())
}
