//! High-level filter-and-batch pipeline.
//!
//! Load → Normalize → Filter → Chunk → Write×N, linear and single-pass.
//!
//! # Example
//!
//! ```rust,ignore
//! use numbatch::{run, BatchOptions};
//!
//! let options = BatchOptions::new("lookup.xlsx", "out");
//! let report = run(&options)?;
//! println!("{} batches written", report.batch_count);
//! ```

use serde::Serialize;
use std::path::PathBuf;

use crate::config::BatchOptions;
use crate::error::{PipelineError, PipelineResult};
use crate::logs::{log_info, log_info_indent, log_success, log_warning};
use crate::models::Table;
use crate::parser::load_table;
use crate::transform::chunker::{chunk_validated, count_batches, validate_batch_size};
use crate::transform::columns::resolve_columns;
use crate::transform::filter::{filter_blocklisted, Blocklist};
use crate::transform::normalize::normalize_carriers;
use crate::writer::BatchWriter;

/// Summary of a completed run.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RunReport {
    /// Input file, if the table came from disk
    pub input_path: Option<PathBuf>,
    pub output_dir: PathBuf,
    /// Header of the identifier column used
    pub number_column: String,
    /// Header of the carrier column used
    pub carrier_column: String,
    /// Rows in the input table
    pub total: usize,
    /// Rows dropped by the blocklist
    pub removed: usize,
    /// Rows kept
    pub remaining: usize,
    pub batch_size: usize,
    pub batch_count: usize,
    /// Written batch files, in batch order
    pub files: Vec<PathBuf>,
}

impl RunReport {
    /// Pretty-printed JSON for `--json` output.
    pub fn to_json(&self) -> PipelineResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| PipelineError::Unexpected(format!("cannot render run report: {}", e)))
    }
}

/// Run the transform on the configured input file.
///
/// The batch size is validated before anything touches the filesystem.
pub fn run(options: &BatchOptions) -> PipelineResult<RunReport> {
    validate_batch_size(options.batch_size)?;

    log_info(format!("📖 Reading {}", options.input_path.display()));
    let table = load_table(&options.input_path)?;
    log_success(format!("Read {} rows, {} columns", table.len(), table.width()));

    let mut report = run_table(table, options)?;
    report.input_path = Some(options.input_path.clone());
    Ok(report)
}

/// Run the transform on an already loaded table.
pub fn run_table(table: Table, options: &BatchOptions) -> PipelineResult<RunReport> {
    let batch_size = validate_batch_size(options.batch_size)?;

    let columns = resolve_columns(&table, &options.columns)?;
    let number_column = columns.number_name(&table).to_string();
    let carrier_column = columns.carrier_name(&table).to_string();
    log_info(format!(
        "Using '{}' for numbers and '{}' for carriers",
        number_column, carrier_column
    ));

    let total = table.len();
    let table = normalize_carriers(table, columns.carrier_idx);

    let blocklist = Blocklist::new(&options.blocklist);
    if blocklist.is_empty() {
        log_warning("Blocklist is empty, no rows will be filtered");
    }
    let outcome = filter_blocklisted(table, columns.carrier_idx, &blocklist);
    log_success(format!(
        "Filtered out {} numbers from blocklisted carriers ({})",
        outcome.removed,
        blocklist.labels().collect::<Vec<_>>().join(", ")
    ));
    log_success(format!("{} numbers remaining", outcome.remaining));

    let identifiers = outcome.table.column_values(columns.number_idx);
    drop(outcome.table);

    let batch_count = count_batches(identifiers.len(), batch_size);
    log_info(format!(
        "📦 Splitting into {} batches of {}",
        batch_count, batch_size
    ));

    let writer = BatchWriter::new(&options.output_dir, options.format);
    writer.prepare()?;

    let mut files = Vec::with_capacity(batch_count);
    for batch in chunk_validated(&identifiers, batch_size) {
        let path = writer.write(&batch)?;
        log_info_indent(format!("{} ({} numbers)", path.display(), batch.len()), 1);
        files.push(path);
    }

    log_success(format!(
        "All {} batches saved in '{}'",
        files.len(),
        options.output_dir.display()
    ));

    Ok(RunReport {
        input_path: None,
        output_dir: options.output_dir.clone(),
        number_column,
        carrier_column,
        total,
        removed: outcome.removed,
        remaining: outcome.remaining,
        batch_size: batch_size.get(),
        batch_count: files.len(),
        files,
    })
}
