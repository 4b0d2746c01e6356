//! # numbatch - carrier filter and batch splitter
//!
//! Reads a spreadsheet of phone numbers and carrier labels, drops rows whose
//! carrier is blocklisted and writes the remaining numbers as fixed-size
//! batch files.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │ xlsx / csv  │────▶│  Normalize  │────▶│  Blocklist  │────▶│   Chunker   │────▶│ batch_N.xlsx│
//! │   (load)    │     │  carriers   │     │   filter    │     │  (size B)   │     │  (per batch)│
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use numbatch::{run, BatchOptions};
//!
//! let report = run(&BatchOptions::new("lookup.xlsx", "franklin numbers"))?;
//! println!("{} numbers in {} batches", report.remaining, report.batch_count);
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Stage error types
//! - [`config`] - Run options
//! - [`logs`] - Operator log
//! - [`models`] - Cells, tables, batches
//! - [`parser`] - Spreadsheet and CSV loading
//! - [`transform`] - Normalize, filter, chunk, pipeline
//! - [`writer`] - Batch file output
//! - [`convert`] - Text conversion and column inspection helpers

// Core modules
pub mod config;
pub mod error;
pub mod logs;
pub mod models;

// Input
pub mod parser;

// Transformation
pub mod transform;

// Output
pub mod writer;

// Helpers
pub mod convert;

// =============================================================================
// Re-exports
// =============================================================================

pub use config::{BatchOptions, ColumnRef, ColumnSelection, OutputFormat};
pub use error::{
    BatchError, ColumnError, ConvertError, ErrorKind, LoadError, PipelineError, WriteError,
};
pub use models::{Batch, CellValue, Table};
pub use parser::load_table;
pub use transform::{run, run_table, Blocklist, RunReport};
pub use writer::BatchWriter;
pub use convert::{inspect_columns, text_to_csv, text_to_xlsx, ColumnInfo, ConvertReport};
