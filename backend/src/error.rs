//! Error types for the numbatch filter-and-batch pipeline.
//!
//! Each pipeline stage has its own error enum:
//!
//! - [`LoadError`] - Table loading (spreadsheet / CSV)
//! - [`ColumnError`] - Identifier and carrier column resolution
//! - [`BatchError`] - Chunking configuration
//! - [`WriteError`] - Batch file output
//! - [`ConvertError`] - Text conversion helpers
//! - [`PipelineError`] - Top-level orchestration errors
//!
//! Conversion into [`PipelineError`] is automatic via `From`, so `?` works
//! across stage boundaries.

use std::path::PathBuf;

use thiserror::Error;

// =============================================================================
// Load Errors
// =============================================================================

/// Errors while loading the input table.
#[derive(Debug, Error)]
pub enum LoadError {
    /// Input path does not exist.
    #[error("Input file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// File extension is not a known tabular format.
    #[error("Unsupported input format '{extension}' for {}", path.display())]
    UnsupportedFormat { path: PathBuf, extension: String },

    /// File is unreadable or malformed for the expected tabular layout.
    #[error("Cannot read table from {}: {message}", path.display())]
    Format { path: PathBuf, message: String },

    /// Raw IO failure while reading.
    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),
}

// =============================================================================
// Column Errors
// =============================================================================

/// Errors while resolving identifier / carrier columns.
#[derive(Debug, Error)]
pub enum ColumnError {
    /// Named or indexed column is absent.
    #[error("Column {0} was not found in the input table")]
    FieldNotFound(String),

    /// Positional lookup needs more columns than the table has.
    #[error("Table has {found} columns, positional lookup needs at least {needed}")]
    NotEnoughColumns { needed: usize, found: usize },
}

// =============================================================================
// Batch Errors
// =============================================================================

/// Errors in chunking configuration.
#[derive(Debug, Error)]
pub enum BatchError {
    /// Batch size must be a positive integer.
    #[error("Invalid batch size {0}: must be at least 1")]
    InvalidBatchSize(i64),
}

// =============================================================================
// Write Errors
// =============================================================================

/// Errors while persisting a batch.
#[derive(Debug, Error)]
pub enum WriteError {
    /// Output directory could not be created.
    #[error("Failed to create output directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// IO failure on a batch file.
    #[error("Failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Workbook serialization failed.
    #[error("xlsx write error for {}: {message}", path.display())]
    Xlsx { path: PathBuf, message: String },

    /// CSV serialization failed.
    #[error("csv write error for {}: {message}", path.display())]
    Csv { path: PathBuf, message: String },

    /// Temporary file could not be renamed into place.
    #[error("Failed to persist {}: {source}", path.display())]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl WriteError {
    /// Destination path the failed write targeted.
    pub fn path(&self) -> &std::path::Path {
        match self {
            WriteError::CreateDir { path, .. }
            | WriteError::Io { path, .. }
            | WriteError::Xlsx { path, .. }
            | WriteError::Csv { path, .. }
            | WriteError::Persist { path, .. } => path,
        }
    }
}

// =============================================================================
// Conversion Errors
// =============================================================================

/// Errors from the text conversion helpers.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// Source file could not be loaded.
    #[error(transparent)]
    Load(#[from] LoadError),

    /// Output file could not be written.
    #[error(transparent)]
    Write(#[from] WriteError),
}

// =============================================================================
// Pipeline Errors (top-level)
// =============================================================================

/// Coarse error category, for callers that branch on failure kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    FieldNotFound,
    FormatError,
    InvalidBatchSize,
    WriteError,
    UnexpectedError,
}

/// Top-level pipeline orchestration errors.
///
/// This is the error type returned by [`crate::transform::pipeline::run`].
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Table loading error.
    #[error(transparent)]
    Load(#[from] LoadError),

    /// Column resolution error.
    #[error(transparent)]
    Column(#[from] ColumnError),

    /// Chunking configuration error.
    #[error(transparent)]
    Batch(#[from] BatchError),

    /// Batch output error.
    #[error(transparent)]
    Write(#[from] WriteError),

    /// Anything not covered by a stage error.
    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl PipelineError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            PipelineError::Load(LoadError::NotFound(_)) => ErrorKind::NotFound,
            PipelineError::Load(_) => ErrorKind::FormatError,
            PipelineError::Column(_) => ErrorKind::FieldNotFound,
            PipelineError::Batch(_) => ErrorKind::InvalidBatchSize,
            PipelineError::Write(_) => ErrorKind::WriteError,
            PipelineError::Unexpected(_) => ErrorKind::UnexpectedError,
        }
    }
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for load operations.
pub type LoadResult<T> = Result<T, LoadError>;

/// Result type for write operations.
pub type WriteResult<T> = Result<T, WriteError>;

/// Result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;
