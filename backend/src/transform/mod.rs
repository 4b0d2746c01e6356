//! Filter-and-batch transformation.
//!
//! - Columns: identifier / carrier column resolution
//! - Normalize: carrier case-folding
//! - Filter: blocklist filtering
//! - Chunker: fixed-size sequential batches
//! - Pipeline: end-to-end run

pub mod chunker;
pub mod columns;
pub mod filter;
pub mod normalize;
pub mod pipeline;

pub use chunker::{chunk, count_batches, validate_batch_size, Chunks};
pub use columns::{detect_legacy_carrier_column, resolve_column, resolve_columns, ResolvedColumns};
pub use filter::{filter_blocklisted, Blocklist, FilterOutcome};
pub use normalize::normalize_carriers;
pub use pipeline::{run, run_table, RunReport};
