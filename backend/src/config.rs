//! Run configuration for the filter-and-batch transform.
//!
//! Everything the transform needs is carried in [`BatchOptions`]; nothing is
//! read from process-wide constants once the options are built.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Default batch size.
pub const DEFAULT_BATCH_SIZE: i64 = 30;

/// Default carrier blocklist.
pub const DEFAULT_BLOCKLIST: [&str; 2] = ["telia", "telenor"];

/// Default identifier column header.
pub const DEFAULT_NUMBER_COLUMN: &str = "Number";

/// Default carrier column header.
pub const DEFAULT_CARRIER_COLUMN: &str = "networkname";

/// Default input file name, looked up in `~/Downloads`.
pub const DEFAULT_INPUT_FILENAME: &str = "batch_lookup_detail_20251123003028(UTC+0000).xlsx";

/// Default output folder name, created in `~/Downloads`.
pub const DEFAULT_OUTPUT_FOLDER: &str = "franklin numbers";

// =============================================================================
// Column references
// =============================================================================

/// Column selector: by header name or by zero-based position.
///
/// Parsed from text as `#<index>` for positions, anything else is a name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnRef {
    Name(String),
    Index(usize),
}

impl FromStr for ColumnRef {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err("column reference cannot be empty".to_string());
        }
        match s.strip_prefix('#') {
            Some(idx) => idx
                .parse::<usize>()
                .map(ColumnRef::Index)
                .map_err(|_| format!("invalid column index '{}'", s)),
            None => Ok(ColumnRef::Name(s.to_string())),
        }
    }
}

impl fmt::Display for ColumnRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnRef::Name(name) => write!(f, "'{}'", name),
            ColumnRef::Index(idx) => write!(f, "#{}", idx),
        }
    }
}

/// How the identifier and carrier columns are located.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnSelection {
    /// Explicit lookup; a missing column is an error.
    Named { number: ColumnRef, carrier: ColumnRef },
    /// Positional guess: identifiers in column A, carriers in I or J.
    Legacy,
}

impl Default for ColumnSelection {
    fn default() -> Self {
        ColumnSelection::Named {
            number: ColumnRef::Name(DEFAULT_NUMBER_COLUMN.to_string()),
            carrier: ColumnRef::Name(DEFAULT_CARRIER_COLUMN.to_string()),
        }
    }
}

// =============================================================================
// Output format
// =============================================================================

/// Batch file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Xlsx,
    Csv,
}

impl OutputFormat {
    /// File extension without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Xlsx => "xlsx",
            OutputFormat::Csv => "csv",
        }
    }
}

// =============================================================================
// Options
// =============================================================================

/// Options for one filter-and-batch run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchOptions {
    /// Input spreadsheet or CSV file.
    pub input_path: PathBuf,

    /// Directory receiving `batch_<i>.<ext>` files (created if missing).
    pub output_dir: PathBuf,

    /// Identifiers per batch. Must be >= 1; validated before any I/O.
    pub batch_size: i64,

    /// Carrier labels to drop (case-insensitive).
    pub blocklist: Vec<String>,

    /// Column lookup policy.
    pub columns: ColumnSelection,

    /// Batch file format.
    pub format: OutputFormat,
}

impl Default for BatchOptions {
    fn default() -> Self {
        let downloads = downloads_dir();
        Self {
            input_path: downloads.join(DEFAULT_INPUT_FILENAME),
            output_dir: downloads.join(DEFAULT_OUTPUT_FOLDER),
            batch_size: DEFAULT_BATCH_SIZE,
            blocklist: DEFAULT_BLOCKLIST.iter().map(|s| s.to_string()).collect(),
            columns: ColumnSelection::default(),
            format: OutputFormat::default(),
        }
    }
}

impl BatchOptions {
    /// Options reading `input` and writing into `output_dir`, defaults elsewhere.
    pub fn new(input: impl AsRef<Path>, output_dir: impl AsRef<Path>) -> Self {
        Self {
            input_path: input.as_ref().to_path_buf(),
            output_dir: output_dir.as_ref().to_path_buf(),
            ..Self::default()
        }
    }
}

/// `~/Downloads`, or `./Downloads` when no home directory is set.
pub fn downloads_dir() -> PathBuf {
    let home = std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));
    home.join("Downloads")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let opts = BatchOptions::default();
        assert_eq!(opts.batch_size, 30);
        assert_eq!(opts.blocklist, vec!["telia", "telenor"]);
        assert_eq!(opts.format, OutputFormat::Xlsx);
        assert!(opts.output_dir.ends_with("Downloads/franklin numbers"));
        assert!(opts
            .input_path
            .to_string_lossy()
            .ends_with("batch_lookup_detail_20251123003028(UTC+0000).xlsx"));
        assert_eq!(
            opts.columns,
            ColumnSelection::Named {
                number: ColumnRef::Name("Number".into()),
                carrier: ColumnRef::Name("networkname".into()),
            }
        );
    }

    #[test]
    fn test_column_ref_parse() {
        assert_eq!("Number".parse::<ColumnRef>(), Ok(ColumnRef::Name("Number".into())));
        assert_eq!("#9".parse::<ColumnRef>(), Ok(ColumnRef::Index(9)));
        assert!("#x".parse::<ColumnRef>().is_err());
        assert!("".parse::<ColumnRef>().is_err());
        assert_eq!(ColumnRef::Index(3).to_string(), "#3");
        assert_eq!(ColumnRef::Name("networkname".into()).to_string(), "'networkname'");
    }

    #[test]
    fn test_options_json_round_trip() {
        let opts = BatchOptions::new("in.csv", "out");
        let json = serde_json::to_string(&opts).unwrap();
        assert!(json.contains("\"format\":\"xlsx\""));
        let back: BatchOptions = serde_json::from_str(&json).unwrap();
        assert_eq!(back.input_path, PathBuf::from("in.csv"));
        assert_eq!(back.columns, opts.columns);
    }
}
