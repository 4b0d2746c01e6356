//! numbatch CLI - filter phone-number spreadsheets by carrier and split them into batches
//!
//! # Main Command
//!
//! ```bash
//! numbatch                                   # defaults: ~/Downloads lookup file → ~/Downloads/franklin numbers
//! numbatch -i lookup.xlsx -o out -b 50       # explicit paths and batch size
//! numbatch --block telia,telenor,tre --json  # custom blocklist, JSON report on stdout
//! ```
//!
//! # Helpers
//!
//! ```bash
//! numbatch columns lookup.xlsx               # list column headers with letters
//! numbatch txt-to-xlsx numbers.txt           # one number per line → numbers.xlsx
//! numbatch txt-to-csv numbers.txt            # one number per line → numbers.csv
//! ```

use clap::{Args, Parser, Subcommand, ValueEnum};
use numbatch::config::{
    BatchOptions, ColumnRef, ColumnSelection, OutputFormat, DEFAULT_BATCH_SIZE,
};
use numbatch::convert::{self, DEFAULT_CSV_HEADER};
use numbatch::logs::{log_error, log_success, LOGGER};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "numbatch")]
#[command(about = "Drop blocklisted carriers from a number list and split the rest into batch files", long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    run: RunArgs,
}

#[derive(Args)]
struct RunArgs {
    /// Input spreadsheet or CSV (default: ~/Downloads/<lookup export>.xlsx)
    #[arg(short, long, env = "NUMBATCH_INPUT")]
    input: Option<PathBuf>,

    /// Output directory for batch files (default: ~/Downloads/franklin numbers)
    #[arg(short, long, env = "NUMBATCH_OUTPUT_DIR")]
    output_dir: Option<PathBuf>,

    /// Numbers per batch
    #[arg(short, long, env = "NUMBATCH_BATCH_SIZE", default_value_t = DEFAULT_BATCH_SIZE, allow_negative_numbers = true)]
    batch_size: i64,

    /// Carrier labels to drop (case-insensitive, repeatable or comma-separated)
    #[arg(long = "block", env = "NUMBATCH_BLOCKLIST", value_delimiter = ',', default_value = "telia,telenor")]
    blocklist: Vec<String>,

    /// Identifier column: header name or #<index>
    #[arg(long, env = "NUMBATCH_NUMBER_COLUMN", default_value = "Number")]
    number_column: ColumnRef,

    /// Carrier column: header name or #<index>
    #[arg(long, env = "NUMBATCH_CARRIER_COLUMN", default_value = "networkname")]
    carrier_column: ColumnRef,

    /// Guess columns positionally (numbers in A, carriers in I or J); overrides the column flags
    #[arg(long)]
    legacy_columns: bool,

    /// Batch file format
    #[arg(short, long, env = "NUMBATCH_FORMAT", value_enum, default_value_t = FormatArg::Xlsx)]
    format: FormatArg,

    /// Print the run report as JSON on stdout
    #[arg(long)]
    json: bool,

    /// Only print warnings and errors
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum FormatArg {
    Xlsx,
    Csv,
}

impl From<FormatArg> for OutputFormat {
    fn from(f: FormatArg) -> Self {
        match f {
            FormatArg::Xlsx => OutputFormat::Xlsx,
            FormatArg::Csv => OutputFormat::Csv,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// List the column headers of a spreadsheet or CSV file
    Columns {
        /// Input file
        input: PathBuf,
    },

    /// Convert a one-number-per-line text file to a headerless .xlsx
    TxtToXlsx {
        /// Input text file
        input: PathBuf,

        /// Output file (default: input with .xlsx extension)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Convert a one-number-per-line text file to a single-column .csv
    TxtToCsv {
        /// Input text file
        input: PathBuf,

        /// Output file (default: input with .csv extension)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Header of the CSV column
        #[arg(long, default_value = DEFAULT_CSV_HEADER)]
        header: String,
    },
}

fn main() {
    // Load .env file (if present) before clap reads env defaults
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Columns { input }) => cmd_columns(&input),
        Some(Commands::TxtToXlsx { input, output }) => cmd_txt_to_xlsx(&input, output.as_deref()),
        Some(Commands::TxtToCsv {
            input,
            output,
            header,
        }) => cmd_txt_to_csv(&input, output.as_deref(), &header),
        None => cmd_run(cli.run),
    };

    if let Err(e) = result {
        log_error(format!("Error: {}", e));
        std::process::exit(1);
    }
}

fn build_options(args: RunArgs) -> BatchOptions {
    let defaults = BatchOptions::default();
    BatchOptions {
        input_path: args.input.unwrap_or(defaults.input_path),
        output_dir: args.output_dir.unwrap_or(defaults.output_dir),
        batch_size: args.batch_size,
        blocklist: args
            .blocklist
            .into_iter()
            .map(|l| l.trim().to_string())
            .filter(|l| !l.is_empty())
            .collect(),
        columns: if args.legacy_columns {
            ColumnSelection::Legacy
        } else {
            ColumnSelection::Named {
                number: args.number_column,
                carrier: args.carrier_column,
            }
        },
        format: args.format.into(),
    }
}

fn cmd_run(args: RunArgs) -> Result<(), Box<dyn std::error::Error>> {
    let json = args.json;
    LOGGER.set_quiet(args.quiet);

    let options = build_options(args);
    let report = numbatch::run(&options)?;

    if json {
        println!("{}", report.to_json()?);
    }
    eprintln!("\n✨ Done!");
    Ok(())
}

fn cmd_columns(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    eprintln!("📋 Columns in {}:", input.display());
    for column in convert::inspect_columns(input)? {
        println!("{}", column);
    }
    Ok(())
}

fn cmd_txt_to_xlsx(input: &Path, output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let output = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| convert::sibling_with_extension(input, "xlsx"));

    let report = convert::text_to_xlsx(input, &output)?;
    log_success(format!(
        "Converted '{}' to '{}' ({} rows, no header)",
        report.input.display(),
        report.output.display(),
        report.rows
    ));
    Ok(())
}

fn cmd_txt_to_csv(
    input: &Path,
    output: Option<&Path>,
    header: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let output = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| convert::sibling_with_extension(input, "csv"));

    let report = convert::text_to_csv(input, &output, header)?;
    log_success(format!(
        "Converted '{}' to '{}' ({} rows)",
        report.input.display(),
        report.output.display(),
        report.rows
    ));
    Ok(())
}
