//! CLI tool to parse a delimited file against a schema and re-emit it.

use clap::Parser;
use delimited_rs::{
    BadLinePolicy, OutputFormat, ReadOptions, log_filter, resolve_schema, run_document,
};
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use std::process;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Parse a delimited file with a schema file or a built-in preset.
///
/// Bad lines abort the run unless --skip-bad is given, in which case each
/// one is logged as a warning and left out of the output.
#[derive(Parser)]
#[command(name = "csv-run")]
struct Cli {
    /// Schema file (.schema), or preset:<name> (salary, taxi-ride, rigid-body)
    schema: String,

    /// Input data file (or /dev/stdin)
    input: String,

    /// Write output to file instead of stdout
    #[arg(short, long)]
    output: Option<String>,

    /// Output encoding
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Delimited)]
    format: OutputFormat,

    /// Parse the first line as data instead of skipping it as a header
    #[arg(long)]
    no_header: bool,

    /// Log and drop lines that fail to parse instead of stopping
    #[arg(long)]
    skip_bad: bool,

    /// Share one allocation between repeated text values
    #[arg(long)]
    intern: bool,

    /// Show paths and line counts on stderr and enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    tracing_subscriber::registry()
        .with(log_filter(verbose))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let schema = match resolve_schema(&cli.schema) {
        Ok(schema) => schema,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    };

    let input = match fs::read(&cli.input) {
        Ok(content) => content,
        Err(e) => {
            eprintln!("Error reading input file '{}': {e}", cli.input);
            process::exit(1);
        }
    };

    if cli.verbose {
        eprintln!("Schema:   {} ({})", cli.schema, schema.name());
        eprintln!("Input:    {}", cli.input);
        eprintln!("Output:   {}", cli.output.as_deref().unwrap_or("(stdout)"));
    }

    let options = ReadOptions {
        has_header: !cli.no_header,
        on_error: if cli.skip_bad {
            BadLinePolicy::Skip
        } else {
            BadLinePolicy::Abort
        },
    };

    match run_document(&input, schema, &options, cli.format, cli.intern) {
        Ok(summary) => {
            if let Some(out_path) = &cli.output {
                if let Some(parent) = Path::new(out_path.as_str()).parent()
                    && !parent.as_os_str().is_empty()
                    && fs::create_dir_all(parent).is_err()
                {
                    eprintln!("Error creating output directory for '{out_path}'");
                    process::exit(1);
                }
                if let Err(e) = fs::write(out_path, &summary.output) {
                    eprintln!("Error writing output file '{out_path}': {e}");
                    process::exit(1);
                }
            } else if let Err(e) = io::stdout().write_all(summary.output.as_bytes()) {
                eprintln!("Error writing output: {e}");
                process::exit(1);
            }
            if cli.verbose {
                eprintln!(
                    "Lines:    {} read -> {} records, {} skipped",
                    summary.line_count, summary.record_count, summary.skipped_count
                );
            }
        }
        Err(e) => {
            eprintln!("Parse error: {e}");
            process::exit(1);
        }
    }
}
