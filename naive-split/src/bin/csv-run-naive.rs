//! CLI tool to parse a delimited file with the string-splitting parser.

use clap::Parser;
use delimited_rs::{
    BadLinePolicy, OutputFormat, ReadOptions, log_filter, render_records, resolve_schema,
};
use naive_split::read_document_naive;
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use std::process;

/// Parse a delimited file with a schema file or a built-in preset
/// (string-splitting parser).
///
/// Produces identical output to csv-run for well-formed input.
#[derive(Parser)]
#[command(name = "csv-run-naive")]
struct Cli {
    /// Schema file (.schema), or preset:<name>
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

    /// Drop lines that fail to parse instead of stopping
    #[arg(long)]
    skip_bad: bool,

    /// Show paths, parser, and line counts on stderr and enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(cli.verbose))
        .with_writer(io::stderr)
        .init();

    let schema = match resolve_schema(&cli.schema) {
        Ok(schema) => schema,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    };

    let input_text = match fs::read_to_string(&cli.input) {
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
        eprintln!("Parser:   naive split");
    }

    let options = ReadOptions {
        has_header: !cli.no_header,
        on_error: if cli.skip_bad {
            BadLinePolicy::Skip
        } else {
            BadLinePolicy::Abort
        },
    };

    match read_document_naive(&input_text, &schema, &options) {
        Ok(document) => {
            let output = match render_records(&schema, &document.records, cli.format) {
                Ok(output) => output,
                Err(e) => {
                    eprintln!("Error rendering output: {e}");
                    process::exit(1);
                }
            };
            if let Some(out_path) = &cli.output {
                if let Some(parent) = Path::new(out_path.as_str()).parent()
                    && !parent.as_os_str().is_empty()
                    && fs::create_dir_all(parent).is_err()
                {
                    eprintln!("Error creating output directory for '{out_path}'");
                    process::exit(1);
                }
                if let Err(e) = fs::write(out_path, &output) {
                    eprintln!("Error writing output file '{out_path}': {e}");
                    process::exit(1);
                }
            } else if let Err(e) = io::stdout().write_all(output.as_bytes()) {
                eprintln!("Error writing output: {e}");
                process::exit(1);
            }
            if cli.verbose {
                eprintln!(
                    "Lines:    {} read -> {} records, {} skipped",
                    document.line_count,
                    document.records.len(),
                    document.skipped.len()
                );
            }
        }
        Err(e) => {
            eprintln!("Parse error: {e}");
            process::exit(1);
        }
    }
}
