//! Glue used by the command-line runners: resolve a schema argument, read
//! a document, render the output.

use std::fs;

use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::dsl::parse_schema;
use crate::error::RunError;
use crate::format::{OutputFormat, render_records};
use crate::parser::RecordParser;
use crate::reader::{ReadOptions, read_document};
use crate::schema::Schema;

/// Prefix selecting a built-in schema instead of a schema file.
pub const PRESET_PREFIX: &str = "preset:";

/// Load a schema from `preset:<name>` or a schema file path.
pub fn resolve_schema(arg: &str) -> Result<Schema, RunError> {
    if let Some(name) = arg.strip_prefix(PRESET_PREFIX) {
        debug!(preset = name, "using built-in schema");
        return Ok(Schema::preset(name)?);
    }

    let text = fs::read_to_string(arg).map_err(|source| RunError::SchemaFile {
        path: arg.to_string(),
        source,
    })?;
    let schema = parse_schema(&text).map_err(|source| RunError::Dsl {
        path: arg.to_string(),
        source,
    })?;
    debug!(path = arg, schema = schema.name(), fields = schema.len(), "loaded schema file");
    Ok(schema)
}

/// Level used when `RUST_LOG` is unset.
pub fn default_log_level(verbose: bool) -> &'static str {
    if verbose { "debug" } else { "warn" }
}

/// Log filter for the command-line runners: `RUST_LOG` when set, otherwise
/// [`default_log_level`].
pub fn log_filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_log_level(verbose)))
}

/// Counts reported alongside the rendered output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub output: String,
    pub line_count: usize,
    pub record_count: usize,
    pub skipped_count: usize,
}

/// Parse `input` with `schema` and render the records as `format`.
pub fn run_document(
    input: &[u8],
    schema: Schema,
    options: &ReadOptions,
    format: OutputFormat,
    intern: bool,
) -> Result<RunSummary, RunError> {
    let parser = if intern {
        RecordParser::new(schema).with_interner()
    } else {
        RecordParser::new(schema)
    };
    let document = read_document(input, &parser, options)?;
    debug!(interned = parser.interned_count(), "parse complete");

    let output =
        render_records(parser.schema(), &document.records, format).map_err(RunError::Render)?;

    Ok(RunSummary {
        output,
        line_count: document.line_count,
        record_count: document.records.len(),
        skipped_count: document.skipped.len(),
    })
}
