//! # delimited-rs
//!
//! Allocation-free parsing of delimited records.
//!
//! A line is split lazily on a single-byte delimiter and each field is
//! decoded in place according to a [`Schema`], so the only heap
//! allocations per line are the text fields themselves (plus the record's
//! value vector on the dynamic path).
//!
//! ## Overview
//!
//! - **Schemas as data**: ordered, typed field descriptors built in code,
//!   taken from a preset, or read from a schema file
//! - **Span parsing**: integers, decimals and date-times decoded straight
//!   from byte windows with locale-invariant rules
//! - **Typed records**: compile-time layouts that skip the value vector
//! - **Documents**: header skipping, CRLF handling, skip-or-abort on bad lines
//!
//! ## Example
//!
//! ```
//! use delimited_rs::{ParseError, RecordParser, Schema};
//!
//! let parser = RecordParser::new(Schema::salary());
//!
//! let record = parser
//!     .parse_str("2024,EN,FT,Engineer,100000,USD,100000,US,100,US,M")
//!     .unwrap();
//! assert_eq!(record.integer(4), Some(100_000));
//!
//! let err = parser.parse_str("2024,EN,FT").unwrap_err();
//! assert_eq!(err, ParseError::FieldCountMismatch { expected: 11, found: 3 });
//! ```

pub mod datetime;
pub mod dsl;
pub mod error;
pub mod format;
pub mod intern;
pub mod numeric;
pub mod parser;
pub mod reader;
pub mod record;
pub mod run;
pub mod schema;
pub mod split;
pub mod typed;

pub use datetime::SystemDate;
pub use dsl::{Directive, parse_directives, parse_schema, to_schema_text};
pub use error::{DateTimeError, DslError, ParseError, ReadError, RunError, SchemaError};
pub use format::{NamedRecord, OutputFormat, format_record, render_records, write_records};
pub use intern::Interner;
pub use parser::{RecordParser, parse_line};
pub use reader::{BadLinePolicy, Document, Lines, ReadOptions, read_document};
pub use record::{Record, Value};
pub use run::{RunSummary, default_log_level, log_filter, resolve_schema, run_document};
pub use schema::{ExtraFields, FieldKind, FieldSpec, Schema, SchemaBuilder};
pub use split::FieldSpans;
pub use typed::{
    FieldCursor, FromFields, RateCode, RigidBodyState, SalaryRecord, TaxiRide, parse_typed,
};
