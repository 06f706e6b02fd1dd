//! The span-based line parser.
//!
//! One pass over the line: [`FieldSpans`] produces each field's byte range,
//! the schema's kind for that position decides how the range is decoded,
//! and the decoded value is pushed straight into the record. No list of
//! substrings is ever built. Text fields are the only values that copy
//! bytes out of the caller's buffer.
//!
//! ```
//! use delimited_rs::{RecordParser, Schema};
//!
//! let parser = RecordParser::new(Schema::salary());
//! let record = parser
//!     .parse_line(b"2024,EN,FT,Engineer,100000,USD,100000,US,100,US,M")
//!     .unwrap();
//!
//! assert_eq!(record.integer(0), Some(2024));
//! assert_eq!(record.text(3), Some("Engineer"));
//! ```

use std::sync::{Arc, Mutex, PoisonError};

use crate::datetime::SystemDate;
use crate::error::ParseError;
use crate::intern::Interner;
use crate::numeric::{parse_decimal, parse_integer};
use crate::record::{Record, Value};
use crate::schema::{ExtraFields, FieldKind, Schema};
use crate::split::FieldSpans;

/// Parses lines against one schema.
///
/// Without an interner the parser holds no mutable state. With one, text
/// values are deduplicated across every line this parser sees, and threads
/// sharing the parser serialize on the interner.
#[derive(Debug)]
pub struct RecordParser {
    schema: Schema,
    interner: Option<Mutex<Interner>>,
}

impl RecordParser {
    pub fn new(schema: Schema) -> Self {
        Self {
            schema,
            interner: None,
        }
    }

    /// Route every text field through a shared [`Interner`].
    pub fn with_interner(mut self) -> Self {
        self.interner = Some(Mutex::new(Interner::new()));
        self
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Distinct text values interned so far (0 without an interner).
    pub fn interned_count(&self) -> usize {
        self.interner
            .as_ref()
            .map_or(0, |interner| {
                interner.lock().unwrap_or_else(PoisonError::into_inner).len()
            })
    }

    /// Parse one unterminated line into a record.
    ///
    /// Fails on the first field that does not match its kind, and when the
    /// line has fewer fields than the schema (or more, if the schema rejects
    /// extra fields).
    pub fn parse_line(&self, line: &[u8]) -> Result<Record, ParseError> {
        match &self.interner {
            Some(interner) => parse_fields(line, &self.schema, |s| {
                interner
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .intern(s)
            }),
            None => parse_fields(line, &self.schema, |s| Arc::from(s)),
        }
    }

    /// Convenience for `&str` input.
    pub fn parse_str(&self, line: &str) -> Result<Record, ParseError> {
        self.parse_line(line.as_bytes())
    }
}

/// Parse `line` against `schema` without keeping a parser around.
pub fn parse_line(line: &[u8], schema: &Schema) -> Result<Record, ParseError> {
    parse_fields(line, schema, |s| Arc::from(s))
}

fn parse_fields(
    line: &[u8],
    schema: &Schema,
    mut make_text: impl FnMut(&str) -> Arc<str>,
) -> Result<Record, ParseError> {
    let expected = schema.len();
    let mut spans = FieldSpans::new(line, schema.delimiter());
    let mut values = Vec::with_capacity(expected);

    for (index, field) in schema.fields().iter().enumerate() {
        let Some(span) = spans.next_slice() else {
            return Err(ParseError::FieldCountMismatch {
                expected,
                found: index,
            });
        };
        let value = parse_value(index, field.kind, span, &mut make_text)
            .map_err(|err| err.or_count_mismatch(expected, index + 1 + spans.remaining()))?;
        values.push(value);
    }

    if schema.extra_fields() == ExtraFields::Reject {
        let extra = spans.remaining();
        if extra > 0 {
            return Err(ParseError::FieldCountMismatch {
                expected,
                found: expected + extra,
            });
        }
    }

    Ok(Record::from_values(values))
}

/// Decode a single span as `kind`. `make_text` turns validated UTF-8 into
/// the owned text value.
pub(crate) fn parse_value(
    index: usize,
    kind: FieldKind,
    span: &[u8],
    make_text: impl FnOnce(&str) -> Arc<str>,
) -> Result<Value, ParseError> {
    let value = match kind {
        FieldKind::Integer => parse_integer(span).map(Value::Integer),
        FieldKind::Decimal => parse_decimal(span).map(Value::Decimal),
        FieldKind::Text => std::str::from_utf8(span)
            .ok()
            .map(|s| Value::Text(make_text(s))),
        FieldKind::DateTime => SystemDate::parse(span).map(Value::DateTime),
    };
    value.ok_or_else(|| ParseError::field_format(index, kind, span))
}
