//! Line parsing via `str::split` and `str::parse`.

use std::sync::Arc;

use delimited_rs::{ExtraFields, FieldKind, ParseError, Record, Schema, Value};

/// Parse one line against `schema`.
pub fn parse_line(line: &str, schema: &Schema) -> Result<Record, ParseError> {
    let fields: Vec<&str> = line.split(char::from(schema.delimiter())).collect();
    let expected = schema.len();

    let too_many = schema.extra_fields() == ExtraFields::Reject && fields.len() > expected;
    if fields.len() < expected || too_many {
        return Err(ParseError::FieldCountMismatch {
            expected,
            found: fields.len(),
        });
    }

    schema
        .fields()
        .iter()
        .zip(&fields)
        .enumerate()
        .map(|(index, (spec, raw))| parse_field(index, spec.kind, raw))
        .collect::<Result<Vec<_>, _>>()
        .map(Record::from_values)
}

fn parse_field(index: usize, kind: FieldKind, raw: &str) -> Result<Value, ParseError> {
    let value = match kind {
        FieldKind::Integer => raw.parse().ok().map(Value::Integer),
        FieldKind::Decimal => raw.parse().ok().map(Value::Decimal),
        FieldKind::Text => Some(Value::Text(Arc::from(raw))),
        FieldKind::DateTime => raw.parse().ok().map(Value::DateTime),
    };
    value.ok_or_else(|| ParseError::FieldFormat {
        index,
        kind,
        raw: raw.to_string(),
    })
}
