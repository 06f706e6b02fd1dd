//! Whole-document reading on top of [`str::lines`].

use delimited_rs::{BadLinePolicy, Document, ReadError, ReadOptions, Schema};
use tracing::warn;

use crate::parser::parse_line;

/// Parse every data line of `input`, with the same header, blank-line and
/// bad-line handling as `delimited_rs::read_document`.
pub fn read_document_naive(
    input: &str,
    schema: &Schema,
    options: &ReadOptions,
) -> Result<Document, ReadError> {
    let mut document = Document::default();
    let header_lines = usize::from(options.has_header);

    for (index, line) in input.lines().enumerate() {
        document.line_count += 1;
        if index < header_lines || line.is_empty() {
            continue;
        }

        let line_number = index + 1;
        match parse_line(line, schema) {
            Ok(record) => document.records.push(record),
            Err(source) => match options.on_error {
                BadLinePolicy::Abort => {
                    return Err(ReadError::Line {
                        line_number,
                        source,
                    });
                }
                BadLinePolicy::Skip => {
                    warn!(line_number, error = %source, "skipping line");
                    document.skipped.push((line_number, source));
                }
            },
        }
    }

    Ok(document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use delimited_rs::{RecordParser, read_document, resolve_schema};
    use std::fs;
    use std::path::{Path, PathBuf};

    fn spec_dir() -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("../specs")
    }

    fn skip_bad() -> ReadOptions {
        ReadOptions {
            on_error: BadLinePolicy::Skip,
            ..ReadOptions::default()
        }
    }

    /// Assert the span parser and the naive parser agree on a fixture.
    fn assert_equivalence(schema_name: &str, data_name: &str) {
        let dir = spec_dir();
        let schema_path = dir.join(schema_name);
        let schema = resolve_schema(&schema_path.to_string_lossy()).unwrap();
        let input = fs::read_to_string(dir.join(data_name)).unwrap();

        let parser = RecordParser::new(schema.clone());
        let span_doc = read_document(input.as_bytes(), &parser, &skip_bad()).unwrap();
        let naive_doc = read_document_naive(&input, &schema, &skip_bad()).unwrap();

        assert!(!span_doc.records.is_empty(), "{data_name} has no records");
        assert_eq!(
            span_doc, naive_doc,
            "naive output differs from span parser for {data_name}"
        );
    }

    // --- Unit tests ---

    #[test]
    fn test_header_and_blank_lines() {
        let schema = Schema::builder("n").integer("n").build().unwrap();
        let doc = read_document_naive("n\n1\n\n2\n", &schema, &ReadOptions::default()).unwrap();
        assert_eq!(doc.records.len(), 2);
        assert_eq!(doc.line_count, 4);
    }

    #[test]
    fn test_abort_line_number() {
        let schema = Schema::builder("n").integer("n").build().unwrap();
        let err = read_document_naive("n\r\n1\r\nx\r\n", &schema, &ReadOptions::default())
            .unwrap_err();
        assert_eq!(err.to_string(), "line 3: field 0: 'x' is not a valid integer");
    }

    #[test]
    fn test_malformed_salary_row_skipped() {
        let schema = Schema::salary();
        let input = fs::read_to_string(spec_dir().join("salaries-2024.csv")).unwrap();
        let doc = read_document_naive(&input, &schema, &skip_bad()).unwrap();
        assert_eq!(doc.records.len(), 19);
        assert_eq!(doc.skipped.len(), 1);
        assert_eq!(doc.skipped[0].0, 20);
        assert_eq!(doc.skipped[0].1.field_index(), Some(4));
    }

    // --- Equivalence tests for all fixture files ---

    macro_rules! equiv_test {
        ($name:ident, $schema:expr, $data:expr) => {
            #[test]
            fn $name() {
                assert_equivalence($schema, $data);
            }
        };
    }

    equiv_test!(equiv_salaries, "salary.schema", "salaries-2024.csv");
    equiv_test!(equiv_taxi_fares, "taxi-ride.schema", "taxi-fare.csv");
    equiv_test!(equiv_rigid_body, "rigid-body.schema", "rigid-body.csv");
    equiv_test!(equiv_events_crlf, "events.schema", "events.csv");
}
