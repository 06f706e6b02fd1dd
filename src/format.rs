//! Rendering records back out: delimited text, JSON Lines, or a JSON array.

use std::fmt::Write as _;
use std::io::{self, Write};

use serde::Serialize;
use serde::ser::SerializeMap;

use crate::record::Record;
use crate::schema::Schema;

/// Re-encode a record as one delimited line (no terminator).
///
/// Text is written byte-for-byte and numbers are written in canonical form,
/// so `"007"` comes back as `7`. Parsing the result with the same schema
/// yields an equal record.
pub fn format_record(record: &Record, delimiter: u8) -> String {
    let mut line = String::new();
    for (i, value) in record.values().iter().enumerate() {
        if i > 0 {
            line.push(char::from(delimiter));
        }
        // Writing into a String cannot fail.
        let _ = write!(line, "{value}");
    }
    line
}

/// A record paired with its schema so it serializes as a JSON object keyed
/// by field name.
#[derive(Debug, Clone, Copy)]
pub struct NamedRecord<'a> {
    pub schema: &'a Schema,
    pub record: &'a Record,
}

impl Serialize for NamedRecord<'_> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.record.len()))?;
        for (field, value) in self.schema.fields().iter().zip(self.record.values()) {
            map.serialize_entry(&field.name, value)?;
        }
        map.end()
    }
}

/// Output encodings understood by [`write_records`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Delimited text using the schema's delimiter.
    #[default]
    #[value(alias = "csv")]
    Delimited,
    /// One JSON object per line.
    #[value(name = "jsonl")]
    JsonLines,
    /// A single pretty-printed JSON array.
    Json,
}

/// Write `records` to `out` in `format`. Every line, including the last,
/// ends with `\n`.
pub fn write_records<W: Write>(
    out: &mut W,
    schema: &Schema,
    records: &[Record],
    format: OutputFormat,
) -> io::Result<()> {
    match format {
        OutputFormat::Delimited => {
            for record in records {
                writeln!(out, "{}", format_record(record, schema.delimiter()))?;
            }
        }
        OutputFormat::JsonLines => {
            for record in records {
                serde_json::to_writer(&mut *out, &NamedRecord { schema, record })?;
                out.write_all(b"\n")?;
            }
        }
        OutputFormat::Json => {
            let named: Vec<NamedRecord<'_>> = records
                .iter()
                .map(|record| NamedRecord { schema, record })
                .collect();
            serde_json::to_writer_pretty(&mut *out, &named)?;
            out.write_all(b"\n")?;
        }
    }
    Ok(())
}

/// [`write_records`] into a `String`.
pub fn render_records(
    schema: &Schema,
    records: &[Record],
    format: OutputFormat,
) -> io::Result<String> {
    let mut buf = Vec::new();
    write_records(&mut buf, schema, records, format)?;
    String::from_utf8(buf).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_line;

    const LINE: &str = "2024,EN,FT,Engineer,100000,USD,100000,US,100,US,M";

    #[test]
    fn test_round_trip_text_exact() {
        let schema = Schema::salary();
        let record = parse_line(LINE.as_bytes(), &schema).unwrap();
        assert_eq!(format_record(&record, b','), LINE);
    }

    #[test]
    fn test_round_trip_normalizes_numbers() {
        let schema = Schema::salary();
        let record =
            parse_line(b"2024,EN,FT,Engineer,007,USD,100000,US,-0,US,M", &schema).unwrap();
        let line = format_record(&record, b',');
        assert_eq!(line, "2024,EN,FT,Engineer,7,USD,100000,US,0,US,M");
        let again = parse_line(line.as_bytes(), &schema).unwrap();
        assert_eq!(again, record);
    }

    #[test]
    fn test_round_trip_decimals() {
        let schema = Schema::rigid_body();
        let record = parse_line(b"1.230,-45.6,0,9.81,.5,-2.45", &schema).unwrap();
        let line = format_record(&record, b',');
        assert_eq!(line, "1.23,-45.6,0,9.81,0.5,-2.45");
        assert_eq!(parse_line(line.as_bytes(), &schema).unwrap(), record);
    }

    #[test]
    fn test_round_trip_empty_text_and_date() {
        let schema = Schema::builder("e")
            .delimiter(b'\t')
            .text("note")
            .date_time("at")
            .build()
            .unwrap();
        let record = parse_line(b"\t2024-03-01T10:00:00", &schema).unwrap();
        let line = format_record(&record, b'\t');
        assert_eq!(line, "\t2024-03-01T10:00:00");
        assert_eq!(parse_line(line.as_bytes(), &schema).unwrap(), record);
    }

    #[test]
    fn test_json_lines() {
        let schema = Schema::builder("p")
            .text("name")
            .integer("age")
            .decimal("score")
            .build()
            .unwrap();
        let records = vec![
            parse_line(b"ann,31,9.5", &schema).unwrap(),
            parse_line(b"bo,4,0", &schema).unwrap(),
        ];
        let out = render_records(&schema, &records, OutputFormat::JsonLines).unwrap();
        assert_eq!(
            out,
            "{\"name\":\"ann\",\"age\":31,\"score\":9.5}\n{\"name\":\"bo\",\"age\":4,\"score\":0.0}\n"
        );
    }

    #[test]
    fn test_json_array_parses_back() {
        let schema = Schema::salary();
        let records = vec![parse_line(LINE.as_bytes(), &schema).unwrap()];
        let out = render_records(&schema, &records, OutputFormat::Json).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed[0]["job_title"], "Engineer");
        assert_eq!(parsed[0]["salary_in_usd"], 100000);
        assert_eq!(parsed.as_array().map(Vec::len), Some(1));
    }

    #[test]
    fn test_delimited_output() {
        let schema = Schema::salary();
        let records = vec![parse_line(LINE.as_bytes(), &schema).unwrap()];
        let out = render_records(&schema, &records, OutputFormat::Delimited).unwrap();
        assert_eq!(out, format!("{LINE}\n"));
    }

    struct FullDisk;

    impl Write for FullDisk {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::StorageFull, "disk full"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_write_errors_propagate() {
        let schema = Schema::salary();
        let records = vec![parse_line(LINE.as_bytes(), &schema).unwrap()];
        for format in [OutputFormat::Delimited, OutputFormat::JsonLines, OutputFormat::Json] {
            let err = write_records(&mut FullDisk, &schema, &records, format).unwrap_err();
            assert_eq!(err.kind(), io::ErrorKind::StorageFull);
        }
    }

    #[test]
    fn test_output_format_names() {
        use clap::ValueEnum;
        assert_eq!(OutputFormat::from_str("csv", true), Ok(OutputFormat::Delimited));
        assert_eq!(OutputFormat::from_str("JSONL", true), Ok(OutputFormat::JsonLines));
        assert_eq!(OutputFormat::from_str("json", false), Ok(OutputFormat::Json));
        assert!(OutputFormat::from_str("xml", true).is_err());
    }
}
