//! Record schemas: the ordered, typed field layout of a delimited line.
//!
//! A schema is plain data. It can be built in code, taken from one of the
//! named presets, or parsed from a schema file (see [`crate::dsl`]).
//!
//! ```
//! use delimited_rs::{FieldKind, Schema};
//!
//! let schema = Schema::builder("reading")
//!     .text("sensor")
//!     .integer("count")
//!     .decimal("mean")
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(schema.len(), 3);
//! assert_eq!(schema.field(2).unwrap().kind, FieldKind::Decimal);
//! ```

use std::collections::HashSet;
use std::fmt;

use crate::error::SchemaError;

/// How a field's span is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// Signed base-10 integer, stored as `i64`.
    Integer,
    /// Signed decimal with `.` as the point, stored as `f64`.
    Decimal,
    /// UTF-8 text copied verbatim.
    Text,
    /// `YYYY-MM-DDTHH:MM:SS` or `HH:MM:SS`.
    DateTime,
}

impl FieldKind {
    /// Parse a kind keyword as used in schema files.
    pub fn from_keyword(word: &str) -> Option<Self> {
        match word.to_ascii_uppercase().as_str() {
            "INTEGER" | "INT" => Some(Self::Integer),
            "DECIMAL" | "DEC" => Some(Self::Decimal),
            "TEXT" | "STR" => Some(Self::Text),
            "DATETIME" | "DATE" => Some(Self::DateTime),
            _ => None,
        }
    }

    /// Canonical schema-file keyword.
    pub fn keyword(&self) -> &'static str {
        match self {
            Self::Integer => "INTEGER",
            Self::Decimal => "DECIMAL",
            Self::Text => "TEXT",
            Self::DateTime => "DATETIME",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Integer => "integer",
            Self::Decimal => "decimal",
            Self::Text => "text",
            Self::DateTime => "date-time",
        };
        f.write_str(name)
    }
}

/// One named, typed slot in a schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: String,
    pub kind: FieldKind,
}

/// What to do with fields beyond the schema's arity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExtraFields {
    /// Silently drop trailing fields.
    #[default]
    Ignore,
    /// Fail the line with `FieldCountMismatch`.
    Reject,
}

/// Ordered field layout plus delimiter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    name: String,
    delimiter: u8,
    fields: Vec<FieldSpec>,
    extra_fields: ExtraFields,
}

pub const DEFAULT_DELIMITER: u8 = b',';

impl Schema {
    pub fn builder(name: impl Into<String>) -> SchemaBuilder {
        SchemaBuilder {
            name: name.into(),
            delimiter: DEFAULT_DELIMITER,
            fields: Vec::new(),
            extra_fields: ExtraFields::default(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn delimiter(&self) -> u8 {
        self.delimiter
    }

    pub fn extra_fields(&self) -> ExtraFields {
        self.extra_fields
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn field(&self, index: usize) -> Option<&FieldSpec> {
        self.fields.get(index)
    }

    /// Position of the field called `name`.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    /// Number of fields (the record arity).
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Copy of this schema with a different extra-field policy.
    pub fn with_extra_fields(mut self, extra_fields: ExtraFields) -> Self {
        self.extra_fields = extra_fields;
        self
    }

    /// The salaries CSV layout (11 fields).
    pub fn salary() -> Self {
        Self::trusted(
            "salary",
            &[
                ("work_year", FieldKind::Integer),
                ("experience_level", FieldKind::Text),
                ("employment_type", FieldKind::Text),
                ("job_title", FieldKind::Text),
                ("salary", FieldKind::Integer),
                ("salary_currency", FieldKind::Text),
                ("salary_in_usd", FieldKind::Integer),
                ("employee_residence", FieldKind::Text),
                ("remote_ratio", FieldKind::Integer),
                ("company_location", FieldKind::Text),
                ("company_size", FieldKind::Text),
            ],
        )
    }

    /// The taxi fare CSV layout (7 fields).
    pub fn taxi_ride() -> Self {
        Self::trusted(
            "taxi-ride",
            &[
                ("vendor_id", FieldKind::Text),
                ("rate_code", FieldKind::Integer),
                ("passenger_count", FieldKind::Integer),
                ("trip_time_secs", FieldKind::Integer),
                ("trip_distance", FieldKind::Decimal),
                ("payment_type", FieldKind::Text),
                ("fare_amount", FieldKind::Decimal),
            ],
        )
    }

    /// Position and velocity vectors: six decimals.
    pub fn rigid_body() -> Self {
        Self::trusted(
            "rigid-body",
            &[
                ("x", FieldKind::Decimal),
                ("y", FieldKind::Decimal),
                ("z", FieldKind::Decimal),
                ("vx", FieldKind::Decimal),
                ("vy", FieldKind::Decimal),
                ("vz", FieldKind::Decimal),
            ],
        )
    }

    /// Look up a built-in schema by name.
    pub fn preset(name: &str) -> Result<Self, SchemaError> {
        match name.to_ascii_lowercase().as_str() {
            "salary" | "salaries" => Ok(Self::salary()),
            "taxi-ride" | "taxi" => Ok(Self::taxi_ride()),
            "rigid-body" | "rigid-body-state" => Ok(Self::rigid_body()),
            _ => Err(SchemaError::UnknownPreset(name.to_string())),
        }
    }

    // Presets are fixed tables with unique names and the default
    // delimiter, so they skip builder validation.
    fn trusted(name: &str, fields: &[(&str, FieldKind)]) -> Self {
        Self {
            name: name.to_string(),
            delimiter: DEFAULT_DELIMITER,
            fields: fields
                .iter()
                .map(|&(name, kind)| FieldSpec {
                    name: name.to_string(),
                    kind,
                })
                .collect(),
            extra_fields: ExtraFields::Ignore,
        }
    }
}

/// Builder for [`Schema`], validating on [`build`](SchemaBuilder::build).
#[derive(Debug, Clone)]
pub struct SchemaBuilder {
    name: String,
    delimiter: u8,
    fields: Vec<FieldSpec>,
    extra_fields: ExtraFields,
}

impl SchemaBuilder {
    pub fn delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn extra_fields(mut self, extra_fields: ExtraFields) -> Self {
        self.extra_fields = extra_fields;
        self
    }

    pub fn field(mut self, name: impl Into<String>, kind: FieldKind) -> Self {
        self.fields.push(FieldSpec {
            name: name.into(),
            kind,
        });
        self
    }

    pub fn integer(self, name: impl Into<String>) -> Self {
        self.field(name, FieldKind::Integer)
    }

    pub fn decimal(self, name: impl Into<String>) -> Self {
        self.field(name, FieldKind::Decimal)
    }

    pub fn text(self, name: impl Into<String>) -> Self {
        self.field(name, FieldKind::Text)
    }

    pub fn date_time(self, name: impl Into<String>) -> Self {
        self.field(name, FieldKind::DateTime)
    }

    pub fn build(self) -> Result<Schema, SchemaError> {
        if self.fields.is_empty() {
            return Err(SchemaError::Empty(self.name));
        }
        if !is_valid_delimiter(self.delimiter) {
            return Err(SchemaError::InvalidDelimiter(char::from(self.delimiter)));
        }
        if !is_single_word(&self.name) {
            return Err(SchemaError::InvalidName(self.name));
        }

        let mut seen = HashSet::with_capacity(self.fields.len());
        for (index, field) in self.fields.iter().enumerate() {
            if field.name.trim().is_empty() {
                return Err(SchemaError::EmptyFieldName { index });
            }
            if !is_single_word(&field.name) {
                return Err(SchemaError::InvalidName(field.name.clone()));
            }
            if !seen.insert(field.name.as_str()) {
                return Err(SchemaError::DuplicateField(field.name.clone()));
            }
        }

        Ok(Schema {
            name: self.name,
            delimiter: self.delimiter,
            fields: self.fields,
            extra_fields: self.extra_fields,
        })
    }
}

/// Names appear as a single word in schema files.
fn is_single_word(name: &str) -> bool {
    !name.is_empty() && !name.contains(char::is_whitespace)
}

/// Digits, `-` and `.` belong to numeric spans; CR and LF belong to the
/// line reader.
fn is_valid_delimiter(b: u8) -> bool {
    b.is_ascii() && !b.is_ascii_digit() && !matches!(b, b'-' | b'.' | b'\r' | b'\n')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let schema = Schema::builder("s").integer("a").text("b").build().unwrap();
        assert_eq!(schema.name(), "s");
        assert_eq!(schema.delimiter(), b',');
        assert_eq!(schema.extra_fields(), ExtraFields::Ignore);
        assert_eq!(schema.len(), 2);
        assert_eq!(schema.index_of("b"), Some(1));
        assert_eq!(schema.index_of("c"), None);
    }

    #[test]
    fn test_builder_rejects_empty() {
        assert_eq!(
            Schema::builder("none").build(),
            Err(SchemaError::Empty("none".to_string()))
        );
    }

    #[test]
    fn test_builder_rejects_duplicate_names() {
        let result = Schema::builder("s").integer("a").text("a").build();
        assert_eq!(result, Err(SchemaError::DuplicateField("a".to_string())));
    }

    #[test]
    fn test_builder_rejects_blank_name() {
        let result = Schema::builder("s").integer("a").text("  ").build();
        assert_eq!(result, Err(SchemaError::EmptyFieldName { index: 1 }));
    }

    #[test]
    fn test_builder_rejects_names_with_whitespace() {
        let result = Schema::builder("s").text("job title").build();
        assert_eq!(
            result,
            Err(SchemaError::InvalidName("job title".to_string()))
        );

        let result = Schema::builder("my schema").text("a").build();
        assert_eq!(
            result,
            Err(SchemaError::InvalidName("my schema".to_string()))
        );
        assert!(Schema::builder("").text("a").build().is_err());
    }

    #[test]
    fn test_builder_rejects_numeric_delimiters() {
        for bad in [b'.', b'-', b'7', b'\n', b'\r', 0xC3] {
            let result = Schema::builder("s").delimiter(bad).integer("a").build();
            assert!(
                matches!(result, Err(SchemaError::InvalidDelimiter(_))),
                "delimiter {bad} accepted"
            );
        }
        assert!(Schema::builder("s").delimiter(b';').integer("a").build().is_ok());
        assert!(Schema::builder("s").delimiter(b'\t').integer("a").build().is_ok());
    }

    #[test]
    fn test_presets() {
        assert_eq!(Schema::salary().len(), 11);
        assert_eq!(Schema::taxi_ride().len(), 7);
        assert_eq!(Schema::rigid_body().len(), 6);
        assert_eq!(Schema::preset("Salary").unwrap(), Schema::salary());
        assert_eq!(Schema::preset("taxi").unwrap(), Schema::taxi_ride());
        assert_eq!(
            Schema::preset("weather"),
            Err(SchemaError::UnknownPreset("weather".to_string()))
        );
    }

    #[test]
    fn test_kind_keywords() {
        assert_eq!(FieldKind::from_keyword("int"), Some(FieldKind::Integer));
        assert_eq!(FieldKind::from_keyword("Decimal"), Some(FieldKind::Decimal));
        assert_eq!(FieldKind::from_keyword("STR"), Some(FieldKind::Text));
        assert_eq!(FieldKind::from_keyword("date"), Some(FieldKind::DateTime));
        assert_eq!(FieldKind::from_keyword("float"), None);
        for kind in [
            FieldKind::Integer,
            FieldKind::Decimal,
            FieldKind::Text,
            FieldKind::DateTime,
        ] {
            assert_eq!(FieldKind::from_keyword(kind.keyword()), Some(kind));
        }
    }
}
