//! Error types for schema construction, line parsing and document reading.

use thiserror::Error;

use crate::schema::FieldKind;

/// A single line failed to parse against its schema.
///
/// No partial record is ever returned alongside one of these.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The line has fewer fields than the schema, or more under
    /// [`ExtraFields::Reject`](crate::ExtraFields::Reject).
    #[error("field count mismatch: expected {expected}, found {found}")]
    FieldCountMismatch { expected: usize, found: usize },

    /// Field `index` (0-based) does not conform to its declared kind.
    #[error("field {index}: '{raw}' is not a valid {kind}")]
    FieldFormat {
        index: usize,
        kind: FieldKind,
        raw: String,
    },
}

impl ParseError {
    pub(crate) fn field_format(index: usize, kind: FieldKind, span: &[u8]) -> Self {
        Self::FieldFormat {
            index,
            kind,
            raw: String::from_utf8_lossy(span).into_owned(),
        }
    }

    /// Report a line that is short anyway as the count mismatch rather than
    /// as the first field that failed on it. `found` is the line's total
    /// field count.
    pub(crate) fn or_count_mismatch(self, expected: usize, found: usize) -> Self {
        if found < expected {
            Self::FieldCountMismatch { expected, found }
        } else {
            self
        }
    }

    /// Index of the failing field, if the error is tied to one.
    pub fn field_index(&self) -> Option<usize> {
        match self {
            Self::FieldFormat { index, .. } => Some(*index),
            Self::FieldCountMismatch { .. } => None,
        }
    }
}

/// A schema definition was rejected by the builder.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("schema '{0}' has no fields")]
    Empty(String),

    #[error("field {index} has an empty name")]
    EmptyFieldName { index: usize },

    #[error("name '{0}' must be a single word")]
    InvalidName(String),

    #[error("duplicate field name '{0}'")]
    DuplicateField(String),

    #[error("delimiter {0:?} is not allowed (must be ASCII and not a digit, '-', '.', CR or LF)")]
    InvalidDelimiter(char),

    #[error("unknown preset '{0}' (try salary, taxi-ride or rigid-body)")]
    UnknownPreset(String),
}

/// A schema file could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DslError {
    #[error("line {line}: {message}")]
    Syntax { line: usize, message: String },

    #[error(transparent)]
    Schema(#[from] SchemaError),
}

/// Reading a whole document stopped at a bad line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReadError {
    /// `line_number` is 1-based and counts the header row.
    #[error("line {line_number}: {source}")]
    Line {
        line_number: usize,
        #[source]
        source: ParseError,
    },
}

/// Failure while running a schema against a whole input.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("failed to read schema file '{path}': {source}")]
    SchemaFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("schema file '{path}': {source}")]
    Dsl {
        path: String,
        #[source]
        source: DslError,
    },

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Read(#[from] ReadError),

    #[error("failed to render output: {0}")]
    Render(#[source] std::io::Error),
}

/// A date-time string did not match either supported layout.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("'{0}' is not a date-time (expected YYYY-MM-DDTHH:MM:SS or HH:MM:SS)")]
pub struct DateTimeError(pub String);
