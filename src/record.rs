//! Parsed records and their field values.

use std::fmt;
use std::sync::Arc;

use serde::{Serialize, Serializer};

use crate::datetime::SystemDate;
use crate::schema::FieldKind;

/// One parsed field.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Integer(i64),
    Decimal(f64),
    Text(Arc<str>),
    DateTime(SystemDate),
}

impl Value {
    pub fn kind(&self) -> FieldKind {
        match self {
            Self::Integer(_) => FieldKind::Integer,
            Self::Decimal(_) => FieldKind::Decimal,
            Self::Text(_) => FieldKind::Text,
            Self::DateTime(_) => FieldKind::DateTime,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_decimal(&self) -> Option<f64> {
        match self {
            Self::Decimal(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_date_time(&self) -> Option<SystemDate> {
        match self {
            Self::DateTime(v) => Some(*v),
            _ => None,
        }
    }
}

/// Writes the value the way it is re-encoded into a delimited line.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(v) => write!(f, "{v}"),
            Self::Decimal(v) => write!(f, "{v}"),
            Self::Text(v) => f.write_str(v),
            Self::DateTime(v) => write!(f, "{v}"),
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Integer(v) => serializer.serialize_i64(*v),
            Self::Decimal(v) => serializer.serialize_f64(*v),
            Self::Text(v) => serializer.serialize_str(v),
            Self::DateTime(v) => serializer.collect_str(v),
        }
    }
}

/// A fully parsed line: one value per schema field, in schema order.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    values: Vec<Value>,
}

impl Record {
    /// Wrap already-parsed values. Parsers call this only once every field
    /// of the line has parsed.
    pub fn from_values(values: Vec<Value>) -> Self {
        Self { values }
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn get(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn integer(&self, index: usize) -> Option<i64> {
        self.get(index)?.as_integer()
    }

    pub fn decimal(&self, index: usize) -> Option<f64> {
        self.get(index)?.as_decimal()
    }

    pub fn text(&self, index: usize) -> Option<&str> {
        self.get(index)?.as_text()
    }

    pub fn date_time(&self, index: usize) -> Option<SystemDate> {
        self.get(index)?.as_date_time()
    }

    pub fn into_values(self) -> Vec<Value> {
        self.values
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(&self.values)
    }
}
