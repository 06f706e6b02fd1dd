//! Fixed-arity records decoded straight from field spans.
//!
//! A [`FromFields`] type knows its layout at compile time, so it pulls each
//! field off a [`FieldCursor`] in order and builds itself with no
//! intermediate `Vec<Value>`. The only heap allocations are the text fields
//! themselves.

use std::fmt;

use serde::Serialize;

use crate::datetime::SystemDate;
use crate::error::ParseError;
use crate::numeric::{parse_decimal, parse_integer};
use crate::schema::{DEFAULT_DELIMITER, FieldKind};
use crate::split::FieldSpans;

/// Sequential access to the fields of one line, tracking the field index
/// for error reporting.
#[derive(Debug)]
pub struct FieldCursor<'a> {
    spans: FieldSpans<'a>,
    index: usize,
    arity: usize,
}

impl<'a> FieldCursor<'a> {
    pub fn new(line: &'a [u8], delimiter: u8, arity: usize) -> Self {
        Self {
            spans: FieldSpans::new(line, delimiter),
            index: 0,
            arity,
        }
    }

    /// Index of the next field to be read.
    pub fn index(&self) -> usize {
        self.index
    }

    fn next_span(&mut self) -> Result<(usize, &'a [u8]), ParseError> {
        let index = self.index;
        let span = self
            .spans
            .next_slice()
            .ok_or(ParseError::FieldCountMismatch {
                expected: self.arity,
                found: index,
            })?;
        self.index += 1;
        Ok((index, span))
    }

    /// Format error for the field just taken, unless the line is short.
    fn field_error(&self, index: usize, kind: FieldKind, span: &[u8]) -> ParseError {
        ParseError::field_format(index, kind, span)
            .or_count_mismatch(self.arity, self.index + self.spans.remaining())
    }

    pub fn integer(&mut self) -> Result<i64, ParseError> {
        let (index, span) = self.next_span()?;
        parse_integer(span).ok_or_else(|| self.field_error(index, FieldKind::Integer, span))
    }

    /// Next field as an integer that must fit `T`.
    pub fn integer_as<T: TryFrom<i64>>(&mut self) -> Result<T, ParseError> {
        let (index, span) = self.next_span()?;
        parse_integer(span)
            .and_then(|v| T::try_from(v).ok())
            .ok_or_else(|| self.field_error(index, FieldKind::Integer, span))
    }

    pub fn decimal(&mut self) -> Result<f64, ParseError> {
        let (index, span) = self.next_span()?;
        parse_decimal(span).ok_or_else(|| self.field_error(index, FieldKind::Decimal, span))
    }

    pub fn text(&mut self) -> Result<String, ParseError> {
        let (index, span) = self.next_span()?;
        std::str::from_utf8(span)
            .map(str::to_owned)
            .map_err(|_| self.field_error(index, FieldKind::Text, span))
    }

    pub fn date_time(&mut self) -> Result<SystemDate, ParseError> {
        let (index, span) = self.next_span()?;
        SystemDate::parse(span)
            .ok_or_else(|| self.field_error(index, FieldKind::DateTime, span))
    }
}

/// A record type with a compiled-in field layout.
pub trait FromFields: Sized {
    /// Number of fields the type consumes.
    const ARITY: usize;

    fn from_fields(cursor: &mut FieldCursor<'_>) -> Result<Self, ParseError>;
}

/// Decode `line` as `T`. Fields past `T::ARITY` are ignored.
pub fn parse_typed<T: FromFields>(line: &[u8], delimiter: u8) -> Result<T, ParseError> {
    let mut cursor = FieldCursor::new(line, delimiter, T::ARITY);
    T::from_fields(&mut cursor)
}

/// One row of the developer salaries survey.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SalaryRecord {
    pub work_year: i32,
    pub experience_level: String,
    pub employment_type: String,
    pub job_title: String,
    pub salary: i64,
    pub salary_currency: String,
    pub salary_in_usd: i64,
    pub employee_residence: String,
    pub remote_ratio: i32,
    pub company_location: String,
    pub company_size: String,
}

impl FromFields for SalaryRecord {
    const ARITY: usize = 11;

    fn from_fields(c: &mut FieldCursor<'_>) -> Result<Self, ParseError> {
        Ok(Self {
            work_year: c.integer_as()?,
            experience_level: c.text()?,
            employment_type: c.text()?,
            job_title: c.text()?,
            salary: c.integer()?,
            salary_currency: c.text()?,
            salary_in_usd: c.integer()?,
            employee_residence: c.text()?,
            remote_ratio: c.integer_as()?,
            company_location: c.text()?,
            company_size: c.text()?,
        })
    }
}

impl SalaryRecord {
    pub fn parse(line: &[u8]) -> Result<Self, ParseError> {
        parse_typed(line, DEFAULT_DELIMITER)
    }
}

/// Taxi fare rate codes. Codes outside the known set are kept as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RateCode {
    Standard,
    Jfk,
    Newark,
    NassauOrWestchester,
    Negotiated,
    GroupRide,
    Other(u8),
}

impl From<u8> for RateCode {
    fn from(code: u8) -> Self {
        match code {
            1 => Self::Standard,
            2 => Self::Jfk,
            3 => Self::Newark,
            4 => Self::NassauOrWestchester,
            5 => Self::Negotiated,
            6 => Self::GroupRide,
            other => Self::Other(other),
        }
    }
}

/// One row of the taxi fare dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaxiRide {
    pub vendor_id: String,
    pub rate_code: RateCode,
    pub passenger_count: u8,
    pub trip_time_secs: i16,
    pub trip_distance: f64,
    pub payment_type: String,
    pub fare_amount: f64,
}

impl FromFields for TaxiRide {
    const ARITY: usize = 7;

    fn from_fields(c: &mut FieldCursor<'_>) -> Result<Self, ParseError> {
        Ok(Self {
            vendor_id: c.text()?,
            rate_code: RateCode::from(c.integer_as::<u8>()?),
            passenger_count: c.integer_as()?,
            trip_time_secs: c.integer_as()?,
            trip_distance: c.decimal()?,
            payment_type: c.text()?,
            fare_amount: c.decimal()?,
        })
    }
}

impl TaxiRide {
    pub fn parse(line: &[u8]) -> Result<Self, ParseError> {
        parse_typed(line, DEFAULT_DELIMITER)
    }
}

/// Position and velocity of a body: six decimals, no text, so parsing one
/// never allocates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct RigidBodyState {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub vx: f64,
    pub vy: f64,
    pub vz: f64,
}

impl FromFields for RigidBodyState {
    const ARITY: usize = 6;

    fn from_fields(c: &mut FieldCursor<'_>) -> Result<Self, ParseError> {
        Ok(Self {
            x: c.decimal()?,
            y: c.decimal()?,
            z: c.decimal()?,
            vx: c.decimal()?,
            vy: c.decimal()?,
            vz: c.decimal()?,
        })
    }
}

impl RigidBodyState {
    pub fn parse(line: &[u8]) -> Result<Self, ParseError> {
        parse_typed(line, DEFAULT_DELIMITER)
    }
}

impl fmt::Display for RigidBodyState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.3},{:.3},{:.3},{:.3},{:.3},{:.3}",
            self.x, self.y, self.z, self.vx, self.vy, self.vz
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_line;
    use crate::schema::Schema;

    #[test]
    fn test_salary_record() {
        let r = SalaryRecord::parse(b"2024,EN,FT,Engineer,100000,USD,100000,US,100,US,M").unwrap();
        assert_eq!(r.work_year, 2024);
        assert_eq!(r.experience_level, "EN");
        assert_eq!(r.job_title, "Engineer");
        assert_eq!(r.salary, 100_000);
        assert_eq!(r.remote_ratio, 100);
        assert_eq!(r.company_size, "M");
    }

    #[test]
    fn test_salary_matches_dynamic_parse() {
        let line = b"2023,SE,FT,Data Scientist,160000,EUR,172000,DE,50,DE,L";
        let typed = SalaryRecord::parse(line).unwrap();
        let dynamic = parse_line(line, &Schema::salary()).unwrap();
        assert_eq!(dynamic.integer(0), Some(i64::from(typed.work_year)));
        assert_eq!(dynamic.text(3), Some(typed.job_title.as_str()));
        assert_eq!(dynamic.integer(6), Some(typed.salary_in_usd));
        assert_eq!(dynamic.text(10), Some(typed.company_size.as_str()));
    }

    #[test]
    fn test_salary_errors() {
        assert_eq!(
            SalaryRecord::parse(b"2024,EN").unwrap_err(),
            ParseError::FieldCountMismatch {
                expected: 11,
                found: 2
            }
        );
        let err = SalaryRecord::parse(b"2024,EN,FT,Engineer,abc,USD,100000,US,100,US,M")
            .unwrap_err();
        assert_eq!(err.field_index(), Some(4));
    }

    #[test]
    fn test_short_line_with_bad_field_is_count_mismatch() {
        assert_eq!(
            SalaryRecord::parse(b"x,EN").unwrap_err(),
            ParseError::FieldCountMismatch {
                expected: 11,
                found: 2
            }
        );
        assert_eq!(
            RigidBodyState::parse(b"").unwrap_err(),
            ParseError::FieldCountMismatch {
                expected: 6,
                found: 1
            }
        );
        assert_eq!(
            SalaryRecord::parse(b"x,EN").unwrap_err(),
            parse_line(b"x,EN", &Schema::salary()).unwrap_err()
        );
    }

    #[test]
    fn test_narrow_integer_overflow_is_format_error() {
        // work_year is i32
        let err = SalaryRecord::parse(b"99999999999,EN,FT,E,1,USD,1,US,0,US,M").unwrap_err();
        assert_eq!(
            err,
            ParseError::FieldFormat {
                index: 0,
                kind: FieldKind::Integer,
                raw: "99999999999".to_string(),
            }
        );
    }

    #[test]
    fn test_taxi_ride() {
        let ride = TaxiRide::parse(b"VTS,1,1,1140,3.75,CRD,15.5").unwrap();
        assert_eq!(ride.vendor_id, "VTS");
        assert_eq!(ride.rate_code, RateCode::Standard);
        assert_eq!(ride.passenger_count, 1);
        assert_eq!(ride.trip_time_secs, 1140);
        assert_eq!(ride.trip_distance, 3.75);
        assert_eq!(ride.payment_type, "CRD");
        assert_eq!(ride.fare_amount, 15.5);
    }

    #[test]
    fn test_taxi_unknown_rate_code() {
        let ride = TaxiRide::parse(b"CMT,99,2,300,1.0,CSH,5").unwrap();
        assert_eq!(ride.rate_code, RateCode::Other(99));
    }

    #[test]
    fn test_taxi_passenger_count_out_of_range() {
        let err = TaxiRide::parse(b"CMT,1,-1,300,1.0,CSH,5").unwrap_err();
        assert_eq!(err.field_index(), Some(2));
    }

    #[test]
    fn test_rigid_body_state() {
        let state = RigidBodyState::parse(b"1.23,-45.6,0,9.81,0,-2.45").unwrap();
        assert_eq!(
            state,
            RigidBodyState {
                x: 1.23,
                y: -45.6,
                z: 0.0,
                vx: 9.81,
                vy: 0.0,
                vz: -2.45,
            }
        );
        assert_eq!(
            state.to_string(),
            "1.230,-45.600,0.000,9.810,0.000,-2.450"
        );
    }

    #[test]
    fn test_rigid_body_wrong_count() {
        assert_eq!(
            RigidBodyState::parse(b"1,2,3").unwrap_err(),
            ParseError::FieldCountMismatch {
                expected: 6,
                found: 3
            }
        );
    }

    #[test]
    fn test_cursor_tracks_index() {
        let mut cursor = FieldCursor::new(b"1,x,2024-01-01T00:00:00", b',', 3);
        assert_eq!(cursor.integer().unwrap(), 1);
        assert_eq!(cursor.index(), 1);
        assert_eq!(cursor.text().unwrap(), "x");
        assert_eq!(
            cursor.date_time().unwrap().to_string(),
            "2024-01-01T00:00:00"
        );
        assert_eq!(
            cursor.decimal().unwrap_err(),
            ParseError::FieldCountMismatch {
                expected: 3,
                found: 3
            }
        );
    }
}
