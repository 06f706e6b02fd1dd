//! Fixed-layout date-time parsing.
//!
//! Two layouts are recognized, both parsed by position with no allocation:
//!
//! ```text
//! YYYY-MM-DDTHH:MM:SS   (19 bytes)
//! HH:MM:SS              (8 bytes, date parts are 0)
//! ```
//!
//! Surrounding ASCII whitespace is ignored. Day is only checked against
//! 1..=31; month lengths and leap years are not validated.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::DateTimeError;
use crate::numeric::parse_fixed_digits;

const FULL_LEN: usize = 19;
const TIME_LEN: usize = 8;

/// A calendar date and wall-clock time with second precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
pub struct SystemDate {
    pub year: u16,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

impl SystemDate {
    /// A time-only value (year, month and day are 0).
    pub fn time(hour: u8, minute: u8, second: u8) -> Self {
        Self {
            hour,
            minute,
            second,
            ..Self::default()
        }
    }

    /// True when the value carries no date part.
    pub fn is_time_only(&self) -> bool {
        self.year == 0 && self.month == 0 && self.day == 0
    }

    /// Parse either supported layout from a byte window.
    pub fn parse(span: &[u8]) -> Option<Self> {
        let s = span.trim_ascii();
        match s.len() {
            FULL_LEN => parse_full(s),
            TIME_LEN => parse_time(s),
            _ => None,
        }
    }
}

fn parse_full(s: &[u8]) -> Option<SystemDate> {
    if s.get(4) != Some(&b'-')
        || s.get(7) != Some(&b'-')
        || s.get(10) != Some(&b'T')
        || s.get(13) != Some(&b':')
        || s.get(16) != Some(&b':')
    {
        return None;
    }

    let year = parse_fixed_digits(s, 0, 4)?;
    let month = parse_fixed_digits(s, 5, 2)?;
    let day = parse_fixed_digits(s, 8, 2)?;
    let (hour, minute, second) = parse_clock(s, 11)?;

    if !(1..=9999).contains(&year) || !(1..=12).contains(&month) || !(1..=31).contains(&day) {
        return None;
    }

    Some(SystemDate {
        year: u16::try_from(year).ok()?,
        month: u8::try_from(month).ok()?,
        day: u8::try_from(day).ok()?,
        hour,
        minute,
        second,
    })
}

fn parse_time(s: &[u8]) -> Option<SystemDate> {
    let (hour, minute, second) = parse_clock(s, 0)?;
    Some(SystemDate::time(hour, minute, second))
}

/// Parse `HH:MM:SS` starting at `pos`, validating ranges.
fn parse_clock(s: &[u8], pos: usize) -> Option<(u8, u8, u8)> {
    if s.get(pos + 2) != Some(&b':') || s.get(pos + 5) != Some(&b':') {
        return None;
    }
    let hour = parse_fixed_digits(s, pos, 2)?;
    let minute = parse_fixed_digits(s, pos + 3, 2)?;
    let second = parse_fixed_digits(s, pos + 6, 2)?;
    if hour > 23 || minute > 59 || second > 59 {
        return None;
    }
    Some((
        u8::try_from(hour).ok()?,
        u8::try_from(minute).ok()?,
        u8::try_from(second).ok()?,
    ))
}

impl fmt::Display for SystemDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_time_only() {
            write!(f, "{:02}:{:02}:{:02}", self.hour, self.minute, self.second)
        } else {
            write!(
                f,
                "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}",
                self.year, self.month, self.day, self.hour, self.minute, self.second
            )
        }
    }
}

impl FromStr for SystemDate {
    type Err = DateTimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s.as_bytes()).ok_or_else(|| DateTimeError(s.to_string()))
    }
}
