//! Lazy field splitting over a single line.
//!
//! [`FieldSpans`] walks a line once and yields the byte range of each
//! delimited field in input order. Nothing is collected: each range is
//! handed to the caller as soon as its closing delimiter (or the end of the
//! line) is found.

use std::ops::Range;

/// Iterator over the field ranges of one line.
///
/// Empty fields are preserved: `"a,,b"` yields three ranges, the middle one
/// empty. An empty line yields a single empty range, and a trailing
/// delimiter yields a final empty range.
#[derive(Debug, Clone)]
pub struct FieldSpans<'a> {
    line: &'a [u8],
    delimiter: u8,
    start: usize,
    done: bool,
}

impl<'a> FieldSpans<'a> {
    pub fn new(line: &'a [u8], delimiter: u8) -> Self {
        Self {
            line,
            delimiter,
            start: 0,
            done: false,
        }
    }

    /// The line being split.
    pub fn line(&self) -> &'a [u8] {
        self.line
    }

    /// Yield the next field as a slice of the line rather than a range.
    pub fn next_slice(&mut self) -> Option<&'a [u8]> {
        let range = self.next()?;
        self.line.get(range)
    }

    /// Count the fields not yet yielded without consuming them.
    pub fn remaining(&self) -> usize {
        if self.done {
            return 0;
        }
        let rest = self.line.get(self.start..).unwrap_or_default();
        1 + rest.iter().filter(|&&b| b == self.delimiter).count()
    }
}

impl Iterator for FieldSpans<'_> {
    type Item = Range<usize>;

    fn next(&mut self) -> Option<Range<usize>> {
        if self.done {
            return None;
        }
        let rest = self.line.get(self.start..).unwrap_or_default();
        match rest.iter().position(|&b| b == self.delimiter) {
            Some(offset) => {
                let end = self.start + offset;
                let range = self.start..end;
                self.start = end + 1;
                Some(range)
            }
            None => {
                self.done = true;
                Some(self.start..self.line.len())
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.done {
            (0, Some(0))
        } else {
            (1, Some(self.line.len().saturating_sub(self.start) + 1))
        }
    }
}

impl std::iter::FusedIterator for FieldSpans<'_> {}
