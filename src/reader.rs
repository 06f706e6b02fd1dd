//! Whole-document reading: line splitting, header skipping and the
//! bad-line policy around [`RecordParser`].

use tracing::{debug, info, warn};

use crate::error::{ParseError, ReadError};
use crate::parser::RecordParser;
use crate::record::Record;

/// Iterator over the lines of a buffer.
///
/// Splits on `\n` and strips one trailing `\r`. A buffer ending in a newline
/// does not produce a final empty line.
#[derive(Debug, Clone)]
pub struct Lines<'a> {
    rest: Option<&'a [u8]>,
}

impl<'a> Lines<'a> {
    pub fn new(input: &'a [u8]) -> Self {
        Self {
            rest: (!input.is_empty()).then_some(input),
        }
    }
}

impl<'a> Iterator for Lines<'a> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<&'a [u8]> {
        let rest = self.rest?;
        let line = match rest.iter().position(|&b| b == b'\n') {
            Some(end) => {
                let tail = rest.get(end + 1..).unwrap_or_default();
                self.rest = (!tail.is_empty()).then_some(tail);
                rest.get(..end).unwrap_or_default()
            }
            None => {
                self.rest = None;
                rest
            }
        };
        Some(line.strip_suffix(b"\r").unwrap_or(line))
    }
}

/// What to do when a line fails to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BadLinePolicy {
    /// Stop and return the error.
    #[default]
    Abort,
    /// Log, remember the error, and continue with the next line.
    Skip,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadOptions {
    /// Treat the first line as a header and do not parse it.
    pub has_header: bool,
    pub on_error: BadLinePolicy,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            has_header: true,
            on_error: BadLinePolicy::Abort,
        }
    }
}

/// The outcome of reading a document.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Document {
    pub records: Vec<Record>,
    /// Lines rejected under [`BadLinePolicy::Skip`], with 1-based line
    /// numbers.
    pub skipped: Vec<(usize, ParseError)>,
    /// Physical lines seen, header and blank lines included.
    pub line_count: usize,
}

/// Parse every data line of `input`.
pub fn read_document(
    input: &[u8],
    parser: &RecordParser,
    options: &ReadOptions,
) -> Result<Document, ReadError> {
    let mut document = Document::default();
    let mut lines = Lines::new(input).enumerate();

    if options.has_header
        && let Some((_, header)) = lines.next()
    {
        document.line_count += 1;
        debug!(header = %String::from_utf8_lossy(header), "skipping header");
    }

    for (index, line) in lines {
        let line_number = index + 1;
        document.line_count += 1;

        if line.is_empty() {
            continue;
        }

        match parser.parse_line(line) {
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

    info!(
        schema = parser.schema().name(),
        lines = document.line_count,
        records = document.records.len(),
        skipped = document.skipped.len(),
        "document read"
    );

    Ok(document)
}
