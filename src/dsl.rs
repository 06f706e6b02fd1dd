//! Schema file parser.
//!
//! Schema format (CMS Pipelines style, one directive per line):
//! ```text
//! SCHEMA salary
//! | DELIMITER ","
//! | INTEGER work_year
//! | TEXT experience_level
//! | EXTRA REJECT
//! ?
//! ```
//!
//! - `SCHEMA <name>` names the schema (optional, must come first)
//! - `| <directive>` continues the definition
//! - `?` on its own line ends the definition; anything after it is ignored
//! - Lines starting with `#` are comments
//!
//! Supported directives:
//! - `INTEGER name` / `INT name` - signed integer field
//! - `DECIMAL name` / `DEC name` - decimal field
//! - `TEXT name` / `STR name` - text field
//! - `DATETIME name` / `DATE name` - date-time field
//! - `DELIMITER "c"` - field delimiter (first non-blank char is the quote)
//! - `EXTRA IGNORE` / `EXTRA REJECT` - policy for fields past the last one
//!
//! Keywords are case-insensitive; field names are kept as written.

use crate::error::DslError;
use crate::schema::{ExtraFields, FieldKind, Schema};

const DEFAULT_NAME: &str = "schema";

/// One parsed schema-file line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    /// SCHEMA name
    Schema { name: String },
    /// DELIMITER "c"
    Delimiter { delimiter: u8 },
    /// INTEGER|DECIMAL|TEXT|DATETIME name
    Field { kind: FieldKind, name: String },
    /// EXTRA IGNORE|REJECT
    Extra { policy: ExtraFields },
}

impl Directive {
    /// Keyword for error messages.
    pub fn name(&self) -> &'static str {
        match self {
            Directive::Schema { .. } => "SCHEMA",
            Directive::Delimiter { .. } => "DELIMITER",
            Directive::Field { kind, .. } => kind.keyword(),
            Directive::Extra { .. } => "EXTRA",
        }
    }
}

/// Parse schema-file text into a validated [`Schema`].
pub fn parse_schema(text: &str) -> Result<Schema, DslError> {
    let directives = parse_directives(text)?;

    let mut name = None;
    let mut delimiter = None;
    let mut extra = None;
    let mut fields = Vec::new();

    for (position, (line, directive)) in directives.into_iter().enumerate() {
        match directive {
            Directive::Schema { name: n } => {
                if position != 0 {
                    return Err(syntax(line, "SCHEMA must be the first directive"));
                }
                name = Some(n);
            }
            Directive::Delimiter { delimiter: d } => {
                if delimiter.replace(d).is_some() {
                    return Err(syntax(line, "DELIMITER given more than once"));
                }
            }
            Directive::Extra { policy } => {
                if extra.replace(policy).is_some() {
                    return Err(syntax(line, "EXTRA given more than once"));
                }
            }
            Directive::Field { kind, name } => fields.push((kind, name)),
        }
    }

    let mut builder = Schema::builder(name.unwrap_or_else(|| DEFAULT_NAME.to_string()));
    if let Some(d) = delimiter {
        builder = builder.delimiter(d);
    }
    if let Some(policy) = extra {
        builder = builder.extra_fields(policy);
    }
    for (kind, name) in fields {
        builder = builder.field(name, kind);
    }
    Ok(builder.build()?)
}

/// Parse schema-file text into directives, each tagged with its 1-based
/// line number.
pub fn parse_directives(text: &str) -> Result<Vec<(usize, Directive)>, DslError> {
    let mut directives = Vec::new();

    for (line_num, line) in text.lines().enumerate() {
        let line_num = line_num + 1;
        let line = line.trim();

        // Skip empty lines and comments
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        // Explicit end of definition
        if line == "?" {
            break;
        }

        // Handle continuation lines: "| DIRECTIVE ..."
        let line = match line.strip_prefix('|') {
            Some(stripped) => stripped.trim(),
            None => line,
        };
        if line.is_empty() {
            continue;
        }

        let directive = parse_directive(line).map_err(|message| syntax(line_num, message))?;
        directives.push((line_num, directive));
    }

    Ok(directives)
}

/// Parse a single directive line.
fn parse_directive(line: &str) -> Result<Directive, String> {
    let (keyword, rest) = split_keyword(line);
    let upper = keyword.to_ascii_uppercase();

    match upper.as_str() {
        "SCHEMA" => {
            let name = single_word(rest).ok_or("SCHEMA requires a single name")?;
            Ok(Directive::Schema {
                name: name.to_string(),
            })
        }
        "DELIMITER" => parse_delimiter(rest),
        "EXTRA" => match rest.to_ascii_uppercase().as_str() {
            "IGNORE" => Ok(Directive::Extra {
                policy: ExtraFields::Ignore,
            }),
            "REJECT" => Ok(Directive::Extra {
                policy: ExtraFields::Reject,
            }),
            _ => Err("EXTRA requires IGNORE or REJECT".to_string()),
        },
        _ => match FieldKind::from_keyword(&upper) {
            Some(kind) => {
                let name = single_word(rest)
                    .ok_or_else(|| format!("{} requires a single field name", kind.keyword()))?;
                Ok(Directive::Field {
                    kind,
                    name: name.to_string(),
                })
            }
            None => Err(format!("Unknown directive: {keyword}")),
        },
    }
}

/// Parse DELIMITER. The argument is a delimited string in the CMS
/// Pipelines convention and must hold exactly one ASCII character.
fn parse_delimiter(rest: &str) -> Result<Directive, String> {
    let (text, _) = parse_delimited_string(rest)?;
    let mut bytes = text.bytes();
    match (bytes.next(), bytes.next()) {
        (Some(b), None) if b.is_ascii() => Ok(Directive::Delimiter { delimiter: b }),
        _ => Err(format!(
            "DELIMITER must be a single ASCII character, got '{text}'"
        )),
    }
}

/// Parse a delimited string using CMS Pipelines convention.
/// The first non-blank character is the delimiter, and the string
/// continues until the next occurrence of that delimiter.
/// Returns (extracted_string, rest_of_input).
fn parse_delimited_string(s: &str) -> Result<(String, &str), String> {
    let s = s.trim_start();
    let Some(delim) = s.chars().next() else {
        return Err("Expected delimited string".to_string());
    };
    let after_delim = &s[delim.len_utf8()..];

    match after_delim.find(delim) {
        Some(end) => {
            let extracted = after_delim[..end].to_string();
            let rest = &after_delim[end + delim.len_utf8()..];
            Ok((extracted, rest))
        }
        None => Err(format!("Unclosed delimiter '{delim}'")),
    }
}

fn split_keyword(line: &str) -> (&str, &str) {
    match line.split_once(char::is_whitespace) {
        Some((keyword, rest)) => (keyword, rest.trim()),
        None => (line, ""),
    }
}

fn single_word(s: &str) -> Option<&str> {
    let mut words = s.split_whitespace();
    match (words.next(), words.next()) {
        (Some(word), None) => Some(word),
        _ => None,
    }
}

fn syntax(line: usize, message: impl Into<String>) -> DslError {
    DslError::Syntax {
        line,
        message: message.into(),
    }
}

/// Render a schema back into schema-file text. [`Schema`] names are single
/// words, so the result always parses back to an equal schema.
pub fn to_schema_text(schema: &Schema) -> String {
    let mut out = format!("SCHEMA {}\n", schema.name());
    if schema.delimiter() != b'"' {
        out.push_str(&format!("| DELIMITER \"{}\"\n", char::from(schema.delimiter())));
    } else {
        out.push_str("| DELIMITER /\"/\n");
    }
    for field in schema.fields() {
        out.push_str(&format!("| {} {}\n", field.kind.keyword(), field.name));
    }
    if schema.extra_fields() == ExtraFields::Reject {
        out.push_str("| EXTRA REJECT\n");
    }
    out.push_str("?\n");
    out
}
