//! String-splitting reference parser.
//!
//! This crate parses the same schemas as `delimited-rs`, but the obvious
//! way: split the line into a `Vec<&str>` and hand each piece to the
//! standard library's `FromStr`. It exists to check the span parser
//! against and to give the benchmarks a baseline.
//!
//! Number grammar follows the standard library, so `+5` and `1e3` are
//! accepted here where the span parser rejects them.

pub mod parser;
pub mod reader;

pub use parser::parse_line;
pub use reader::read_document_naive;
