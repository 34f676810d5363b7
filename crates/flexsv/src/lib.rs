//! # flexsv
//!
//! A parser and printer for a configurable superset of the CSV grammar:
//! independently togglable column separators (comma, semicolon) and row
//! separators (CR, LF, CRLF), double-quote enclosure with doubled-quote
//! escaping, optional rectangularity checking, empty-row skipping, and a
//! maximum column length with truncate or reject semantics.
//!
//! The parser is a synchronous character-by-character state machine: it pulls
//! one character at a time from a [`CharSource`], resolves the ambiguous
//! cases (a lone CR versus the first half of CRLF, a closing quote versus a
//! doubled one) with explicit states, and accumulates columns and rows into a
//! [`Document`].
//!
//! ## Quick Start
//!
//! ### Parsing
//!
//! ```rust
//! use flexsv::Parser;
//!
//! let doc = Parser::default_format().parse("region,build\nus,61491\neu,61491\n")?;
//! assert_eq!(doc.row_count(), 3);
//! assert_eq!(doc.get_row(1).unwrap().get(0), Some("us"));
//! # Ok::<(), flexsv::Error>(())
//! ```
//!
//! ### Printing
//!
//! ```rust
//! use flexsv::{Printer, Value};
//!
//! let mut printer = Printer::default_format();
//! printer.write_row(["region", "build"])?;
//! printer.write_row_values(&[Value::from("us"), Value::Integer(61491)])?;
//! assert_eq!(printer.finish(), "region,build\r\nus,61491\r\n");
//! # Ok::<(), flexsv::Error>(())
//! ```
//!
//! ### Custom dialects
//!
//! ```rust
//! use flexsv::ParserBuilder;
//!
//! let mut builder = ParserBuilder::new();
//! builder.semicolon(true).crlf(true).require_equal_columns(true);
//! let doc = builder.build()?.parse("a;b\r\nc;d\r\n")?;
//! assert_eq!(doc.row_count(), 2);
//! # Ok::<(), flexsv::Error>(())
//! ```

pub mod accumulator;
pub mod buffer;
pub mod builder;
pub mod config;
pub mod document;
pub mod error;
pub mod parser;
pub mod printer;
pub mod source;
pub mod value;

pub use accumulator::Accumulator;
pub use buffer::{ColumnBuffer, ContextWindow};
pub use builder::{ParserBuilder, PrinterBuilder};
pub use config::{DialectConfig, EscapeMode, OverflowPolicy};
pub use document::{Document, Row};
pub use error::{Error, Result};
pub use parser::Parser;
pub use printer::Printer;
pub use source::{CharSource, ReadSource, StrSource};
pub use value::Value;
