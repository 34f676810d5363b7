//! Serialization of rows and documents back into separated-values text

use tracing::debug;

use crate::builder::PrinterBuilder;
use crate::config::{DialectConfig, EscapeMode};
use crate::document::Document;
use crate::error::{Error, Result};
use crate::value::Value;

/// Builds separated-values text from values, rows, or whole documents
///
/// Values that contain a character subject to escaping are wrapped in quotes
/// with embedded quotes doubled. The column separator is emitted before
/// every column index greater than zero; the row separator after every row.
/// Equal-column-count and skip-empty-row rules mirror the parser, applied to
/// the column count observed while building each row.
///
/// # Examples
///
/// ```
/// use flexsv::{Printer, Value};
///
/// let mut printer = Printer::default_format();
/// printer.write_row(["a", "b,c"])?;
/// printer.write_row_values(&[Value::Integer(1), Value::Null])?;
/// assert_eq!(printer.finish(), "a,\"b,c\"\r\n1,\r\n");
/// # Ok::<(), flexsv::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct Printer {
    config: DialectConfig,
    out: String,
    row_columns: usize,
    expected_columns: Option<usize>,
}

impl Printer {
    /// Create a printer over a configuration
    pub fn new(config: DialectConfig) -> Self {
        Self {
            config,
            out: String::new(),
            row_columns: 0,
            expected_columns: None,
        }
    }

    /// Create a builder for assembling a custom dialect
    pub fn builder() -> PrinterBuilder {
        PrinterBuilder::new()
    }

    /// Printer for the permissive default format
    pub fn default_format() -> Self {
        Self::new(DialectConfig::default_format())
    }

    /// Printer for the strict format
    pub fn strict() -> Self {
        Self::new(DialectConfig::strict())
    }

    /// The active configuration
    pub fn config(&self) -> &DialectConfig {
        &self.config
    }

    /// Write one column value into the current row
    pub fn write_value(&mut self, value: &Value) -> Result<()> {
        if self.config.require_equal_columns
            && let Some(expected) = self.expected_columns
            && self.row_columns >= expected
        {
            return Err(Error::ColumnCountMismatch {
                expected,
                actual: self.row_columns + 1,
                context: self.output_tail(),
            });
        }
        if self.row_columns > 0 {
            self.out.push(self.config.output_column_separator());
        }
        let text = value.to_text();
        if self.needs_quoting(&text) {
            self.out.push('"');
            for c in text.chars() {
                if c == '"' {
                    self.out.push('"');
                }
                self.out.push(c);
            }
            self.out.push('"');
        } else {
            self.out.push_str(&text);
        }
        self.row_columns += 1;
        Ok(())
    }

    /// Close the current row, emitting the row separator
    ///
    /// A row with zero columns is suppressed when `skip_empty_rows` is set.
    pub fn end_row(&mut self) -> Result<()> {
        if self.config.skip_empty_rows && self.row_columns == 0 {
            return Ok(());
        }
        if self.config.require_equal_columns {
            match self.expected_columns {
                None => self.expected_columns = Some(self.row_columns),
                Some(expected) if self.row_columns != expected => {
                    return Err(Error::ColumnCountMismatch {
                        expected,
                        actual: self.row_columns,
                        context: self.output_tail(),
                    });
                }
                Some(_) => {}
            }
        }
        self.out.push_str(self.config.output_row_separator());
        self.row_columns = 0;
        Ok(())
    }

    /// Write a complete row of convertible values
    pub fn write_row<I, V>(&mut self, values: I) -> Result<()>
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        for value in values {
            self.write_value(&value.into())?;
        }
        self.end_row()
    }

    /// Write a complete row from a value slice
    pub fn write_row_values(&mut self, values: &[Value]) -> Result<()> {
        for value in values {
            self.write_value(value)?;
        }
        self.end_row()
    }

    /// Write every row of a parsed document
    pub fn write_document(&mut self, document: &Document) -> Result<()> {
        for row in document.rows() {
            for column in row.values() {
                self.write_value(&Value::Text(column.clone()))?;
            }
            self.end_row()?;
        }
        debug!("printed {} rows", document.row_count());
        Ok(())
    }

    /// Consume the printer, yielding the text built so far
    pub fn finish(self) -> String {
        self.out
    }

    /// Serialize a whole document in one call
    pub fn print(config: DialectConfig, document: &Document) -> Result<String> {
        let mut printer = Self::new(config);
        printer.write_document(document)?;
        Ok(printer.finish())
    }

    /// Whether `text` must be wrapped in quotes under the active escaping
    /// rule
    fn needs_quoting(&self, text: &str) -> bool {
        match self.config.escape_mode {
            EscapeMode::All => text.contains(['"', ',', ';', '\r', '\n']),
            EscapeMode::EnabledOnly => {
                text.contains('"')
                    || (self.config.comma && text.contains(','))
                    || (self.config.semicolon && text.contains(';'))
                    || (self.config.cr && text.contains('\r'))
                    || (self.config.lf && text.contains('\n'))
                    || (self.config.crlf && text.contains("\r\n"))
            }
        }
    }

    fn output_tail(&self) -> String {
        let tail: Vec<char> = self.out.chars().rev().take(10).collect();
        tail.into_iter().rev().collect()
    }
}
