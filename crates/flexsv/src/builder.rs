//! Fluent builders assembling a dialect and instantiating a parser or printer

use crate::config::{DialectConfig, EscapeMode, OverflowPolicy};
use crate::error::{Error, Result};
use crate::parser::Parser;
use crate::printer::Printer;

fn validate(config: &DialectConfig) -> Result<()> {
    if !config.has_column_separator() {
        return Err(Error::InvalidConfig {
            reason: "at least one column separator must be enabled".to_string(),
        });
    }
    if !config.has_row_separator() {
        return Err(Error::InvalidConfig {
            reason: "at least one row separator must be enabled".to_string(),
        });
    }
    Ok(())
}

/// Builder for a [`Parser`]
///
/// Starts with every separator disabled; enable the ones the dialect needs,
/// or start from a preset. [`build`](Self::build) enforces that at least one
/// column separator and one row separator are enabled.
///
/// # Examples
///
/// ```
/// use flexsv::ParserBuilder;
///
/// let mut builder = ParserBuilder::new();
/// builder.comma(true).lf(true).skip_empty_rows(true);
/// let doc = builder.build()?.parse("a,b\n\nc,d\n")?;
/// assert_eq!(doc.row_count(), 2);
/// # Ok::<(), flexsv::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct ParserBuilder {
    config: DialectConfig,
}

impl ParserBuilder {
    /// Create a builder with every separator disabled
    pub fn new() -> Self {
        Self {
            config: DialectConfig {
                comma: false,
                semicolon: false,
                cr: false,
                lf: false,
                crlf: false,
                require_equal_columns: false,
                skip_empty_rows: false,
                max_column_length: None,
                overflow_policy: OverflowPolicy::Truncate,
                escape_mode: EscapeMode::All,
            },
        }
    }

    /// Start from an existing configuration
    pub fn from_config(config: DialectConfig) -> Self {
        Self { config }
    }

    /// Start from the permissive default format
    pub fn default_format() -> Self {
        Self::from_config(DialectConfig::default_format())
    }

    /// Start from the strict format
    pub fn strict() -> Self {
        Self::from_config(DialectConfig::strict())
    }

    /// Start from the comma spreadsheet format
    pub fn spreadsheet_comma() -> Self {
        Self::from_config(DialectConfig::spreadsheet_comma())
    }

    /// Start from the semicolon spreadsheet format
    pub fn spreadsheet_semicolon() -> Self {
        Self::from_config(DialectConfig::spreadsheet_semicolon())
    }

    /// Enable or disable comma column separation
    pub fn comma(&mut self, enabled: bool) -> &mut Self {
        self.config.comma = enabled;
        self
    }

    /// Enable or disable semicolon column separation
    pub fn semicolon(&mut self, enabled: bool) -> &mut Self {
        self.config.semicolon = enabled;
        self
    }

    /// Enable or disable lone-CR row separation
    pub fn cr(&mut self, enabled: bool) -> &mut Self {
        self.config.cr = enabled;
        self
    }

    /// Enable or disable lone-LF row separation
    pub fn lf(&mut self, enabled: bool) -> &mut Self {
        self.config.lf = enabled;
        self
    }

    /// Enable or disable CRLF row separation
    pub fn crlf(&mut self, enabled: bool) -> &mut Self {
        self.config.crlf = enabled;
        self
    }

    /// Require every row to have the first row's column count
    pub fn require_equal_columns(&mut self, enabled: bool) -> &mut Self {
        self.config.require_equal_columns = enabled;
        self
    }

    /// Suppress rows with zero columns
    pub fn skip_empty_rows(&mut self, enabled: bool) -> &mut Self {
        self.config.skip_empty_rows = enabled;
        self
    }

    /// Limit columns to `limit` characters
    pub fn max_column_length(&mut self, limit: usize) -> &mut Self {
        self.config.max_column_length = Some(limit);
        self
    }

    /// Remove any column length limit
    pub fn unlimited_column_length(&mut self) -> &mut Self {
        self.config.max_column_length = None;
        self
    }

    /// Choose between truncating and rejecting overlong columns
    pub fn overflow_policy(&mut self, policy: OverflowPolicy) -> &mut Self {
        self.config.overflow_policy = policy;
        self
    }

    /// The configuration assembled so far
    pub fn config(&self) -> &DialectConfig {
        &self.config
    }

    /// Validate the configuration and build it
    pub fn build_config(&self) -> Result<DialectConfig> {
        validate(&self.config)?;
        Ok(self.config.clone())
    }

    /// Validate the configuration and instantiate a parser
    pub fn build(&self) -> Result<Parser> {
        Ok(Parser::new(self.build_config()?))
    }
}

impl Default for ParserBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for a [`Printer`]
///
/// # Examples
///
/// ```
/// use flexsv::{EscapeMode, PrinterBuilder};
///
/// let mut builder = PrinterBuilder::default_format();
/// builder.escape_mode(EscapeMode::EnabledOnly);
/// let mut printer = builder.build()?;
/// printer.write_row(["a", "b"])?;
/// assert_eq!(printer.finish(), "a,b\r\n");
/// # Ok::<(), flexsv::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct PrinterBuilder {
    inner: ParserBuilder,
}

impl PrinterBuilder {
    /// Create a builder with every separator disabled
    pub fn new() -> Self {
        Self {
            inner: ParserBuilder::new(),
        }
    }

    /// Start from an existing configuration
    pub fn from_config(config: DialectConfig) -> Self {
        Self {
            inner: ParserBuilder::from_config(config),
        }
    }

    /// Start from the permissive default format
    pub fn default_format() -> Self {
        Self::from_config(DialectConfig::default_format())
    }

    /// Start from the strict format
    pub fn strict() -> Self {
        Self::from_config(DialectConfig::strict())
    }

    /// Enable or disable comma column separation
    pub fn comma(&mut self, enabled: bool) -> &mut Self {
        self.inner.comma(enabled);
        self
    }

    /// Enable or disable semicolon column separation
    pub fn semicolon(&mut self, enabled: bool) -> &mut Self {
        self.inner.semicolon(enabled);
        self
    }

    /// Enable or disable lone-CR row separation
    pub fn cr(&mut self, enabled: bool) -> &mut Self {
        self.inner.cr(enabled);
        self
    }

    /// Enable or disable lone-LF row separation
    pub fn lf(&mut self, enabled: bool) -> &mut Self {
        self.inner.lf(enabled);
        self
    }

    /// Enable or disable CRLF row separation
    pub fn crlf(&mut self, enabled: bool) -> &mut Self {
        self.inner.crlf(enabled);
        self
    }

    /// Require every row to have the first row's column count
    pub fn require_equal_columns(&mut self, enabled: bool) -> &mut Self {
        self.inner.require_equal_columns(enabled);
        self
    }

    /// Suppress rows with zero columns
    pub fn skip_empty_rows(&mut self, enabled: bool) -> &mut Self {
        self.inner.skip_empty_rows(enabled);
        self
    }

    /// Choose which characters force quoting
    pub fn escape_mode(&mut self, mode: EscapeMode) -> &mut Self {
        self.inner.config.escape_mode = mode;
        self
    }

    /// The configuration assembled so far
    pub fn config(&self) -> &DialectConfig {
        self.inner.config()
    }

    /// Validate the configuration and build it
    pub fn build_config(&self) -> Result<DialectConfig> {
        self.inner.build_config()
    }

    /// Validate the configuration and instantiate a printer
    pub fn build(&self) -> Result<Printer> {
        Ok(Printer::new(self.build_config()?))
    }
}

impl Default for PrinterBuilder {
    fn default() -> Self {
        Self::new()
    }
}
