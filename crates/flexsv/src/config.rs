//! Dialect configuration consulted by the parser and printer

/// What to do when a column grows past the configured maximum length
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OverflowPolicy {
    /// Drop characters beyond the limit, keep parsing
    #[default]
    Truncate,
    /// Fail the parse when the limit is surpassed
    Reject,
}

/// Which characters the printer must escape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EscapeMode {
    /// Quote values containing any recognized special character,
    /// regardless of which separators are enabled
    #[default]
    All,
    /// Quote only values containing a currently enabled separator (or a quote)
    EnabledOnly,
}

/// Immutable description of a separated-values dialect
///
/// Built once by [`ParserBuilder`](crate::ParserBuilder) or
/// [`PrinterBuilder`](crate::PrinterBuilder) and treated as read-only for the
/// lifetime of one parse or print. The builders guarantee that at least one
/// column separator and one row separator are enabled; the parser core
/// assumes a configuration that already satisfies that invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DialectConfig {
    /// Comma separates columns
    pub comma: bool,
    /// Semicolon separates columns
    pub semicolon: bool,
    /// A lone CR separates rows
    pub cr: bool,
    /// A lone LF separates rows
    pub lf: bool,
    /// The CRLF pair separates rows (enables one-character lookahead after CR)
    pub crlf: bool,
    /// Every row must have the same column count as the first row
    pub require_equal_columns: bool,
    /// Rows with zero columns are not appended to the document
    pub skip_empty_rows: bool,
    /// Maximum characters kept per column, `None` for unlimited
    pub max_column_length: Option<usize>,
    /// Behavior when `max_column_length` is surpassed
    pub overflow_policy: OverflowPolicy,
    /// Printer-only escaping rule
    pub escape_mode: EscapeMode,
}

impl DialectConfig {
    /// The permissive default format: comma and semicolon columns, LF and
    /// CRLF rows, no rectangularity check.
    pub fn default_format() -> Self {
        Self {
            comma: true,
            semicolon: true,
            cr: false,
            lf: true,
            crlf: true,
            require_equal_columns: false,
            skip_empty_rows: false,
            max_column_length: None,
            overflow_policy: OverflowPolicy::Truncate,
            escape_mode: EscapeMode::All,
        }
    }

    /// The strict format: comma columns, CRLF rows, equal column counts
    /// enforced.
    pub fn strict() -> Self {
        Self {
            comma: true,
            semicolon: false,
            cr: false,
            lf: false,
            crlf: true,
            require_equal_columns: true,
            ..Self::default_format()
        }
    }

    /// Spreadsheet interchange with comma columns and CRLF rows
    pub fn spreadsheet_comma() -> Self {
        Self::strict()
    }

    /// Spreadsheet interchange with semicolon columns and CRLF rows
    pub fn spreadsheet_semicolon() -> Self {
        Self {
            comma: false,
            semicolon: true,
            ..Self::strict()
        }
    }

    /// Whether at least one column separator is enabled
    pub fn has_column_separator(&self) -> bool {
        self.comma || self.semicolon
    }

    /// Whether at least one row separator is enabled
    pub fn has_row_separator(&self) -> bool {
        self.cr || self.lf || self.crlf
    }

    /// The column separator the printer emits: comma when enabled, otherwise
    /// semicolon.
    pub fn output_column_separator(&self) -> char {
        if self.comma { ',' } else { ';' }
    }

    /// The row separator the printer emits: CRLF when enabled, otherwise LF,
    /// otherwise CR.
    pub fn output_row_separator(&self) -> &'static str {
        if self.crlf {
            "\r\n"
        } else if self.lf {
            "\n"
        } else {
            "\r"
        }
    }
}

impl Default for DialectConfig {
    fn default() -> Self {
        Self::default_format()
    }
}
