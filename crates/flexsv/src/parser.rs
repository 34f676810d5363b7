//! Character-by-character parsing state machine

use tracing::debug;

use crate::accumulator::Accumulator;
use crate::buffer::ContextWindow;
use crate::builder::ParserBuilder;
use crate::config::DialectConfig;
use crate::document::{Document, Row};
use crate::error::{Error, Result};
use crate::source::{CharSource, ReadSource, StrSource};

/// Category of one input character under the active configuration
///
/// Comma and semicolon classify as themselves only when enabled as column
/// separators, otherwise as literal text. CR and LF classify as themselves
/// when their own flag or CRLF recognition is enabled, since the CRLF
/// resolver needs to see both halves of the pair. Quote and end of input are
/// always recognized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Category {
    Comma,
    Semicolon,
    Cr,
    Lf,
    Quote,
    EndOfInput,
    Other,
}

fn classify(input: Option<char>, config: &DialectConfig) -> Category {
    match input {
        None => Category::EndOfInput,
        Some('"') => Category::Quote,
        Some(',') if config.comma => Category::Comma,
        Some(';') if config.semicolon => Category::Semicolon,
        Some('\r') if config.cr || config.crlf => Category::Cr,
        Some('\n') if config.lf || config.crlf => Category::Lf,
        Some(_) => Category::Other,
    }
}

/// Parsing states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Beginning of a row, before any column content
    RowStart,
    /// Beginning of a column, before deciding plain vs. quoted
    ColumnStart,
    /// Accumulating an unquoted column
    InPlain,
    /// Accumulating a quoted column; everything is literal here
    InQuoted,
    /// Saw a quote while quoted; closing quote or first half of an escape
    AfterClosingQuote,
    /// Saw a CR with CRLF recognition on; next character decides
    PendingCr,
    /// Same ambiguity reached from a closing quote; literal resolution is
    /// a grammar error there
    PendingCrAfterQuote,
}

/// Where a CR/LF was encountered, for the resolution rules
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum QuoteSite {
    /// Plain text context; unresolved separators may become literal text
    Plain,
    /// Directly after a closing quote; only separators may follow
    AfterQuote,
}

/// Streaming parser for separated-values text
///
/// Consumes one character at a time (plus a final end-of-input signal),
/// classifies it under the active [`DialectConfig`], transitions state and
/// emits column/row events into the accumulator.
///
/// The machine is synchronous and single-threaded. A failed step leaves the
/// previously finalized rows intact and the machine mechanically resumable;
/// a well-formed result still requires driving to end of input.
///
/// # Examples
///
/// ```
/// use flexsv::Parser;
///
/// let doc = Parser::default_format().parse("a,b\nc,d\n")?;
/// assert_eq!(doc.row_count(), 2);
/// assert_eq!(doc.get_row(1).unwrap().values(), &["c", "d"]);
/// # Ok::<(), flexsv::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct Parser {
    config: DialectConfig,
    state: State,
    accumulator: Accumulator,
    context: ContextWindow,
}

impl Parser {
    /// Create a parser over a configuration
    ///
    /// The configuration is assumed to satisfy the builder invariant of at
    /// least one enabled column and row separator.
    pub fn new(config: DialectConfig) -> Self {
        Self {
            config,
            state: State::RowStart,
            accumulator: Accumulator::new(),
            context: ContextWindow::new(),
        }
    }

    /// Create a builder for assembling a custom dialect
    pub fn builder() -> ParserBuilder {
        ParserBuilder::new()
    }

    /// Parser for the permissive default format
    pub fn default_format() -> Self {
        Self::new(DialectConfig::default_format())
    }

    /// Parser for the strict format
    pub fn strict() -> Self {
        Self::new(DialectConfig::strict())
    }

    /// The active configuration
    pub fn config(&self) -> &DialectConfig {
        &self.config
    }

    /// Feed one character into the machine
    ///
    /// After an error the machine may be fed further characters; rows
    /// finalized before the failure are preserved.
    pub fn feed(&mut self, c: char) -> Result<()> {
        self.context.record(c);
        self.step(Some(c))
    }

    /// Signal end of input, letting the final state finalize a trailing
    /// column and row
    pub fn finish(&mut self) -> Result<()> {
        self.step(None)
    }

    /// Rows finalized so far, inspectable mid-parse and after failures
    pub fn rows(&self) -> &[Row] {
        self.accumulator.rows()
    }

    /// Consume the parser and yield the document accumulated so far
    pub fn into_document(self) -> Document {
        self.accumulator.into_document()
    }

    /// Parse a complete in-memory string
    ///
    /// # Examples
    ///
    /// ```
    /// use flexsv::Parser;
    ///
    /// let doc = Parser::default_format().parse("x;y\nz;w\n")?;
    /// assert_eq!(doc.row_count(), 2);
    /// # Ok::<(), flexsv::Error>(())
    /// ```
    pub fn parse(self, input: &str) -> Result<Document> {
        let mut source = StrSource::new(input);
        self.parse_source(&mut source)
    }

    /// Parse from any [`std::io::Read`], decoding UTF-8 incrementally
    pub fn parse_reader<R: std::io::Read>(self, reader: R) -> Result<Document> {
        let mut source = ReadSource::new(reader);
        self.parse_source(&mut source)
    }

    /// Drive the machine over a character source until end of input
    pub fn parse_source<S: CharSource>(mut self, source: &mut S) -> Result<Document> {
        while let Some(c) = source.next_char()? {
            self.feed(c)?;
        }
        self.finish()?;
        let document = self.into_document();
        debug!("parsed {} rows", document.row_count());
        Ok(document)
    }

    fn push(&mut self, c: char) -> Result<()> {
        self.accumulator.push_symbol(c, &self.config, &self.context)
    }

    fn finalize_column(&mut self) -> Result<()> {
        self.accumulator.finalize_column(&self.config, &self.context)
    }

    fn finalize_row(&mut self) -> Result<()> {
        self.accumulator.finalize_row(&self.config, &self.context)?;
        self.state = State::RowStart;
        Ok(())
    }

    fn grammar_error(&self, found: Option<char>) -> Error {
        Error::Grammar {
            found,
            context: self.context.snapshot(),
        }
    }

    /// Process one classified character; re-entered (depth at most two) when
    /// the pending-CR lookahead character must be re-processed
    fn step(&mut self, input: Option<char>) -> Result<()> {
        let category = classify(input, &self.config);
        match self.state {
            State::RowStart => match category {
                Category::Quote => {
                    self.state = State::InQuoted;
                    Ok(())
                }
                Category::Comma | Category::Semicolon => {
                    self.finalize_column()?;
                    self.state = State::ColumnStart;
                    Ok(())
                }
                // At row start no column has begun, so a row separator
                // finalizes the row without pushing an empty column and end
                // of input yields nothing.
                Category::Cr => self.resolve_cr(QuoteSite::Plain),
                Category::Lf => self.resolve_lf(QuoteSite::Plain),
                Category::EndOfInput => Ok(()),
                Category::Other => {
                    self.push_first(input)?;
                    self.state = State::InPlain;
                    Ok(())
                }
            },
            State::ColumnStart => match category {
                Category::Quote => {
                    self.state = State::InQuoted;
                    Ok(())
                }
                Category::Comma | Category::Semicolon => {
                    self.finalize_column()?;
                    Ok(())
                }
                Category::Cr => {
                    self.finalize_column()?;
                    self.resolve_cr(QuoteSite::Plain)
                }
                Category::Lf => {
                    self.finalize_column()?;
                    self.resolve_lf(QuoteSite::Plain)
                }
                Category::EndOfInput => {
                    self.finalize_column()?;
                    self.finalize_row()
                }
                Category::Other => {
                    self.push_first(input)?;
                    self.state = State::InPlain;
                    Ok(())
                }
            },
            State::InPlain => match category {
                Category::Comma | Category::Semicolon => {
                    self.finalize_column()?;
                    self.state = State::ColumnStart;
                    Ok(())
                }
                Category::Cr => {
                    self.finalize_column()?;
                    self.resolve_cr(QuoteSite::Plain)
                }
                Category::Lf => {
                    self.finalize_column()?;
                    self.resolve_lf(QuoteSite::Plain)
                }
                Category::EndOfInput => {
                    self.finalize_column()?;
                    self.finalize_row()
                }
                // A quote after plain text has started is not part of the grammar.
                Category::Quote => Err(self.grammar_error(input)),
                Category::Other => self.push_first(input),
            },
            State::InQuoted => match category {
                Category::Quote => {
                    self.state = State::AfterClosingQuote;
                    Ok(())
                }
                // Unterminated quoted column.
                Category::EndOfInput => Err(self.grammar_error(None)),
                // Separators are literal inside quotes.
                _ => self.push_first(input),
            },
            State::AfterClosingQuote => match category {
                Category::Quote => {
                    // Doubled quote: one literal quote character.
                    self.push('"')?;
                    self.state = State::InQuoted;
                    Ok(())
                }
                Category::Comma | Category::Semicolon => {
                    self.finalize_column()?;
                    self.state = State::ColumnStart;
                    Ok(())
                }
                Category::Cr => {
                    self.finalize_column()?;
                    self.resolve_cr(QuoteSite::AfterQuote)
                }
                Category::Lf => {
                    self.finalize_column()?;
                    self.resolve_lf(QuoteSite::AfterQuote)
                }
                Category::EndOfInput => {
                    self.finalize_column()?;
                    self.finalize_row()
                }
                // Only a separator or an escape may follow a closing quote.
                Category::Other => Err(self.grammar_error(input)),
            },
            State::PendingCr => match input {
                Some('\n') => self.finalize_row(),
                lookahead => {
                    if self.config.cr {
                        // The CR alone separated the row; the lookahead is
                        // re-processed from the start of the next row.
                        self.finalize_row()?;
                        self.step(lookahead)
                    } else {
                        // The CR is literal text opening a fresh column; the
                        // lookahead continues that column.
                        self.push('\r')?;
                        self.state = State::InPlain;
                        self.step(lookahead)
                    }
                }
            },
            State::PendingCrAfterQuote => match input {
                Some('\n') => self.finalize_row(),
                lookahead => {
                    if self.config.cr {
                        self.finalize_row()?;
                        self.step(lookahead)
                    } else {
                        // Literal text may not follow a closing quote.
                        Err(self.grammar_error(Some('\r')))
                    }
                }
            },
        }
    }

    /// Push the character behind an `input` known to be `Some`
    fn push_first(&mut self, input: Option<char>) -> Result<()> {
        match input {
            Some(c) => self.push(c),
            None => Ok(()),
        }
    }

    /// Handle a CR seen outside quotes
    ///
    /// With CRLF recognition on, the decision is deferred one character.
    /// Otherwise the CR flag alone applies; `classify` only yields
    /// [`Category::Cr`] when CR or CRLF is enabled, so no literal case
    /// arises here.
    fn resolve_cr(&mut self, site: QuoteSite) -> Result<()> {
        if self.config.crlf {
            self.state = match site {
                QuoteSite::Plain => State::PendingCr,
                QuoteSite::AfterQuote => State::PendingCrAfterQuote,
            };
            Ok(())
        } else {
            self.finalize_row()
        }
    }

    /// Handle an LF seen outside quotes and not consumed as the second half
    /// of a CRLF pair
    fn resolve_lf(&mut self, site: QuoteSite) -> Result<()> {
        if self.config.lf {
            self.finalize_row()
        } else {
            match site {
                // LF recognized only as a CRLF half: literal text opening a
                // fresh column.
                QuoteSite::Plain => {
                    self.push('\n')?;
                    self.state = State::InPlain;
                    Ok(())
                }
                QuoteSite::AfterQuote => Err(self.grammar_error(Some('\n'))),
            }
        }
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::default_format()
    }
}
