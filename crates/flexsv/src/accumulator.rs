//! Result accumulation: the row in progress and the finalized document rows

use tracing::trace;

use crate::buffer::{ColumnBuffer, ContextWindow};
use crate::config::DialectConfig;
use crate::document::{Document, Row};
use crate::error::{Error, Result};

/// Collects symbols into columns, columns into rows, and rows into a document
///
/// Two buffering layers are deliberately decoupled: [`finalize_row`] moves
/// the columns finalized so far into the document but does not touch the
/// column buffer. Symbols pushed without a matching [`finalize_column`] stay
/// pending and join the next column that is eventually finalized, even across
/// a row boundary. The grammar never exercises this path (it always finalizes
/// the column before any row event), but the contract holds when the
/// accumulator is driven directly.
///
/// Once the document has been taken the accumulator is not guaranteed
/// reusable.
///
/// [`finalize_row`]: Accumulator::finalize_row
/// [`finalize_column`]: Accumulator::finalize_column
#[derive(Debug, Clone, Default)]
pub struct Accumulator {
    buffer: ColumnBuffer,
    row: Vec<String>,
    rows: Vec<Row>,
    expected_columns: Option<usize>,
}

impl Accumulator {
    /// Create an empty accumulator
    pub fn new() -> Self {
        Self::default()
    }

    /// Push one character into the column being assembled
    pub fn push_symbol(
        &mut self,
        c: char,
        config: &DialectConfig,
        context: &ContextWindow,
    ) -> Result<()> {
        self.buffer
            .offer(c, config.max_column_length, config.overflow_policy, context)
    }

    /// Close the current column and append it to the row in progress
    ///
    /// With `require_equal_columns` enabled, a column that would push the row
    /// past the expected count fails here rather than waiting for the row to
    /// end.
    pub fn finalize_column(
        &mut self,
        config: &DialectConfig,
        context: &ContextWindow,
    ) -> Result<()> {
        self.row.push(self.buffer.finalize());
        if config.require_equal_columns
            && let Some(expected) = self.expected_columns
            && self.row.len() > expected
        {
            return Err(Error::ColumnCountMismatch {
                expected,
                actual: self.row.len(),
                context: context.snapshot(),
            });
        }
        Ok(())
    }

    /// Close the current row and append it to the document
    ///
    /// An empty row (zero finalized columns) is suppressed when
    /// `skip_empty_rows` is set; a suppressed row neither sets nor checks the
    /// expected column count. A row with one empty-string column is not
    /// empty.
    pub fn finalize_row(
        &mut self,
        config: &DialectConfig,
        context: &ContextWindow,
    ) -> Result<()> {
        if config.skip_empty_rows && self.row.is_empty() {
            trace!("skipping empty row at index {}", self.rows.len());
            return Ok(());
        }
        if config.require_equal_columns {
            match self.expected_columns {
                None => self.expected_columns = Some(self.row.len()),
                Some(expected) if self.row.len() != expected => {
                    return Err(Error::ColumnCountMismatch {
                        expected,
                        actual: self.row.len(),
                        context: context.snapshot(),
                    });
                }
                Some(_) => {}
            }
        }
        let columns = std::mem::take(&mut self.row);
        trace!(columns = columns.len(), "finalized row {}", self.rows.len());
        self.rows.push(Row::new(columns));
        Ok(())
    }

    /// Rows finalized so far, inspectable even after a failed step
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Number of columns finalized in the row currently being assembled
    pub fn pending_columns(&self) -> usize {
        self.row.len()
    }

    /// Consume the accumulator and yield the finished document
    pub fn into_document(self) -> Document {
        Document::new(self.rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn push_all(acc: &mut Accumulator, text: &str, config: &DialectConfig) {
        let context = ContextWindow::new();
        for c in text.chars() {
            acc.push_symbol(c, config, &context).unwrap();
        }
    }

    #[test]
    fn test_column_and_row_assembly() {
        let config = DialectConfig::default_format();
        let context = ContextWindow::new();
        let mut acc = Accumulator::new();

        push_all(&mut acc, "ab", &config);
        acc.finalize_column(&config, &context).unwrap();
        push_all(&mut acc, "cd", &config);
        acc.finalize_column(&config, &context).unwrap();
        acc.finalize_row(&config, &context).unwrap();

        let doc = acc.into_document();
        assert_eq!(doc.row_count(), 1);
        assert_eq!(doc.get_row(0).unwrap().values(), &["ab", "cd"]);
    }

    #[test]
    fn test_finalize_row_leaves_pending_symbols() {
        // The documented decoupling: symbols not yet turned into a column
        // survive the row boundary and join the next finalized column.
        let config = DialectConfig::default_format();
        let context = ContextWindow::new();
        let mut acc = Accumulator::new();

        push_all(&mut acc, "ab", &config);
        acc.finalize_column(&config, &context).unwrap();
        push_all(&mut acc, "pend", &config);
        acc.finalize_row(&config, &context).unwrap();

        push_all(&mut acc, "ing", &config);
        acc.finalize_column(&config, &context).unwrap();
        acc.finalize_row(&config, &context).unwrap();

        let doc = acc.into_document();
        assert_eq!(doc.get_row(0).unwrap().values(), &["ab"]);
        assert_eq!(doc.get_row(1).unwrap().values(), &["pending"]);
    }

    #[test]
    fn test_equal_count_fails_at_extra_column() {
        let config = DialectConfig {
            require_equal_columns: true,
            ..DialectConfig::default_format()
        };
        let context = ContextWindow::new();
        let mut acc = Accumulator::new();

        acc.finalize_column(&config, &context).unwrap();
        acc.finalize_column(&config, &context).unwrap();
        acc.finalize_row(&config, &context).unwrap();

        acc.finalize_column(&config, &context).unwrap();
        acc.finalize_column(&config, &context).unwrap();
        let result = acc.finalize_column(&config, &context);
        assert!(matches!(
            result,
            Err(Error::ColumnCountMismatch {
                expected: 2,
                actual: 3,
                ..
            })
        ));
    }

    #[test]
    fn test_equal_count_fails_at_short_row() {
        let config = DialectConfig {
            require_equal_columns: true,
            ..DialectConfig::default_format()
        };
        let context = ContextWindow::new();
        let mut acc = Accumulator::new();

        acc.finalize_column(&config, &context).unwrap();
        acc.finalize_column(&config, &context).unwrap();
        acc.finalize_row(&config, &context).unwrap();

        acc.finalize_column(&config, &context).unwrap();
        let result = acc.finalize_row(&config, &context);
        assert!(matches!(
            result,
            Err(Error::ColumnCountMismatch {
                expected: 2,
                actual: 1,
                ..
            })
        ));
        // Rows finalized before the failure remain intact.
        assert_eq!(acc.rows().len(), 1);
    }

    #[test]
    fn test_skip_empty_rows_only_zero_columns() {
        let config = DialectConfig {
            skip_empty_rows: true,
            ..DialectConfig::default_format()
        };
        let context = ContextWindow::new();
        let mut acc = Accumulator::new();

        // Zero columns: skipped.
        acc.finalize_row(&config, &context).unwrap();
        // One empty-string column: kept.
        acc.finalize_column(&config, &context).unwrap();
        acc.finalize_row(&config, &context).unwrap();

        let doc = acc.into_document();
        assert_eq!(doc.row_count(), 1);
        assert_eq!(doc.get_row(0).unwrap().values(), &[""]);
    }

    #[test]
    fn test_skipped_empty_row_does_not_fix_expected_count() {
        let config = DialectConfig {
            require_equal_columns: true,
            skip_empty_rows: true,
            ..DialectConfig::default_format()
        };
        let context = ContextWindow::new();
        let mut acc = Accumulator::new();

        acc.finalize_row(&config, &context).unwrap();
        acc.finalize_column(&config, &context).unwrap();
        acc.finalize_column(&config, &context).unwrap();
        acc.finalize_row(&config, &context).unwrap();

        assert_eq!(acc.rows().len(), 1);
    }
}
