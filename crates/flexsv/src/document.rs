//! Parsed document representation

/// A single row of a parsed document
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Row {
    columns: Vec<String>,
}

impl Row {
    /// Create a row from column values
    pub fn new(columns: Vec<String>) -> Self {
        Self { columns }
    }

    /// Get the number of columns in this row
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Check if the row has zero columns
    ///
    /// A row holding one empty string is not empty.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Get a column value by index
    pub fn get(&self, index: usize) -> Option<&str> {
        self.columns.get(index).map(String::as_str)
    }

    /// Get all column values
    pub fn values(&self) -> &[String] {
        &self.columns
    }

    /// Consume the row, yielding its column values
    pub fn into_values(self) -> Vec<String> {
        self.columns
    }

    /// Iterate over the column values
    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.columns.iter()
    }
}

impl<'a> IntoIterator for &'a Row {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.columns.iter()
    }
}

impl From<Vec<String>> for Row {
    fn from(columns: Vec<String>) -> Self {
        Self::new(columns)
    }
}

/// A complete parsed document: an ordered sequence of rows
///
/// # Examples
///
/// ```
/// use flexsv::Parser;
///
/// let doc = Parser::default_format().parse("a,b\nc,d\n")?;
/// assert_eq!(doc.row_count(), 2);
/// assert_eq!(doc.get_row(0).unwrap().values(), &["a", "b"]);
/// # Ok::<(), flexsv::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Document {
    rows: Vec<Row>,
}

impl Document {
    /// Create a document from finalized rows
    pub fn new(rows: Vec<Row>) -> Self {
        Self { rows }
    }

    /// Get all rows
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Get the number of rows
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Check if the document has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Get a row by index
    pub fn get_row(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }

    /// Whether every row has the same column count
    pub fn is_rectangular(&self) -> bool {
        match self.rows.first() {
            None => true,
            Some(first) => self.rows.iter().all(|row| row.len() == first.len()),
        }
    }

    /// Consume the document, yielding its rows
    pub fn into_rows(self) -> Vec<Row> {
        self.rows
    }

    /// Iterate over the rows
    pub fn iter(&self) -> std::slice::Iter<'_, Row> {
        self.rows.iter()
    }
}

impl<'a> IntoIterator for &'a Document {
    type Item = &'a Row;
    type IntoIter = std::slice::Iter<'a, Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

impl IntoIterator for Document {
    type Item = Row;
    type IntoIter = std::vec::IntoIter<Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}
