//! Loading delimited text from files and readers
//!
//! The parser works on fully materialized input, so the reader loads the
//! whole source up front and then hands out rows one at a time.

use crate::csv::{Dialect, TableParser};
use crate::error::{Result, TableError};
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// Table reader over a file or any [`Read`] source
///
/// # Examples
///
/// ```no_run
/// use tableparser::TableReader;
///
/// let mut reader = TableReader::open("data.csv").unwrap();
///
/// for row_result in reader.rows() {
///     let row = row_result.unwrap();
///     println!("{:?}", row);
/// }
/// ```
///
/// # With Headers
///
/// ```no_run
/// use tableparser::csv::Dialect;
/// use tableparser::TableReader;
///
/// let mut reader = TableReader::open("data.tsv")
///     .unwrap()
///     .dialect(Dialect::excel_tab())
///     .has_header(true);
///
/// for row_result in reader.rows() {
///     let row = row_result.unwrap();
///     // Process data rows (header already consumed)
/// }
///
/// if let Some(headers) = reader.headers() {
///     println!("Headers: {:?}", headers);
/// }
/// ```
#[derive(Debug)]
pub struct TableReader {
    parser: TableParser,
    row_count: u64,

    // Configuration
    strict: bool,
    has_header: bool,
    headers: Vec<String>,
}

impl TableReader {
    /// Read a whole file as UTF-8 and prepare to parse it
    ///
    /// # Errors
    ///
    /// Returns [`TableError::ReadError`] if the file cannot be opened or is not valid UTF-8.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_ref = path.as_ref();
        let text = std::fs::read_to_string(path_ref).map_err(|e| {
            TableError::ReadError(format!("Failed to read {}: {}", path_ref.display(), e))
        })?;
        debug!(path = %path_ref.display(), bytes = text.len(), "loaded table file");
        Ok(Self::from_string(text))
    }

    /// Read everything from `reader` as UTF-8
    ///
    /// # Errors
    ///
    /// Returns [`TableError::ReadError`] on I/O failure or invalid UTF-8.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut text = String::new();
        reader
            .read_to_string(&mut text)
            .map_err(|e| TableError::ReadError(format!("Failed to read input: {}", e)))?;
        Ok(Self::from_string(text))
    }

    /// Wrap text that is already in memory
    pub fn from_string(text: String) -> Self {
        TableReader {
            parser: TableParser::new(&text),
            row_count: 0,
            strict: false,
            has_header: false,
            headers: Vec::new(),
        }
    }

    /// Set the dialect (builder pattern)
    pub fn dialect(mut self, dialect: Dialect) -> Self {
        self.parser = self.parser.with_dialect(dialect);
        self
    }

    /// Treat every parse diagnostic as an error (builder pattern)
    ///
    /// Also makes the parser report unterminated quoted fields.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self.parser = self.parser.strict(strict);
        self
    }

    /// Indicate that the first row contains headers (builder pattern)
    ///
    /// When set to `true`, the first row is stored and accessible via `headers()`.
    /// The iterator returned by `rows()` skips it.
    pub fn has_header(mut self, has: bool) -> Self {
        self.has_header = has;
        self
    }

    /// Get header row if available
    pub fn headers(&self) -> Option<&[String]> {
        if self.headers.is_empty() {
            None
        } else {
            Some(&self.headers)
        }
    }

    /// Read a single row
    ///
    /// Returns `Ok(None)` at end of input. Without strict mode diagnostics
    /// are only logged.
    ///
    /// # Errors
    ///
    /// In strict mode, returns [`TableError::Malformed`] for the first
    /// diagnostic raised while parsing the row.
    pub fn read_row(&mut self) -> Result<Option<Vec<String>>> {
        let Some(record) = self.parser.next_record() else {
            return Ok(None);
        };

        let fields = if self.strict {
            record.into_result()?
        } else {
            record.into_fields()
        };

        // Handle header row
        if self.has_header && self.row_count == 0 {
            self.headers = fields.clone();
        }

        self.row_count += 1;
        Ok(Some(fields))
    }

    /// Get iterator over rows
    pub fn rows(&mut self) -> TableRowIterator<'_> {
        TableRowIterator { reader: self }
    }

    /// Get the number of rows read so far (header included)
    pub fn row_count(&self) -> u64 {
        self.row_count
    }
}

/// Iterator over table rows
#[derive(Debug)]
pub struct TableRowIterator<'a> {
    reader: &'a mut TableReader,
}

impl Iterator for TableRowIterator<'_> {
    type Item = Result<Vec<String>>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.reader.read_row() {
            Ok(Some(row)) => {
                // Skip header if has_header is true and this is the first row
                if self.reader.has_header && self.reader.row_count == 1 {
                    self.reader.read_row().transpose()
                } else {
                    Some(Ok(row))
                }
            }
            Ok(None) => None,
            Err(e) => Some(Err(e)),
        }
    }
}
