//! Character-driven state machine turning delimited text into records
//!
//! The parser holds the whole input as a `Vec<char>` and advances one record
//! per [`TableParser::next_record`] call. Each step classifies the character
//! under the cursor through the [`Dialect`] and applies the transition for
//! the current `(state, token)` pair.
//!
//! Malformed input never aborts parsing. Problems are reported as
//! [`Diagnostic`]s attached to the record they were found in, and logged
//! through `tracing`.

use super::dialect::{Dialect, TokenType};
use super::iter::{RecordIterator, RowIterator};
use crate::types::{Diagnostic, DiagnosticKind, Record};
use std::iter::FusedIterator;
use std::mem;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseState {
    /// Beginning of a record
    StartRecord,
    /// Just after a delimiter, or at the first field of a record
    StartField,
    /// Inside an unquoted field
    InField,
    /// Just consumed an escape character outside quotes
    EscapedChar,
    /// Inside a field that began with a quote character
    InQuotedField,
    /// Saw a quote inside a quoted field: doubled quote or closing quote
    QuoteInQuotedField,
    /// Saw an escape character inside a quoted field
    EscapeInQuotedField,
    /// Consuming the line terminator that ended the record
    IgnoreNewline,
}

/// Pull-based parser over fully materialized input
///
/// Not restartable and not seekable. Once input is exhausted every further
/// call returns `None`.
///
/// # Examples
///
/// ```
/// use tableparser::csv::TableParser;
///
/// let mut parser = TableParser::new("name,qty\n\"Widget, large\",3\n");
///
/// assert_eq!(parser.next_row(), Some(vec!["name".to_string(), "qty".to_string()]));
/// assert_eq!(
///     parser.next_row(),
///     Some(vec!["Widget, large".to_string(), "3".to_string()])
/// );
/// assert_eq!(parser.next_row(), None);
/// assert_eq!(parser.next_row(), None);
/// ```
///
/// # Custom dialect
///
/// ```
/// use tableparser::csv::{Dialect, TableParser};
///
/// let dialect = Dialect::builder().delimiter('|').build().unwrap();
/// let rows: Vec<Vec<String>> = TableParser::new("a\\|b|c").with_dialect(dialect).collect();
///
/// assert_eq!(rows, vec![vec!["a|b".to_string(), "c".to_string()]]);
/// ```
#[derive(Debug)]
pub struct TableParser {
    // Input
    data: Vec<char>,

    // Configuration
    dialect: Dialect,
    strict: bool,

    // Parser state
    state: ParseState,
    pos: usize,
    field: String,
    row: Vec<String>,
    diagnostics: Vec<Diagnostic>,
    terminator: Option<char>,
    quote_offset: usize,
    record_index: u64,
    exhausted: bool,
}

impl TableParser {
    /// Create a parser over `text` using [`Dialect::excel_csv`]
    pub fn new(text: &str) -> Self {
        Self::from_chars(text.chars().collect())
    }

    /// Create a parser over an already decoded character sequence
    pub fn from_chars(data: Vec<char>) -> Self {
        debug!(chars = data.len(), "table parser created");
        TableParser {
            data,
            dialect: Dialect::excel_csv(),
            strict: false,
            state: ParseState::StartRecord,
            pos: 0,
            field: String::new(),
            row: Vec::new(),
            diagnostics: Vec::new(),
            terminator: None,
            quote_offset: 0,
            record_index: 0,
            exhausted: false,
        }
    }

    /// Set the dialect (builder pattern)
    ///
    /// Intended to be called before the first record is read.
    pub fn with_dialect(mut self, dialect: Dialect) -> Self {
        self.dialect = dialect;
        self
    }

    /// Report unterminated quoted fields at end of input (builder pattern)
    ///
    /// Lenient parsing (the default) accepts them silently.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn dialect(&self) -> &Dialect {
        &self.dialect
    }

    /// Whether the whole input has been consumed and no record is pending
    pub fn is_exhausted(&self) -> bool {
        self.pos >= self.data.len() && self.state == ParseState::StartRecord
    }

    /// Get the number of records produced so far
    pub fn records_read(&self) -> u64 {
        self.record_index
    }

    /// Produce the next record, or `None` at end of input
    ///
    /// A blank line yields a record with one empty field. The last record
    /// does not need a trailing line terminator.
    pub fn next_record(&mut self) -> Option<Record> {
        while self.pos < self.data.len() {
            self.step();
            if self.state == ParseState::IgnoreNewline {
                self.finish_terminator();
                break;
            }
        }
        if self.pos >= self.data.len() {
            self.finish_input();
        }

        if self.row.is_empty() {
            if !self.exhausted {
                self.exhausted = true;
                debug!(records = self.record_index, "input exhausted");
            }
            return None;
        }

        let record = Record {
            index: self.record_index,
            fields: mem::take(&mut self.row),
            diagnostics: mem::take(&mut self.diagnostics),
        };
        self.record_index += 1;
        Some(record)
    }

    /// Produce the next record's fields, dropping diagnostics
    pub fn next_row(&mut self) -> Option<Vec<String>> {
        self.next_record().map(Record::into_fields)
    }

    /// Iterate records together with their diagnostics
    pub fn records(&mut self) -> RecordIterator<'_> {
        RecordIterator::new(self)
    }

    /// Iterate field lists only
    pub fn rows(&mut self) -> RowIterator<'_> {
        RowIterator::new(self)
    }

    /// Apply one transition for the character under the cursor
    fn step(&mut self) {
        let ch = self.data[self.pos];
        let token = self.dialect.classify(ch);
        let mut advance = true;

        match (self.state, token) {
            (ParseState::StartRecord, TokenType::LineTerminator) => {
                self.save_field();
                self.begin_terminator(ch);
            }
            (ParseState::StartRecord, _) => {
                // Re-dispatch the same character in StartField
                self.state = ParseState::StartField;
                advance = false;
            }

            (ParseState::StartField, TokenType::LineTerminator) => {
                self.save_field();
                self.begin_terminator(ch);
            }
            (ParseState::StartField, TokenType::QuoteChar) => {
                self.quote_offset = self.pos;
                self.state = ParseState::InQuotedField;
            }
            (ParseState::StartField, TokenType::EscapeChar) => {
                self.state = ParseState::EscapedChar;
            }
            (ParseState::StartField, TokenType::Delimiter) => self.save_field(),
            (ParseState::StartField, TokenType::OtherChar) => {
                self.field.push(ch);
                self.state = ParseState::InField;
            }

            // Quotes are plain data once an unquoted field has started
            (ParseState::InField, TokenType::QuoteChar | TokenType::OtherChar) => {
                let end = self.scan_unquoted(self.pos);
                self.append_span(self.pos, end);
                self.pos = end;
                advance = false;
            }
            (ParseState::InField, TokenType::Delimiter) => {
                self.save_field();
                self.state = ParseState::StartField;
            }
            (ParseState::InField, TokenType::LineTerminator) => {
                self.save_field();
                self.begin_terminator(ch);
            }
            (ParseState::InField, TokenType::EscapeChar) => {
                self.state = ParseState::EscapedChar;
            }

            (ParseState::EscapedChar, _) => {
                self.field.push(ch);
                self.state = ParseState::InField;
            }

            (ParseState::InQuotedField, TokenType::EscapeChar) => {
                self.state = ParseState::EscapeInQuotedField;
            }
            (ParseState::InQuotedField, TokenType::QuoteChar) => {
                self.state = if self.dialect.double_quote() {
                    ParseState::QuoteInQuotedField
                } else {
                    // Closing quote; anything up to the next delimiter joins the same field
                    ParseState::InField
                };
            }
            (ParseState::InQuotedField, _) => self.field.push(ch),

            (ParseState::EscapeInQuotedField, _) => {
                self.field.push(ch);
                self.state = ParseState::InQuotedField;
            }

            (ParseState::QuoteInQuotedField, TokenType::QuoteChar) => {
                self.field.push(ch);
                self.state = ParseState::InQuotedField;
            }
            (ParseState::QuoteInQuotedField, TokenType::Delimiter) => {
                self.save_field();
                self.state = ParseState::StartField;
            }
            (ParseState::QuoteInQuotedField, TokenType::LineTerminator) => {
                self.save_field();
                self.begin_terminator(ch);
            }
            (ParseState::QuoteInQuotedField, _) => {
                self.field.push(ch);
                self.state = ParseState::InQuotedField;
            }

            (ParseState::IgnoreNewline, TokenType::LineTerminator) => {}
            (ParseState::IgnoreNewline, _) => {
                self.report(DiagnosticKind::StrayCharacter(ch), self.pos);
                self.terminator = None;
                self.state = ParseState::StartRecord;
                advance = false;
            }
        }

        if advance {
            self.pos += 1;
        }
    }

    /// Consume the rest of a terminator sequence and close the record
    ///
    /// A sequence is one terminator character optionally followed by one
    /// different terminator character (`\r\n`, `\n\r`). A repeated character
    /// starts a new (blank) line instead.
    fn finish_terminator(&mut self) {
        if let (Some(first), Some(&next)) = (self.terminator, self.data.get(self.pos)) {
            if next != first && self.dialect.classify(next) == TokenType::LineTerminator {
                self.step();
            }
        }
        self.terminator = None;
        self.state = ParseState::StartRecord;
    }

    /// End-of-input flush for whatever state the last character left
    fn finish_input(&mut self) {
        match self.state {
            ParseState::StartRecord => return,
            ParseState::IgnoreNewline => {}
            ParseState::StartField | ParseState::InField | ParseState::QuoteInQuotedField => {
                self.save_field();
            }
            ParseState::EscapedChar => {
                self.report(DiagnosticKind::UnterminatedEscape, self.pos.saturating_sub(1));
                self.save_field();
            }
            ParseState::InQuotedField | ParseState::EscapeInQuotedField => {
                if self.strict {
                    self.report(DiagnosticKind::UnterminatedQuote, self.quote_offset);
                } else {
                    debug!(
                        record = self.record_index,
                        offset = self.quote_offset,
                        "accepting unterminated quoted field"
                    );
                }
                self.save_field();
            }
        }
        self.terminator = None;
        self.state = ParseState::StartRecord;
    }

    fn begin_terminator(&mut self, ch: char) {
        self.terminator = Some(ch);
        self.state = ParseState::IgnoreNewline;
    }

    /// End of the run of characters that are literal inside an unquoted field
    fn scan_unquoted(&self, start: usize) -> usize {
        self.data[start..]
            .iter()
            .position(|&ch| {
                !matches!(
                    self.dialect.classify(ch),
                    TokenType::QuoteChar | TokenType::OtherChar
                )
            })
            .map_or(self.data.len(), |n| start + n)
    }

    fn append_span(&mut self, start: usize, end: usize) {
        if end > start {
            self.field.extend(&self.data[start..end]);
        }
    }

    fn save_field(&mut self) {
        self.row.push(mem::take(&mut self.field));
    }

    fn report(&mut self, kind: DiagnosticKind, offset: usize) {
        let diagnostic = Diagnostic {
            kind,
            record: self.record_index,
            offset,
        };
        warn!(
            record = diagnostic.record,
            offset = diagnostic.offset,
            "{}",
            diagnostic
        );
        self.diagnostics.push(diagnostic);
    }
}

impl Iterator for TableParser {
    type Item = Vec<String>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_row()
    }
}

impl FusedIterator for TableParser {}

/// Parse a whole string into rows
pub fn parse_str(text: &str, dialect: &Dialect) -> Vec<Vec<String>> {
    TableParser::new(text).with_dialect(dialect.clone()).collect()
}
