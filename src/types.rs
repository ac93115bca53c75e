//! Type definitions for parsed records and parse diagnostics

use crate::error::{Result, TableError};
use std::fmt;

/// Kind of structural problem noticed while parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DiagnosticKind {
    /// A non-terminator character arrived while a line terminator was being consumed
    ///
    /// Records close as soon as their terminator sequence ends, so current
    /// input never raises this; it is only reachable if a terminator policy
    /// leaves the parser consuming terminators across records.
    StrayCharacter(char),
    /// Input ended inside a quoted field (reported in strict mode only)
    UnterminatedQuote,
    /// Input ended right after an escape character
    UnterminatedEscape,
}

/// Advisory report attached to the record it was found in
///
/// Diagnostics never stop parsing. Callers decide whether to treat them
/// as fatal, e.g. through [`Record::into_result`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Diagnostic {
    /// What went wrong
    pub kind: DiagnosticKind,
    /// Index (0-based) of the record being produced
    pub record: u64,
    /// Character offset (0-based) into the input
    pub offset: usize,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            DiagnosticKind::StrayCharacter(ch) => write!(
                f,
                "unexpected character {:?} after line terminator",
                ch
            )?,
            DiagnosticKind::UnterminatedQuote => write!(f, "unterminated quoted field")?,
            DiagnosticKind::UnterminatedEscape => {
                write!(f, "escape character at end of input")?
            }
        }
        write!(f, " in record {} at offset {}", self.record, self.offset)
    }
}

/// One parsed record: its fields plus any diagnostics raised while producing it
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Record {
    /// Record index (0-based)
    pub index: u64,
    /// Field values in input order
    pub fields: Vec<String>,
    /// Diagnostics raised while this record was parsed
    pub diagnostics: Vec<Diagnostic>,
}

impl Record {
    /// Create a record without diagnostics
    pub fn new(index: u64, fields: Vec<String>) -> Self {
        Record {
            index,
            fields,
            diagnostics: Vec::new(),
        }
    }

    /// Get field at column index
    pub fn get(&self, col: usize) -> Option<&str> {
        self.fields.get(col).map(String::as_str)
    }

    /// Get number of fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check if the record has no fields
    ///
    /// A blank input line still produces one empty field, so parsed
    /// records are never empty.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Check if the record is a single empty field (a blank line)
    pub fn is_blank(&self) -> bool {
        matches!(self.fields.as_slice(), [only] if only.is_empty())
    }

    /// Check if any diagnostic was raised for this record
    pub fn has_diagnostics(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    /// Drop diagnostics and keep the fields
    pub fn into_fields(self) -> Vec<String> {
        self.fields
    }

    /// Treat diagnostics as fatal: the first one becomes [`TableError::Malformed`]
    pub fn into_result(self) -> Result<Vec<String>> {
        match self.diagnostics.first() {
            Some(diagnostic) => Err(TableError::Malformed(*diagnostic)),
            None => Ok(self.fields),
        }
    }
}

impl From<Record> for Vec<String> {
    fn from(record: Record) -> Self {
        record.fields
    }
}
