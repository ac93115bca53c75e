//! Error types for dialect construction and input loading

use crate::csv::TokenType;
use crate::types::Diagnostic;
use thiserror::Error;

/// Errors produced by `tableparser`
///
/// The parsing core never fails on malformed text; it attaches
/// [`Diagnostic`]s to the records it yields. These errors cover dialect
/// validation, input loading, and diagnostics a caller chose to treat as fatal.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    /// A character belongs to more than one character class of a dialect
    #[error("character {ch:?} is configured as both {first} and {second}")]
    OverlappingCharClass {
        ch: char,
        first: TokenType,
        second: TokenType,
    },

    /// Input could not be read or decoded
    #[error("read error: {0}")]
    ReadError(String),

    /// A diagnostic promoted to an error (strict handling)
    #[error("malformed input: {0}")]
    Malformed(Diagnostic),
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, TableError>;
