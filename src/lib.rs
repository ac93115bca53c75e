//! # tableparser
//!
//! Dialect-driven tokenizer for delimited text (CSV, TSV and friends).
//!
//! Input is fully materialized, then a character-level state machine turns
//! it into records one at a time. Delimiter, quote, escape and line
//! terminator characters are configured through a [`csv::Dialect`], and
//! doubled-quote escaping can be switched on or off.
//!
//! Parsing is lenient: malformed input never aborts the parse. Problems are
//! attached to the affected [`Record`] as [`Diagnostic`]s so callers can
//! decide whether to treat them as fatal.
//!
//! ## Quick Start
//!
//! ```
//! use tableparser::csv::{Dialect, TableParser};
//!
//! let text = "id,comment\n1,\"said \"\"hi\"\"\"\n2,plain\n";
//! let rows: Vec<Vec<String>> = TableParser::new(text)
//!     .with_dialect(Dialect::excel_csv())
//!     .collect();
//!
//! assert_eq!(rows[1], vec!["1", "said \"hi\""]);
//! assert_eq!(rows.len(), 3);
//! ```
//!
//! ## Reading files
//!
//! ```no_run
//! use tableparser::TableReader;
//!
//! let mut reader = TableReader::open("data.csv").unwrap().has_header(true);
//! for row in reader.rows() {
//!     println!("{:?}", row.unwrap());
//! }
//! ```

pub mod csv;
pub mod error;
pub mod table_reader;
pub mod types;

pub use csv::{parse_str, Dialect, TableParser};
pub use error::{Result, TableError};
pub use table_reader::TableReader;
pub use types::{Diagnostic, DiagnosticKind, Record};
