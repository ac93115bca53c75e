//! Dialect-driven tokenizing of delimited text

mod dialect;
mod iter;
mod parser;

pub use dialect::{CharSet, Dialect, DialectBuilder, TokenType};
pub use iter::{RecordIterator, RowIterator};
pub use parser::{parse_str, TableParser};
