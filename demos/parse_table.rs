//! Table Parsing Examples
//!
//! Demonstrates:
//! - Parsing CSV text with the default Excel dialect
//! - Tab-delimited input
//! - A custom dialect with an escape character
//! - Inspecting diagnostics in strict mode

use std::error::Error;
use tableparser::csv::{Dialect, TableParser};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Table Parsing Examples ===\n");

    // Example 1: Excel-style CSV
    println!("1. Excel CSV...");
    {
        let text = "Name,Quote\nAlice,\"She said \"\"hi\"\"\"\nBob,\"multi\nline\"\n";
        for (i, row) in TableParser::new(text).enumerate() {
            println!("   Row {}: {:?}", i + 1, row);
        }
    }

    // Example 2: Tab-delimited
    println!("\n2. Tab-delimited...");
    {
        let text = "id\tvalue\r\n1\t\"a\tb\"\r\n";
        let mut parser = TableParser::new(text).with_dialect(Dialect::excel_tab());
        for row in parser.rows() {
            println!("   {:?}", row);
        }
        println!("   Total rows read: {}", parser.records_read());
    }

    // Example 3: Custom dialect with escapes
    println!("\n3. Pipe-delimited with backslash escapes...");
    {
        let dialect = Dialect::builder()
            .delimiter('|')
            .escape_char('\\')
            .build()?;
        for row in TableParser::new(r"path|C:\\temp\|x").with_dialect(dialect) {
            println!("   {:?}", row);
        }
    }

    // Example 4: Diagnostics
    println!("\n4. Strict mode diagnostics...");
    {
        let mut parser = TableParser::new("ok,1\nbroken,\"never closed").strict(true);
        for record in parser.records() {
            if record.has_diagnostics() {
                for diagnostic in &record.diagnostics {
                    println!("   ⚠ {}", diagnostic);
                }
            }
            println!("   Record {}: {:?}", record.index, record.fields);
        }
    }

    Ok(())
}
