//! Integration tests for tableparser

use pretty_assertions::assert_eq;
use std::io::Write;
use tableparser::csv::{Dialect, TableParser};
use tableparser::{DiagnosticKind, TableError, TableReader};
use tempfile::NamedTempFile;

fn temp_file_with(contents: &str) -> NamedTempFile {
    let mut temp = NamedTempFile::new().unwrap();
    temp.write_all(contents.as_bytes()).unwrap();
    temp.flush().unwrap();
    temp
}

#[test]
fn test_read_file_roundtrip() {
    let temp = temp_file_with("Name,Age,City\r\nAlice,30,NYC\r\n\"Bob, Jr.\",25,SF\r\n");

    let mut reader = TableReader::open(temp.path()).unwrap().has_header(true);
    let rows: Vec<_> = reader
        .rows()
        .collect::<Result<Vec<_>, _>>()
        .unwrap();

    assert_eq!(
        reader.headers(),
        Some(&["Name".to_string(), "Age".to_string(), "City".to_string()][..])
    );
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0], vec!["Alice", "30", "NYC"]);
    assert_eq!(rows[1], vec!["Bob, Jr.", "25", "SF"]);
}

#[test]
fn test_tab_file() {
    let temp = temp_file_with("id\tnote\n1\t\"has\ttab\"\n2\tsay \"\"x\"\"\n");

    let mut reader = TableReader::open(temp.path())
        .unwrap()
        .dialect(Dialect::excel_tab());
    let rows: Vec<_> = reader
        .rows()
        .collect::<Result<Vec<_>, _>>()
        .unwrap();

    assert_eq!(rows.len(), 3);
    assert_eq!(rows[1], vec!["1", "has\ttab"]);
    // Quotes are literal once an unquoted field has started
    assert_eq!(rows[2], vec!["2", "say \"\"x\"\""]);
}

#[test]
fn test_large_dataset() {
    let num_rows = 1000;
    let mut text = String::from("ID,Value\n");
    for i in 0..num_rows {
        text.push_str(&format!("{},\"v,{}\"\n", i, i * 2));
    }
    let temp = temp_file_with(&text);

    let mut reader = TableReader::open(temp.path()).unwrap();
    let row_count = reader.rows().count();

    assert_eq!(row_count, num_rows + 1); // +1 for header
    assert_eq!(reader.row_count(), (num_rows + 1) as u64);
}

#[test]
fn test_quoted_fields_survive() {
    let fields = ["plain", "with,comma", "two\nlines", "cr\r\nlf", ""];
    let line = fields
        .iter()
        .map(|f| format!("\"{}\"", f))
        .collect::<Vec<_>>()
        .join(",");

    let rows: Vec<_> = TableParser::new(&line).collect();
    assert_eq!(rows, vec![fields.to_vec()]);
}

#[test]
fn test_blank_lines_are_rows() {
    let rows: Vec<_> = TableParser::new("a\n\n\nb\n").collect();
    assert_eq!(rows, vec![vec!["a"], vec![""], vec![""], vec!["b"]]);
}

#[test]
fn test_custom_dialect_end_to_end() {
    let dialect = Dialect::builder()
        .delimiter(';')
        .quote_char('\'')
        .escape_char('\\')
        .line_terminator('\n')
        .double_quote(true)
        .build()
        .unwrap();

    let text = "a;'b;c';d\\;e\r\n'it''s'\n";
    let rows: Vec<_> = TableParser::new(text).with_dialect(dialect).collect();

    // '\r' is ordinary data under this dialect
    assert_eq!(rows, vec![vec!["a", "b;c", "d;e\r"], vec!["it's"]]);
}

#[test]
fn test_overlapping_dialect_rejected() {
    let result = Dialect::builder().delimiter(",;").escape_char(';').build();
    assert!(matches!(
        result,
        Err(TableError::OverlappingCharClass { ch: ';', .. })
    ));
}

#[test]
fn test_strict_reader_reports_position() {
    let temp = temp_file_with("ok,1\nbad,\"open\n");

    let mut reader = TableReader::open(temp.path()).unwrap().strict(true);
    let results: Vec<_> = reader.rows().collect();

    assert_eq!(results.len(), 2);
    assert!(results[0].is_ok());
    match &results[1] {
        Err(TableError::Malformed(diagnostic)) => {
            assert_eq!(diagnostic.kind, DiagnosticKind::UnterminatedQuote);
            assert_eq!(diagnostic.record, 1);
            assert_eq!(diagnostic.offset, 9);
        }
        other => panic!("expected malformed error, got {:?}", other),
    }
}

#[test]
fn test_exhausted_parser_stays_exhausted() {
    let mut parser = TableParser::new("x,y");
    assert_eq!(parser.by_ref().count(), 1);
    assert!(parser.is_exhausted());
    assert_eq!(parser.next_record(), None);
    assert_eq!(parser.next(), None);
}
