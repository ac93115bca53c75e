//! Borrowing iterators over a [`TableParser`]

use super::parser::TableParser;
use crate::types::Record;
use std::iter::FusedIterator;

/// Iterator over records, diagnostics included
#[derive(Debug)]
pub struct RecordIterator<'a> {
    parser: &'a mut TableParser,
}

impl<'a> RecordIterator<'a> {
    pub(crate) fn new(parser: &'a mut TableParser) -> Self {
        RecordIterator { parser }
    }
}

impl Iterator for RecordIterator<'_> {
    type Item = Record;

    fn next(&mut self) -> Option<Self::Item> {
        self.parser.next_record()
    }
}

impl FusedIterator for RecordIterator<'_> {}

/// Iterator over field lists
#[derive(Debug)]
pub struct RowIterator<'a> {
    parser: &'a mut TableParser,
}

impl<'a> RowIterator<'a> {
    pub(crate) fn new(parser: &'a mut TableParser) -> Self {
        RowIterator { parser }
    }
}

impl Iterator for RowIterator<'_> {
    type Item = Vec<String>;

    fn next(&mut self) -> Option<Self::Item> {
        self.parser.next_row()
    }
}

impl FusedIterator for RowIterator<'_> {}
