//! Dialect description and per-character classification

use crate::error::{Result, TableError};
use std::fmt;

/// Classification of one input character under a [`Dialect`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TokenType {
    Delimiter,
    QuoteChar,
    EscapeChar,
    LineTerminator,
    OtherChar,
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenType::Delimiter => "delimiter",
            TokenType::QuoteChar => "quote character",
            TokenType::EscapeChar => "escape character",
            TokenType::LineTerminator => "line terminator",
            TokenType::OtherChar => "other character",
        };
        f.write_str(name)
    }
}

/// Sorted, duplicate-free set of characters
///
/// An empty set disables its character class (e.g. no escape character).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "Vec<char>", into = "Vec<char>"))]
pub struct CharSet {
    chars: Vec<char>,
}

impl CharSet {
    /// Create an empty set
    pub fn empty() -> Self {
        Self::default()
    }

    /// Unicode newline characters: LF, VT, FF, CR, NEL, LINE SEPARATOR, PARAGRAPH SEPARATOR
    pub fn newlines() -> Self {
        CharSet::from_iter([
            '\n', '\u{000B}', '\u{000C}', '\r', '\u{0085}', '\u{2028}', '\u{2029}',
        ])
    }

    /// Check membership
    pub fn contains(&self, ch: char) -> bool {
        self.chars.binary_search(&ch).is_ok()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    /// Iterate characters in ascending order
    pub fn iter(&self) -> impl Iterator<Item = char> + '_ {
        self.chars.iter().copied()
    }

    fn first_shared(&self, other: &CharSet) -> Option<char> {
        self.iter().find(|&ch| other.contains(ch))
    }
}

impl FromIterator<char> for CharSet {
    fn from_iter<I: IntoIterator<Item = char>>(iter: I) -> Self {
        let mut chars: Vec<char> = iter.into_iter().collect();
        chars.sort_unstable();
        chars.dedup();
        CharSet { chars }
    }
}

impl From<&str> for CharSet {
    fn from(s: &str) -> Self {
        s.chars().collect()
    }
}

impl From<String> for CharSet {
    fn from(s: String) -> Self {
        s.chars().collect()
    }
}

impl From<char> for CharSet {
    fn from(ch: char) -> Self {
        CharSet { chars: vec![ch] }
    }
}

impl From<Vec<char>> for CharSet {
    fn from(chars: Vec<char>) -> Self {
        chars.into_iter().collect()
    }
}

impl From<CharSet> for Vec<char> {
    fn from(set: CharSet) -> Self {
        set.chars
    }
}

/// Immutable description of one delimited-text flavor
///
/// Built through [`Dialect::builder`], which rejects character classes that
/// share a character. Classification checks the classes in a fixed order:
/// delimiter, quote, escape, line terminator; anything else is
/// [`TokenType::OtherChar`].
///
/// # Examples
///
/// ```
/// use tableparser::csv::{Dialect, TokenType};
///
/// let dialect = Dialect::builder()
///     .delimiter(';')
///     .escape_char("")
///     .build()
///     .unwrap();
///
/// assert_eq!(dialect.classify(';'), TokenType::Delimiter);
/// assert_eq!(dialect.classify(','), TokenType::OtherChar);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(try_from = "DialectBuilder", into = "DialectBuilder")
)]
pub struct Dialect {
    delimiter: CharSet,
    quote_char: CharSet,
    escape_char: CharSet,
    line_terminator: CharSet,
    double_quote: bool,
}

impl Dialect {
    /// Start building a dialect from the general-purpose defaults
    pub fn builder() -> DialectBuilder {
        DialectBuilder::default()
    }

    /// Comma-delimited, `"`-quoted, doubled quotes, no escape character
    pub fn excel_csv() -> Self {
        Dialect {
            delimiter: CharSet::from(','),
            quote_char: CharSet::from('"'),
            escape_char: CharSet::empty(),
            line_terminator: CharSet::newlines(),
            double_quote: true,
        }
    }

    /// Tab-delimited with the same quoting convention as [`Dialect::excel_csv`]
    pub fn excel_tab() -> Self {
        Dialect {
            delimiter: CharSet::from('\t'),
            ..Self::excel_csv()
        }
    }

    /// Classify one character
    pub fn classify(&self, ch: char) -> TokenType {
        if self.delimiter.contains(ch) {
            TokenType::Delimiter
        } else if self.quote_char.contains(ch) {
            TokenType::QuoteChar
        } else if self.escape_char.contains(ch) {
            TokenType::EscapeChar
        } else if self.line_terminator.contains(ch) {
            TokenType::LineTerminator
        } else {
            TokenType::OtherChar
        }
    }

    pub fn delimiter(&self) -> &CharSet {
        &self.delimiter
    }

    pub fn quote_char(&self) -> &CharSet {
        &self.quote_char
    }

    pub fn escape_char(&self) -> &CharSet {
        &self.escape_char
    }

    pub fn line_terminator(&self) -> &CharSet {
        &self.line_terminator
    }

    /// Whether `""` inside a quoted field stands for one literal quote
    pub fn double_quote(&self) -> bool {
        self.double_quote
    }

    fn classes(&self) -> [(&CharSet, TokenType); 4] {
        [
            (&self.delimiter, TokenType::Delimiter),
            (&self.quote_char, TokenType::QuoteChar),
            (&self.escape_char, TokenType::EscapeChar),
            (&self.line_terminator, TokenType::LineTerminator),
        ]
    }

    fn validate(self) -> Result<Self> {
        let classes = self.classes();
        for (i, (set, first)) in classes.iter().enumerate() {
            for (other, second) in &classes[i + 1..] {
                if let Some(ch) = set.first_shared(other) {
                    return Err(TableError::OverlappingCharClass {
                        ch,
                        first: *first,
                        second: *second,
                    });
                }
            }
        }
        Ok(self)
    }
}

impl Default for Dialect {
    /// `,` delimiter, `"` quote, `\` escape, Unicode newlines, doubled quotes
    fn default() -> Self {
        Dialect {
            escape_char: CharSet::from('\\'),
            ..Self::excel_csv()
        }
    }
}

/// Builder for [`Dialect`]; every class is independently overridable
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DialectBuilder {
    delimiter: CharSet,
    quote_char: CharSet,
    escape_char: CharSet,
    line_terminator: CharSet,
    double_quote: bool,
}

impl Default for DialectBuilder {
    fn default() -> Self {
        Dialect::default().into()
    }
}

impl DialectBuilder {
    /// Set delimiter characters (builder pattern)
    pub fn delimiter(mut self, set: impl Into<CharSet>) -> Self {
        self.delimiter = set.into();
        self
    }

    /// Set quote characters (builder pattern)
    pub fn quote_char(mut self, set: impl Into<CharSet>) -> Self {
        self.quote_char = set.into();
        self
    }

    /// Set escape characters; an empty set disables escaping
    pub fn escape_char(mut self, set: impl Into<CharSet>) -> Self {
        self.escape_char = set.into();
        self
    }

    /// Set line terminator characters
    pub fn line_terminator(mut self, set: impl Into<CharSet>) -> Self {
        self.line_terminator = set.into();
        self
    }

    /// Enable or disable doubled-quote escaping inside quoted fields
    pub fn double_quote(mut self, enabled: bool) -> Self {
        self.double_quote = enabled;
        self
    }

    /// Validate and build the dialect
    ///
    /// # Errors
    ///
    /// Returns [`TableError::OverlappingCharClass`] when one character is
    /// assigned to two classes.
    pub fn build(self) -> Result<Dialect> {
        Dialect {
            delimiter: self.delimiter,
            quote_char: self.quote_char,
            escape_char: self.escape_char,
            line_terminator: self.line_terminator,
            double_quote: self.double_quote,
        }
        .validate()
    }
}

impl From<Dialect> for DialectBuilder {
    fn from(dialect: Dialect) -> Self {
        DialectBuilder {
            delimiter: dialect.delimiter,
            quote_char: dialect.quote_char,
            escape_char: dialect.escape_char,
            line_terminator: dialect.line_terminator,
            double_quote: dialect.double_quote,
        }
    }
}

impl TryFrom<DialectBuilder> for Dialect {
    type Error = TableError;

    fn try_from(builder: DialectBuilder) -> Result<Self> {
        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_excel_csv_classification() {
        let dialect = Dialect::excel_csv();
        assert_eq!(dialect.classify(','), TokenType::Delimiter);
        assert_eq!(dialect.classify('"'), TokenType::QuoteChar);
        assert_eq!(dialect.classify('\n'), TokenType::LineTerminator);
        assert_eq!(dialect.classify('\r'), TokenType::LineTerminator);
        assert_eq!(dialect.classify('\u{2028}'), TokenType::LineTerminator);
        assert_eq!(dialect.classify('\\'), TokenType::OtherChar);
        assert_eq!(dialect.classify('\t'), TokenType::OtherChar);
        assert!(dialect.double_quote());
    }

    #[test]
    fn test_excel_tab_classification() {
        let dialect = Dialect::excel_tab();
        assert_eq!(dialect.classify('\t'), TokenType::Delimiter);
        assert_eq!(dialect.classify(','), TokenType::OtherChar);
        assert_eq!(dialect.classify('"'), TokenType::QuoteChar);
        assert!(dialect.escape_char().is_empty());
    }

    #[test]
    fn test_default_has_backslash_escape() {
        let dialect = Dialect::default();
        assert_eq!(dialect.classify('\\'), TokenType::EscapeChar);
        assert_eq!(Dialect::builder().build(), Ok(dialect));
    }

    #[test]
    fn test_builder_overrides() {
        let dialect = Dialect::builder()
            .delimiter("|;")
            .quote_char('\'')
            .escape_char("")
            .line_terminator('\n')
            .double_quote(false)
            .build()
            .unwrap();

        assert_eq!(dialect.classify('|'), TokenType::Delimiter);
        assert_eq!(dialect.classify(';'), TokenType::Delimiter);
        assert_eq!(dialect.classify('\''), TokenType::QuoteChar);
        assert_eq!(dialect.classify('"'), TokenType::OtherChar);
        assert_eq!(dialect.classify('\r'), TokenType::OtherChar);
        assert!(!dialect.double_quote());
    }

    #[test]
    fn test_overlap_rejected() {
        let err = Dialect::builder().quote_char(',').build().unwrap_err();
        assert_eq!(
            err,
            TableError::OverlappingCharClass {
                ch: ',',
                first: TokenType::Delimiter,
                second: TokenType::QuoteChar,
            }
        );
    }

    #[test]
    fn test_overlap_with_terminator_rejected() {
        let err = Dialect::builder()
            .escape_char("\\\n")
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            TableError::OverlappingCharClass {
                ch: '\n',
                first: TokenType::EscapeChar,
                second: TokenType::LineTerminator,
            }
        );
    }

    #[test]
    fn test_charset_sorted_dedup() {
        let set = CharSet::from("cabac");
        assert_eq!(set.iter().collect::<String>(), "abc");
        assert_eq!(set.len(), 3);
        assert!(set.contains('b'));
        assert!(!set.contains('d'));
        assert!(CharSet::empty().is_empty());
    }

    #[test]
    fn test_newlines_set() {
        let set = CharSet::newlines();
        for ch in ['\n', '\r', '\u{000B}', '\u{000C}', '\u{0085}', '\u{2028}', '\u{2029}'] {
            assert!(set.contains(ch), "{:?} should be a newline", ch);
        }
        assert!(!set.contains(' '));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_preset_roundtrip() {
        let json = serde_json::to_string(&Dialect::excel_tab()).unwrap();
        let back: Dialect = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Dialect::excel_tab());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_partial_document_uses_defaults() {
        let dialect: Dialect = serde_json::from_str(r#"{"delimiter":[";"]}"#).unwrap();
        assert_eq!(dialect, Dialect::builder().delimiter(';').build().unwrap());
        assert_eq!(dialect.classify('\\'), TokenType::EscapeChar);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_overlap_rejected() {
        let err = serde_json::from_str::<Dialect>(r#"{"delimiter":[","],"quote_char":[","]}"#)
            .unwrap_err();
        assert!(err
            .to_string()
            .contains("character ',' is configured as both delimiter and quote character"));
    }
}
