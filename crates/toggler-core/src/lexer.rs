//! Word and quoted-span scanning.
//!
//! Columns coming in and going out are character columns. Both regex engines report byte
//! offsets, so every match is converted with [`char_column`] before it leaves this module.

use regex::Regex;

use crate::buffer::BufferAccess;
use crate::error::{ToggleError, ToggleResult, messages};
use crate::position::{Position, Selection};

/// POSIX word class shared by the word patterns.
pub const WORD_CLASS: &str = "[:word:]";

/// A half-open `[start, end)` range of character columns on a single line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnRange {
    /// First column.
    pub start: usize,
    /// One past the last column.
    pub end: usize,
}

impl ColumnRange {
    /// Returns `true` if `column` lies inside the range or on either boundary.
    pub fn touches(&self, column: usize) -> bool {
        self.start <= column && column <= self.end
    }
}

/// Convert a byte offset into `text` into a character column.
pub fn char_column(text: &str, byte_offset: usize) -> usize {
    text[..byte_offset.min(text.len())].chars().count()
}

/// Build `[[:word:]<extra>]+`, escaping every extra character.
///
/// Each extra must be exactly one character; the first offender is reported.
pub fn word_pattern(extra_chars: &[String]) -> ToggleResult<Regex> {
    let mut class = String::from(WORD_CLASS);
    for extra in extra_chars {
        if extra.chars().count() != 1 {
            return Err(ToggleError::user(format!(
                "All configured extra word characters must have length 1! The following is invalid: '{extra}'"
            )));
        }
        class.push_str(&regex::escape(extra));
    }
    Ok(Regex::new(&format!("[{class}]+"))?)
}

/// Find the match of `pattern` on `line_text` that touches `column`.
///
/// A cursor sitting directly before or after a word still selects it.
pub fn word_range_at(line_text: &str, column: usize, pattern: &Regex) -> Option<ColumnRange> {
    pattern
        .find_iter(line_text)
        .map(|m| ColumnRange {
            start: char_column(line_text, m.start()),
            end: char_column(line_text, m.end()),
        })
        .find(|range| range.touches(column))
}

/// The highlighted selection itself, or the `pattern` word under a cursor.
pub fn selection_or_word<B: BufferAccess + ?Sized>(
    buffer: &B,
    selection: &Selection,
    pattern: &Regex,
) -> ToggleResult<Selection> {
    if selection.is_highlighted() {
        return Ok(*selection);
    }
    let active = selection.active();
    let range = word_range_at(&buffer.line_text(active.line), active.column, pattern)
        .ok_or_else(|| ToggleError::user(messages::CURSOR_NOT_IN_WORD))?;
    Ok(Selection::new(
        Position::new(active.line, range.start),
        Position::new(active.line, range.end),
    ))
}

/// Returns `true` if `pattern` matches the whole of `text`.
pub fn is_word(text: &str, pattern: &Regex) -> bool {
    pattern
        .find(text)
        .is_some_and(|m| m.start() == 0 && m.end() == text.len())
}

/// Slice `text` by character columns.
pub fn slice_columns(text: &str, range: ColumnRange) -> String {
    text.chars()
        .skip(range.start)
        .take(range.end.saturating_sub(range.start))
        .collect()
}

/// A quoted string found on a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuotedSpan {
    /// Columns of the span, quotes included.
    pub range: ColumnRange,
    /// The quote character delimiting the span.
    pub quote: char,
}

/// Scanner for quoted strings, built from the configured quote characters.
///
/// Standard quotes match up to the next unescaped occurrence of the same character. Backtick
/// strings additionally refuse `${` so template literals with substitutions are never treated
/// as plain strings.
pub struct QuoteScanner {
    regex: onig::Regex,
    quote_chars: Vec<char>,
}

const REGEX_SPECIALS: &[char] = &[
    '^', '$', '\\', '.', '*', '+', '?', '(', ')', '[', ']', '{', '}', '|',
];

impl QuoteScanner {
    /// Compile the scanner for `quote_chars`.
    pub fn new(quote_chars: &[char]) -> ToggleResult<Self> {
        if quote_chars.is_empty() || quote_chars.iter().any(|c| REGEX_SPECIALS.contains(c)) {
            return Err(invalid_quote_chars());
        }

        let standard: String = quote_chars
            .iter()
            .filter(|c| **c != '`')
            .map(|c| escape_class_char(*c))
            .collect();

        let mut alternatives = Vec::new();
        if !standard.is_empty() {
            alternatives.push(format!(r"(?<!\\)([{standard}])(?:[^\\]|\\.)*?\1"));
        }
        if quote_chars.contains(&'`') {
            alternatives.push(r"(?<!\\)`(?:[^`\\{]|\\.|(?<!\$)\{)*?`".to_string());
        }

        Ok(Self {
            regex: onig::Regex::new(&alternatives.join("|"))?,
            quote_chars: quote_chars.to_vec(),
        })
    }

    /// Every quoted span on `line_text`, left to right.
    pub fn spans(&self, line_text: &str) -> Vec<QuotedSpan> {
        self.regex
            .captures_iter(line_text)
            .filter_map(|caps| {
                let (start, end) = caps.pos(0)?;
                let quote = match caps.at(1) {
                    Some(quote) => quote.chars().next()?,
                    None => '`',
                };
                Some(QuotedSpan {
                    range: ColumnRange {
                        start: char_column(line_text, start),
                        end: char_column(line_text, end),
                    },
                    quote,
                })
            })
            .collect()
    }

    /// If `text` is wrapped in one configured quote character, return it.
    pub fn wrapping_quote(&self, text: &str) -> Option<char> {
        let first = text.chars().next().filter(|c| self.quote_chars.contains(c))?;
        (text.chars().count() >= 2 && text.ends_with(first)).then_some(first)
    }
}

fn escape_class_char(c: char) -> String {
    if c.is_ascii_punctuation() {
        format!("\\{c}")
    } else {
        c.to_string()
    }
}

pub(crate) fn invalid_quote_chars() -> ToggleError {
    ToggleError::user(
        "All configured quote characters must be strings of length 1 and cannot be special regex characters!",
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scanner() -> QuoteScanner {
        QuoteScanner::new(&['"', '\'', '`']).unwrap()
    }

    #[test]
    fn test_word_range_includes_boundaries() {
        let pattern = word_pattern(&[]).unwrap();
        let line = "let someWord = 1;";
        let expected = Some(ColumnRange { start: 4, end: 12 });
        assert_eq!(word_range_at(line, 4, &pattern), expected);
        assert_eq!(word_range_at(line, 12, &pattern), expected);
        assert_eq!(word_range_at(line, 13, &pattern), None);
    }

    #[test]
    fn test_word_pattern_with_extra_chars() {
        let pattern = word_pattern(&["-".to_string(), ".".to_string()]).unwrap();
        let range = word_range_at("a some-thing.x b", 5, &pattern).unwrap();
        assert_eq!(slice_columns("a some-thing.x b", range), "some-thing.x");
    }

    #[test]
    fn test_word_pattern_rejects_long_extra() {
        let err = word_pattern(&["ab".to_string()]).unwrap_err();
        assert_eq!(
            err,
            ToggleError::user(
                "All configured extra word characters must have length 1! The following is invalid: 'ab'"
            )
        );
    }

    #[test]
    fn test_word_range_uses_char_columns() {
        let pattern = word_pattern(&[]).unwrap();
        let line = "é = value";
        assert_eq!(
            word_range_at(line, 5, &pattern),
            Some(ColumnRange { start: 4, end: 9 })
        );
    }

    #[test]
    fn test_spans_skip_escaped_quotes() {
        let spans = scanner().spans(r#"x = "a \" b" + 'c'"#);
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0].quote, '"');
        assert_eq!(spans[0].range, ColumnRange { start: 4, end: 12 });
        assert_eq!(spans[1].quote, '\'');
    }

    #[test]
    fn test_backtick_with_template_is_not_a_span() {
        assert!(scanner().spans("`hello ${name}`").is_empty());
        let spans = scanner().spans("`hello {name}`");
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].quote, '`');
    }

    #[test]
    fn test_invalid_quote_chars() {
        assert_eq!(QuoteScanner::new(&['.']).err(), Some(invalid_quote_chars()));
        assert_eq!(QuoteScanner::new(&[]).err(), Some(invalid_quote_chars()));
    }

    #[test]
    fn test_wrapping_quote() {
        let scanner = scanner();
        assert_eq!(scanner.wrapping_quote("'abc'"), Some('\''));
        assert_eq!(scanner.wrapping_quote("'abc\""), None);
        assert_eq!(scanner.wrapping_quote("'"), None);
        assert_eq!(scanner.wrapping_quote("abc"), None);
    }
}
