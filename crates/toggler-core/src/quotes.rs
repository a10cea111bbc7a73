//! Quote style toggle.
//!
//! Every selection resolves to one [`QuoteMatch`]: the quoted string around a cursor, the
//! word under a cursor, or the highlighted text. The first match's quote character decides the
//! next character for all of them, so multi-cursor edits stay consistent.

use tracing::debug;

use crate::buffer::{BufferAccess, Replacement};
use crate::error::{ToggleError, ToggleResult, messages};
use crate::lexer::{self, ColumnRange, QuoteScanner};
use crate::position::{Position, Selection};

const NOT_IN_QUOTES: &str = "Cursor must be located within a properly-quoted string or unquoted word! If a backtick string, it cannot contain templating.";

/// A quoted (or quotable) span on a single line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteMatch {
    /// Start of the span, including the opening quote.
    pub start: Position,
    /// End of the span, including the closing quote.
    pub end: Position,
    /// The delimiting quote, or `None` for unquoted text.
    pub quote: Option<char>,
    /// Text between the quotes.
    pub inner_text: String,
    /// Whether the span may be toggled to the unquoted form.
    pub allow_unquoted: bool,
}

impl QuoteMatch {
    /// Text that replaces this span when switching to `new_quote`.
    pub fn replacement_text(&self, new_quote: Option<char>) -> String {
        let mut inner = self.inner_text.clone();
        if new_quote != self.quote {
            if let Some(new) = new_quote {
                inner = inner.replace(new, &format!("\\{new}"));
            }
            if let Some(old) = self.quote {
                inner = inner.replace(&format!("\\{old}"), &old.to_string());
            }
        }
        match new_quote {
            Some(q) => format!("{q}{inner}{q}"),
            None => inner,
        }
    }
}

/// Validate the configured quote characters.
pub fn parse_quote_chars(configured: &[String]) -> ToggleResult<Vec<char>> {
    configured
        .iter()
        .map(|s| {
            let mut chars = s.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Ok(c),
                _ => Err(lexer::invalid_quote_chars()),
            }
        })
        .collect()
}

/// Resolve the span a selection refers to.
pub fn find_quote_match<B: BufferAccess + ?Sized>(
    buffer: &B,
    selection: &Selection,
    scanner: &QuoteScanner,
    word: &regex::Regex,
) -> ToggleResult<QuoteMatch> {
    if selection.is_highlighted() {
        if selection.is_multi_line() {
            return Err(ToggleError::user(messages::MULTI_LINE_SELECTION));
        }
        let text = buffer.selection_text(selection);
        let quote = scanner.wrapping_quote(&text);
        let inner_text = match quote {
            Some(_) => {
                let len = text.chars().count();
                text.chars().skip(1).take(len - 2).collect()
            }
            None => text,
        };
        return Ok(QuoteMatch {
            start: selection.start,
            end: selection.end,
            quote,
            inner_text,
            allow_unquoted: true,
        });
    }

    let line = selection.start.line;
    let line_text = buffer.line_text(line);
    let cursor = selection.active().column;

    if let Some(span) = scanner
        .spans(&line_text)
        .into_iter()
        .find(|span| span.range.touches(cursor))
    {
        let inner_range = ColumnRange {
            start: span.range.start + 1,
            end: span.range.end - 1,
        };
        let inner_text = lexer::slice_columns(&line_text, inner_range);
        return Ok(QuoteMatch {
            start: Position::new(line, span.range.start),
            end: Position::new(line, span.range.end),
            quote: Some(span.quote),
            allow_unquoted: lexer::is_word(&inner_text, word),
            inner_text,
        });
    }

    let range = lexer::word_range_at(&line_text, cursor, word)
        .ok_or_else(|| ToggleError::user(NOT_IN_QUOTES))?;
    Ok(QuoteMatch {
        start: Position::new(line, range.start),
        end: Position::new(line, range.end),
        quote: None,
        inner_text: lexer::slice_columns(&line_text, range),
        allow_unquoted: true,
    })
}

/// Compute the replacements that move every selection to the next quote character.
pub fn toggle_quotes<B: BufferAccess + ?Sized>(
    buffer: &B,
    selections: &[Selection],
    quote_chars: &[String],
) -> ToggleResult<Vec<Replacement>> {
    let chars = parse_quote_chars(quote_chars)?;
    let scanner = QuoteScanner::new(&chars)?;
    let word = lexer::word_pattern(&[])?;

    let matches = selections
        .iter()
        .map(|selection| find_quote_match(buffer, selection, &scanner, &word))
        .collect::<ToggleResult<Vec<_>>>()?;
    let first = matches
        .first()
        .ok_or_else(|| ToggleError::unexpected(messages::NO_SELECTIONS))?;

    let mut cycle: Vec<Option<char>> = chars.into_iter().map(Some).collect();
    if matches.iter().all(|m| m.allow_unquoted) {
        cycle.push(None);
    }
    let next = match cycle.iter().position(|q| *q == first.quote) {
        Some(index) => cycle[(index + 1) % cycle.len()],
        None => cycle[0],
    };
    debug!(current = ?first.quote, ?next, count = matches.len(), "toggling quotes");

    Ok(matches
        .iter()
        .map(|m| Replacement::new(m.start, m.end, m.replacement_text(next)))
        .collect())
}
