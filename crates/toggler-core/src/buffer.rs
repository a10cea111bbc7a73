//! Text buffer access.
//!
//! The toggles only ever read the buffer through [`BufferAccess`] and write through
//! [`EditApplier`], so a host can plug in its own document model. [`TextBuffer`] is the
//! in-crate implementation, backed by a [`Rope`] for O(log N) line access. It keeps LF-only
//! text internally and hands the document's own [`LineEnding`] back from [`TextBuffer::text`].

use ropey::Rope;

use crate::error::{ToggleError, ToggleResult};
use crate::line_ending::LineEnding;
use crate::position::{Position, Selection};

/// Read access to a line-addressable document.
pub trait BufferAccess {
    /// Number of lines. An empty document has one (empty) line.
    fn line_count(&self) -> usize;

    /// Text of `line` without its line terminator. Out-of-range lines read as empty.
    fn line_text(&self, line: usize) -> String;

    /// Text between two positions (end exclusive), joined with `\n`.
    fn text_in(&self, start: Position, end: Position) -> String {
        if end <= start {
            return String::new();
        }
        let mut out = String::new();
        for line in start.line..=end.line {
            let text = self.line_text(line);
            let from = if line == start.line { start.column } else { 0 };
            let to = if line == end.line {
                end.column
            } else {
                usize::MAX
            };
            out.extend(text.chars().skip(from).take(to.saturating_sub(from)));
            if line != end.line {
                out.push('\n');
            }
        }
        out
    }

    /// Column of the first non-whitespace character, or the line length for blank lines.
    fn first_non_whitespace_column(&self, line: usize) -> usize {
        let text = self.line_text(line);
        text.chars()
            .position(|c| !c.is_whitespace())
            .unwrap_or_else(|| text.chars().count())
    }

    /// Length of `line` in characters.
    fn line_len(&self, line: usize) -> usize {
        self.line_text(line).chars().count()
    }

    /// Returns `true` if `line` is empty or whitespace only.
    fn is_blank_line(&self, line: usize) -> bool {
        self.line_text(line).trim().is_empty()
    }

    /// Text covered by `selection`.
    fn selection_text(&self, selection: &Selection) -> String {
        self.text_in(selection.start, selection.end)
    }
}

/// Replace the text between `start` and `end` with `text`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replacement {
    /// Inclusive start.
    pub start: Position,
    /// Exclusive end.
    pub end: Position,
    /// New text.
    pub text: String,
}

impl Replacement {
    /// Create a replacement for the given range.
    pub fn new(start: Position, end: Position, text: impl Into<String>) -> Self {
        Self {
            start,
            end,
            text: text.into(),
        }
    }

    /// Replacement covering `selection`.
    pub fn of_selection(selection: &Selection, text: impl Into<String>) -> Self {
        Self::new(selection.start, selection.end, text)
    }
}

/// Write access to a document.
pub trait EditApplier {
    /// Apply every replacement or none of them.
    ///
    /// Ranges refer to the document as it was before the batch.
    fn apply_replacements(&mut self, replacements: &[Replacement]) -> ToggleResult<()>;

    /// Replace the current selections.
    fn set_selections(&mut self, selections: Vec<Selection>);
}

/// In-memory document plus its selections.
#[derive(Debug, Clone)]
pub struct TextBuffer {
    rope: Rope,
    line_ending: LineEnding,
    selections: Vec<Selection>,
}

impl TextBuffer {
    /// Create a buffer holding `text` with a single cursor at the start.
    pub fn new(text: &str) -> Self {
        Self {
            rope: Rope::from_str(&LineEnding::normalize(text)),
            line_ending: LineEnding::detect_in_text(text),
            selections: vec![Selection::caret(Position::default())],
        }
    }

    /// Create an empty buffer.
    pub fn empty() -> Self {
        Self::new("")
    }

    /// Full document text, written with the document's line ending.
    pub fn text(&self) -> String {
        self.line_ending.apply_to_text(&self.rope.to_string())
    }

    /// Line ending detected when the buffer was created.
    pub fn line_ending(&self) -> LineEnding {
        self.line_ending
    }

    /// Number of characters in the document.
    pub fn char_count(&self) -> usize {
        self.rope.len_chars()
    }

    /// Current selections (never empty).
    pub fn selections(&self) -> &[Selection] {
        &self.selections
    }

    /// The first selection.
    pub fn primary_selection(&self) -> Selection {
        self.selections[0]
    }

    /// Clamp `pos` to the document.
    pub fn clamp_position(&self, pos: Position) -> Position {
        let last_line = self.line_count().saturating_sub(1);
        let line = pos.line.min(last_line);
        Position::new(line, pos.column.min(self.line_len(line)))
    }

    /// Convert a position into a character offset, clamping out-of-range positions.
    pub fn position_to_char(&self, pos: Position) -> usize {
        let pos = self.clamp_position(pos);
        self.rope.line_to_char(pos.line) + pos.column
    }

    /// Convert a character offset into a position.
    pub fn char_to_position(&self, offset: usize) -> Position {
        let offset = offset.min(self.rope.len_chars());
        let line = self.rope.char_to_line(offset);
        let column = offset - self.rope.line_to_char(line);
        Position::new(line, column.min(self.line_len(line)))
    }

    fn line_slice_len_without_terminator(&self, line: usize) -> usize {
        let slice = self.rope.line(line);
        let len = slice.len_chars();
        if len > 0 && slice.char(len - 1) == '\n' {
            len - 1
        } else {
            len
        }
    }
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::empty()
    }
}

impl BufferAccess for TextBuffer {
    fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    fn line_text(&self, line: usize) -> String {
        if line >= self.rope.len_lines() {
            return String::new();
        }
        let len = self.line_slice_len_without_terminator(line);
        self.rope.line(line).slice(..len).to_string()
    }

    fn text_in(&self, start: Position, end: Position) -> String {
        let from = self.position_to_char(start);
        let to = self.position_to_char(end);
        if to <= from {
            return String::new();
        }
        self.rope.slice(from..to).to_string()
    }

    fn line_len(&self, line: usize) -> usize {
        if line >= self.rope.len_lines() {
            return 0;
        }
        self.line_slice_len_without_terminator(line)
    }
}

impl EditApplier for TextBuffer {
    fn apply_replacements(&mut self, replacements: &[Replacement]) -> ToggleResult<()> {
        let mut ranges: Vec<(usize, usize, String)> = Vec::with_capacity(replacements.len());
        for replacement in replacements {
            if replacement.end < replacement.start {
                return Err(ToggleError::unexpected(format!(
                    "Invalid replacement range: {:?}..{:?}",
                    replacement.start, replacement.end
                )));
            }
            ranges.push((
                self.position_to_char(replacement.start),
                self.position_to_char(replacement.end),
                LineEnding::normalize(&replacement.text),
            ));
        }
        ranges.sort_by_key(|(start, end, _)| (*start, *end));

        if ranges.windows(2).any(|pair| pair[1].0 < pair[0].1) {
            return Err(ToggleError::unexpected("Overlapping replacements in one edit"));
        }

        for (start, end, text) in ranges.into_iter().rev() {
            self.rope.remove(start..end);
            self.rope.insert(start, &text);
        }
        Ok(())
    }

    fn set_selections(&mut self, selections: Vec<Selection>) {
        if selections.is_empty() {
            self.selections = vec![Selection::caret(Position::default())];
        } else {
            self.selections = selections
                .into_iter()
                .map(|sel| {
                    let anchor = self.clamp_position(sel.anchor());
                    let active = self.clamp_position(sel.active());
                    Selection::from_anchor(anchor, active)
                })
                .collect();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_text_strips_terminators() {
        let buffer = TextBuffer::new("first\r\nsecond\nthird");
        assert_eq!(buffer.line_count(), 3);
        assert_eq!(buffer.line_text(0), "first");
        assert_eq!(buffer.line_text(1), "second");
        assert_eq!(buffer.line_text(2), "third");
        assert_eq!(buffer.line_text(9), "");
    }

    #[test]
    fn test_crlf_is_restored_on_output() {
        let mut buffer = TextBuffer::new("one\r\ntwo\r\n");
        assert_eq!(buffer.line_ending(), LineEnding::Crlf);
        assert_eq!(buffer.line_len(0), 3);
        assert_eq!(
            buffer.text_in(Position::new(0, 0), Position::new(1, 3)),
            "one\ntwo"
        );

        buffer
            .apply_replacements(&[Replacement::new(
                Position::new(0, 3),
                Position::new(0, 3),
                "\nand a half\r\n",
            )])
            .unwrap();
        assert_eq!(buffer.text(), "one\r\nand a half\r\n\r\ntwo\r\n");
        assert_eq!(buffer.line_count(), 5);
    }

    #[test]
    fn test_trailing_newline_adds_empty_line() {
        let buffer = TextBuffer::new("a\n");
        assert_eq!(buffer.line_count(), 2);
        assert_eq!(buffer.line_text(1), "");
    }

    #[test]
    fn test_text_in_spans_lines() {
        let buffer = TextBuffer::new("abc\ndef\nghi");
        let text = buffer.text_in(Position::new(0, 1), Position::new(2, 2));
        assert_eq!(text, "bc\ndef\ngh");
    }

    #[test]
    fn test_first_non_whitespace_column() {
        let buffer = TextBuffer::new("    indented\n   \n\tx");
        assert_eq!(buffer.first_non_whitespace_column(0), 4);
        assert_eq!(buffer.first_non_whitespace_column(1), 3);
        assert_eq!(buffer.first_non_whitespace_column(2), 1);
        assert!(buffer.is_blank_line(1));
    }

    #[test]
    fn test_apply_replacements_uses_original_coordinates() {
        let mut buffer = TextBuffer::new("one two three");
        buffer
            .apply_replacements(&[
                Replacement::new(Position::new(0, 8), Position::new(0, 13), "3"),
                Replacement::new(Position::new(0, 0), Position::new(0, 3), "1"),
            ])
            .unwrap();
        assert_eq!(buffer.text(), "1 two 3");
    }

    #[test]
    fn test_overlapping_replacements_are_rejected_without_changes() {
        let mut buffer = TextBuffer::new("one two three");
        let err = buffer
            .apply_replacements(&[
                Replacement::new(Position::new(0, 0), Position::new(0, 5), "x"),
                Replacement::new(Position::new(0, 4), Position::new(0, 7), "y"),
            ])
            .unwrap_err();
        assert!(matches!(err, ToggleError::Unexpected(_)));
        assert_eq!(buffer.text(), "one two three");
    }

    #[test]
    fn test_char_position_roundtrip() {
        let buffer = TextBuffer::new("héllo\nwörld");
        let pos = Position::new(1, 2);
        let offset = buffer.position_to_char(pos);
        assert_eq!(offset, 8);
        assert_eq!(buffer.char_to_position(offset), pos);
    }

    #[test]
    fn test_set_selections_clamps() {
        let mut buffer = TextBuffer::new("ab\ncd");
        buffer.set_selections(vec![Selection::caret(Position::new(5, 5))]);
        assert_eq!(buffer.primary_selection(), Selection::caret(Position::new(1, 2)));
    }
}
