//! Newline escaping toggle.

use tracing::debug;

use crate::buffer::{BufferAccess, Replacement};
use crate::error::{ToggleError, ToggleResult, messages};
use crate::position::Selection;

/// Join a multi-line selection into one line of literal `\n` escapes, or split a single-line
/// selection at every literal `\n`.
pub fn toggle_newlines<B: BufferAccess + ?Sized>(
    buffer: &B,
    selections: &[Selection],
) -> ToggleResult<Replacement> {
    let [selection] = selections else {
        return Err(ToggleError::user(messages::MUST_SELECT_TEXT));
    };
    if !selection.is_highlighted() {
        return Err(ToggleError::user(messages::MUST_SELECT_TEXT));
    }

    let text = buffer.selection_text(selection);
    let multi_line = selection.is_multi_line();
    debug!(multi_line, "toggling newline characters");
    let replaced = if multi_line {
        // `\r\n` is one break.
        text.replace("\r\n", "\\n").replace('\n', "\\n")
    } else {
        text.replace("\\n", "\n")
    };
    Ok(Replacement::of_selection(selection, replaced))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::TextBuffer;
    use crate::position::Position;

    #[test]
    fn test_round_trip() {
        let buffer = TextBuffer::new("one\ntwo\nthree");
        let sel = Selection::new(Position::new(0, 0), Position::new(2, 5));
        let joined = toggle_newlines(&buffer, &[sel]).unwrap();
        assert_eq!(joined.text, r"one\ntwo\nthree");

        let buffer = TextBuffer::new(r"one\ntwo\nthree");
        let sel = Selection::new(Position::new(0, 0), Position::new(0, 15));
        assert_eq!(toggle_newlines(&buffer, &[sel]).unwrap().text, "one\ntwo\nthree");
    }

    #[test]
    fn test_crlf_is_a_single_break() {
        let buffer = TextBuffer::new("a\r\nb\r\nc");
        let sel = Selection::new(Position::new(0, 0), Position::new(2, 1));
        assert_eq!(toggle_newlines(&buffer, &[sel]).unwrap().text, r"a\nb\nc");
    }

    #[test]
    fn test_requires_single_highlight() {
        let buffer = TextBuffer::new("abc");
        let caret = Selection::caret(Position::new(0, 1));
        assert_eq!(
            toggle_newlines(&buffer, &[caret]).unwrap_err(),
            ToggleError::user(messages::MUST_SELECT_TEXT)
        );
        let sel = Selection::new(Position::new(0, 0), Position::new(0, 1));
        assert!(toggle_newlines(&buffer, &[sel, sel]).is_err());
    }
}
