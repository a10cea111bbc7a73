//! Line ending handling.
//!
//! [`TextBuffer`](crate::TextBuffer) stores LF-only text so every toggle can split and join on
//! `'\n'`. The document's own line ending is detected on load and restored when the text is read
//! back out.

/// Newline sequence a document is written with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineEnding {
    /// Unix-style LF (`'\n'`).
    #[default]
    Lf,
    /// Windows-style CRLF (`"\r\n"`).
    Crlf,
}

impl LineEnding {
    /// Any CRLF in `text` makes the document CRLF.
    pub fn detect_in_text(text: &str) -> Self {
        if text.contains("\r\n") {
            Self::Crlf
        } else {
            Self::Lf
        }
    }

    /// Collapse every `"\r\n"` to `'\n'`.
    pub fn normalize(text: &str) -> String {
        text.replace("\r\n", "\n")
    }

    /// Convert LF-normalized text to this line ending.
    pub fn apply_to_text(self, text: &str) -> String {
        match self {
            Self::Lf => text.to_string(),
            Self::Crlf => text.replace('\n', "\r\n"),
        }
    }

    /// The newline sequence itself.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Lf => "\n",
            Self::Crlf => "\r\n",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect() {
        assert_eq!(LineEnding::detect_in_text("a\nb"), LineEnding::Lf);
        assert_eq!(LineEnding::detect_in_text("a\r\nb\nc"), LineEnding::Crlf);
        assert_eq!(LineEnding::detect_in_text(""), LineEnding::Lf);
    }

    #[test]
    fn test_normalize_then_apply_round_trips() {
        let text = "one\r\ntwo\r\n";
        let normalized = LineEnding::normalize(text);
        assert_eq!(normalized, "one\ntwo\n");
        assert_eq!(LineEnding::Crlf.apply_to_text(&normalized), text);
        assert_eq!(LineEnding::Lf.apply_to_text(&normalized), normalized);
    }
}
