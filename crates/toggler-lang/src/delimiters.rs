//! Derived comment delimiter forms.
//!
//! A language declares raw tokens (`//`, `/*`, `*/`). Toggling needs three views of them:
//!
//! - `standard`: the raw tokens, for matching text exactly
//! - `display`: what gets written back into the buffer (`// `, `/**`, ` * `, ` */`)
//! - `regex`: escaped patterns used when probing lines, with optional stars so that both
//!   `/*` and `/**` style blocks are recognised

use crate::{CommentTokens, LanguageError};

/// One variant (standard, display or regex) of a language's comment delimiters.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DelimiterSet {
    /// Line comment prefix.
    pub line: String,
    /// First line of a block comment.
    pub block_start: String,
    /// Prefix of every content line inside a block comment.
    pub block_middle: String,
    /// Last line of a block comment.
    pub block_end: String,
}

/// Comment delimiters for one language, in every form the comment toggle needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DelimiterConfig {
    /// Raw tokens.
    pub standard: DelimiterSet,
    /// Tokens as written when rendering a comment.
    pub display: DelimiterSet,
    /// Escaped regex fragments used when matching lines.
    pub regex: DelimiterSet,
}

impl DelimiterConfig {
    /// Build the delimiter forms from a line token and an optional block pair.
    ///
    /// C-style `/* */` blocks get special treatment: they render as a JSDoc-like
    /// `/**` / ` * ` / ` */` block and match with or without the extra stars.
    pub fn new(line: &str, block: Option<(&str, &str)>) -> Self {
        let escaped_line = regex::escape(line);
        let display_line = format!("{line} ");

        let Some((open, close)) = block.filter(|(open, _)| !open.is_empty()) else {
            return Self {
                standard: DelimiterSet {
                    line: line.to_string(),
                    ..DelimiterSet::default()
                },
                display: DelimiterSet {
                    line: display_line,
                    ..DelimiterSet::default()
                },
                regex: DelimiterSet {
                    line: escaped_line,
                    ..DelimiterSet::default()
                },
            };
        };

        if open == "/*" {
            return Self {
                standard: DelimiterSet {
                    line: line.to_string(),
                    block_start: open.to_string(),
                    block_middle: "*".to_string(),
                    block_end: close.to_string(),
                },
                display: DelimiterSet {
                    line: display_line,
                    block_start: "/**".to_string(),
                    block_middle: " * ".to_string(),
                    block_end: " */".to_string(),
                },
                regex: DelimiterSet {
                    line: escaped_line,
                    block_start: r"/\*\*?".to_string(),
                    block_middle: r"\*?".to_string(),
                    block_end: r"\*/".to_string(),
                },
            };
        }

        Self {
            standard: DelimiterSet {
                line: line.to_string(),
                block_start: open.to_string(),
                block_middle: String::new(),
                block_end: close.to_string(),
            },
            display: DelimiterSet {
                line: display_line,
                block_start: open.to_string(),
                block_middle: String::new(),
                block_end: close.to_string(),
            },
            regex: DelimiterSet {
                line: escaped_line,
                block_start: regex::escape(open),
                block_middle: String::new(),
                block_end: regex::escape(close),
            },
        }
    }

    /// Derive the delimiter forms for `language` from its raw tokens.
    pub fn from_tokens(language: &str, tokens: &CommentTokens) -> Result<Self, LanguageError> {
        let line = tokens
            .line
            .as_deref()
            .filter(|line| !line.is_empty())
            .ok_or_else(|| LanguageError::MissingLineComment(language.to_string()))?;
        Ok(Self::new(line, tokens.block_pair()))
    }

    /// The `//` + `/* */` configuration used when a language cannot be resolved.
    pub fn c_style() -> Self {
        Self::new("//", Some(("/*", "*/")))
    }

    /// Returns `true` if a block comment form is available.
    pub fn has_block(&self) -> bool {
        !self.standard.block_start.is_empty()
    }
}

impl Default for DelimiterConfig {
    fn default() -> Self {
        Self::c_style()
    }
}
