#![warn(missing_docs)]
//! `toggler-lang` - data-driven comment delimiter helpers for `toggler-core`.
//!
//! This crate intentionally stays lightweight and does **not** know anything about buffers,
//! selections or toggling. It provides:
//!
//! - [`CommentTokens`]: the raw line/block comment tokens a language declares
//! - [`DelimiterConfig`]: the three derived forms (`standard`, `display`, `regex`) the comment
//!   toggle consumes
//! - [`LanguageRegistry`]: a built-in table of common languages, extensible with VS Code style
//!   `language-configuration.json` documents

mod delimiters;
mod registry;

pub use delimiters::{DelimiterConfig, DelimiterSet};
pub use registry::{
    CommentsSection, LanguageCommentSource, LanguageConfiguration, LanguageRegistry,
    LineCommentToken,
};

use thiserror::Error;

/// Language id used when nothing better is known.
pub const FALLBACK_LANGUAGE: &str = "javascript";

/// Raw comment tokens for a given language.
///
/// The toggle kernel derives a [`DelimiterConfig`] from these.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommentTokens {
    /// Line comment token (e.g. `//`, `#`).
    pub line: Option<String>,
    /// Block comment start token (e.g. `/*`).
    pub block_start: Option<String>,
    /// Block comment end token (e.g. `*/`).
    pub block_end: Option<String>,
}

impl CommentTokens {
    /// Create tokens for a language that supports only line comments.
    pub fn line(token: impl Into<String>) -> Self {
        Self {
            line: Some(token.into()),
            block_start: None,
            block_end: None,
        }
    }

    /// Create tokens for a language that supports both line and block comments.
    pub fn line_and_block(
        line: impl Into<String>,
        block_start: impl Into<String>,
        block_end: impl Into<String>,
    ) -> Self {
        Self {
            line: Some(line.into()),
            block_start: Some(block_start.into()),
            block_end: Some(block_end.into()),
        }
    }

    /// Returns `true` if a line comment token is configured.
    pub fn has_line(&self) -> bool {
        self.line.as_deref().is_some_and(|s| !s.is_empty())
    }

    /// Returns `true` if both block comment tokens are configured.
    pub fn has_block(&self) -> bool {
        self.block_start.as_deref().is_some_and(|s| !s.is_empty())
            && self.block_end.as_deref().is_some_and(|s| !s.is_empty())
    }

    /// Returns the block token pair, if both halves are configured.
    pub fn block_pair(&self) -> Option<(&str, &str)> {
        if !self.has_block() {
            return None;
        }
        Some((self.block_start.as_deref()?, self.block_end.as_deref()?))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
/// Errors produced while looking up or parsing language comment metadata.
pub enum LanguageError {
    #[error("Could not find comment metadata for language '{0}'")]
    /// The language id is not registered.
    UnknownLanguage(String),

    #[error("Language '{0}' does not declare a line comment token")]
    /// The language has no usable line comment token.
    MissingLineComment(String),

    #[error("Could not parse the configuration for {language}: {message}")]
    /// A `language-configuration.json` document failed to parse.
    InvalidConfiguration {
        /// The language id the document was registered for.
        language: String,
        /// The parser error message.
        message: String,
    },
}
