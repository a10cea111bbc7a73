//! Language id -> comment token lookup.

use std::collections::HashMap;

use serde::Deserialize;

use crate::{CommentTokens, LanguageError};

/// Something that can tell which comment tokens a language uses.
///
/// Hosts that already carry per-language metadata implement this directly; everyone else can
/// use [`LanguageRegistry`].
pub trait LanguageCommentSource {
    /// Look up the comment tokens declared for `language_id`.
    fn comment_tokens(&self, language_id: &str) -> Result<CommentTokens, LanguageError>;
}

/// The subset of a VS Code style `language-configuration.json` that matters here.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LanguageConfiguration {
    /// The `comments` section.
    #[serde(default)]
    pub comments: Option<CommentsSection>,
}

/// The `comments` section of a language configuration document.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentsSection {
    /// Line comment token, either a bare string or `{ "comment": "//" }`.
    #[serde(default)]
    pub line_comment: Option<LineCommentToken>,
    /// Block comment token pair.
    #[serde(default)]
    pub block_comment: Option<(String, String)>,
}

/// The two shapes a `lineComment` entry can take.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum LineCommentToken {
    /// `"lineComment": "//"`
    Plain(String),
    /// `"lineComment": { "comment": "//", "noIndent": false }`
    Detailed {
        /// The token itself.
        comment: String,
    },
}

impl LineCommentToken {
    fn token(&self) -> &str {
        match self {
            Self::Plain(token) => token,
            Self::Detailed { comment } => comment,
        }
    }
}

impl LanguageConfiguration {
    /// Parse a `language-configuration.json` document.
    ///
    /// These files are JSONC in the wild (comments, trailing commas), so JSON5 is used.
    pub fn from_json(language: &str, text: &str) -> Result<Self, LanguageError> {
        json5::from_str(text).map_err(|err| LanguageError::InvalidConfiguration {
            language: language.to_string(),
            message: err.to_string(),
        })
    }

    /// Extract the comment tokens declared by this document.
    pub fn comment_tokens(&self) -> CommentTokens {
        let Some(comments) = &self.comments else {
            return CommentTokens::default();
        };
        let (block_start, block_end) = match &comments.block_comment {
            Some((open, close)) => (Some(open.clone()), Some(close.clone())),
            None => (None, None),
        };
        CommentTokens {
            line: comments
                .line_comment
                .as_ref()
                .map(|line| line.token().to_string()),
            block_start,
            block_end,
        }
    }
}

/// (language id, line token, block pair)
type BuiltinEntry = (&'static str, &'static str, Option<(&'static str, &'static str)>);

const C_BLOCK: Option<(&str, &str)> = Some(("/*", "*/"));

const BUILTIN_LANGUAGES: &[BuiltinEntry] = &[
    ("c", "//", C_BLOCK),
    ("cpp", "//", C_BLOCK),
    ("csharp", "//", C_BLOCK),
    ("dart", "//", C_BLOCK),
    ("go", "//", C_BLOCK),
    ("groovy", "//", C_BLOCK),
    ("haskell", "--", Some(("{-", "-}"))),
    ("java", "//", C_BLOCK),
    ("javascript", "//", C_BLOCK),
    ("javascriptreact", "//", C_BLOCK),
    ("jsonc", "//", C_BLOCK),
    ("kotlin", "//", C_BLOCK),
    ("lua", "--", Some(("--[[", "]]"))),
    ("makefile", "#", None),
    ("perl", "#", None),
    ("php", "//", C_BLOCK),
    ("powershell", "#", Some(("<#", "#>"))),
    ("python", "#", Some(("\"\"\"", "\"\"\""))),
    ("r", "#", None),
    ("ruby", "#", Some(("=begin", "=end"))),
    ("rust", "//", C_BLOCK),
    ("scala", "//", C_BLOCK),
    ("scss", "//", C_BLOCK),
    ("shellscript", "#", None),
    ("sql", "--", C_BLOCK),
    ("swift", "//", C_BLOCK),
    ("toml", "#", None),
    ("typescript", "//", C_BLOCK),
    ("typescriptreact", "//", C_BLOCK),
    ("yaml", "#", None),
];

/// A table of language ids and their comment tokens.
#[derive(Debug, Clone, Default)]
pub struct LanguageRegistry {
    languages: HashMap<String, CommentTokens>,
}

impl LanguageRegistry {
    /// Create an empty registry.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Create a registry pre-populated with common languages.
    pub fn builtin() -> Self {
        let mut registry = Self::empty();
        for (id, line, block) in BUILTIN_LANGUAGES {
            let tokens = match block {
                Some((open, close)) => CommentTokens::line_and_block(*line, *open, *close),
                None => CommentTokens::line(*line),
            };
            registry.register(*id, tokens);
        }
        registry
    }

    /// Register (or replace) the tokens for `language_id`.
    pub fn register(&mut self, language_id: impl Into<String>, tokens: CommentTokens) {
        self.languages.insert(language_id.into(), tokens);
    }

    /// Register `language_id` from a `language-configuration.json` document.
    pub fn register_configuration_json(
        &mut self,
        language_id: &str,
        text: &str,
    ) -> Result<(), LanguageError> {
        let configuration = LanguageConfiguration::from_json(language_id, text)?;
        self.register(language_id, configuration.comment_tokens());
        Ok(())
    }

    /// Returns `true` if `language_id` is registered.
    pub fn contains(&self, language_id: &str) -> bool {
        self.languages.contains_key(language_id)
    }

    /// Registered language ids, sorted.
    pub fn language_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.languages.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }
}

impl LanguageCommentSource for LanguageRegistry {
    fn comment_tokens(&self, language_id: &str) -> Result<CommentTokens, LanguageError> {
        let tokens = self
            .languages
            .get(language_id)
            .ok_or_else(|| LanguageError::UnknownLanguage(language_id.to_string()))?;
        if !tokens.has_line() {
            return Err(LanguageError::MissingLineComment(language_id.to_string()));
        }
        Ok(tokens.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_ruby_tokens() {
        let registry = LanguageRegistry::builtin();
        assert_eq!(
            registry.comment_tokens("ruby").unwrap(),
            CommentTokens::line_and_block("#", "=begin", "=end")
        );
    }

    #[test]
    fn test_unknown_language() {
        let registry = LanguageRegistry::builtin();
        assert_eq!(
            registry.comment_tokens("plaintext"),
            Err(LanguageError::UnknownLanguage("plaintext".to_string()))
        );
    }

    #[test]
    fn test_register_configuration_json_accepts_jsonc() {
        let mut registry = LanguageRegistry::empty();
        registry
            .register_configuration_json(
                "fancy",
                r##"{
                    // VS Code ships these files with comments
                    "comments": {
                        "lineComment": { "comment": ";;", "noIndent": false },
                        "blockComment": ["#|", "|#"],
                    },
                    "brackets": [["(", ")"]],
                }"##,
            )
            .unwrap();
        assert_eq!(
            registry.comment_tokens("fancy").unwrap(),
            CommentTokens::line_and_block(";;", "#|", "|#")
        );
    }

    #[test]
    fn test_configuration_without_line_comment_is_rejected() {
        let mut registry = LanguageRegistry::empty();
        registry
            .register_configuration_json(
                "html",
                r#"{ "comments": { "blockComment": ["<!--", "-->"] } }"#,
            )
            .unwrap();
        assert_eq!(
            registry.comment_tokens("html"),
            Err(LanguageError::MissingLineComment("html".to_string()))
        );
    }

    #[test]
    fn test_invalid_configuration_json() {
        let mut registry = LanguageRegistry::empty();
        let err = registry
            .register_configuration_json("broken", "{ comments: ")
            .unwrap_err();
        assert!(matches!(err, LanguageError::InvalidConfiguration { .. }));
    }
}
